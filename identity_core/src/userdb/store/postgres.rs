use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::storage::{DB_TABLE_USERS, validate_postgres_table_schema};
use crate::userdb::{errors::UserError, types::User};

// PostgreSQL implementations
pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), UserError> {
    let users_table = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {users_table} (
            id TEXT PRIMARY KEY NOT NULL,
            email TEXT NOT NULL UNIQUE,
            name TEXT,
            password_hash TEXT,
            avatar TEXT,
            email_verified BOOLEAN NOT NULL DEFAULT FALSE,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(())
}

/// Validates that the users table schema matches what we expect
pub(super) async fn validate_user_tables_postgres(pool: &Pool<Postgres>) -> Result<(), UserError> {
    let users_table = DB_TABLE_USERS.as_str();

    let expected_columns = [
        ("id", "text"),
        ("email", "text"),
        ("name", "text"),
        ("password_hash", "text"),
        ("avatar", "text"),
        ("email_verified", "boolean"),
        ("is_active", "boolean"),
        ("created_at", "timestamp with time zone"),
        ("updated_at", "timestamp with time zone"),
    ];

    validate_postgres_table_schema(pool, users_table, &expected_columns, UserError::Storage).await
}

pub(super) async fn get_user_postgres(
    pool: &Pool<Postgres>,
    id: &str,
) -> Result<Option<User>, UserError> {
    let users_table = DB_TABLE_USERS.as_str();

    sqlx::query_as::<_, User>(&format!("SELECT * FROM {users_table} WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| UserError::Storage(e.to_string()))
}

pub(super) async fn get_user_by_email_postgres(
    pool: &Pool<Postgres>,
    email: &str,
) -> Result<Option<User>, UserError> {
    let users_table = DB_TABLE_USERS.as_str();

    sqlx::query_as::<_, User>(&format!("SELECT * FROM {users_table} WHERE email = $1"))
        .bind(email)
        .fetch_optional(pool)
        .await
        .map_err(|e| UserError::Storage(e.to_string()))
}

pub(super) async fn create_user_postgres(
    pool: &Pool<Postgres>,
    user: User,
) -> Result<User, UserError> {
    let users_table = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        INSERT INTO {users_table}
            (id, email, name, password_hash, avatar, email_verified, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#
    ))
    .bind(&user.id)
    .bind(&user.email)
    .bind(&user.name)
    .bind(&user.password_hash)
    .bind(&user.avatar)
    .bind(user.email_verified)
    .bind(user.is_active)
    .bind(user.created_at)
    .bind(user.updated_at)
    .execute(pool)
    .await
    .map_err(|e| match e.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => UserError::DuplicateEmail,
        _ => UserError::Storage(e.to_string()),
    })?;

    Ok(user)
}

pub(super) async fn update_user_postgres(
    pool: &Pool<Postgres>,
    user: User,
) -> Result<User, UserError> {
    let users_table = DB_TABLE_USERS.as_str();

    let updated_at = Utc::now();

    let result = sqlx::query(&format!(
        r#"
        UPDATE {users_table} SET
            email = $1,
            name = $2,
            password_hash = $3,
            avatar = $4,
            email_verified = $5,
            is_active = $6,
            updated_at = $7
        WHERE id = $8
        "#
    ))
    .bind(&user.email)
    .bind(&user.name)
    .bind(&user.password_hash)
    .bind(&user.avatar)
    .bind(user.email_verified)
    .bind(user.is_active)
    .bind(updated_at)
    .bind(&user.id)
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(UserError::NotFound);
    }

    Ok(User { updated_at, ..user })
}
