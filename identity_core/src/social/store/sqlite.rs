use chrono::{DateTime, Utc};
use sqlx::{Pool, Sqlite};

use crate::social::{errors::SocialAccountError, types::SocialAccount};
use crate::storage::{DB_TABLE_SOCIAL_ACCOUNTS, DB_TABLE_USERS, validate_sqlite_table_schema};

// SQLite implementations
pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), SocialAccountError> {
    let social_table = DB_TABLE_SOCIAL_ACCOUNTS.as_str();
    let users_table = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {social_table} (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL REFERENCES {users_table}(id) ON DELETE CASCADE,
            provider TEXT NOT NULL,
            provider_user_id TEXT NOT NULL,
            access_token TEXT,
            refresh_token TEXT,
            expires_at TIMESTAMP,
            created_at TIMESTAMP NOT NULL,
            updated_at TIMESTAMP NOT NULL,
            UNIQUE(provider, provider_user_id)
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| SocialAccountError::Storage(e.to_string()))?;

    // Index on user_id for faster lookups
    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS idx_{social_table}_user_id ON {social_table}(user_id)"
    ))
    .execute(pool)
    .await
    .map_err(|e| SocialAccountError::Storage(e.to_string()))?;

    Ok(())
}

/// Validates that the social accounts table schema matches what we expect
pub(super) async fn validate_social_account_tables_sqlite(
    pool: &Pool<Sqlite>,
) -> Result<(), SocialAccountError> {
    let social_table = DB_TABLE_SOCIAL_ACCOUNTS.as_str();

    let expected_columns = [
        ("id", "TEXT"),
        ("user_id", "TEXT"),
        ("provider", "TEXT"),
        ("provider_user_id", "TEXT"),
        ("access_token", "TEXT"),
        ("refresh_token", "TEXT"),
        ("expires_at", "TIMESTAMP"),
        ("created_at", "TIMESTAMP"),
        ("updated_at", "TIMESTAMP"),
    ];

    validate_sqlite_table_schema(
        pool,
        social_table,
        &expected_columns,
        SocialAccountError::Storage,
    )
    .await
}

pub(super) async fn get_by_provider_sqlite(
    pool: &Pool<Sqlite>,
    provider: &str,
    provider_user_id: &str,
) -> Result<Option<SocialAccount>, SocialAccountError> {
    let social_table = DB_TABLE_SOCIAL_ACCOUNTS.as_str();

    // Ensure tables exist before any operations
    create_tables_sqlite(pool).await?;

    sqlx::query_as::<_, SocialAccount>(&format!(
        r#"
        SELECT * FROM {social_table}
        WHERE provider = ? AND provider_user_id = ?
        "#
    ))
    .bind(provider)
    .bind(provider_user_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| SocialAccountError::Storage(e.to_string()))
}

pub(super) async fn create_account_sqlite(
    pool: &Pool<Sqlite>,
    account: SocialAccount,
) -> Result<SocialAccount, SocialAccountError> {
    let social_table = DB_TABLE_SOCIAL_ACCOUNTS.as_str();

    // Ensure tables exist before any operations
    create_tables_sqlite(pool).await?;

    sqlx::query(&format!(
        r#"
        INSERT INTO {social_table}
            (id, user_id, provider, provider_user_id, access_token, refresh_token,
             expires_at, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#
    ))
    .bind(&account.id)
    .bind(&account.user_id)
    .bind(&account.provider)
    .bind(&account.provider_user_id)
    .bind(&account.access_token)
    .bind(&account.refresh_token)
    .bind(account.expires_at)
    .bind(account.created_at)
    .bind(account.updated_at)
    .execute(pool)
    .await
    .map_err(|e| match e.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => SocialAccountError::DuplicateLink,
        _ => SocialAccountError::Storage(e.to_string()),
    })?;

    Ok(account)
}

pub(super) async fn update_account_sqlite(
    pool: &Pool<Sqlite>,
    id: &str,
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
) -> Result<SocialAccount, SocialAccountError> {
    let social_table = DB_TABLE_SOCIAL_ACCOUNTS.as_str();

    let updated_at = Utc::now();

    let result = sqlx::query(&format!(
        r#"
        UPDATE {social_table} SET
            access_token = ?,
            refresh_token = ?,
            expires_at = ?,
            updated_at = ?
        WHERE id = ?
        "#
    ))
    .bind(&access_token)
    .bind(&refresh_token)
    .bind(expires_at)
    .bind(updated_at)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| SocialAccountError::Storage(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(SocialAccountError::NotFound);
    }

    sqlx::query_as::<_, SocialAccount>(&format!("SELECT * FROM {social_table} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| SocialAccountError::Storage(e.to_string()))?
        .ok_or(SocialAccountError::NotFound)
}
