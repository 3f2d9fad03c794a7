use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::social::{errors::SocialAccountError, types::SocialAccount};
use crate::storage::{DB_TABLE_SOCIAL_ACCOUNTS, DB_TABLE_USERS, validate_postgres_table_schema};

// PostgreSQL implementations
pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), SocialAccountError> {
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
            expires_at TIMESTAMPTZ,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL,
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
pub(super) async fn validate_social_account_tables_postgres(
    pool: &Pool<Postgres>,
) -> Result<(), SocialAccountError> {
    let social_table = DB_TABLE_SOCIAL_ACCOUNTS.as_str();

    let expected_columns = [
        ("id", "text"),
        ("user_id", "text"),
        ("provider", "text"),
        ("provider_user_id", "text"),
        ("access_token", "text"),
        ("refresh_token", "text"),
        ("expires_at", "timestamp with time zone"),
        ("created_at", "timestamp with time zone"),
        ("updated_at", "timestamp with time zone"),
    ];

    validate_postgres_table_schema(
        pool,
        social_table,
        &expected_columns,
        SocialAccountError::Storage,
    )
    .await
}

pub(super) async fn get_by_provider_postgres(
    pool: &Pool<Postgres>,
    provider: &str,
    provider_user_id: &str,
) -> Result<Option<SocialAccount>, SocialAccountError> {
    let social_table = DB_TABLE_SOCIAL_ACCOUNTS.as_str();

    sqlx::query_as::<_, SocialAccount>(&format!(
        r#"
        SELECT * FROM {social_table}
        WHERE provider = $1 AND provider_user_id = $2
        "#
    ))
    .bind(provider)
    .bind(provider_user_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| SocialAccountError::Storage(e.to_string()))
}

pub(super) async fn create_account_postgres(
    pool: &Pool<Postgres>,
    account: SocialAccount,
) -> Result<SocialAccount, SocialAccountError> {
    let social_table = DB_TABLE_SOCIAL_ACCOUNTS.as_str();

    sqlx::query(&format!(
        r#"
        INSERT INTO {social_table}
            (id, user_id, provider, provider_user_id, access_token, refresh_token,
             expires_at, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
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

pub(super) async fn update_account_postgres(
    pool: &Pool<Postgres>,
    id: &str,
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
) -> Result<SocialAccount, SocialAccountError> {
    let social_table = DB_TABLE_SOCIAL_ACCOUNTS.as_str();

    let updated_at = Utc::now();

    let updated = sqlx::query_as::<_, SocialAccount>(&format!(
        r#"
        UPDATE {social_table} SET
            access_token = $1,
            refresh_token = $2,
            expires_at = $3,
            updated_at = $4
        WHERE id = $5
        RETURNING *
        "#
    ))
    .bind(&access_token)
    .bind(&refresh_token)
    .bind(expires_at)
    .bind(updated_at)
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| SocialAccountError::Storage(e.to_string()))?;

    updated.ok_or(SocialAccountError::NotFound)
}
