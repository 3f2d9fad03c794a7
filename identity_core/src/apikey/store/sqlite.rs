use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::apikey::{errors::ApiKeyError, types::ApiKey};
use crate::storage::{DB_TABLE_API_KEYS, DB_TABLE_USERS, validate_sqlite_table_schema};

// SQLite implementations
pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), ApiKeyError> {
    let keys_table = DB_TABLE_API_KEYS.as_str();
    let users_table = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {keys_table} (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL REFERENCES {users_table}(id) ON DELETE CASCADE,
            secret TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            expires_at TIMESTAMP,
            last_used_at TIMESTAMP,
            created_at TIMESTAMP NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| ApiKeyError::Storage(e.to_string()))?;

    // Index on user_id for faster lookups
    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS idx_{keys_table}_user_id ON {keys_table}(user_id)"
    ))
    .execute(pool)
    .await
    .map_err(|e| ApiKeyError::Storage(e.to_string()))?;

    Ok(())
}

/// Validates that the API keys table schema matches what we expect
pub(super) async fn validate_api_key_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), ApiKeyError> {
    let keys_table = DB_TABLE_API_KEYS.as_str();

    let expected_columns = [
        ("id", "TEXT"),
        ("user_id", "TEXT"),
        ("secret", "TEXT"),
        ("name", "TEXT"),
        ("is_active", "BOOLEAN"),
        ("expires_at", "TIMESTAMP"),
        ("last_used_at", "TIMESTAMP"),
        ("created_at", "TIMESTAMP"),
    ];

    validate_sqlite_table_schema(pool, keys_table, &expected_columns, ApiKeyError::Storage).await
}

pub(super) async fn get_active_by_secret_sqlite(
    pool: &Pool<Sqlite>,
    secret: &str,
) -> Result<Option<ApiKey>, ApiKeyError> {
    let keys_table = DB_TABLE_API_KEYS.as_str();

    // Ensure tables exist before any operations
    create_tables_sqlite(pool).await?;

    sqlx::query_as::<_, ApiKey>(&format!(
        "SELECT * FROM {keys_table} WHERE secret = ? AND is_active = TRUE"
    ))
    .bind(secret)
    .fetch_optional(pool)
    .await
    .map_err(|e| ApiKeyError::Storage(e.to_string()))
}

pub(super) async fn create_key_sqlite(pool: &Pool<Sqlite>, key: ApiKey) -> Result<ApiKey, ApiKeyError> {
    let keys_table = DB_TABLE_API_KEYS.as_str();

    // Ensure tables exist before any operations
    create_tables_sqlite(pool).await?;

    sqlx::query(&format!(
        r#"
        INSERT INTO {keys_table}
            (id, user_id, secret, name, is_active, expires_at, last_used_at, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#
    ))
    .bind(&key.id)
    .bind(&key.user_id)
    .bind(&key.secret)
    .bind(&key.name)
    .bind(key.is_active)
    .bind(key.expires_at)
    .bind(key.last_used_at)
    .bind(key.created_at)
    .execute(pool)
    .await
    .map_err(|e| ApiKeyError::Storage(e.to_string()))?;

    Ok(key)
}

pub(super) async fn touch_last_used_sqlite(pool: &Pool<Sqlite>, id: &str) -> Result<(), ApiKeyError> {
    let keys_table = DB_TABLE_API_KEYS.as_str();

    sqlx::query(&format!("UPDATE {keys_table} SET last_used_at = ? WHERE id = ?"))
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| ApiKeyError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn get_keys_by_user_sqlite(
    pool: &Pool<Sqlite>,
    user_id: &str,
) -> Result<Vec<ApiKey>, ApiKeyError> {
    let keys_table = DB_TABLE_API_KEYS.as_str();

    // Ensure tables exist before any operations
    create_tables_sqlite(pool).await?;

    sqlx::query_as::<_, ApiKey>(&format!("SELECT * FROM {keys_table} WHERE user_id = ?"))
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(|e| ApiKeyError::Storage(e.to_string()))
}

pub(super) async fn revoke_key_sqlite(pool: &Pool<Sqlite>, id: &str) -> Result<ApiKey, ApiKeyError> {
    let keys_table = DB_TABLE_API_KEYS.as_str();

    let result = sqlx::query(&format!("UPDATE {keys_table} SET is_active = FALSE WHERE id = ?"))
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| ApiKeyError::Storage(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(ApiKeyError::NotFound);
    }

    sqlx::query_as::<_, ApiKey>(&format!("SELECT * FROM {keys_table} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| ApiKeyError::Storage(e.to_string()))?
        .ok_or(ApiKeyError::NotFound)
}
