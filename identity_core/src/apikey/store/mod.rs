mod postgres;
mod sqlite;

use crate::apikey::{errors::ApiKeyError, types::ApiKey};
use crate::storage::CREDENTIAL_STORE;

use postgres::*;
use sqlite::*;

pub(crate) struct ApiKeyStore;

impl ApiKeyStore {
    /// Initialize the API keys table
    pub(crate) async fn init() -> Result<(), ApiKeyError> {
        let store = &*CREDENTIAL_STORE;

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_api_key_tables_sqlite(pool).await?;
                Ok(())
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_api_key_tables_postgres(pool).await?;
                Ok(())
            }
            _ => Err(ApiKeyError::Storage("Unsupported database type".to_string())),
        }
    }

    /// Look up an active key by its secret
    ///
    /// Revoked keys are filtered out here; expiry is the caller's
    /// check, since an expired-but-active key carries a distinct
    /// failure message.
    pub(crate) async fn get_active_by_secret(secret: &str) -> Result<Option<ApiKey>, ApiKeyError> {
        let store = &*CREDENTIAL_STORE;

        if let Some(pool) = store.as_sqlite() {
            get_active_by_secret_sqlite(pool, secret).await
        } else if let Some(pool) = store.as_postgres() {
            get_active_by_secret_postgres(pool, secret).await
        } else {
            Err(ApiKeyError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Insert a new key
    pub(crate) async fn create_key(key: ApiKey) -> Result<ApiKey, ApiKeyError> {
        let store = &*CREDENTIAL_STORE;

        if let Some(pool) = store.as_sqlite() {
            create_key_sqlite(pool, key).await
        } else if let Some(pool) = store.as_postgres() {
            create_key_postgres(pool, key).await
        } else {
            Err(ApiKeyError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Set the last-used timestamp to now
    pub(crate) async fn touch_last_used(id: &str) -> Result<(), ApiKeyError> {
        let store = &*CREDENTIAL_STORE;

        if let Some(pool) = store.as_sqlite() {
            touch_last_used_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            touch_last_used_postgres(pool, id).await
        } else {
            Err(ApiKeyError::Storage("Unsupported database type".to_string()))
        }
    }

    /// All keys owned by a user, revoked ones included
    pub(crate) async fn get_keys_by_user(user_id: &str) -> Result<Vec<ApiKey>, ApiKeyError> {
        let store = &*CREDENTIAL_STORE;

        if let Some(pool) = store.as_sqlite() {
            get_keys_by_user_sqlite(pool, user_id).await
        } else if let Some(pool) = store.as_postgres() {
            get_keys_by_user_postgres(pool, user_id).await
        } else {
            Err(ApiKeyError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Flip a key inactive and return the updated row
    pub(crate) async fn revoke_key(id: &str) -> Result<ApiKey, ApiKeyError> {
        let store = &*CREDENTIAL_STORE;

        if let Some(pool) = store.as_sqlite() {
            revoke_key_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            revoke_key_postgres(pool, id).await
        } else {
            Err(ApiKeyError::Storage("Unsupported database type".to_string()))
        }
    }
}
