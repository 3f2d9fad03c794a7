mod postgres;
mod sqlite;

use crate::social::{errors::SocialAccountError, types::{Provider, SocialAccount}};
use crate::storage::CREDENTIAL_STORE;

use postgres::*;
use sqlite::*;

pub(crate) struct SocialAccountStore;

impl SocialAccountStore {
    /// Initialize the social accounts table
    pub(crate) async fn init() -> Result<(), SocialAccountError> {
        let store = &*CREDENTIAL_STORE;

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_social_account_tables_sqlite(pool).await?;
                Ok(())
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_social_account_tables_postgres(pool).await?;
                Ok(())
            }
            _ => Err(SocialAccountError::Storage(
                "Unsupported database type".to_string(),
            )),
        }
    }

    /// Get the link for a provider identity, if one exists
    pub(crate) async fn get_by_provider(
        provider: Provider,
        provider_user_id: &str,
    ) -> Result<Option<SocialAccount>, SocialAccountError> {
        let store = &*CREDENTIAL_STORE;

        if let Some(pool) = store.as_sqlite() {
            get_by_provider_sqlite(pool, provider.as_str(), provider_user_id).await
        } else if let Some(pool) = store.as_postgres() {
            get_by_provider_postgres(pool, provider.as_str(), provider_user_id).await
        } else {
            Err(SocialAccountError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }

    /// Create a new provider link
    ///
    /// The composite unique index on (provider, provider_user_id) is
    /// the enforcement point; a violation surfaces as
    /// [`SocialAccountError::DuplicateLink`].
    pub(crate) async fn create_account(
        account: SocialAccount,
    ) -> Result<SocialAccount, SocialAccountError> {
        let store = &*CREDENTIAL_STORE;

        if let Some(pool) = store.as_sqlite() {
            create_account_sqlite(pool, account).await
        } else if let Some(pool) = store.as_postgres() {
            create_account_postgres(pool, account).await
        } else {
            Err(SocialAccountError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }

    /// Update the provider-issued tokens on an existing link
    ///
    /// Always refreshes `updated_at`.
    pub(crate) async fn update_account(
        id: &str,
        access_token: Option<String>,
        refresh_token: Option<String>,
        expires_at: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<SocialAccount, SocialAccountError> {
        let store = &*CREDENTIAL_STORE;

        if let Some(pool) = store.as_sqlite() {
            update_account_sqlite(pool, id, access_token, refresh_token, expires_at).await
        } else if let Some(pool) = store.as_postgres() {
            update_account_postgres(pool, id, access_token, refresh_token, expires_at).await
        } else {
            Err(SocialAccountError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{init_test_environment, insert_test_user};
    use serial_test::serial;
    use uuid::Uuid;

    #[tokio::test]
    #[serial]
    async fn test_create_and_find_by_provider() {
        init_test_environment().await;

        let user = insert_test_user().await;
        let subject = Uuid::new_v4().to_string();
        let account = SocialAccount::new(
            Uuid::new_v4().to_string(),
            user.id.clone(),
            Provider::Google,
            subject.clone(),
        );

        SocialAccountStore::create_account(account.clone())
            .await
            .expect("create_account should succeed");

        let found = SocialAccountStore::get_by_provider(Provider::Google, &subject)
            .await
            .expect("lookup should succeed")
            .expect("link should exist");
        assert_eq!(found.user_id, user.id);

        // Different provider with the same subject id is a different
        // identity.
        let none = SocialAccountStore::get_by_provider(Provider::GitHub, &subject)
            .await
            .expect("lookup should succeed");
        assert!(none.is_none());
    }

    #[tokio::test]
    #[serial]
    async fn test_duplicate_provider_identity_is_rejected() {
        init_test_environment().await;

        let user = insert_test_user().await;
        let subject = Uuid::new_v4().to_string();

        let first = SocialAccount::new(
            Uuid::new_v4().to_string(),
            user.id.clone(),
            Provider::GitHub,
            subject.clone(),
        );
        SocialAccountStore::create_account(first)
            .await
            .expect("first create should succeed");

        let second = SocialAccount::new(
            Uuid::new_v4().to_string(),
            user.id.clone(),
            Provider::GitHub,
            subject,
        );
        let result = SocialAccountStore::create_account(second).await;
        assert!(matches!(result, Err(SocialAccountError::DuplicateLink)));
    }

    #[tokio::test]
    #[serial]
    async fn test_update_account_tokens() {
        init_test_environment().await;

        let user = insert_test_user().await;
        let account = SocialAccount::new(
            Uuid::new_v4().to_string(),
            user.id.clone(),
            Provider::Apple,
            Uuid::new_v4().to_string(),
        );
        let created = SocialAccountStore::create_account(account)
            .await
            .expect("create should succeed");

        let updated = SocialAccountStore::update_account(
            &created.id,
            Some("provider-access".to_string()),
            Some("provider-refresh".to_string()),
            None,
        )
        .await
        .expect("update should succeed");

        assert_eq!(updated.access_token.as_deref(), Some("provider-access"));
        assert_eq!(updated.refresh_token.as_deref(), Some("provider-refresh"));
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    #[serial]
    async fn test_update_unknown_account_is_not_found() {
        init_test_environment().await;

        let result =
            SocialAccountStore::update_account("no-such-id", None, None, None).await;
        assert!(matches!(result, Err(SocialAccountError::NotFound)));
    }
}
