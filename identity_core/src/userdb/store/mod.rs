mod postgres;
mod sqlite;

use crate::storage::CREDENTIAL_STORE;
use crate::userdb::{errors::UserError, types::User};

use postgres::*;
use sqlite::*;

pub(crate) struct UserStore;

impl UserStore {
    /// Initialize the users table
    pub(crate) async fn init() -> Result<(), UserError> {
        let store = &*CREDENTIAL_STORE;

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_user_tables_sqlite(pool).await?;
                Ok(())
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_user_tables_postgres(pool).await?;
                Ok(())
            }
            _ => Err(UserError::Storage("Unsupported database type".to_string())),
        }
    }

    /// Get a user by their ID
    pub(crate) async fn get_user(id: &str) -> Result<Option<User>, UserError> {
        let store = &*CREDENTIAL_STORE;

        if let Some(pool) = store.as_sqlite() {
            get_user_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            get_user_postgres(pool, id).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Get a user by their email
    pub(crate) async fn get_user_by_email(email: &str) -> Result<Option<User>, UserError> {
        let store = &*CREDENTIAL_STORE;

        if let Some(pool) = store.as_sqlite() {
            get_user_by_email_sqlite(pool, email).await
        } else if let Some(pool) = store.as_postgres() {
            get_user_by_email_postgres(pool, email).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Insert a new user
    ///
    /// The email unique constraint is enforced here by the storage
    /// backend; a violation surfaces as [`UserError::DuplicateEmail`]
    /// regardless of any caller-side pre-check, so exactly one of two
    /// concurrent registrations with the same email can succeed.
    pub(crate) async fn create_user(user: User) -> Result<User, UserError> {
        let store = &*CREDENTIAL_STORE;

        if let Some(pool) = store.as_sqlite() {
            create_user_sqlite(pool, user).await
        } else if let Some(pool) = store.as_postgres() {
            create_user_postgres(pool, user).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Update an existing user's mutable fields
    ///
    /// Always refreshes `updated_at`; the passed-in value is ignored.
    pub(crate) async fn update_user(user: User) -> Result<User, UserError> {
        let store = &*CREDENTIAL_STORE;

        if let Some(pool) = store.as_sqlite() {
            update_user_sqlite(pool, user).await
        } else if let Some(pool) = store.as_postgres() {
            update_user_postgres(pool, user).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{init_test_environment, unique_test_email};
    use serial_test::serial;
    use uuid::Uuid;

    fn test_user(email: &str) -> User {
        User::new(Uuid::new_v4().to_string(), email.to_string(), None)
    }

    #[tokio::test]
    #[serial]
    async fn test_create_and_get_user() {
        init_test_environment().await;

        let email = unique_test_email();
        let user = test_user(&email);
        let created = UserStore::create_user(user.clone())
            .await
            .expect("create_user should succeed");
        assert_eq!(created.id, user.id);

        let by_id = UserStore::get_user(&user.id)
            .await
            .expect("get_user should succeed")
            .expect("user should exist");
        assert_eq!(by_id.email, email);

        let by_email = UserStore::get_user_by_email(&email)
            .await
            .expect("get_user_by_email should succeed")
            .expect("user should exist");
        assert_eq!(by_email.id, user.id);
    }

    #[tokio::test]
    #[serial]
    async fn test_duplicate_email_is_rejected_by_constraint() {
        init_test_environment().await;

        let email = unique_test_email();
        UserStore::create_user(test_user(&email))
            .await
            .expect("first create should succeed");

        // Second insert with the same email but a different id must
        // hit the unique constraint.
        let result = UserStore::create_user(test_user(&email)).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail)));

        let found = UserStore::get_user_by_email(&email)
            .await
            .expect("lookup should succeed");
        assert!(found.is_some());
    }

    #[tokio::test]
    #[serial]
    async fn test_update_user_refreshes_updated_at() {
        init_test_environment().await;

        let email = unique_test_email();
        let created = UserStore::create_user(test_user(&email))
            .await
            .expect("create should succeed");

        let mut modified = created.clone();
        modified.name = Some("Renamed".to_string());
        modified.is_active = false;

        let updated = UserStore::update_user(modified)
            .await
            .expect("update should succeed");
        assert_eq!(updated.name.as_deref(), Some("Renamed"));
        assert!(!updated.is_active);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    #[serial]
    async fn test_update_unknown_user_is_not_found() {
        init_test_environment().await;

        let ghost = test_user(&unique_test_email());
        let result = UserStore::update_user(ghost).await;
        assert!(matches!(result, Err(UserError::NotFound)));
    }

    #[tokio::test]
    #[serial]
    async fn test_get_missing_user_returns_none() {
        init_test_environment().await;

        let result = UserStore::get_user("no-such-id")
            .await
            .expect("get_user should succeed");
        assert!(result.is_none());
    }
}
