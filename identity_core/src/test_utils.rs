//! Shared test initialization and helpers
//!
//! Centralized setup so every DB-touching test sees the same
//! environment and an initialized store. Tests that go through here
//! should also be marked `#[serial]` since they share one database
//! file.

use std::sync::Once;

use uuid::Uuid;

use crate::userdb::{User, UserStore};

/// Load the test environment and initialize all stores
///
/// Environment variables are loaded from `.env_test` (falling back to
/// `.env`) exactly once; anything still missing gets a safe default
/// pointing at a throwaway SQLite file. Store initialization itself is
/// idempotent.
pub(crate) async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }

        unsafe {
            if std::env::var("IDENTITY_STORE_TYPE").is_err() {
                std::env::set_var("IDENTITY_STORE_TYPE", "sqlite");
            }
            if std::env::var("IDENTITY_STORE_URL").is_err() {
                let db_path = std::env::temp_dir().join("identity_core_test.db");
                std::env::set_var(
                    "IDENTITY_STORE_URL",
                    format!("sqlite:{}", db_path.display()),
                );
            }

            // Start from an empty database file
            if let Some(path) = std::env::var("IDENTITY_STORE_URL")
                .ok()
                .and_then(|url| url.strip_prefix("sqlite:").map(str::to_string))
            {
                let _ = std::fs::remove_file(&path);
            }
            if std::env::var("IDENTITY_TOKEN_SECRET").is_err() {
                std::env::set_var("IDENTITY_TOKEN_SECRET", "test-signing-secret");
            }
            // Keep password hashing cheap in tests
            if std::env::var("PASSWORD_HASH_M_COST").is_err() {
                std::env::set_var("PASSWORD_HASH_M_COST", "1024");
            }
            if std::env::var("PASSWORD_HASH_T_COST").is_err() {
                std::env::set_var("PASSWORD_HASH_T_COST", "1");
            }
        }
    });

    ensure_database_initialized().await;
}

async fn ensure_database_initialized() {
    // Log errors but don't panic; the sqlite paths create tables at
    // the point of use anyway.
    if let Err(e) = crate::userdb::init().await {
        eprintln!("Warning: Failed to initialize UserStore: {e}");
    }
    if let Err(e) = crate::social::init().await {
        eprintln!("Warning: Failed to initialize SocialAccountStore: {e}");
    }
    if let Err(e) = crate::apikey::init().await {
        eprintln!("Warning: Failed to initialize ApiKeyStore: {e}");
    }
}

/// A fresh email nothing else in the database uses
pub(crate) fn unique_test_email() -> String {
    format!("{}@example.com", Uuid::new_v4())
}

/// Insert and return a minimal active user
pub(crate) async fn insert_test_user() -> User {
    let user = User::new(Uuid::new_v4().to_string(), unique_test_email(), None);
    UserStore::create_user(user)
        .await
        .expect("test user insert should succeed")
}
