//! Backend selection for the credential tables
//!
//! One process talks to exactly one backend, chosen by
//! `IDENTITY_STORE_TYPE` and connected lazily so a misconfigured URL
//! only surfaces on first table access.

use std::{env, str::FromStr, sync::LazyLock};

use sqlx::{PgPool, Pool, Postgres, Sqlite, SqlitePool};

/// The connected store backend
///
/// SQLite for single-node deployments and tests, Postgres for
/// everything else. Per-table modules ask for the pool they know how
/// to talk to via [`as_sqlite`](Self::as_sqlite) /
/// [`as_postgres`](Self::as_postgres).
pub(crate) enum CredentialStore {
    Sqlite(SqlitePool),
    Postgres(PgPool),
}

impl CredentialStore {
    fn from_env() -> Self {
        let store_type =
            env::var("IDENTITY_STORE_TYPE").expect("IDENTITY_STORE_TYPE must be set");
        let store_url = env::var("IDENTITY_STORE_URL").expect("IDENTITY_STORE_URL must be set");

        tracing::info!(
            "Opening credential store with type: {}, url: {}",
            store_type,
            store_url
        );

        match store_type.as_str() {
            "sqlite" => {
                let opts = sqlx::sqlite::SqliteConnectOptions::from_str(&store_url)
                    .expect("Failed to parse SQLite connection string")
                    .create_if_missing(true);
                CredentialStore::Sqlite(SqlitePool::connect_lazy_with(opts))
            }
            "postgres" => CredentialStore::Postgres(
                PgPool::connect_lazy(&store_url).expect("Failed to create Postgres pool"),
            ),
            t => panic!(
                "Unsupported store type: {}. Supported types are 'sqlite' and 'postgres'",
                t
            ),
        }
    }

    pub(crate) fn as_sqlite(&self) -> Option<&Pool<Sqlite>> {
        match self {
            CredentialStore::Sqlite(pool) => Some(pool),
            CredentialStore::Postgres(_) => None,
        }
    }

    pub(crate) fn as_postgres(&self) -> Option<&Pool<Postgres>> {
        match self {
            CredentialStore::Postgres(pool) => Some(pool),
            CredentialStore::Sqlite(_) => None,
        }
    }
}

/// Process-wide store handle, read from the environment on first use
pub(crate) static CREDENTIAL_STORE: LazyLock<CredentialStore> =
    LazyLock::new(CredentialStore::from_env);
