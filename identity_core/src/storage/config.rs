//! Database table configuration

use std::env;
use std::sync::LazyLock;

/// Table prefix from environment variable
static DB_TABLE_PREFIX: LazyLock<String> =
    LazyLock::new(|| env::var("DB_TABLE_PREFIX").unwrap_or_else(|_| "idc_".to_string()));

/// Users table name
pub(crate) static DB_TABLE_USERS: LazyLock<String> = LazyLock::new(|| {
    env::var("DB_TABLE_USERS").unwrap_or_else(|_| format!("{}{}", *DB_TABLE_PREFIX, "users"))
});

/// Social accounts table name
pub(crate) static DB_TABLE_SOCIAL_ACCOUNTS: LazyLock<String> = LazyLock::new(|| {
    env::var("DB_TABLE_SOCIAL_ACCOUNTS")
        .unwrap_or_else(|_| format!("{}{}", *DB_TABLE_PREFIX, "social_accounts"))
});

/// API keys table name
pub(crate) static DB_TABLE_API_KEYS: LazyLock<String> = LazyLock::new(|| {
    env::var("DB_TABLE_API_KEYS").unwrap_or_else(|_| format!("{}{}", *DB_TABLE_PREFIX, "api_keys"))
});
