//! Central configuration for the identity-core crate
//!
//! Every value is read from the environment exactly once at first use.
//! Business logic never touches the environment directly; it goes
//! through the statics below or through the [`TokenIssuer`] instance
//! constructed here.

use std::env;
use std::sync::LazyLock;

use crate::token::TokenIssuer;

/// Secret used to sign access and refresh tokens (HS256)
static IDENTITY_TOKEN_SECRET: LazyLock<Vec<u8>> = LazyLock::new(|| {
    env::var("IDENTITY_TOKEN_SECRET")
        .expect("IDENTITY_TOKEN_SECRET must be set")
        .into_bytes()
});

/// Access token lifetime in seconds. Default: 1 day.
pub(crate) static ACCESS_TOKEN_MAX_AGE: LazyLock<i64> = LazyLock::new(|| {
    env::var("ACCESS_TOKEN_MAX_AGE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(86_400)
});

/// Refresh token lifetime in seconds. Default: 7 days.
pub(crate) static REFRESH_TOKEN_MAX_AGE: LazyLock<i64> = LazyLock::new(|| {
    env::var("REFRESH_TOKEN_MAX_AGE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(604_800)
});

/// Process-wide token issuer, constructed once from the values above.
pub(crate) static TOKEN_ISSUER: LazyLock<TokenIssuer> = LazyLock::new(|| {
    TokenIssuer::new(
        &IDENTITY_TOKEN_SECRET,
        *ACCESS_TOKEN_MAX_AGE,
        *REFRESH_TOKEN_MAX_AGE,
    )
});

/// Argon2id memory cost in KiB. Default matches the argon2 crate's
/// recommended parameters.
pub(crate) static PASSWORD_HASH_M_COST: LazyLock<u32> = LazyLock::new(|| {
    env::var("PASSWORD_HASH_M_COST")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(19_456)
});

/// Argon2id iteration count. Default: 2.
pub(crate) static PASSWORD_HASH_T_COST: LazyLock<u32> = LazyLock::new(|| {
    env::var("PASSWORD_HASH_T_COST")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(2)
});

/// Argon2id parallelism. Default: 1.
pub(crate) static PASSWORD_HASH_P_COST: LazyLock<u32> = LazyLock::new(|| {
    env::var("PASSWORD_HASH_P_COST")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1)
});

#[cfg(test)]
mod tests {
    use std::env;

    /// Helper to run a test with an environment variable set (or
    /// removed) and restored afterwards.
    fn with_env_var<F, R>(key: &str, value: Option<&str>, test: F) -> R
    where
        F: FnOnce() -> R,
    {
        let original = env::var(key).ok();

        match value {
            Some(val) => unsafe { env::set_var(key, val) },
            None => unsafe { env::remove_var(key) },
        }

        let result = test();

        match original {
            Some(val) => unsafe { env::set_var(key, val) },
            None => unsafe { env::remove_var(key) },
        }

        result
    }

    #[test]
    fn test_access_token_max_age_default() {
        with_env_var("ACCESS_TOKEN_MAX_AGE", None, || {
            // The LazyLock may already be initialized, so test the
            // parsing logic it uses.
            let max_age: i64 = env::var("ACCESS_TOKEN_MAX_AGE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(86_400);
            assert_eq!(max_age, 86_400);
        });
    }

    #[test]
    fn test_refresh_token_max_age_custom() {
        with_env_var("REFRESH_TOKEN_MAX_AGE", Some("3600"), || {
            let max_age: i64 = env::var("REFRESH_TOKEN_MAX_AGE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(604_800);
            assert_eq!(max_age, 3600);
        });
    }

    #[test]
    fn test_invalid_max_age_falls_back_to_default() {
        with_env_var("ACCESS_TOKEN_MAX_AGE", Some("not-a-number"), || {
            let max_age: i64 = env::var("ACCESS_TOKEN_MAX_AGE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(86_400);
            assert_eq!(max_age, 86_400);
        });
    }

    #[test]
    fn test_password_hash_cost_defaults() {
        with_env_var("PASSWORD_HASH_T_COST", None, || {
            let t_cost: u32 = env::var("PASSWORD_HASH_T_COST")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2);
            assert_eq!(t_cost, 2);
        });
    }
}
