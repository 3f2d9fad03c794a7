//! Password hashing with Argon2id
//!
//! Cost parameters come from configuration so the latency/security
//! trade-off is tunable per deployment rather than hardcoded at the
//! call sites. Hashes are stored in PHC string format, which embeds
//! the salt and the parameters used, so verification works across
//! cost changes.

use std::sync::LazyLock;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use ring::rand::SecureRandom;
use thiserror::Error;

use crate::config::{PASSWORD_HASH_M_COST, PASSWORD_HASH_P_COST, PASSWORD_HASH_T_COST};

#[derive(Debug, Error, Clone)]
pub enum PasswordError {
    #[error("Hashing error: {0}")]
    Hashing(String),
}

static ARGON2: LazyLock<Argon2<'static>> = LazyLock::new(|| {
    let params = Params::new(
        *PASSWORD_HASH_M_COST,
        *PASSWORD_HASH_T_COST,
        *PASSWORD_HASH_P_COST,
        None,
    )
    .expect("Invalid Argon2 cost parameters");
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
});

/// Hash a password with a fresh random salt, returning the PHC string
pub(crate) fn hash_password(password: &str) -> Result<String, PasswordError> {
    let rng = ring::rand::SystemRandom::new();
    let mut salt_bytes = [0u8; 16];
    rng.fill(&mut salt_bytes)
        .map_err(|_| PasswordError::Hashing("Failed to generate salt".to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| PasswordError::Hashing(e.to_string()))?;

    let phc = ARGON2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hashing(e.to_string()))?
        .to_string();
    Ok(phc)
}

/// Check a password against a stored PHC hash
///
/// A mismatch and an unparsable hash both return false; neither is an
/// error the caller should distinguish.
pub(crate) fn verify_password(password: &str, phc: &str) -> bool {
    match PasswordHash::new(phc) {
        Ok(parsed) => ARGON2.verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let phc = hash_password("hunter2").expect("hashing should succeed");
        assert!(phc.starts_with("$argon2id$"));
        assert!(verify_password("hunter2", &phc));
        assert!(!verify_password("hunter3", &phc));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same-password").expect("hashing should succeed");
        let b = hash_password("same-password").expect("hashing should succeed");
        assert_ne!(a, b);
        assert!(verify_password("same-password", &a));
        assert!(verify_password("same-password", &b));
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
    }
}
