use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use ring::rand::SecureRandom;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum UtilError {
    #[error("Crypto error: {0}")]
    Crypto(String),
}

/// Generate `len` random bytes and encode them base64url without
/// padding. 32 bytes yields 256 bits of entropy in 43 characters.
pub(crate) fn gen_random_string(len: usize) -> Result<String, UtilError> {
    let rng = ring::rand::SystemRandom::new();
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes)
        .map_err(|_| UtilError::Crypto("Failed to generate random string".to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_gen_random_string_length() {
        // 32 bytes -> 43 base64url characters (no padding)
        let s = gen_random_string(32).expect("random generation should succeed");
        assert_eq!(s.len(), 43);
    }

    #[test]
    fn test_gen_random_string_is_unique() {
        let a = gen_random_string(32).expect("random generation should succeed");
        let b = gen_random_string(32).expect("random generation should succeed");
        assert_ne!(a, b);
    }

    #[test]
    fn test_gen_random_string_is_url_safe() {
        let s = gen_random_string(64).expect("random generation should succeed");
        assert!(
            s.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    proptest! {
        /// Unpadded base64 of n bytes is always ceil(4n/3) characters
        #[test]
        fn test_encoded_length_tracks_byte_count(len in 1usize..128) {
            let s = gen_random_string(len).expect("random generation should succeed");
            prop_assert_eq!(s.len(), (len * 4 + 2) / 3);
        }
    }
}
