use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::errors::TokenError;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id the token is bound to
    sub: String,
    /// Issued-at, seconds since epoch
    iat: i64,
    /// Expiry, seconds since epoch
    exp: i64,
}

/// Stateless signer and verifier for bearer tokens
///
/// Holds only the HS256 keys and the two lifetimes; constructed once
/// at startup and safe to share across requests. Tokens are valid
/// until natural expiry; there is no revocation list.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_max_age: i64,
    refresh_max_age: i64,
}

impl TokenIssuer {
    /// Construct an issuer from an explicit signing secret and the
    /// access/refresh lifetimes in seconds.
    pub fn new(secret: &[u8], access_max_age: i64, refresh_max_age: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // No leeway: an expired token is expired.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            access_max_age,
            refresh_max_age,
        }
    }

    /// Issue a short-lived access token bound to `user_id`
    pub fn issue_access_token(&self, user_id: &str) -> Result<String, TokenError> {
        self.issue(user_id, self.access_max_age)
    }

    /// Issue a longer-lived refresh token bound to `user_id`
    pub fn issue_refresh_token(&self, user_id: &str) -> Result<String, TokenError> {
        self.issue(user_id, self.refresh_max_age)
    }

    fn issue(&self, user_id: &str, max_age: i64) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + max_age,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token and return the user id it is bound to
    ///
    /// Fails with [`TokenError::Invalid`] on a bad signature, a
    /// malformed token, or natural expiry.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims.sub)
    }
}
