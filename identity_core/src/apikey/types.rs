use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A long-lived API key credential
///
/// The full record, including the plaintext secret, is returned
/// exactly once from key generation. Every later read path goes
/// through [`ApiKeyInfo`], which never echoes the secret.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct ApiKey {
    pub id: String,
    /// Owning user id
    pub user_id: String,
    /// The externally-presented credential. Globally unique,
    /// `sk_`-prefixed, 256 bits of entropy.
    pub secret: String,
    /// Human label, e.g. "ci-key"
    pub name: String,
    /// Revocation is a flag flip; rows are never deleted here
    pub is_active: bool,
    /// Optional expiry; an expired key never validates even while
    /// still marked active
    pub expires_at: Option<DateTime<Utc>>,
    /// Updated best-effort on every successful validation
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ApiKey {
    pub fn new(
        id: String,
        user_id: String,
        secret: String,
        name: String,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            user_id,
            secret,
            name,
            is_active: true,
            expires_at,
            last_used_at: None,
            created_at: Utc::now(),
        }
    }
}

/// An API key as exposed on list and revoke paths: everything except
/// the secret
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiKeyInfo {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<ApiKey> for ApiKeyInfo {
    fn from(key: ApiKey) -> Self {
        Self {
            id: key.id,
            user_id: key.user_id,
            name: key.name,
            is_active: key.is_active,
            expires_at: key.expires_at,
            last_used_at: key.last_used_at,
            created_at: key.created_at,
        }
    }
}
