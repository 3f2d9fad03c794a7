use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents a core user identity in the system
///
/// This is the storage-layer view and carries the password hash; it is
/// never handed out by the coordination layer. See [`UserProfile`] for
/// the sanitized form.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct User {
    /// Unique user identifier
    pub id: String,
    /// Login email, unique across all users (case-sensitive as stored)
    pub email: String,
    /// Optional display name
    pub name: Option<String>,
    /// Argon2id password hash in PHC string format. Absent for pure
    /// social accounts, which cannot authenticate via password login.
    pub password_hash: Option<String>,
    /// Optional avatar URL
    pub avatar: Option<String>,
    /// Whether the email address has been verified
    pub email_verified: bool,
    /// Whether the account may authenticate. Deactivation is a flag
    /// flip; this core never hard-deletes users.
    pub is_active: bool,
    /// When the user account was created
    pub created_at: DateTime<Utc>,
    /// When the user account was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active, unverified user
    pub fn new(id: String, email: String, name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            name,
            password_hash: None,
            avatar: None,
            email_verified: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Sanitized user returned from every identity operation
///
/// Identical to [`User`] minus the password hash. Conversion is the
/// only way to obtain one, so a hash can never leak through this type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub email_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            avatar: user.avatar,
            email_verified: user.email_verified,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
