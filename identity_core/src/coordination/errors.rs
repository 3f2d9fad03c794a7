//! Error types for the coordination layer

use thiserror::Error;

use crate::apikey::ApiKeyError;
use crate::password::PasswordError;
use crate::social::SocialAccountError;
use crate::token::TokenError;
use crate::userdb::UserError;

/// Errors raised by the identity operations
///
/// A closed set of tagged variants; callers switch on the kind, never
/// on message shape. Credential and uniqueness failures are never
/// swallowed here; guards flatten everything to an unauthorized
/// outcome at the transport boundary.
#[derive(Error, Debug)]
pub enum IdentityError {
    /// Duplicate email on registration
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Bad credentials, inactive account, or an invalid/expired
    /// token or API key
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found with context
    #[error("Resource not found: {resource_type} {resource_id}")]
    ResourceNotFound {
        resource_type: String,
        resource_id: String,
    },

    /// Error from the user store
    #[error("User error: {0}")]
    User(#[from] UserError),

    /// Error from the social account store
    #[error("Social account error: {0}")]
    SocialAccount(#[from] SocialAccountError),

    /// Error from the API key store
    #[error("API key error: {0}")]
    ApiKey(#[from] ApiKeyError),

    /// Error from token issuance or verification
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Error from password hashing
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    /// Internal coordination failure
    #[error("Identity error: {0}")]
    Internal(String),
}

impl IdentityError {
    /// Log the error and return self
    ///
    /// Allows method chaining so raising and recording an error stay
    /// on one line.
    pub fn log(self) -> Self {
        match &self {
            Self::Conflict(msg) => tracing::error!("Conflict: {}", msg),
            Self::Unauthorized(msg) => tracing::error!("Unauthorized: {}", msg),
            Self::ResourceNotFound {
                resource_type,
                resource_id,
            } => tracing::error!("Resource not found: {} {}", resource_type, resource_id),
            Self::User(err) => tracing::error!("User error: {}", err),
            Self::SocialAccount(err) => tracing::error!("Social account error: {}", err),
            Self::ApiKey(err) => tracing::error!("API key error: {}", err),
            Self::Token(err) => tracing::error!("Token error: {}", err),
            Self::Password(err) => tracing::error!("Password error: {}", err),
            Self::Internal(msg) => tracing::error!("Identity error: {}", msg),
        }
        self
    }
}
