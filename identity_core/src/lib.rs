//! identity-core - Identity and credential subsystem
//!
//! This crate provides user registration and password login, social
//! provider account linking, issuance and verification of bearer
//! tokens, and long-lived API keys. HTTP transport, response shaping
//! and persistence wiring belong to the surrounding service; the
//! business rules live here.

mod apikey;
mod config;
mod coordination;
mod password;
mod social;
mod storage;
mod token;
mod userdb;
mod utils;

#[cfg(test)]
mod test_utils;

// Re-export the coordination entry points
pub use coordination::{
    AuthResponse, IdentityError, authenticate_bearer, generate_api_key, list_api_keys, login,
    register, revoke_api_key, social_login, validate_api_key, validate_user,
};

pub use apikey::{ApiKey, ApiKeyError, ApiKeyInfo};
pub use password::PasswordError;
pub use social::{Provider, SocialAccount, SocialAccountError};
pub use token::{TokenError, TokenIssuer};
pub use userdb::{User, UserError, UserProfile};

/// Initialize the credential store
///
/// Creates the users, social account and API key tables if they do not
/// exist and validates their schema. Must be called once at startup
/// before any identity operation.
pub async fn init() -> Result<(), IdentityError> {
    userdb::init().await?;
    social::init().await?;
    apikey::init().await?;
    Ok(())
}
