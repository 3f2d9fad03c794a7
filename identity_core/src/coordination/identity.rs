use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::TOKEN_ISSUER;
use crate::password::{hash_password, verify_password};
use crate::social::{Provider, SocialAccount, SocialAccountError, SocialAccountStore};
use crate::userdb::{User, UserError, UserProfile, UserStore};

use super::errors::IdentityError;

/// Result of a successful registration or login: the sanitized user
/// plus both freshly issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub access_token: String,
    pub refresh_token: String,
}

fn issue_tokens(user_id: &str) -> Result<(String, String), IdentityError> {
    let access_token = TOKEN_ISSUER.issue_access_token(user_id)?;
    let refresh_token = TOKEN_ISSUER.issue_refresh_token(user_id)?;
    Ok((access_token, refresh_token))
}

// Generate a unique user ID, with built-in collision detection
pub(super) async fn gen_new_user_id() -> Result<String, IdentityError> {
    // Try up to 3 times to generate a unique ID
    for _ in 0..3 {
        let id = Uuid::new_v4().to_string();

        match UserStore::get_user(&id).await {
            Ok(None) => return Ok(id),
            Ok(Some(_)) => continue,
            Err(e) => return Err(IdentityError::from(e).log()),
        }
    }

    // Extremely unlikely with UUID v4, but handled anyway
    Err(IdentityError::Internal(
        "Failed to generate a unique user ID after multiple attempts".to_string(),
    )
    .log())
}

/// Register a new user with a password credential
///
/// Fails with [`IdentityError::Conflict`] when the email is taken.
/// The pre-check gives the common case a clean error; the storage
/// unique constraint remains the source of truth, so a concurrent
/// registration between check and insert still resolves to exactly
/// one success.
pub async fn register(
    email: &str,
    password: &str,
    name: Option<&str>,
) -> Result<AuthResponse, IdentityError> {
    if UserStore::get_user_by_email(email).await?.is_some() {
        return Err(IdentityError::Conflict("Email already exists".to_string()).log());
    }

    let password_hash = hash_password(password)?;

    let mut user = User::new(
        gen_new_user_id().await?,
        email.to_string(),
        name.map(str::to_string),
    );
    user.password_hash = Some(password_hash);

    let user = match UserStore::create_user(user).await {
        Ok(user) => user,
        Err(UserError::DuplicateEmail) => {
            return Err(IdentityError::Conflict("Email already exists".to_string()).log());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!("Registered user {}", user.id);

    let (access_token, refresh_token) = issue_tokens(&user.id)?;
    Ok(AuthResponse {
        user: user.into(),
        access_token,
        refresh_token,
    })
}

/// Authenticate with email and password
///
/// Unknown email, a password-less account and a wrong password all
/// fail with the identical "Invalid credentials" error so the caller
/// cannot tell which it was. The inactive check runs only after the
/// credentials matched.
pub async fn login(email: &str, password: &str) -> Result<AuthResponse, IdentityError> {
    let user = UserStore::get_user_by_email(email).await?;

    let Some(user) = user else {
        return Err(IdentityError::Unauthorized("Invalid credentials".to_string()).log());
    };
    let Some(password_hash) = user.password_hash.as_deref() else {
        return Err(IdentityError::Unauthorized("Invalid credentials".to_string()).log());
    };

    if !verify_password(password, password_hash) {
        return Err(IdentityError::Unauthorized("Invalid credentials".to_string()).log());
    }

    if !user.is_active {
        return Err(IdentityError::Unauthorized("Account is inactive".to_string()).log());
    }

    let (access_token, refresh_token) = issue_tokens(&user.id)?;
    Ok(AuthResponse {
        user: user.into(),
        access_token,
        refresh_token,
    })
}

/// Log in via an already-verified provider identity
///
/// The provider handshake happens upstream; the caller hands us a
/// verified (provider, subject) pair. First sight of the pair links it
/// to the user with the given email, creating that user (verified,
/// password-less) when none exists. The resolved user passes the same
/// inactive gate as password login before any token is issued.
pub async fn social_login(
    provider: Provider,
    provider_user_id: &str,
    email: &str,
    name: Option<&str>,
    avatar: Option<&str>,
) -> Result<AuthResponse, IdentityError> {
    let account = SocialAccountStore::get_by_provider(provider, provider_user_id).await?;

    let user = match account {
        Some(account) => {
            let user = UserStore::get_user(&account.user_id).await?.ok_or_else(|| {
                IdentityError::ResourceNotFound {
                    resource_type: "User".to_string(),
                    resource_id: account.user_id.clone(),
                }
                .log()
            })?;

            // Touch the link on re-login so updated_at tracks the
            // most recent use of this provider identity.
            SocialAccountStore::update_account(
                &account.id,
                account.access_token.clone(),
                account.refresh_token.clone(),
                account.expires_at,
            )
            .await?;

            user
        }
        None => {
            let user = match UserStore::get_user_by_email(email).await? {
                Some(user) => user,
                None => {
                    let mut user = User::new(
                        gen_new_user_id().await?,
                        email.to_string(),
                        name.map(str::to_string),
                    );
                    user.avatar = avatar.map(str::to_string);
                    // The provider asserts it verified this email.
                    user.email_verified = true;
                    UserStore::create_user(user).await?
                }
            };

            let link = SocialAccount::new(
                Uuid::new_v4().to_string(),
                user.id.clone(),
                provider,
                provider_user_id.to_string(),
            );
            match SocialAccountStore::create_account(link).await {
                Ok(account) => {
                    tracing::info!(
                        "Linked {} identity {} to user {}",
                        account.provider,
                        account.provider_user_id,
                        user.id
                    );
                }
                // A concurrent login saw this provider identity first;
                // the link exists, which is all this path needs.
                Err(SocialAccountError::DuplicateLink) => {}
                Err(e) => return Err(e.into()),
            }

            user
        }
    };

    if !user.is_active {
        return Err(IdentityError::Unauthorized("Account is inactive".to_string()).log());
    }

    let (access_token, refresh_token) = issue_tokens(&user.id)?;
    Ok(AuthResponse {
        user: user.into(),
        access_token,
        refresh_token,
    })
}

/// Resolve the user behind a bearer token's subject claim
///
/// Used by the bearer guard path after token verification. Absent and
/// inactive users fail identically.
pub async fn validate_user(user_id: &str) -> Result<UserProfile, IdentityError> {
    match UserStore::get_user(user_id).await? {
        Some(user) if user.is_active => Ok(user.into()),
        _ => Err(IdentityError::Unauthorized("User not found or inactive".to_string()).log()),
    }
}

/// Verify a bearer token and resolve its user in one step
pub async fn authenticate_bearer(token: &str) -> Result<UserProfile, IdentityError> {
    let user_id = TOKEN_ISSUER.verify(token)?;
    validate_user(&user_id).await
}
