use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::apikey::{ApiKey, ApiKeyError, ApiKeyInfo, ApiKeyStore};
use crate::userdb::{UserProfile, UserStore};
use crate::utils::gen_random_string;

use super::errors::IdentityError;

/// Prefix marking a credential as an API key. Classification only,
/// not a security boundary.
const API_KEY_PREFIX: &str = "sk_";

/// Create a new API key for a user
///
/// The secret is 32 random bytes (256 bits) base64url-encoded behind
/// the `sk_` prefix. The returned record is the only place the
/// plaintext secret is ever handed out; every later read path returns
/// [`ApiKeyInfo`] instead.
pub async fn generate_api_key(
    user_id: &str,
    name: &str,
    expires_at: Option<DateTime<Utc>>,
) -> Result<ApiKey, IdentityError> {
    if UserStore::get_user(user_id).await?.is_none() {
        return Err(IdentityError::ResourceNotFound {
            resource_type: "User".to_string(),
            resource_id: user_id.to_string(),
        }
        .log());
    }

    let secret = format!(
        "{API_KEY_PREFIX}{}",
        gen_random_string(32).map_err(|e| IdentityError::Internal(e.to_string()))?
    );

    let key = ApiKey::new(
        Uuid::new_v4().to_string(),
        user_id.to_string(),
        secret,
        name.to_string(),
        expires_at,
    );

    let key = ApiKeyStore::create_key(key).await?;
    tracing::info!("Created API key {} for user {}", key.id, user_id);
    Ok(key)
}

/// Resolve an API key secret to its owning user
///
/// Unknown and revoked secrets fail identically; an expired key gets
/// its own message since holding the key already proves possession.
/// The owner's active flag is deliberately not re-checked on this
/// path; only the bearer path applies it.
pub async fn validate_api_key(secret: &str) -> Result<UserProfile, IdentityError> {
    let Some(key) = ApiKeyStore::get_active_by_secret(secret).await? else {
        return Err(IdentityError::Unauthorized("Invalid API key".to_string()).log());
    };

    if let Some(expires_at) = key.expires_at {
        if expires_at < Utc::now() {
            return Err(IdentityError::Unauthorized("API key expired".to_string()).log());
        }
    }

    // Best-effort: a failed timestamp write must not fail the
    // validating request.
    if let Err(e) = ApiKeyStore::touch_last_used(&key.id).await {
        tracing::warn!("Failed to update last-used timestamp for API key {}: {}", key.id, e);
    }

    let user = UserStore::get_user(&key.user_id).await?.ok_or_else(|| {
        IdentityError::Unauthorized("Invalid API key".to_string()).log()
    })?;

    Ok(user.into())
}

/// List a user's API keys without echoing any secret
pub async fn list_api_keys(user_id: &str) -> Result<Vec<ApiKeyInfo>, IdentityError> {
    let keys = ApiKeyStore::get_keys_by_user(user_id).await?;
    Ok(keys.into_iter().map(ApiKeyInfo::from).collect())
}

/// Revoke an API key by id
///
/// A flag flip, not a deletion; fails with
/// [`IdentityError::ResourceNotFound`] for an unknown id.
pub async fn revoke_api_key(id: &str) -> Result<ApiKeyInfo, IdentityError> {
    match ApiKeyStore::revoke_key(id).await {
        Ok(key) => {
            tracing::info!("Revoked API key {}", key.id);
            Ok(key.into())
        }
        Err(ApiKeyError::NotFound) => Err(IdentityError::ResourceNotFound {
            resource_type: "ApiKey".to_string(),
            resource_id: id.to_string(),
        }
        .log()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordination::identity::register;
    use crate::test_utils::{init_test_environment, unique_test_email};
    use chrono::Duration;
    use serial_test::serial;

    async fn register_user() -> UserProfile {
        register(&unique_test_email(), "secret", None)
            .await
            .expect("registration should succeed")
            .user
    }

    #[tokio::test]
    #[serial]
    async fn test_generate_and_validate_round_trip() {
        init_test_environment().await;

        let user = register_user().await;
        let key = generate_api_key(&user.id, "ci-key", None)
            .await
            .expect("generation should succeed");

        assert!(key.secret.starts_with("sk_"));
        // 3-char prefix + 43 chars of base64url for 32 bytes
        assert_eq!(key.secret.len(), 46);

        // Validates repeatedly until revoked
        for _ in 0..3 {
            let resolved = validate_api_key(&key.secret)
                .await
                .expect("validation should succeed");
            assert_eq!(resolved.id, user.id);
        }

        revoke_api_key(&key.id).await.expect("revoke should succeed");

        let result = validate_api_key(&key.secret).await;
        assert!(matches!(
            result,
            Err(IdentityError::Unauthorized(msg)) if msg == "Invalid API key"
        ));
    }

    #[tokio::test]
    #[serial]
    async fn test_generation_for_unknown_user_fails() {
        init_test_environment().await;

        let result = generate_api_key("no-such-user", "ci-key", None).await;
        assert!(matches!(
            result,
            Err(IdentityError::ResourceNotFound { resource_type, .. }) if resource_type == "User"
        ));
    }

    #[tokio::test]
    #[serial]
    async fn test_expired_key_fails_even_while_active() {
        init_test_environment().await;

        let user = register_user().await;
        let expired = Utc::now() - Duration::hours(1);
        let key = generate_api_key(&user.id, "stale-key", Some(expired))
            .await
            .expect("generation should succeed");

        // Still marked active, but past its expiry
        let result = validate_api_key(&key.secret).await;
        assert!(matches!(
            result,
            Err(IdentityError::Unauthorized(msg)) if msg == "API key expired"
        ));
    }

    #[tokio::test]
    #[serial]
    async fn test_validation_touches_last_used() {
        init_test_environment().await;

        let user = register_user().await;
        let key = generate_api_key(&user.id, "ci-key", None)
            .await
            .expect("generation should succeed");
        assert!(key.last_used_at.is_none());

        validate_api_key(&key.secret)
            .await
            .expect("validation should succeed");

        let keys = list_api_keys(&user.id).await.expect("list should succeed");
        let info = keys.iter().find(|k| k.id == key.id).expect("key listed");
        assert!(info.last_used_at.is_some());
    }

    #[tokio::test]
    #[serial]
    async fn test_list_does_not_expose_secrets() {
        init_test_environment().await;

        let user = register_user().await;
        let key = generate_api_key(&user.id, "ci-key", None)
            .await
            .expect("generation should succeed");

        let keys = list_api_keys(&user.id).await.expect("list should succeed");
        let json = serde_json::to_string(&keys).expect("serialize");
        assert!(!json.contains(&key.secret));
    }

    #[tokio::test]
    #[serial]
    async fn test_revoke_unknown_key_is_not_found() {
        init_test_environment().await;

        let result = revoke_api_key("no-such-id").await;
        assert!(matches!(
            result,
            Err(IdentityError::ResourceNotFound { resource_type, .. }) if resource_type == "ApiKey"
        ));
    }

    #[tokio::test]
    #[serial]
    async fn test_inactive_owner_still_validates() {
        init_test_environment().await;

        // Asymmetry with the bearer path, preserved on purpose: the
        // API key path does not re-check the owner's active flag.
        let user = register_user().await;
        let key = generate_api_key(&user.id, "ci-key", None)
            .await
            .expect("generation should succeed");

        let mut row = UserStore::get_user(&user.id)
            .await
            .expect("lookup")
            .expect("user exists");
        row.is_active = false;
        UserStore::update_user(row).await.expect("deactivate");

        let resolved = validate_api_key(&key.secret)
            .await
            .expect("validation should still succeed");
        assert_eq!(resolved.id, user.id);
        assert!(!resolved.is_active);
    }
}
