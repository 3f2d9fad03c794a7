use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::errors::SocialAccountError;

/// Identity providers a local user can be linked to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Local,
    Google,
    Facebook,
    GitHub,
    Apple,
}

impl Provider {
    /// Lowercase name as persisted in the provider column
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Local => "local",
            Provider::Google => "google",
            Provider::Facebook => "facebook",
            Provider::GitHub => "github",
            Provider::Apple => "apple",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = SocialAccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Provider::Local),
            "google" => Ok(Provider::Google),
            "facebook" => Ok(Provider::Facebook),
            "github" => Ok(Provider::GitHub),
            "apple" => Ok(Provider::Apple),
            other => Err(SocialAccountError::UnknownProvider(other.to_string())),
        }
    }
}

/// Represents a provider identity linked to a local user
///
/// The pair (provider, provider_user_id) is unique: one provider
/// identity maps to at most one local user. Rows are created the first
/// time a provider identity is seen and only updated when the provider
/// issues new tokens; deletion happens solely via the user cascade.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct SocialAccount {
    pub id: String,
    /// Owning user id
    pub user_id: String,
    /// Provider name, always one of [`Provider`] in lowercase
    pub provider: String,
    /// Provider-assigned subject id
    pub provider_user_id: String,
    /// Most recent access token issued by the provider, if any
    pub access_token: Option<String>,
    /// Most recent refresh token issued by the provider, if any
    pub refresh_token: Option<String>,
    /// Expiry of the provider access token, if known
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SocialAccount {
    /// Create a new link between a local user and a provider identity
    pub fn new(id: String, user_id: String, provider: Provider, provider_user_id: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            provider: provider.as_str().to_string(),
            provider_user_id,
            access_token: None,
            refresh_token: None,
            expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_roundtrip() {
        for provider in [
            Provider::Local,
            Provider::Google,
            Provider::Facebook,
            Provider::GitHub,
            Provider::Apple,
        ] {
            let parsed: Provider = provider.as_str().parse().expect("known provider");
            assert_eq!(parsed, provider);
        }
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let result = "myspace".parse::<Provider>();
        assert!(matches!(
            result,
            Err(SocialAccountError::UnknownProvider(p)) if p == "myspace"
        ));
    }

    #[test]
    fn test_new_social_account() {
        let account = SocialAccount::new(
            "sa1".to_string(),
            "user1".to_string(),
            Provider::Google,
            "g123".to_string(),
        );

        assert_eq!(account.provider, "google");
        assert_eq!(account.provider_user_id, "g123");
        assert_eq!(account.access_token, None);
        assert_eq!(account.created_at, account.updated_at);
    }
}
