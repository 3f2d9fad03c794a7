use thiserror::Error;

#[derive(Clone, Error, Debug)]
pub enum SocialAccountError {
    #[error("Social account not found")]
    NotFound,

    /// The (provider, provider_user_id) composite unique index
    /// rejected an insert: that provider identity is already linked
    /// to a local user.
    #[error("Provider identity already linked")]
    DuplicateLink,

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            SocialAccountError::DuplicateLink.to_string(),
            "Provider identity already linked"
        );
        assert_eq!(
            SocialAccountError::UnknownProvider("myspace".to_string()).to_string(),
            "Unknown provider: myspace"
        );
    }
}
