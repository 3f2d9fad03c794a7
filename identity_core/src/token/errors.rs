use thiserror::Error;

#[derive(Clone, Error, Debug)]
pub enum TokenError {
    /// Malformed, tampered or expired token. The detail stays out of
    /// the message shown to callers; guards flatten this to a bare
    /// unauthorized outcome either way.
    #[error("Invalid token")]
    Invalid,

    #[error("Token signing failed: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(_: jsonwebtoken::errors::Error) -> Self {
        TokenError::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(TokenError::Invalid.to_string(), "Invalid token");
        assert_eq!(
            TokenError::Signing("bad key".to_string()).to_string(),
            "Token signing failed: bad key"
        );
    }
}
