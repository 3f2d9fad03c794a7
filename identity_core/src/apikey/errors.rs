use thiserror::Error;

#[derive(Clone, Error, Debug)]
pub enum ApiKeyError {
    #[error("API key not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(ApiKeyError::NotFound.to_string(), "API key not found");
        assert_eq!(
            ApiKeyError::Storage("disk full".to_string()).to_string(),
            "Storage error: disk full"
        );
    }
}
