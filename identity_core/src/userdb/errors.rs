use thiserror::Error;

#[derive(Clone, Error, Debug)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    /// The email unique constraint rejected an insert. The storage
    /// layer is the source of truth for email uniqueness; callers map
    /// this to a conflict.
    #[error("Email already exists")]
    DuplicateEmail,

    #[error("Storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(UserError::NotFound.to_string(), "User not found");
        assert_eq!(
            UserError::DuplicateEmail.to_string(),
            "Email already exists"
        );
        assert_eq!(
            UserError::Storage("Connection failed".to_string()).to_string(),
            "Storage error: Connection failed"
        );
    }

    /// Test error propagation through the ? operator
    #[test]
    fn test_error_propagation() {
        fn require_email(email: &str) -> Result<(), UserError> {
            if email.is_empty() {
                return Err(UserError::Storage("email cannot be empty".to_string()));
            }
            Ok(())
        }

        fn process(email: &str) -> Result<String, UserError> {
            require_email(email)?;
            Ok(format!("ok: {email}"))
        }

        assert!(process("a@example.com").is_ok());
        assert!(matches!(process(""), Err(UserError::Storage(_))));
    }
}
