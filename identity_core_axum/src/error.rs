use http::StatusCode;

use identity_core::IdentityError;

/// Helper trait for converting errors to a standard response error format
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

/// Implementation for IdentityError to map variants to appropriate status codes
impl<T> IntoResponseError<T> for Result<T, IdentityError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            let status = match &e {
                IdentityError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                IdentityError::Conflict(_) => StatusCode::CONFLICT,
                IdentityError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
                IdentityError::User(_) => StatusCode::BAD_REQUEST,
                IdentityError::SocialAccount(_) => StatusCode::BAD_REQUEST,
                IdentityError::ApiKey(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            // The tagged variants carry the exact message the caller
            // should see; everything else uses the display form.
            let message = match e {
                IdentityError::Unauthorized(msg) | IdentityError::Conflict(msg) => msg,
                other => other.to_string(),
            };
            (status, message)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_maps_to_401() {
        let result: Result<(), IdentityError> =
            Err(IdentityError::Unauthorized("Invalid credentials".to_string()));

        let response_error = result.into_response_error();

        assert!(response_error.is_err());
        if let Err((status, message)) = response_error {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(message, "Invalid credentials");
        }
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let result: Result<(), IdentityError> =
            Err(IdentityError::Conflict("Email already exists".to_string()));

        let response_error = result.into_response_error();

        assert!(response_error.is_err());
        if let Err((status, message)) = response_error {
            assert_eq!(status, StatusCode::CONFLICT);
            assert_eq!(message, "Email already exists");
        }
    }

    #[test]
    fn test_resource_not_found_maps_to_404() {
        let result: Result<(), IdentityError> = Err(IdentityError::ResourceNotFound {
            resource_type: "ApiKey".to_string(),
            resource_id: "123".to_string(),
        });

        let response_error = result.into_response_error();

        assert!(response_error.is_err());
        if let Err((status, _)) = response_error {
            assert_eq!(status, StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn test_internal_maps_to_500() {
        let result: Result<(), IdentityError> =
            Err(IdentityError::Internal("secret generation failed".to_string()));

        let response_error = result.into_response_error();

        assert!(response_error.is_err());
        if let Err((status, _)) = response_error {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_success_case_passes_through() {
        let result: Result<String, IdentityError> = Ok("Success".to_string());

        let response_error = result.into_response_error();

        assert!(response_error.is_ok());
        if let Ok(value) = response_error {
            assert_eq!(value, "Success");
        }
    }
}
