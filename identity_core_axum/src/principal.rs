use axum::extract::FromRequestParts;
use http::{StatusCode, request::Parts};

use identity_core::UserProfile;

/// Authenticated user attached to a request, available as an Axum extractor.
///
/// One of the guard middlewares ([`require_bearer_auth`] or
/// [`require_api_key_auth`]) inserts this into the request extensions after a
/// credential has been verified. Extracting it in a handler that is not behind
/// a guard fails with `401 Unauthorized`.
///
/// [`require_bearer_auth`]: crate::require_bearer_auth
/// [`require_api_key_auth`]: crate::require_api_key_auth
///
/// # Example
///
/// ```no_run
/// use axum::{routing::get, Router};
/// use identity_core_axum::AuthPrincipal;
///
/// async fn protected_handler(principal: AuthPrincipal) -> String {
///     format!("Hello, {}!", principal.0.email)
/// }
///
/// let app: Router = Router::new()
///     .route("/protected", get(protected_handler));
/// ```
#[derive(Clone, Debug)]
pub struct AuthPrincipal(pub UserProfile);

impl<S> FromRequestParts<S> for AuthPrincipal
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthPrincipal>()
            .cloned()
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
