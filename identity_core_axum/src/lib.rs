//! Axum integration for the `identity-core` credential library.
//!
//! Provides route-layer middleware that authenticates requests with either a
//! bearer token or an API key, and an [`AuthPrincipal`] extractor that hands
//! the resolved user to route handlers. Guard failures are bare `401`
//! responses; no detail about the failure reason is exposed to the caller.

mod error;
mod middleware;
mod principal;

pub use error::IntoResponseError;
pub use middleware::{require_api_key_auth, require_bearer_auth};
pub use principal::AuthPrincipal;

// Re-export the initialization function so demo apps only need this crate.
pub use identity_core::init;
