mod errors;
mod issuer;

pub use errors::TokenError;
pub use issuer::TokenIssuer;
