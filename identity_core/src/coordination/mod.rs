mod apikey;
mod errors;
mod identity;

pub use apikey::{generate_api_key, list_api_keys, revoke_api_key, validate_api_key};
pub use errors::IdentityError;
pub use identity::{
    AuthResponse, authenticate_bearer, login, register, social_login, validate_user,
};
