mod errors;
mod store;
mod types;

pub use errors::ApiKeyError;
pub use types::{ApiKey, ApiKeyInfo};
pub(crate) use store::ApiKeyStore;

pub(crate) async fn init() -> Result<(), ApiKeyError> {
    ApiKeyStore::init().await
}
