mod errors;
mod store;
mod types;

pub use errors::SocialAccountError;
pub use types::{Provider, SocialAccount};
pub(crate) use store::SocialAccountStore;

pub(crate) async fn init() -> Result<(), SocialAccountError> {
    SocialAccountStore::init().await
}
