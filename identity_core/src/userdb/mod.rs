mod errors;
mod store;
mod types;

pub use errors::UserError;
pub use types::{User, UserProfile};
pub(crate) use store::UserStore;

pub(crate) async fn init() -> Result<(), UserError> {
    UserStore::init().await
}
