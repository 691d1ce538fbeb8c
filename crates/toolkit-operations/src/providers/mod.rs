mod rest;
mod store;

pub use rest::RestToolkitApi;
pub use store::{JsonDraftStore, SavedSession, SessionStore};
