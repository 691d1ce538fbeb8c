pub mod error;
pub mod types;
pub mod validate;

pub use error::*;
pub use types::*;
pub use validate::validate_draft;
