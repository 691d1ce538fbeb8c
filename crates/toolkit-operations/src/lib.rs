//! Publish orchestration for toolkit records.
//!
//! The publish operation creates every remote resource a toolkit needs
//! (tools, process stages, substages, the toolkit itself) in dependency
//! order against the hosted backend, and rolls the partial creation back
//! when any step fails.

mod error;
pub mod operations;
pub mod providers;
pub mod traits;

pub use error::{OperationError, Result, RollbackFailure};
pub use operations::publish::{
    PublishContext, PublishOperation, PublishPhase, ResourceKind, ROLLBACK_ORDER,
};
