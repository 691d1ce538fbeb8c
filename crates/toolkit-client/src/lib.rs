//! REST client for the hosted toolkit backend.
//!
//! The backend is a third-party auto-generated REST API; this crate owns
//! everything between the domain and the wire: a shared sliding-window rate
//! limiter, retry with exponential backoff on rate-limit responses, typed
//! payload and record types, and endpoint wrappers for the creation,
//! deletion, auth, and catalog surfaces.

mod auth;
mod catalog;
mod client;
mod endpoints;
mod error;
mod ratelimit;
mod retry;
mod types;

pub use auth::AuthSession;
pub use catalog::{
    CatalogStep, CatalogSubphase, CommentRecord, Industry, ProjectType, ToolkitSummary,
};
pub use client::{DEFAULT_BASE_URL, RestClient};
pub use error::{ClientError, Result};
pub use ratelimit::RateLimiter;
pub use retry::RetryPolicy;
pub use types::{
    StagePayload, StageRecord, SubstagePayload, SubstageRecord, ToolPayload, ToolRecord,
    ToolkitPayload, ToolkitRecord, UserRecord,
};
