mod api;
mod progress;
mod store;

pub use api::ToolkitApi;
pub use progress::{NullProgress, ProgressSink};
pub use store::DraftStore;
