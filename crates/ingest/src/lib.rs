pub mod error;
pub mod runtime;
pub mod source;
pub mod traits;
pub mod types;

pub use error::IngestError;
pub use runtime::{DynExecutor, Dispatcher, FlowControlConfig, PendingTracker};
pub use source::FilenameSource;
pub use traits::Executor;
pub use types::RunStats;
