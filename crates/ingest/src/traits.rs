use crate::error::IngestError;

/// Processes one submitted file name.
///
/// Runs on the blocking pool; one name is always handled by a single call.
pub trait Executor: Send + Sync {
    /// Returns the number of records produced for `name`.
    fn execute(&self, name: &str) -> Result<usize, IngestError>;
}
