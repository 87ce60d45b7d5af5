use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("reading file names failed: {0}")]
    Enumeration(#[source] std::io::Error),
    #[error("execution failed: {0}")]
    Execution(String),
    #[error("worker task failed: {0}")]
    Join(String),
}
