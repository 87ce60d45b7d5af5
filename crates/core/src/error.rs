use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GogrError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not valid UTF-8", path.display())]
    Encoding { path: PathBuf },
    #[error("Parsing error: {0}")]
    Parse(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GogrError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GogrError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the file content was rejected by the parser.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, GogrError::Parse(_))
    }
}

pub type Result<T> = std::result::Result<T, GogrError>;
