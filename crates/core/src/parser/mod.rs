use crate::error::Result;
use crate::model::{OutputRecord, SourceUnit};

/// Extractor configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Log a warning for recognized-but-unhandled constructs.
    pub report_unsupported: bool,
}

/// Parser adapter plus extractor for one language.
///
/// Implementations parse the unit and return its records in source pre-order.
/// A unit that fails to parse yields an error and no records.
pub trait SyntaxIndexer: Send + Sync {
    fn language(&self) -> &str;

    fn index(&self, unit: &SourceUnit) -> Result<Vec<OutputRecord>>;
}
