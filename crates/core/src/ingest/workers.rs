use std::path::{Path, PathBuf};
use std::sync::Arc;

use gogr_ingest::{Executor, IngestError};
use tracing::debug;

use crate::error::{GogrError, Result};
use crate::model::SourceUnit;
use crate::parser::SyntaxIndexer;

use super::sink::RecordSink;

/// Reads, parses and indexes one file at a time, writing records to the shared sink.
pub struct FileWorker {
    pub indexer: Arc<dyn SyntaxIndexer>,
    pub sink: Arc<dyn RecordSink>,
}

impl FileWorker {
    pub fn new(indexer: Arc<dyn SyntaxIndexer>, sink: Arc<dyn RecordSink>) -> Self {
        Self { indexer, sink }
    }

    /// Processes `name` and returns how many records it emitted.
    ///
    /// Extraction completes before anything is written, so a failing file emits nothing.
    pub fn process(&self, name: &str) -> Result<usize> {
        let unit = load_unit(Path::new(name))?;
        let records = self.indexer.index(&unit)?;
        debug!(
            file = %unit.path().display(),
            "{} records from {} source",
            records.len(),
            self.indexer.language()
        );

        for record in &records {
            self.sink
                .emit(record)
                .map_err(|e| GogrError::io(unit.path(), e))?;
        }
        Ok(records.len())
    }
}

/// Resolves `path` to an absolute path and reads it as UTF-8.
pub fn load_unit(path: &Path) -> Result<SourceUnit> {
    let abs = absolute(path)?;
    let bytes = std::fs::read(&abs).map_err(|e| GogrError::io(&abs, e))?;
    let content = String::from_utf8(bytes).map_err(|_| GogrError::Encoding { path: abs.clone() })?;
    Ok(SourceUnit::new(abs, content))
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| GogrError::io(path, e))
}

impl Executor for FileWorker {
    fn execute(&self, name: &str) -> std::result::Result<usize, IngestError> {
        self.process(name).map_err(gogr_to_ingest_error)
    }
}

fn gogr_to_ingest_error(err: GogrError) -> IngestError {
    IngestError::Execution(err.to_string())
}
