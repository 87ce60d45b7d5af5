pub mod error;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod parser;
pub mod text;

pub use error::{GogrError, Result};
pub use ingest::{FileWorker, MemorySink, RecordSink, WriterSink};
pub use model::{OutputRecord, RecordKind, SourceUnit};
pub use parser::{ExtractOptions, SyntaxIndexer};
