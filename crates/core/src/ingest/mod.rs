pub mod sink;
pub mod workers;

pub use sink::{MemorySink, RecordSink, WriterSink};
pub use workers::{FileWorker, load_unit};
