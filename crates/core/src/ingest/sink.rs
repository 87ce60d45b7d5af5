use std::io::{self, Write};
use std::sync::Mutex;

use crate::model::OutputRecord;

/// Destination shared by all workers. Every `emit` writes one whole line.
pub trait RecordSink: Send + Sync {
    fn emit(&self, record: &OutputRecord) -> io::Result<()>;

    fn flush(&self) -> io::Result<()>;
}

fn poisoned() -> io::Error {
    io::Error::other("record sink lock poisoned")
}

/// Serializes records onto a writer; a line is written with a single `write_all` under the lock.
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|_| poisoned())
    }
}

impl<W: Write + Send> RecordSink for WriterSink<W> {
    fn emit(&self, record: &OutputRecord) -> io::Result<()> {
        let line = format!("{record}\n");
        let mut guard = self.writer.lock().map_err(|_| poisoned())?;
        guard.write_all(line.as_bytes())
    }

    fn flush(&self) -> io::Result<()> {
        self.writer.lock().map_err(|_| poisoned())?.flush()
    }
}

/// Keeps records as values.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<OutputRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<OutputRecord> {
        self.records
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Records sorted, for order-insensitive comparisons.
    pub fn sorted(&self) -> Vec<OutputRecord> {
        let mut records = self.records();
        records.sort();
        records
    }
}

impl RecordSink for MemorySink {
    fn emit(&self, record: &OutputRecord) -> io::Result<()> {
        self.records
            .lock()
            .map_err(|_| poisoned())?
            .push(record.clone());
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}
