use std::fs;
use std::sync::Arc;

use gogr_core::ingest::load_unit;
use gogr_core::{
    FileWorker, GogrError, MemorySink, OutputRecord, RecordKind, SourceUnit, SyntaxIndexer,
};
use gogr_ingest::{Executor, IngestError};
use tempfile::tempdir;

/// Emits one `call` record per line starting with `call `; rejects content containing `!!`.
struct LineIndexer;

impl SyntaxIndexer for LineIndexer {
    fn language(&self) -> &str {
        "lines"
    }

    fn index(&self, unit: &SourceUnit) -> gogr_core::Result<Vec<OutputRecord>> {
        if unit.content.contains("!!") {
            return Err(GogrError::Parse("1:1: unexpected `!!`".to_string()));
        }
        let mut offset = 0;
        let mut records = Vec::new();
        for line in unit.content.split_inclusive('\n') {
            if let Some(rest) = line.strip_prefix("call ") {
                records.push(OutputRecord::new(
                    unit.path(),
                    unit.line_of(offset),
                    RecordKind::Call,
                    &[rest],
                ));
            }
            offset += line.len();
        }
        Ok(records)
    }
}

fn worker(sink: &Arc<MemorySink>) -> FileWorker {
    FileWorker::new(Arc::new(LineIndexer), sink.clone())
}

#[test]
fn emits_records_with_absolute_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.src");
    fs::write(&path, "noise\ncall f(x)\n\ncall  g( y )\n").unwrap();

    let sink = Arc::new(MemorySink::new());
    let emitted = worker(&sink).process(path.to_str().unwrap()).unwrap();

    assert_eq!(emitted, 2);
    let lines: Vec<String> = sink.records().iter().map(ToString::to_string).collect();
    let file = path.display().to_string();
    assert_eq!(
        lines,
        vec![format!("{file}:2:call: f(x)"), format!("{file}:4:call: g( y )")]
    );
}

#[test]
fn parse_failure_emits_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.src");
    fs::write(&path, "call f(x)\n!!\n").unwrap();

    let sink = Arc::new(MemorySink::new());
    let err = worker(&sink).process(path.to_str().unwrap()).unwrap_err();

    assert!(err.is_parse_failure());
    assert!(sink.records().is_empty());
}

#[test]
fn missing_file_is_an_io_error_naming_the_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.src");

    let sink = Arc::new(MemorySink::new());
    let err = worker(&sink).process(path.to_str().unwrap()).unwrap_err();

    assert!(matches!(err, GogrError::Io { .. }));
    assert!(err.to_string().contains("missing.src"));
}

#[test]
fn invalid_utf8_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("latin1.src");
    fs::write(&path, [b'c', b'a', b'l', b'l', b' ', 0xff, b'\n']).unwrap();

    let err = load_unit(&path).unwrap_err();
    assert!(matches!(err, GogrError::Encoding { .. }));
}

#[test]
fn relative_names_are_made_absolute() {
    let unit = load_unit(std::path::Path::new("Cargo.toml")).unwrap();
    assert!(unit.path().is_absolute());
    assert!(unit.path().ends_with("Cargo.toml"));
}

#[test]
fn executor_maps_failures() {
    let sink = Arc::new(MemorySink::new());
    let err = worker(&sink).execute("").unwrap_err();
    assert!(matches!(err, IngestError::Execution(_)));
}
