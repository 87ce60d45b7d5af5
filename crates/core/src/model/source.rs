use std::path::{Path, PathBuf};

/// One file's absolute path and content, with its byte offset -> line index.
///
/// Owned by the worker processing the file and dropped once extraction ends.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub content: String,
    pub lines: LineIndex,
}

impl SourceUnit {
    pub fn new(path: PathBuf, content: String) -> Self {
        let lines = LineIndex::new(&content);
        Self {
            path,
            content,
            lines,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 1-based line of a byte offset.
    pub fn line_of(&self, offset: usize) -> usize {
        self.lines.line_of(offset)
    }
}

/// Start offsets of every line, for byte offset -> 1-based line lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            content
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    /// Offsets past the end clamp to the last line.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx + 1,
            Err(idx) => idx,
        }
    }
}
