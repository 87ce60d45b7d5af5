use std::fmt;
use std::path::Path;

use crate::text::normalize;

/// Category tag of an emitted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    Struct,
    Interface,
    Method,
    Call,
    Stmt,
    FuncType,
    /// Free function declaration; rendered as an empty tag.
    Function,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Struct => "struct",
            RecordKind::Interface => "interface",
            RecordKind::Method => "method",
            RecordKind::Call => "call",
            RecordKind::Stmt => "stmt",
            RecordKind::FuncType => "func_type",
            RecordKind::Function => "",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One output line: `<file>:<line>:<kind>: <text>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutputRecord {
    pub file: String,
    pub line: usize,
    pub kind: RecordKind,
    pub text: String,
}

impl OutputRecord {
    /// Builds a record from raw tokens, normalizing each and then the joined text.
    pub fn new(file: &Path, line: usize, kind: RecordKind, tokens: &[&str]) -> Self {
        Self {
            file: file.display().to_string(),
            line,
            kind,
            text: format_tokens(tokens),
        }
    }
}

impl fmt::Display for OutputRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}: {}", self.file, self.line, self.kind, self.text)
    }
}

/// Normalizes every token, joins them with one space and normalizes the result.
pub fn format_tokens(tokens: &[&str]) -> String {
    let parts: Vec<String> = tokens.iter().map(|tok| normalize(tok)).collect();
    normalize(&parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn renders_canonical_line() {
        let record = OutputRecord::new(
            &PathBuf::from("/src/a.go"),
            12,
            RecordKind::Stmt,
            &["for", "i := 0;i < 10;i++"],
        );
        assert_eq!(record.to_string(), "/src/a.go:12:stmt: for i := 0;i < 10;i++");
    }

    #[test]
    fn free_function_has_empty_kind() {
        let record = OutputRecord::new(
            &PathBuf::from("/src/a.go"),
            3,
            RecordKind::Function,
            &["func run(name string,\n\tn int) error"],
        );
        assert_eq!(record.to_string(), "/src/a.go:3:: func run(name string, n int) error");
    }

    #[test]
    fn empty_tokens_do_not_leave_spaces() {
        assert_eq!(format_tokens(&["for", ""]), "for");
        assert_eq!(format_tokens(&["", "  x ", "\n"]), "x");
    }

    #[test]
    fn kind_tags() {
        let tags: Vec<&str> = [
            RecordKind::Struct,
            RecordKind::Interface,
            RecordKind::Method,
            RecordKind::Call,
            RecordKind::Stmt,
            RecordKind::FuncType,
            RecordKind::Function,
        ]
        .iter()
        .map(RecordKind::as_str)
        .collect();
        assert_eq!(
            tags,
            ["struct", "interface", "method", "call", "stmt", "func_type", ""]
        );
    }
}
