//! Source text helpers shared by every language extractor.
//!
//! Spans are resolved raw, composed by the caller, and only then collapsed
//! onto a single line, so original formatting never leaks into records.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\t\x0B\x0C\r ]+").expect("static regex"));

/// A 0-based, half-open byte range into a source unit's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Covers both spans, including whatever lies between them.
    pub fn cover(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Exact original text of `span`; an absent span resolves to `""`.
///
/// Out-of-range or non-char-aligned spans also resolve to `""`.
pub fn resolve(source: &str, span: Option<Span>) -> &str {
    match span {
        Some(span) => source.get(span.start..span.end).unwrap_or(""),
        None => "",
    }
}

/// Drops newlines, collapses whitespace runs into one space and trims the ends.
pub fn normalize(s: &str) -> String {
    let without_newlines = s.replace('\n', "");
    WHITESPACE_RUN
        .replace_all(&without_newlines, " ")
        .trim()
        .to_string()
}

/// Joins the non-empty parts with `sep`, keeping their order.
pub fn join_non_empty(sep: &str, parts: &[&str]) -> String {
    parts
        .iter()
        .copied()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_absent_span_is_empty() {
        assert_eq!(resolve("func main() {}", None), "");
    }

    #[test]
    fn resolve_keeps_comments_and_line_breaks() {
        let src = "f(a, // first\n\tb)";
        assert_eq!(resolve(src, Some(Span::new(2, 16))), "a, // first\n\tb");
    }

    #[test]
    fn resolve_out_of_range_is_empty() {
        assert_eq!(resolve("abc", Some(Span::new(2, 10))), "");
    }

    #[test]
    fn normalize_collapses_multiline_text() {
        assert_eq!(
            normalize("D(s string,\n\t\tx int,\n\t\ty int) (string, error)"),
            "D(s string, x int, y int) (string, error)"
        );
        assert_eq!(normalize("  a \t\r\n  b  "), "a b");
    }

    #[test]
    fn normalize_is_idempotent() {
        for s in [
            "",
            "   ",
            "\n\n",
            "if isBla := true; isBla &&\n\t\ttrue ||\n\t\tfalse",
            "x\t\ty  \r\n z",
        ] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
            assert!(!once.contains('\n'));
            assert!(!once.contains("  "));
        }
    }

    #[test]
    fn join_drops_empty_parts() {
        assert_eq!(join_non_empty(";", &["", "a", "", "b"]), "a;b");
        assert_eq!(join_non_empty(";", &["", "x", ""]), "x");
        assert_eq!(join_non_empty(";", &["", "", ""]), "");
        assert_eq!(join_non_empty(";", &[]), "");
    }

    #[test]
    fn cover_spans_gap() {
        assert_eq!(Span::new(4, 6).cover(Span::new(10, 12)), Span::new(4, 12));
    }
}
