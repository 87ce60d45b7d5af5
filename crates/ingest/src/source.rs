use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::error::IngestError;

/// Where file names come from: explicit arguments, or one name per line of a stream.
pub enum FilenameSource {
    Args(Vec<String>),
    Lines(Box<dyn AsyncBufRead + Unpin + Send>),
}

impl FilenameSource {
    /// Arguments win when there are any; otherwise names are read from `reader`.
    pub fn from_args_or<R>(args: Vec<String>, reader: R) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        if args.is_empty() {
            FilenameSource::Lines(Box::new(reader))
        } else {
            FilenameSource::Args(args)
        }
    }

    /// Feeds every entry to `submit` in order. A read failure stops enumeration.
    pub(crate) async fn for_each<F, Fut>(self, mut submit: F) -> Result<usize, IngestError>
    where
        F: FnMut(SourceEntry) -> Fut,
        Fut: Future<Output = Result<(), IngestError>>,
    {
        let mut count = 0;
        match self {
            FilenameSource::Args(names) => {
                for name in names {
                    submit(SourceEntry::Name(name)).await?;
                    count += 1;
                }
            }
            FilenameSource::Lines(mut reader) => {
                let mut buf = Vec::new();
                loop {
                    buf.clear();
                    let read = reader
                        .read_until(b'\n', &mut buf)
                        .await
                        .map_err(IngestError::Enumeration)?;
                    if read == 0 {
                        break;
                    }
                    let Some(entry) = SourceEntry::from_line(&buf) else {
                        tracing::debug!("skipping blank file name line");
                        continue;
                    };
                    submit(entry).await?;
                    count += 1;
                }
            }
        }
        Ok(count)
    }
}

/// One line of the name stream.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SourceEntry {
    Name(String),
    /// Not valid UTF-8; carries the lossy rendering for diagnostics.
    Unreadable(String),
}

impl SourceEntry {
    /// `None` for blank lines. Strips the line terminator and a trailing `\r`.
    fn from_line(line: &[u8]) -> Option<Self> {
        let line = line.strip_suffix(b"\n").unwrap_or(line);
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.iter().all(u8::is_ascii_whitespace) {
            return None;
        }
        Some(match std::str::from_utf8(line) {
            Ok(name) => SourceEntry::Name(name.to_string()),
            Err(_) => SourceEntry::Unreadable(String::from_utf8_lossy(line).into_owned()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_terminators_are_stripped() {
        assert_eq!(
            SourceEntry::from_line(b"a.go\r\n"),
            Some(SourceEntry::Name("a.go".to_string()))
        );
        assert_eq!(
            SourceEntry::from_line(b"last.go"),
            Some(SourceEntry::Name("last.go".to_string()))
        );
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(SourceEntry::from_line(b"\n"), None);
        assert_eq!(SourceEntry::from_line(b" \t\r\n"), None);
    }

    #[test]
    fn invalid_utf8_is_kept_as_unreadable() {
        assert_eq!(
            SourceEntry::from_line(b"bad\xff.go\n"),
            Some(SourceEntry::Unreadable("bad\u{FFFD}.go".to_string()))
        );
    }
}
