pub mod record;
pub mod source;

pub use record::{OutputRecord, RecordKind, format_tokens};
pub use source::{LineIndex, SourceUnit};
