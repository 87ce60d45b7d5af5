pub mod parser;

use gogr_core::error::Result;
use gogr_core::model::{OutputRecord, SourceUnit};
use gogr_core::parser::{ExtractOptions, SyntaxIndexer};

pub use parser::{Extractor, GoParser};

/// Go indexer: tree-sitter-go parsing followed by record extraction.
#[derive(Clone, Default)]
pub struct GoIndexer {
    parser: GoParser,
    options: ExtractOptions,
}

impl GoIndexer {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            parser: GoParser::new(),
            options,
        }
    }
}

impl SyntaxIndexer for GoIndexer {
    fn language(&self) -> &str {
        "go"
    }

    fn index(&self, unit: &SourceUnit) -> Result<Vec<OutputRecord>> {
        let tree = self.parser.parse(unit)?;
        Ok(Extractor::new(unit, self.options).extract(&tree))
    }
}
