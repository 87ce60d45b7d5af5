use gogr_core::error::{GogrError, Result};
use gogr_core::model::SourceUnit;
use gogr_core::text::normalize;
use tree_sitter::{Language, Node, Parser, Tree};

pub mod ast;
pub mod extract;

pub use extract::Extractor;

/// Go parser adapter over tree-sitter-go.
///
/// The language handle is shared; a fresh `tree_sitter::Parser` is built per file.
#[derive(Clone)]
pub struct GoParser {
    language: Language,
}

impl GoParser {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }

    /// Parses the unit; any syntax error fails the whole file.
    pub fn parse(&self, unit: &SourceUnit) -> Result<Tree> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| GogrError::Internal(format!("Failed to load Go grammar: {e}")))?;

        let tree = parser
            .parse(unit.content.as_bytes(), None)
            .ok_or_else(|| GogrError::Parse(format!("{}: parser produced no tree", unit.path.display())))?;

        let root = tree.root_node();
        if root.has_error() {
            let message = first_error(root)
                .map(|node| describe_error(node, &unit.content))
                .unwrap_or_else(|| "syntax error".to_string());
            return Err(GogrError::Parse(format!("{}:{}", unit.path.display(), message)));
        }
        if let Some(message) = check_top_level(root, &unit.content) {
            return Err(GogrError::Parse(format!("{}:{}", unit.path.display(), message)));
        }
        Ok(tree)
    }
}

impl Default for GoParser {
    fn default() -> Self {
        Self::new()
    }
}

/// First `ERROR` or `MISSING` node in source order.
fn first_error(root: Node) -> Option<Node> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

const TOP_LEVEL_KINDS: &[&str] = &[
    "package_clause",
    "import_declaration",
    "function_declaration",
    "method_declaration",
    "type_declaration",
    "const_declaration",
    "var_declaration",
];

/// The grammar accepts statements and a missing `package` clause at file level; Go does not.
fn check_top_level(root: Node, source: &str) -> Option<String> {
    let mut cursor = root.walk();
    let mut decls = root
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment");

    let Some(first) = decls.next() else {
        let pos = root.end_position();
        return Some(format!("{}:{}: expected `package`", pos.row + 1, pos.column + 1));
    };
    if first.kind() != "package_clause" {
        return Some(format!(
            "{}: expected `package`, found `{}`",
            position(first),
            snippet(first, source)
        ));
    }
    decls
        .find(|child| !TOP_LEVEL_KINDS.contains(&child.kind()))
        .map(|stray| {
            format!(
                "{}: non-declaration statement outside function body `{}`",
                position(stray),
                snippet(stray, source)
            )
        })
}

fn position(node: Node) -> String {
    let pos = node.start_position();
    format!("{}:{}", pos.row + 1, pos.column + 1)
}

fn snippet(node: Node, source: &str) -> String {
    normalize(source.get(node.start_byte()..node.end_byte()).unwrap_or(""))
        .chars()
        .take(32)
        .collect()
}

fn describe_error(node: Node, source: &str) -> String {
    if node.is_missing() {
        return format!("{}: missing `{}`", position(node), node.kind());
    }
    format!("{}: syntax error near `{}`", position(node), snippet(node, source))
}
