//! Pre-order walk that turns a Go syntax tree into output records.

use gogr_core::model::{OutputRecord, RecordKind, SourceUnit};
use gogr_core::parser::ExtractOptions;
use gogr_core::text::{Span, join_non_empty, normalize, resolve};
use tracing::warn;
use tree_sitter::{Node, Tree};

use super::ast::{
    CallArg, CallExpr, ForStmt, FuncDecl, GoConstruct, IfStmt, MethodDecl, TypeShape, TypeSpec,
    interface_methods, opt_span, span_of, struct_fields,
};

pub struct Extractor<'u> {
    unit: &'u SourceUnit,
    options: ExtractOptions,
    records: Vec<OutputRecord>,
}

impl<'u> Extractor<'u> {
    pub fn new(unit: &'u SourceUnit, options: ExtractOptions) -> Self {
        Self {
            unit,
            options,
            records: Vec::new(),
        }
    }

    /// Records of the whole tree, in source order.
    pub fn extract(mut self, tree: &Tree) -> Vec<OutputRecord> {
        let mut cursor = tree.walk();
        'walk: loop {
            let descend = self.visit(cursor.node());
            if descend && cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    continue 'walk;
                }
                if !cursor.goto_parent() {
                    break 'walk;
                }
            }
        }
        self.records
    }

    /// Emits the node's records; returns whether its children should be visited.
    fn visit(&mut self, node: Node) -> bool {
        match GoConstruct::classify(node) {
            GoConstruct::TypeSpec(spec) => self.type_spec(&spec),
            GoConstruct::Function(func) => {
                self.function(&func);
                true
            }
            GoConstruct::Method(method) => {
                self.method(&method);
                true
            }
            GoConstruct::Call(call) => {
                self.call(&call);
                false
            }
            GoConstruct::If(stmt) => {
                self.if_stmt(&stmt);
                true
            }
            GoConstruct::For(stmt) => {
                self.for_stmt(&stmt);
                true
            }
            GoConstruct::Other => true,
        }
    }

    fn type_spec(&mut self, spec: &TypeSpec) -> bool {
        let type_name = self.text(span_of(spec.name));
        match spec.shape {
            TypeShape::Interface(body) => {
                for method in interface_methods(body) {
                    let text = format!(
                        "{}.{} {}",
                        type_name,
                        self.text(span_of(method.name)),
                        self.text(method.signature)
                    );
                    self.push(method.name, RecordKind::Interface, &[&text]);
                }
                false
            }
            TypeShape::Struct(body) => {
                for group in struct_fields(body) {
                    let field_type = resolve(self.source(), opt_span(group.ty));
                    for name in &group.names {
                        let text =
                            format!("{}.{} {}", type_name, self.text(span_of(*name)), field_type);
                        self.push(group.node, RecordKind::Struct, &[&text]);
                    }
                }
                false
            }
            TypeShape::FuncType(func) => {
                let text = self.text(span_of(func));
                self.push(spec.node, RecordKind::FuncType, &[text]);
                false
            }
            TypeShape::Unsupported(ty) => {
                if self.options.report_unsupported {
                    warn!(
                        file = %self.unit.path.display(),
                        "type {} {} is unsupported",
                        ty.kind(),
                        normalize(self.text(span_of(ty)))
                    );
                }
                true
            }
        }
    }

    fn function(&mut self, func: &FuncDecl) {
        let signature = self.text(func.signature);
        self.push(func.node, RecordKind::Function, &[signature]);
    }

    fn method(&mut self, method: &MethodDecl) {
        let receiver = self.text(span_of(method.receiver_type));
        let receiver = receiver.strip_prefix('*').unwrap_or(receiver);
        let qualified = format!("{}.{}", receiver, self.text(span_of(method.name)));
        let signature = format!(
            "{}{} {}",
            qualified,
            resolve(self.source(), opt_span(method.parameters)),
            resolve(self.source(), opt_span(method.result))
        );
        self.push(method.node, RecordKind::Method, &[&signature]);
    }

    fn call(&mut self, call: &CallExpr) {
        let args: Vec<String> = call
            .arguments
            .iter()
            .map(|arg| match arg {
                CallArg::Expr(expr) => self.text(span_of(*expr)).to_string(),
                CallArg::FuncLit { parameters, result } => format!(
                    "func {} {} {{...}}",
                    resolve(self.source(), opt_span(*parameters)),
                    resolve(self.source(), opt_span(*result))
                ),
            })
            .collect();
        let text = format!(
            "{}({})",
            resolve(self.source(), call.callee),
            args.join(", ")
        );
        self.push(call.node, RecordKind::Call, &[&text]);
    }

    fn if_stmt(&mut self, stmt: &IfStmt) {
        let header = join_non_empty(
            ";",
            &[
                resolve(self.source(), opt_span(stmt.initializer)),
                resolve(self.source(), opt_span(stmt.condition)),
            ],
        );
        self.push(stmt.node, RecordKind::Stmt, &["if", &header]);
    }

    fn for_stmt(&mut self, stmt: &ForStmt) {
        let header = join_non_empty(
            ";",
            &[
                resolve(self.source(), opt_span(stmt.initializer)),
                resolve(self.source(), opt_span(stmt.condition)),
                resolve(self.source(), opt_span(stmt.update)),
            ],
        );
        self.push(stmt.node, RecordKind::Stmt, &["for", &header]);
    }

    fn source(&self) -> &'u str {
        let unit: &'u SourceUnit = self.unit;
        &unit.content
    }

    fn text(&self, span: Span) -> &'u str {
        resolve(self.source(), Some(span))
    }

    /// Records `tokens` at the line where `anchor` starts.
    fn push(&mut self, anchor: Node, kind: RecordKind, tokens: &[&str]) {
        let line = self.unit.line_of(anchor.start_byte());
        self.records
            .push(OutputRecord::new(&self.unit.path, line, kind, tokens));
    }
}
