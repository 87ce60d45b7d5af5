//! Typed view over the tree-sitter nodes the extractor cares about.
//!
//! Every optional child is an `Option<Node>`, so an absent clause resolves
//! to an empty span instead of being probed at runtime.

use gogr_core::text::Span;
use tree_sitter::Node;

pub fn span_of(node: Node) -> Span {
    Span::new(node.start_byte(), node.end_byte())
}

pub fn opt_span(node: Option<Node>) -> Option<Span> {
    node.map(span_of)
}

/// The syntax shapes that produce records; everything else is `Other`.
pub enum GoConstruct<'t> {
    TypeSpec(TypeSpec<'t>),
    Function(FuncDecl<'t>),
    Method(MethodDecl<'t>),
    Call(CallExpr<'t>),
    If(IfStmt<'t>),
    For(ForStmt<'t>),
    Other,
}

impl<'t> GoConstruct<'t> {
    pub fn classify(node: Node<'t>) -> Self {
        match node.kind() {
            "type_spec" | "type_alias" => TypeSpec::from_node(node)
                .map(GoConstruct::TypeSpec)
                .unwrap_or(GoConstruct::Other),
            "function_declaration" => GoConstruct::Function(FuncDecl::from_node(node)),
            "method_declaration" => match MethodDecl::from_node(node) {
                Some(method) => GoConstruct::Method(method),
                None => GoConstruct::Function(FuncDecl::from_node(node)),
            },
            "call_expression" => GoConstruct::Call(CallExpr::from_call(node)),
            "type_conversion_expression" => GoConstruct::Call(CallExpr::from_conversion(node)),
            "if_statement" => GoConstruct::If(IfStmt::from_node(node)),
            "for_statement" => ForStmt::from_node(node)
                .map(GoConstruct::For)
                .unwrap_or(GoConstruct::Other),
            _ => GoConstruct::Other,
        }
    }
}

pub struct TypeSpec<'t> {
    pub node: Node<'t>,
    pub name: Node<'t>,
    pub shape: TypeShape<'t>,
}

#[derive(Clone, Copy)]
pub enum TypeShape<'t> {
    Interface(Node<'t>),
    Struct(Node<'t>),
    FuncType(Node<'t>),
    Unsupported(Node<'t>),
}

impl<'t> TypeSpec<'t> {
    fn from_node(node: Node<'t>) -> Option<Self> {
        let name = node.child_by_field_name("name")?;
        let ty = node.child_by_field_name("type")?;
        let shape = match ty.kind() {
            "interface_type" => TypeShape::Interface(ty),
            "struct_type" => TypeShape::Struct(ty),
            "function_type" => TypeShape::FuncType(ty),
            _ => TypeShape::Unsupported(ty),
        };
        Some(Self { node, name, shape })
    }
}

/// One `name signature` line of an interface.
pub struct InterfaceMethod<'t> {
    pub name: Node<'t>,
    pub signature: Span,
}

/// Method elements of an interface body. Embedded interfaces and type sets have no name.
pub fn interface_methods<'t>(interface: Node<'t>) -> Vec<InterfaceMethod<'t>> {
    let mut methods = Vec::new();
    collect_methods(interface, &mut methods);
    methods
}

fn collect_methods<'t>(node: Node<'t>, out: &mut Vec<InterfaceMethod<'t>>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "method_elem" | "method_spec" => {
                let Some(name) = child.child_by_field_name("name") else {
                    continue;
                };
                let parameters = child.child_by_field_name("parameters");
                let result = child.child_by_field_name("result");
                if let Some(signature) = signature_span(parameters, result) {
                    out.push(InterfaceMethod { name, signature });
                }
            }
            // older grammars wrap the members in a list node
            "method_spec_list" => collect_methods(child, out),
            _ => {}
        }
    }
}

/// A field group: all names declared together with one type.
pub struct FieldGroup<'t> {
    pub node: Node<'t>,
    pub names: Vec<Node<'t>>,
    pub ty: Option<Node<'t>>,
}

pub fn struct_fields<'t>(structure: Node<'t>) -> Vec<FieldGroup<'t>> {
    let mut groups = Vec::new();
    let mut cursor = structure.walk();
    for list in structure.named_children(&mut cursor) {
        if list.kind() != "field_declaration_list" {
            continue;
        }
        let mut list_cursor = list.walk();
        for field in list.named_children(&mut list_cursor) {
            if field.kind() != "field_declaration" {
                continue;
            }
            let mut name_cursor = field.walk();
            let names: Vec<Node<'t>> = field
                .children_by_field_name("name", &mut name_cursor)
                .collect();
            groups.push(FieldGroup {
                node: field,
                names,
                ty: field.child_by_field_name("type"),
            });
        }
    }
    groups
}

/// Parameters through result, e.g. `(s string) (int, error)`.
fn signature_span(parameters: Option<Node>, result: Option<Node>) -> Option<Span> {
    let params = opt_span(parameters)?;
    Some(match opt_span(result) {
        Some(result) => params.cover(result),
        None => params,
    })
}

/// Function declaration without a receiver.
pub struct FuncDecl<'t> {
    pub node: Node<'t>,
    /// From the `func` keyword through the result (or parameters).
    pub signature: Span,
}

impl<'t> FuncDecl<'t> {
    fn from_node(node: Node<'t>) -> Self {
        let end = ["result", "parameters", "type_parameters", "name"]
            .iter()
            .find_map(|field| node.child_by_field_name(*field))
            .map(|n| n.end_byte())
            .unwrap_or_else(|| node.end_byte());
        Self {
            node,
            signature: Span::new(node.start_byte(), end),
        }
    }
}

pub struct MethodDecl<'t> {
    pub node: Node<'t>,
    pub receiver_type: Node<'t>,
    pub name: Node<'t>,
    pub parameters: Option<Node<'t>>,
    pub result: Option<Node<'t>>,
}

impl<'t> MethodDecl<'t> {
    /// `None` when the receiver list is empty.
    fn from_node(node: Node<'t>) -> Option<Self> {
        let receiver = node.child_by_field_name("receiver")?;
        let mut cursor = receiver.walk();
        let receiver_type = receiver
            .named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .find_map(|param| param.child_by_field_name("type"))?;
        Some(Self {
            node,
            receiver_type,
            name: node.child_by_field_name("name")?,
            parameters: node.child_by_field_name("parameters"),
            result: node.child_by_field_name("result"),
        })
    }
}

pub enum CallArg<'t> {
    Expr(Node<'t>),
    FuncLit {
        parameters: Option<Node<'t>>,
        result: Option<Node<'t>>,
    },
}

impl<'t> CallArg<'t> {
    fn from_node(node: Node<'t>) -> Self {
        match node.kind() {
            "func_literal" => CallArg::FuncLit {
                parameters: node.child_by_field_name("parameters"),
                result: node.child_by_field_name("result"),
            },
            // `xs...` renders as `xs`
            "variadic_argument" => node
                .named_child(0)
                .map(CallArg::from_node)
                .unwrap_or(CallArg::Expr(node)),
            _ => CallArg::Expr(node),
        }
    }
}

pub struct CallExpr<'t> {
    pub node: Node<'t>,
    /// Callee including explicit type arguments, e.g. `Map[int]`.
    pub callee: Option<Span>,
    pub arguments: Vec<CallArg<'t>>,
}

impl<'t> CallExpr<'t> {
    fn from_call(node: Node<'t>) -> Self {
        let function = opt_span(node.child_by_field_name("function"));
        let callee = match (function, opt_span(node.child_by_field_name("type_arguments"))) {
            (Some(function), Some(type_args)) => Some(function.cover(type_args)),
            (function, _) => function,
        };
        let arguments = node
            .child_by_field_name("arguments")
            .map(|list| {
                let mut cursor = list.walk();
                list.named_children(&mut cursor)
                    .filter(|child| child.kind() != "comment")
                    .map(CallArg::from_node)
                    .collect()
            })
            .unwrap_or_default();
        Self {
            node,
            callee,
            arguments,
        }
    }

    /// `[]byte(s)` is a call of `[]byte` with one argument.
    fn from_conversion(node: Node<'t>) -> Self {
        Self {
            node,
            callee: opt_span(node.child_by_field_name("type")),
            arguments: node
                .child_by_field_name("operand")
                .map(CallArg::from_node)
                .into_iter()
                .collect(),
        }
    }
}

pub struct IfStmt<'t> {
    pub node: Node<'t>,
    pub initializer: Option<Node<'t>>,
    pub condition: Option<Node<'t>>,
}

impl<'t> IfStmt<'t> {
    fn from_node(node: Node<'t>) -> Self {
        Self {
            node,
            initializer: node.child_by_field_name("initializer"),
            condition: node.child_by_field_name("condition"),
        }
    }
}

/// Three-clause, condition-only or infinite `for`; range loops are not `ForStmt`s.
pub struct ForStmt<'t> {
    pub node: Node<'t>,
    pub initializer: Option<Node<'t>>,
    pub condition: Option<Node<'t>>,
    pub update: Option<Node<'t>>,
}

impl<'t> ForStmt<'t> {
    fn from_node(node: Node<'t>) -> Option<Self> {
        let mut stmt = Self {
            node,
            initializer: None,
            condition: None,
            update: None,
        };
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "range_clause" => return None,
                "for_clause" => {
                    stmt.initializer = child.child_by_field_name("initializer");
                    stmt.condition = child.child_by_field_name("condition");
                    stmt.update = child.child_by_field_name("update");
                }
                "block" | "comment" => {}
                _ => stmt.condition = Some(child),
            }
        }
        Some(stmt)
    }
}
