//! The generalized AST (GAST) node tree.
//!
//! Every [`super::base_normalizer::GASTNormalizer`] implementation folds a
//! language's tree-sitter parse into this single node set, so the visitor
//! engine's normalized-AST pass can run one set of detectors across all
//! supported languages instead of per-grammar ones.

/// A node in the normalized AST.
#[derive(Debug, Clone, PartialEq)]
pub enum GASTNode {
    Program { body: Vec<GASTNode> },
    Module { name: Option<String>, body: Vec<GASTNode> },
    Function {
        name: String,
        params: Vec<GASTNode>,
        body: Box<GASTNode>,
        is_async: bool,
        is_generator: bool,
        return_type: Option<String>,
    },
    Lambda { params: Vec<GASTNode>, body: Box<GASTNode>, is_async: bool },
    Class { name: String, bases: Vec<String>, body: Vec<GASTNode>, is_abstract: bool },
    Interface { name: String, extends: Vec<String>, body: Vec<GASTNode> },
    Enum { name: String, members: Vec<GASTNode> },
    VariableDeclaration {
        name: String,
        type_annotation: Option<String>,
        value: Option<Box<GASTNode>>,
        is_const: bool,
    },
    If {
        condition: Box<GASTNode>,
        then_branch: Box<GASTNode>,
        else_branch: Option<Box<GASTNode>>,
    },
    ForLoop {
        init: Option<Box<GASTNode>>,
        condition: Option<Box<GASTNode>>,
        update: Option<Box<GASTNode>>,
        body: Box<GASTNode>,
    },
    ForEach { variable: Box<GASTNode>, iterable: Box<GASTNode>, body: Box<GASTNode> },
    WhileLoop { condition: Box<GASTNode>, body: Box<GASTNode> },
    Switch { discriminant: Box<GASTNode>, cases: Vec<GASTNode> },
    TryCatch {
        try_block: Box<GASTNode>,
        catch_param: Option<String>,
        catch_block: Option<Box<GASTNode>>,
        finally_block: Option<Box<GASTNode>>,
    },
    Throw { value: Box<GASTNode> },
    Return { value: Option<Box<GASTNode>> },
    Yield { value: Option<Box<GASTNode>>, is_delegate: bool },
    Await { value: Box<GASTNode> },
    Call { callee: Box<GASTNode>, arguments: Vec<GASTNode> },
    MethodCall { receiver: Box<GASTNode>, method: String, arguments: Vec<GASTNode> },
    NewExpression { callee: Box<GASTNode>, arguments: Vec<GASTNode> },
    Import { source: String, specifiers: Vec<GASTNode> },
    Export { declaration: Option<Box<GASTNode>>, is_default: bool },
    Block { statements: Vec<GASTNode> },
    Identifier { name: String },
    StringLiteral { value: String },
    NumberLiteral { value: String },
    BoolLiteral { value: bool },
    NullLiteral,
    Comment { text: String, is_doc: bool },
    Decorator { name: String, arguments: Vec<GASTNode> },
    TypeAlias { name: String, type_expr: Box<GASTNode> },
    MemberAccess { object: Box<GASTNode>, property: String },
    ArrayLiteral { elements: Vec<GASTNode> },
    ObjectLiteral { properties: Vec<GASTNode> },
    TemplateLiteral { parts: Vec<GASTNode> },
    BinaryOp { left: Box<GASTNode>, op: String, right: Box<GASTNode> },
    Ternary { condition: Box<GASTNode>, consequent: Box<GASTNode>, alternate: Box<GASTNode> },
    SpreadElement { argument: Box<GASTNode> },
    /// Catch-all for node kinds a normalizer doesn't special-case.
    Other { kind: String, children: Vec<GASTNode> },
}

impl GASTNode {
    /// Direct children, for traversal without matching on every variant.
    pub fn children(&self) -> Vec<&GASTNode> {
        match self {
            GASTNode::Program { body } | GASTNode::Module { body, .. } => body.iter().collect(),
            GASTNode::Function { params, body, .. } => {
                params.iter().chain(std::iter::once(body.as_ref())).collect()
            }
            GASTNode::Lambda { params, body, .. } => {
                params.iter().chain(std::iter::once(body.as_ref())).collect()
            }
            GASTNode::Class { body, .. } | GASTNode::Interface { body, .. } => body.iter().collect(),
            GASTNode::Enum { members, .. } => members.iter().collect(),
            GASTNode::VariableDeclaration { value, .. } => value.iter().map(Box::as_ref).collect(),
            GASTNode::If { condition, then_branch, else_branch } => {
                let mut c = vec![condition.as_ref(), then_branch.as_ref()];
                if let Some(e) = else_branch {
                    c.push(e.as_ref());
                }
                c
            }
            GASTNode::ForLoop { init, condition, update, body } => {
                init.iter().chain(condition.iter()).chain(update.iter())
                    .map(Box::as_ref)
                    .chain(std::iter::once(body.as_ref()))
                    .collect()
            }
            GASTNode::ForEach { variable, iterable, body } => {
                vec![variable.as_ref(), iterable.as_ref(), body.as_ref()]
            }
            GASTNode::WhileLoop { condition, body } => vec![condition.as_ref(), body.as_ref()],
            GASTNode::Switch { discriminant, cases } => {
                std::iter::once(discriminant.as_ref()).chain(cases.iter()).collect()
            }
            GASTNode::TryCatch { try_block, catch_block, finally_block, .. } => {
                std::iter::once(try_block.as_ref())
                    .chain(catch_block.iter().map(Box::as_ref))
                    .chain(finally_block.iter().map(Box::as_ref))
                    .collect()
            }
            GASTNode::Throw { value } | GASTNode::Await { value } => vec![value.as_ref()],
            GASTNode::Return { value } | GASTNode::Yield { value, .. } => {
                value.iter().map(Box::as_ref).collect()
            }
            GASTNode::Call { callee, arguments } | GASTNode::NewExpression { callee, arguments } => {
                std::iter::once(callee.as_ref()).chain(arguments.iter()).collect()
            }
            GASTNode::MethodCall { receiver, arguments, .. } => {
                std::iter::once(receiver.as_ref()).chain(arguments.iter()).collect()
            }
            GASTNode::Import { specifiers, .. } => specifiers.iter().collect(),
            GASTNode::Export { declaration, .. } => declaration.iter().map(Box::as_ref).collect(),
            GASTNode::Block { statements } => statements.iter().collect(),
            GASTNode::Decorator { arguments, .. } => arguments.iter().collect(),
            GASTNode::TypeAlias { type_expr, .. } => vec![type_expr.as_ref()],
            GASTNode::MemberAccess { object, .. } => vec![object.as_ref()],
            GASTNode::ArrayLiteral { elements } => elements.iter().collect(),
            GASTNode::ObjectLiteral { properties } => properties.iter().collect(),
            GASTNode::TemplateLiteral { parts } => parts.iter().collect(),
            GASTNode::BinaryOp { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            GASTNode::Ternary { condition, consequent, alternate } => {
                vec![condition.as_ref(), consequent.as_ref(), alternate.as_ref()]
            }
            GASTNode::SpreadElement { argument } => vec![argument.as_ref()],
            GASTNode::Other { children, .. } => children.iter().collect(),
            GASTNode::Identifier { .. }
            | GASTNode::StringLiteral { .. }
            | GASTNode::NumberLiteral { .. }
            | GASTNode::BoolLiteral { .. }
            | GASTNode::NullLiteral
            | GASTNode::Comment { .. } => vec![],
        }
    }

    /// Count of nodes in the subtree rooted at `self`, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(|c| c.node_count()).sum::<usize>()
    }
}
