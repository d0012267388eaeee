//! Template syntax tree.
//!
//! The tree is owned top-down: block directives own their bodies, expressions
//! own their operands. Cycles can only appear across `#parse` edges between
//! separate templates, never within one tree.

use crate::reference::{is_ident_continue, is_ident_start};
use crate::Span;

/// A parsed template: its top-level nodes in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    pub nodes: Vec<Node>,
}

/// A template syntax node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Plain text, emitted as-is.
    Literal { text: String, span: Span },
    /// `$name`, `${name}`, `$!name`, `$a.b`, with any leading backslashes.
    Reference(Reference),
    /// `#set($lhs = rhs)`.
    Set { lhs: Reference, rhs: Expr, span: Span },
    /// `#parse("path")` with a single string-literal argument.
    Include { path: String, span: Span },
    /// `#if(..) #elseif(..) #else #end`.
    If {
        branches: Vec<IfBranch>,
        otherwise: Option<Vec<Node>>,
        span: Span,
    },
    /// `#foreach($var in iterable) ... #end`.
    Foreach {
        var: Reference,
        iterable: Expr,
        body: Vec<Node>,
        span: Span,
    },
    /// Any other directive (`#macro`, `#include`, a dynamic `#parse`, ...).
    /// Kept so its arguments and body can still be walked.
    Other {
        name: String,
        args: Vec<Expr>,
        children: Vec<Node>,
        span: Span,
    },
}

impl Node {
    pub fn span(&self) -> Span {
        match self {
            Node::Reference(reference) => reference.span,
            Node::Literal { span, .. }
            | Node::Set { span, .. }
            | Node::Include { span, .. }
            | Node::If { span, .. }
            | Node::Foreach { span, .. }
            | Node::Other { span, .. } => *span,
        }
    }
}

/// One `#if` / `#elseif` arm.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IfBranch {
    pub condition: Expr,
    pub body: Vec<Node>,
}

/// A variable reference.
///
/// `raw` is the exact source token, leading backslashes and braces included;
/// both the attribute collector and the renderer apply escaping rules to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    pub raw: String,
    pub span: Span,
    /// Number of backslashes directly before the `$`.
    pub escapes: u32,
    /// `$!name`: renders as nothing when unresolved.
    pub quiet: bool,
    /// `${...}` form.
    pub braced: bool,
    /// Head identifier (`a` in `$a.b.c`).
    pub name: String,
    /// Property chain after the head (`["b", "c"]` in `$a.b.c`).
    pub path: Vec<String>,
}

impl Reference {
    /// Decompose a raw reference token.
    ///
    /// Returns `None` if `raw` is not backslashes followed by `$`.
    pub fn from_raw(raw: &str, span: Span) -> Option<Self> {
        let body = raw.trim_start_matches('\\');
        let escapes = u32::try_from(raw.len() - body.len()).unwrap_or(u32::MAX);
        let body = body.strip_prefix('$')?;
        let (quiet, body) = match body.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, body),
        };
        let (braced, inner) = match body.strip_prefix('{') {
            Some(rest) => (true, rest.strip_suffix('}').unwrap_or(rest)),
            None => (false, body),
        };
        let mut segments = inner.split('.').map(str::to_owned);
        let name = segments.next().unwrap_or_default();
        Some(Reference {
            raw: raw.to_owned(),
            span,
            escapes,
            quiet,
            braced,
            name,
            path: segments.collect(),
        })
    }

    /// The token without its leading backslashes.
    pub fn unescaped(&self) -> &str {
        self.raw.trim_start_matches('\\')
    }

    /// Every segment of the chain is an identifier.
    ///
    /// `${a{b}` and `${}` are not; the renderer emits such tokens verbatim.
    pub fn is_well_formed(&self) -> bool {
        fn is_ident(segment: &str) -> bool {
            let mut bytes = segment.bytes();
            bytes.next().is_some_and(is_ident_start) && bytes.all(is_ident_continue)
        }
        is_ident(&self.name) && self.path.iter().all(|segment| is_ident(segment))
    }
}

/// A directive argument expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprKind {
    Ref(Reference),
    /// Double-quoted string; its content is template text.
    Interpolated(Vec<Node>),
    /// Single-quoted string, no interpolation.
    Str(String),
    Int(i64),
    Bool(bool),
    List(Vec<Expr>),
    /// `[lo..hi]`, inclusive.
    Range(Box<Expr>, Box<Expr>),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Neg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    And,
    Or,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Add,
    Sub,
}

impl BinaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
        }
    }
}

#[cfg(test)]
mod tests;
