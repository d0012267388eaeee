//! Template tree visitor.
//!
//! The visitor mutates only its own state; the tree is immutable. Default
//! `visit_*` methods call the matching `walk_*` function, which recurses into
//! children. Override a `visit_*` method to act on a node, and call the
//! `walk_*` function from it to keep descending.
//!
//! ```text
//! struct CountRefs(usize);
//!
//! impl<'ast> Visitor<'ast> for CountRefs {
//!     fn visit_reference(&mut self, _reference: &'ast Reference) {
//!         self.0 += 1;
//!     }
//! }
//! ```

use crate::ast::{Document, Expr, ExprKind, IfBranch, Node, Reference};

pub trait Visitor<'ast> {
    fn visit_document(&mut self, document: &'ast Document) {
        walk_nodes(self, &document.nodes);
    }

    fn visit_node(&mut self, node: &'ast Node) {
        walk_node(self, node);
    }

    fn visit_reference(&mut self, reference: &'ast Reference) {
        let _ = reference;
    }

    /// `#set` target. Not a read of the variable.
    fn visit_set_target(&mut self, lhs: &'ast Reference) {
        let _ = lhs;
    }

    /// `#foreach` loop variable. Not a read of the variable.
    fn visit_loop_var(&mut self, var: &'ast Reference) {
        let _ = var;
    }

    fn visit_include(&mut self, path: &'ast str) {
        let _ = path;
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }
}

pub fn walk_nodes<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, nodes: &'ast [Node]) {
    for node in nodes {
        visitor.visit_node(node);
    }
}

/// Children first, then the node itself.
pub fn walk_node<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, node: &'ast Node) {
    match node {
        Node::Literal { .. } => {}
        Node::Reference(reference) => visitor.visit_reference(reference),
        Node::Set { lhs, rhs, .. } => {
            visitor.visit_expr(rhs);
            visitor.visit_set_target(lhs);
        }
        Node::Include { path, .. } => visitor.visit_include(path),
        Node::If {
            branches,
            otherwise,
            ..
        } => {
            for IfBranch { condition, body } in branches {
                visitor.visit_expr(condition);
                walk_nodes(visitor, body);
            }
            if let Some(body) = otherwise {
                walk_nodes(visitor, body);
            }
        }
        Node::Foreach {
            var,
            iterable,
            body,
            ..
        } => {
            visitor.visit_expr(iterable);
            walk_nodes(visitor, body);
            visitor.visit_loop_var(var);
        }
        Node::Other { args, children, .. } => {
            for arg in args {
                visitor.visit_expr(arg);
            }
            walk_nodes(visitor, children);
        }
    }
}

pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, expr: &'ast Expr) {
    match &expr.kind {
        ExprKind::Ref(reference) => visitor.visit_reference(reference),
        ExprKind::Interpolated(nodes) => walk_nodes(visitor, nodes),
        ExprKind::Str(_) | ExprKind::Int(_) | ExprKind::Bool(_) => {}
        ExprKind::List(items) => {
            for item in items {
                visitor.visit_expr(item);
            }
        }
        ExprKind::Range(lo, hi) => {
            visitor.visit_expr(lo);
            visitor.visit_expr(hi);
        }
        ExprKind::Unary { operand, .. } => visitor.visit_expr(operand),
        ExprKind::Binary { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
    }
}
