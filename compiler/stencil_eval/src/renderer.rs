//! Tree-walking renderer.

use stencil_ir::{
    BinaryOp, Document, Expr, ExprKind, Node, Reference, TemplateResolver,
};
use stencil_stack::ensure_sufficient_stack;

use crate::errors::{
    include_not_found, included_syntax_error, not_iterable, property_assignment,
    range_bound_not_int, range_too_large, recursive_include, unsupported_directive, RenderError,
};
use crate::{evaluate_binary, evaluate_unary, Environment, PropertyMap, Value, ValueMap};

/// Largest integer range a template may build.
const MAX_RANGE_LEN: u64 = 1 << 20;

/// How control leaves a node list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    /// `#break`: leave the innermost `#foreach` (or the current template).
    Break,
    /// `#stop`: end the whole render.
    Stop,
}

/// Renders documents against one property map.
///
/// A renderer may render several documents; `#set` bindings persist
/// between them.
pub struct Renderer<'a> {
    env: Environment<'a>,
    resolver: &'a dyn TemplateResolver,
    /// Qualified names of the templates being rendered, outermost first.
    include_stack: Vec<String>,
}

impl<'a> Renderer<'a> {
    pub fn new(properties: &'a PropertyMap, resolver: &'a dyn TemplateResolver) -> Self {
        Renderer {
            env: Environment::new(properties),
            resolver,
            include_stack: Vec::new(),
        }
    }

    /// Name the template being rendered so a `#parse` back into it is
    /// reported as a cycle.
    #[must_use]
    pub fn with_template_name(mut self, name: impl Into<String>) -> Self {
        self.include_stack.push(name.into());
        self
    }

    /// Render `document`. On failure the error carries the output produced
    /// so far.
    pub fn render_document(&mut self, document: &Document) -> Result<String, RenderError> {
        let mut out = String::new();
        match self.render_nodes(&document.nodes, &mut out) {
            Ok(_) => Ok(out),
            Err(err) => {
                tracing::debug!(code = %err.code, message = %err.message, "render failed");
                Err(err.with_partial_output(out))
            }
        }
    }

    fn render_nodes(&mut self, nodes: &[Node], out: &mut String) -> Result<Flow, RenderError> {
        ensure_sufficient_stack(|| {
            for node in nodes {
                let flow = self.render_node(node, out)?;
                if flow != Flow::Continue {
                    return Ok(flow);
                }
            }
            Ok(Flow::Continue)
        })
    }

    fn render_node(&mut self, node: &Node, out: &mut String) -> Result<Flow, RenderError> {
        match node {
            Node::Literal { text, .. } => out.push_str(text),
            Node::Reference(reference) => self.render_reference(reference, out),
            Node::Set { lhs, rhs, span } => {
                self.assign(lhs, rhs).map_err(|err| err.with_span(*span))?;
            }
            Node::Include { path, span } => {
                return self
                    .render_include(path, out)
                    .map_err(|err| err.with_span(*span));
            }
            Node::If {
                branches,
                otherwise,
                ..
            } => {
                for branch in branches {
                    if self.eval_expr(&branch.condition)?.is_truthy() {
                        return self.render_nodes(&branch.body, out);
                    }
                }
                if let Some(body) = otherwise {
                    return self.render_nodes(body, out);
                }
            }
            Node::Foreach {
                var,
                iterable,
                body,
                span,
            } => {
                return self
                    .render_foreach(var, iterable, body, out)
                    .map_err(|err| err.with_span(*span));
            }
            Node::Other {
                name, args, span, ..
            } => {
                return self
                    .render_other(name, args, out)
                    .map_err(|err| err.with_span(*span));
            }
        }
        Ok(Flow::Continue)
    }

    fn render_reference(&self, reference: &Reference, out: &mut String) {
        match self.resolve(reference) {
            Some(value) => {
                let escapes = reference.escapes as usize;
                out.push_str(&"\\".repeat(escapes / 2));
                if escapes % 2 == 0 {
                    out.push_str(&value.to_string());
                } else {
                    out.push_str(reference.unescaped());
                }
            }
            None if reference.quiet && reference.escapes == 0 => {}
            None => out.push_str(&reference.raw),
        }
    }

    /// The value a reference renders as; `None` when it does not resolve.
    fn resolve(&self, reference: &Reference) -> Option<&Value> {
        if !reference.is_well_formed() {
            return None;
        }
        let mut value = self.env.lookup(&reference.name)?;
        for segment in &reference.path {
            value = value.property(segment)?;
        }
        (!value.is_null()).then_some(value)
    }

    fn assign(&mut self, lhs: &Reference, rhs: &Expr) -> Result<(), RenderError> {
        let value = self.eval_expr(rhs)?;
        if lhs.path.is_empty() {
            self.env.assign(&lhs.name, value);
            return Ok(());
        }
        let mut target = self.env.lookup(&lhs.name).cloned().unwrap_or_default();
        set_property(&mut target, &lhs.path, value, &lhs.name)?;
        self.env.assign(&lhs.name, target);
        Ok(())
    }

    fn render_foreach(
        &mut self,
        var: &Reference,
        iterable: &Expr,
        body: &[Node],
        out: &mut String,
    ) -> Result<Flow, RenderError> {
        let items = match self.eval_expr(iterable)? {
            Value::List(items) => items,
            Value::Map(entries) => entries.into_values().collect(),
            Value::Null => Vec::new(),
            other => return Err(not_iterable(&other).with_span(iterable.span)),
        };

        self.env.push_scope();
        let result = self.render_loop(&var.name, items, body, out);
        self.env.pop_scope();
        result
    }

    fn render_loop(
        &mut self,
        var: &str,
        items: Vec<Value>,
        body: &[Node],
        out: &mut String,
    ) -> Result<Flow, RenderError> {
        let len = items.len();
        for (index, item) in items.into_iter().enumerate() {
            let status = loop_status(index, len);
            if let Some(count) = status.property("count") {
                self.env.bind("velocityCount", count.clone());
            }
            self.env.bind("foreach", status);
            self.env.bind(var, item);
            match self.render_nodes(body, out)? {
                Flow::Continue => {}
                Flow::Break => break,
                Flow::Stop => return Ok(Flow::Stop),
            }
        }
        Ok(Flow::Continue)
    }

    fn render_include(&mut self, path: &str, out: &mut String) -> Result<Flow, RenderError> {
        let resolver = self.resolver;
        let Some(template) = resolver.resolve(path) else {
            return Err(include_not_found(path));
        };
        let name = template.qualified_name();
        if self.include_stack.contains(&name) {
            let mut chain = self.include_stack.clone();
            chain.push(name);
            return Err(recursive_include(&chain));
        }
        let document =
            stencil_parse::parse(&template.text).map_err(|err| included_syntax_error(&name, &err))?;

        tracing::trace!(template = %name, depth = self.include_stack.len(), "rendering include");
        self.include_stack.push(name);
        let result = self.render_nodes(&document.nodes, out);
        let name = self.include_stack.pop().unwrap_or_default();

        match result {
            Ok(Flow::Stop) => Ok(Flow::Stop),
            Ok(_) => Ok(Flow::Continue),
            // Locations inside the included text mean nothing to the includer.
            Err(mut err) if err.span.is_some() => {
                err.message = format!("in `{name}`: {}", err.message);
                err.span = None;
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    fn render_other(&mut self, name: &str, args: &[Expr], out: &mut String) -> Result<Flow, RenderError> {
        match name {
            "break" => Ok(Flow::Break),
            "stop" => Ok(Flow::Stop),
            "parse" => {
                let Some(arg) = args.first() else {
                    return Err(unsupported_directive(name));
                };
                let path = self.eval_expr(arg)?.to_string();
                self.render_include(&path, out)
            }
            "include" => {
                for arg in args {
                    let path = self.eval_expr(arg)?.to_string();
                    let resolver = self.resolver;
                    let template = resolver
                        .resolve(&path)
                        .ok_or_else(|| include_not_found(&path).with_span(arg.span))?;
                    out.push_str(&template.text);
                }
                Ok(Flow::Continue)
            }
            "evaluate" => {
                let Some(arg) = args.first() else {
                    return Ok(Flow::Continue);
                };
                let text = self.eval_expr(arg)?.to_string();
                let document = stencil_parse::parse(&text)
                    .map_err(|err| included_syntax_error("#evaluate", &err))?;
                self.render_nodes(&document.nodes, out).map_err(|mut err| {
                    err.span = None;
                    err
                })
            }
            _ => Err(unsupported_directive(name)),
        }
    }

    fn eval_expr(&mut self, expr: &Expr) -> Result<Value, RenderError> {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr)).map_err(|err| err.with_span(expr.span))
    }

    fn eval_expr_inner(&mut self, expr: &Expr) -> Result<Value, RenderError> {
        match &expr.kind {
            ExprKind::Ref(reference) => Ok(self.resolve(reference).cloned().unwrap_or_default()),
            ExprKind::Interpolated(nodes) => {
                let mut text = String::new();
                self.render_nodes(nodes, &mut text)?;
                Ok(Value::Str(text))
            }
            ExprKind::Str(s) => Ok(Value::Str(s.clone())),
            ExprKind::Int(n) => Ok(Value::Int(*n)),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::List(items) => items
                .iter()
                .map(|item| self.eval_expr(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            ExprKind::Range(lo, hi) => {
                let lo = self.eval_expr(lo)?;
                let hi = self.eval_expr(hi)?;
                range_values(&lo, &hi)
            }
            ExprKind::Unary { op, operand } => {
                let operand = self.eval_expr(operand)?;
                evaluate_unary(*op, &operand)
            }
            ExprKind::Binary {
                op: op @ (BinaryOp::And | BinaryOp::Or),
                left,
                right,
            } => {
                let left = self.eval_expr(left)?.is_truthy();
                let decided = match op {
                    BinaryOp::And => !left,
                    _ => left,
                };
                if decided {
                    return Ok(Value::Bool(left));
                }
                Ok(Value::Bool(self.eval_expr(right)?.is_truthy()))
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                evaluate_binary(left, right, *op)
            }
        }
    }
}

/// Parse and render `text` in one step.
pub fn render(
    text: &str,
    properties: &PropertyMap,
    resolver: &dyn TemplateResolver,
) -> Result<String, RenderError> {
    let document = stencil_parse::parse(text)?;
    Renderer::new(properties, resolver).render_document(&document)
}

/// `$foreach` inside a loop body.
fn loop_status(index: usize, len: usize) -> Value {
    let to_int = |n: usize| Value::Int(i64::try_from(n).unwrap_or(i64::MAX));
    let count = index.saturating_add(1);
    let mut status = ValueMap::default();
    status.insert("count".to_owned(), to_int(count));
    status.insert("index".to_owned(), to_int(index));
    status.insert("hasNext".to_owned(), Value::Bool(count < len));
    status.insert("first".to_owned(), Value::Bool(index == 0));
    status.insert("last".to_owned(), Value::Bool(count == len));
    Value::Map(status)
}

/// Inclusive integer range, descending when `lo > hi`.
fn range_values(lo: &Value, hi: &Value) -> Result<Value, RenderError> {
    let (&Value::Int(lo), &Value::Int(hi)) = (lo, hi) else {
        let bad = if matches!(lo, Value::Int(_)) { hi } else { lo };
        return Err(range_bound_not_int(bad));
    };
    if lo.abs_diff(hi) >= MAX_RANGE_LEN {
        return Err(range_too_large(lo, hi, MAX_RANGE_LEN));
    }
    let items = if lo <= hi {
        (lo..=hi).map(Value::Int).collect()
    } else {
        (hi..=lo).rev().map(Value::Int).collect()
    };
    Ok(Value::List(items))
}

/// `#set($a.b.c = value)`: write through nested maps, creating missing levels.
fn set_property(
    target: &mut Value,
    path: &[String],
    value: Value,
    root: &str,
) -> Result<(), RenderError> {
    let Some((last, parents)) = path.split_last() else {
        *target = value;
        return Ok(());
    };
    let mut current = target;
    for segment in parents {
        current = match current {
            Value::Map(entries) => entries
                .entry(segment.clone())
                .or_insert_with(|| Value::Map(ValueMap::default())),
            other => return Err(property_assignment(root, other)),
        };
    }
    match current {
        Value::Map(entries) => {
            entries.insert(last.clone(), value);
            Ok(())
        }
        other => Err(property_assignment(root, other)),
    }
}
