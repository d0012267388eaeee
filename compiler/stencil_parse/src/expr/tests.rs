use crate::parse;
use pretty_assertions::assert_eq;
use stencil_diagnostic::ErrorCode;
use stencil_ir::{BinaryOp, Expr, ExprKind, Node, UnaryOp};

/// Parse `#set($x = <source>)` and return the right-hand side.
fn expr(source: &str) -> Expr {
    let template = format!("#set($x = {source})");
    let mut nodes = parse(&template).expect("expression should parse").nodes;
    match nodes.remove(0) {
        Node::Set { rhs, .. } => rhs,
        other => panic!("expected #set, got {other:?}"),
    }
}

fn expr_error(source: &str) -> ErrorCode {
    parse(&format!("#set($x = {source})"))
        .expect_err("expression should be rejected")
        .code
}

/// Compact rendering of an expression tree for structural assertions.
fn shape(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Ref(r) => r.raw.clone(),
        ExprKind::Interpolated(nodes) => format!("\"{}\"", nodes.len()),
        ExprKind::Str(s) => format!("'{s}'"),
        ExprKind::Int(n) => n.to_string(),
        ExprKind::Bool(b) => b.to_string(),
        ExprKind::List(items) => {
            let items: Vec<String> = items.iter().map(shape).collect();
            format!("[{}]", items.join(", "))
        }
        ExprKind::Range(lo, hi) => format!("[{}..{}]", shape(lo), shape(hi)),
        ExprKind::Unary { op, operand } => {
            let op = match op {
                UnaryOp::Not => "!",
                UnaryOp::Neg => "-",
            };
            format!("({op}{})", shape(operand))
        }
        ExprKind::Binary { op, left, right } => {
            format!("({} {} {})", shape(left), op.as_symbol(), shape(right))
        }
    }
}

#[test]
fn test_literals() {
    assert_eq!(expr("42").kind, ExprKind::Int(42));
    assert_eq!(expr("-7").kind, ExprKind::Int(-7));
    assert_eq!(expr("true").kind, ExprKind::Bool(true));
    assert_eq!(expr("false").kind, ExprKind::Bool(false));
    assert_eq!(expr("'a $b'").kind, ExprKind::Str("a $b".to_owned()));
}

#[test]
fn test_double_quoted_string_is_interpolated() {
    let ExprKind::Interpolated(parts) = expr("\"Hello, $name!\"").kind else {
        panic!("expected an interpolated string");
    };
    assert_eq!(parts.len(), 3);
    assert!(matches!(&parts[1], Node::Reference(r) if r.name == "name"));
}

#[test]
fn test_precedence() {
    assert_eq!(shape(&expr("$a || $b && $c")), "($a || ($b && $c))");
    assert_eq!(shape(&expr("$a == 1 && $b != 2")), "(($a == 1) && ($b != 2))");
    assert_eq!(shape(&expr("1 + 2 < 4")), "((1 + 2) < 4)");
    assert_eq!(shape(&expr("1 - 2 - 3")), "((1 - 2) - 3)");
    assert_eq!(shape(&expr("!$a || $b")), "((!$a) || $b)");
}

#[test]
fn test_word_operators() {
    assert_eq!(shape(&expr("$a eq $b")), "($a == $b)");
    assert_eq!(shape(&expr("not $a and $b")), "((!$a) && $b)");
    assert_eq!(shape(&expr("$a le 3 or $a gt 9")), "(($a <= 3) || ($a > 9))");
}

#[test]
fn test_word_operator_needs_word_boundary() {
    assert_eq!(expr_error("$a order"), ErrorCode::E1001);
}

#[test]
fn test_two_character_operators_win() {
    assert_eq!(shape(&expr("$a <= $b")), "($a <= $b)");
    assert_eq!(shape(&expr("$a >= $b")), "($a >= $b)");
    assert_eq!(shape(&expr("$a != $b")), "($a != $b)");
}

#[test]
fn test_parentheses_and_negation() {
    assert_eq!(shape(&expr("($a + 1) - $b")), "(($a + 1) - $b)");
    assert_eq!(shape(&expr("-$a")), "(-$a)");
    assert_eq!(expr_error("($a + 1"), ErrorCode::E1003);
}

#[test]
fn test_lists_and_ranges() {
    assert_eq!(shape(&expr("[]")), "[]");
    assert_eq!(shape(&expr("[1, 'b', $c]")), "[1, 'b', $c]");
    assert_eq!(shape(&expr("[1..$n]")), "[1..$n]");
    assert_eq!(expr_error("[1, 2"), ErrorCode::E1001);
}

#[test]
fn test_binary_span_covers_operands() {
    let e = expr("$a + 12");
    assert_eq!(e.span.start, 10);
    assert_eq!(e.span.end, 17);
    assert!(matches!(e.kind, ExprKind::Binary { op: BinaryOp::Add, .. }));
}

#[test]
fn test_errors() {
    assert_eq!(expr_error("'open"), ErrorCode::E0002);
    assert_eq!(expr_error("\"open"), ErrorCode::E0002);
    assert_eq!(expr_error("99999999999999999999"), ErrorCode::E1007);
    assert_eq!(expr_error("bareword"), ErrorCode::E1001);
    assert_eq!(expr_error("*"), ErrorCode::E1002);
}
