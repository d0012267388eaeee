//! Operator implementations for directive expressions.
//!
//! Direct enum-based dispatch: the value set is fixed, so matching on
//! `(left, right)` keeps every combination visible and exhaustive.

use std::cmp::Ordering;

use stencil_ir::{BinaryOp, UnaryOp};

use crate::errors::{binary_type_mismatch, integer_overflow, unary_type_mismatch, RenderError};
use crate::Value;

type EvalResult = Result<Value, RenderError>;

/// Evaluate a binary operation on two evaluated operands.
///
/// `&&` and `||` are evaluated on truthiness here; the renderer
/// short-circuits them before calling in.
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
        BinaryOp::Eq => Ok(Value::Bool(values_equal(&left, &right))),
        BinaryOp::NotEq => Ok(Value::Bool(!values_equal(&left, &right))),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            let ordering = compare(&left, &right, op)?;
            Ok(Value::Bool(match op {
                BinaryOp::Lt => ordering == Ordering::Less,
                BinaryOp::LtEq => ordering != Ordering::Greater,
                BinaryOp::Gt => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            }))
        }
        BinaryOp::Add => match (left, right) {
            (Value::Int(a), Value::Int(b)) => a
                .checked_add(b)
                .map(Value::Int)
                .ok_or_else(|| integer_overflow("+")),
            (Value::Str(mut a), b) => {
                a.push_str(&b.to_string());
                Ok(Value::Str(a))
            }
            (a, Value::Str(b)) if !a.is_null() => Ok(Value::Str(format!("{a}{b}"))),
            (a, b) => Err(binary_type_mismatch("+", &a, &b)),
        },
        BinaryOp::Sub => match (&left, &right) {
            (Value::Int(a), Value::Int(b)) => a
                .checked_sub(*b)
                .map(Value::Int)
                .ok_or_else(|| integer_overflow("-")),
            _ => Err(binary_type_mismatch("-", &left, &right)),
        },
    }
}

/// Evaluate a unary operation.
pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> EvalResult {
    match op {
        UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
        UnaryOp::Neg => match operand {
            Value::Int(n) => n
                .checked_neg()
                .map(Value::Int)
                .ok_or_else(|| integer_overflow("-")),
            _ => Err(unary_type_mismatch("-", operand)),
        },
    }
}

/// Same-kind values compare structurally; an integer and a string compare
/// by their rendered text (`1 == '1'`). Null equals only null.
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Int(_), Value::Str(_)) | (Value::Str(_), Value::Int(_)) => {
            left.to_string() == right.to_string()
        }
        _ => left == right,
    }
}

fn compare(left: &Value, right: &Value, op: BinaryOp) -> Result<Ordering, RenderError> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(a.cmp(b)),
        (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
        _ => Err(binary_type_mismatch(op.as_symbol(), left, right)),
    }
}
