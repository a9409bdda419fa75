//! Unary operator semantics.

use din_ir::{Position, UnaryOp};

use crate::control::Exec;
use crate::errors::type_error;
use crate::value::Value;

/// Evaluate `op operand`.
pub fn evaluate_unary(pos: Position, op: UnaryOp, operand: &Value) -> Exec<Value> {
    match op {
        UnaryOp::Not => eval_not(pos, operand),
        UnaryOp::Neg => eval_negative(pos, operand),
    }
}

/// `not x` requires a bool.
fn eval_not(pos: Position, v: &Value) -> Exec<Value> {
    match v {
        Value::Bool(b) => Ok(Value::Bool(!b)),
        _ => Err(type_error(pos, "not requires a bool")),
    }
}

/// `-x` negates an int (wrapping) or float.
fn eval_negative(pos: Position, v: &Value) -> Exec<Value> {
    match v {
        Value::Int(n) => Ok(Value::Int(n.wrapping_neg())),
        Value::Float(f) => Ok(Value::Float(-f)),
        _ => Err(type_error(pos, "unary - requires an integer or float")),
    }
}
