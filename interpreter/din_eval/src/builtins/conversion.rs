//! Conversion and inspection built-ins: `int`, `float`, `str`, `bool`,
//! `typeof`.

use din_ir::Position;

use crate::control::Exec;
use crate::errors::{type_error, value_error};
use crate::interpreter::Interpreter;
use crate::value::Value;

use super::ensure_args;

/// `int(x)`: ints pass through; strings parse, yielding `null` on
/// failure.
pub(crate) fn int(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "int", &args, 1)?;
    match &args[0] {
        Value::Int(_) => Ok(args[0].clone()),
        Value::Str(s) => Ok(s.parse::<i64>().map(Value::Int).unwrap_or(Value::Null)),
        _ => Err(type_error(pos, "int() requires an int or a string")),
    }
}

/// `float(x, digits)`: round to `digits` decimal places. Strings parse
/// (unparseable input counts as `0.0`); ints promote.
pub(crate) fn float(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "float", &args, 2)?;
    let Value::Int(digits) = args[1] else {
        return Err(type_error(
            pos,
            "float() requires second argument to be an integer",
        ));
    };
    if digits < 0 {
        return Err(value_error(pos, "float() digit must not be negative"));
    }

    let raw = match &args[0] {
        Value::Float(f) => *f,
        Value::Int(n) => *n as f64,
        Value::Str(s) => s.parse::<f64>().unwrap_or(0.0),
        _ => return Err(type_error(pos, "float() requires an integer or a string")),
    };

    let scale = 10f64.powi(digits as i32);
    Ok(Value::Float((raw * scale).round() / scale))
}

/// `str(x)`: canonical representation, strings unquoted.
pub(crate) fn str_(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "str", &args, 1)?;
    Ok(Value::string(args[0].display(false)))
}

/// `bool(x)`: truthiness.
pub(crate) fn bool_(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "bool", &args, 1)?;
    Ok(Value::Bool(args[0].is_truthy()))
}

/// `typeof(x)`: one of the eight type names.
pub(crate) fn typeof_(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "typeof", &args, 1)?;
    Ok(Value::string(args[0].type_name()))
}
