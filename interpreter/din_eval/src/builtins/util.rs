//! Utility built-ins: `sign`, `clamp`, `lerp`, `degrees`, `radians`,
//! `is_nan`, `is_infinite`.

use din_ir::Position;

use crate::control::Exec;
use crate::errors::value_error;
use crate::interpreter::Interpreter;
use crate::value::Value;

use super::{ensure_args, to_float};

/// `sign(x)`: -1, 0, or 1 as an int.
pub(crate) fn sign(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "sign", &args, 1)?;
    let val = to_float(pos, &args[0], "sign")?;
    let s = if val > 0.0 {
        1
    } else if val < 0.0 {
        -1
    } else {
        0
    };
    Ok(Value::Int(s))
}

/// `clamp(x, min, max)`: limit `x` to `[min, max]`; int when all three
/// inputs are ints.
pub(crate) fn clamp(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "clamp", &args, 3)?;
    let val = to_float(pos, &args[0], "clamp")?;
    let min = to_float(pos, &args[1], "clamp")?;
    let max = to_float(pos, &args[2], "clamp")?;
    if min > max {
        return Err(value_error(
            pos,
            "clamp() min must be less than or equal to max",
        ));
    }
    let clamped = val.clamp(min, max);
    let all_ints = args.iter().all(|a| matches!(a, Value::Int(_)));
    if all_ints {
        Ok(Value::Int(clamped as i64))
    } else {
        Ok(Value::Float(clamped))
    }
}

/// `lerp(a, b, t)`: linear interpolation `a + t * (b - a)`.
pub(crate) fn lerp(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "lerp", &args, 3)?;
    let a = to_float(pos, &args[0], "lerp")?;
    let b = to_float(pos, &args[1], "lerp")?;
    let t = to_float(pos, &args[2], "lerp")?;
    Ok(Value::Float(a + t * (b - a)))
}

/// `degrees(x)`: radians to degrees.
pub(crate) fn degrees(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "degrees", &args, 1)?;
    let radians = to_float(pos, &args[0], "degrees")?;
    Ok(Value::Float(radians.to_degrees()))
}

/// `radians(x)`: degrees to radians.
pub(crate) fn radians(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "radians", &args, 1)?;
    let degrees = to_float(pos, &args[0], "radians")?;
    Ok(Value::Float(degrees.to_radians()))
}

/// `is_nan(x)`.
pub(crate) fn is_nan(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "is_nan", &args, 1)?;
    let val = to_float(pos, &args[0], "is_nan")?;
    Ok(Value::Bool(val.is_nan()))
}

/// `is_infinite(x)`.
pub(crate) fn is_infinite(
    _interp: &mut Interpreter,
    pos: Position,
    args: Vec<Value>,
) -> Exec<Value> {
    ensure_args(pos, "is_infinite", &args, 1)?;
    let val = to_float(pos, &args[0], "is_infinite")?;
    Ok(Value::Bool(val.is_infinite()))
}
