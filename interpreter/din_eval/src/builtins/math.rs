//! Math built-ins: elementary, rounding, trigonometric, hyperbolic, and
//! logarithmic functions.
//!
//! Numeric built-ins accept ints or floats and promote to float
//! internally; the rounding family and `pow` re-materialize ints where
//! the original value set makes that the expected result.

use din_ir::Position;

use crate::control::Exec;
use crate::errors::{type_error, value_error};
use crate::interpreter::Interpreter;
use crate::operators::eval_less;
use crate::value::Value;

use super::{ensure_args, to_float, to_int};

// === Elementary ===

/// `abs(x)`: absolute value, preserving intness.
pub(crate) fn abs(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "abs", &args, 1)?;
    match &args[0] {
        Value::Int(n) => Ok(Value::Int(n.wrapping_abs())),
        Value::Float(f) => Ok(Value::Float(f.abs())),
        other => Err(type_error(
            pos,
            format!("abs() requires a number, got {}", other.type_name()),
        )),
    }
}

/// Reduce `values` with `<`, keeping the greater (`want_max`) or lesser
/// element.
fn reduce_extreme(pos: Position, values: &[Value], want_max: bool) -> Exec<Value> {
    let mut best = values[0].clone();
    for v in &values[1..] {
        let replace = if want_max {
            eval_less(pos, &best, v)?
        } else {
            eval_less(pos, v, &best)?
        };
        if replace {
            best = v.clone();
        }
    }
    Ok(best)
}

/// `max(...)`: maximum of the arguments, or of a single array argument.
pub(crate) fn max(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    if args.is_empty() {
        return Err(type_error(pos, "max() requires at least 1 argument"));
    }
    if let Value::Array(items) = &args[0] {
        let items = items.borrow();
        if items.is_empty() {
            return Err(value_error(pos, "max() cannot be applied to empty array"));
        }
        return reduce_extreme(pos, &items, true);
    }
    reduce_extreme(pos, &args, true)
}

/// `min(...)`: minimum of the arguments, or of a single array argument.
pub(crate) fn min(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    if args.is_empty() {
        return Err(type_error(pos, "min() requires at least 1 argument"));
    }
    if let Value::Array(items) = &args[0] {
        let items = items.borrow();
        if items.is_empty() {
            return Err(value_error(pos, "min() cannot be applied to empty array"));
        }
        return reduce_extreme(pos, &items, false);
    }
    reduce_extreme(pos, &args, false)
}

/// `pow(base, exp)`: float power, collapsing to int when both inputs are
/// ints and the result is whole.
pub(crate) fn pow(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "pow", &args, 2)?;
    let base = to_float(pos, &args[0], "pow")?;
    let exp = to_float(pos, &args[1], "pow")?;
    let result = base.powf(exp);
    if matches!(args[0], Value::Int(_))
        && matches!(args[1], Value::Int(_))
        && result == result.trunc()
    {
        return Ok(Value::Int(result as i64));
    }
    Ok(Value::Float(result))
}

/// `sqrt(x)`: square root; negative input is a value error.
pub(crate) fn sqrt(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "sqrt", &args, 1)?;
    let val = to_float(pos, &args[0], "sqrt")?;
    if val < 0.0 {
        return Err(value_error(pos, "sqrt() of negative number"));
    }
    Ok(Value::Float(val.sqrt()))
}

/// `cbrt(x)`: cube root.
pub(crate) fn cbrt(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "cbrt", &args, 1)?;
    let val = to_float(pos, &args[0], "cbrt")?;
    Ok(Value::Float(val.cbrt()))
}

// === Rounding ===

/// `round(x)` to the nearest int, or `round(x, places)` to a float with
/// `places` decimals.
pub(crate) fn round(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    match args.len() {
        1 => {
            let val = to_float(pos, &args[0], "round")?;
            Ok(Value::Int(val.round() as i64))
        }
        2 => {
            let val = to_float(pos, &args[0], "round")?;
            let places = to_int(pos, &args[1], "round")?;
            if places < 0 {
                return Err(value_error(pos, "round() decimal places must not be negative"));
            }
            let scale = 10f64.powi(places as i32);
            Ok(Value::Float((val * scale).round() / scale))
        }
        n => Err(type_error(
            pos,
            format!("round() requires 1 or 2 arguments, got {n}"),
        )),
    }
}

/// `floor(x)`: largest int not above `x`.
pub(crate) fn floor(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "floor", &args, 1)?;
    let val = to_float(pos, &args[0], "floor")?;
    Ok(Value::Int(val.floor() as i64))
}

/// `ceil(x)`: smallest int not below `x`.
pub(crate) fn ceil(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "ceil", &args, 1)?;
    let val = to_float(pos, &args[0], "ceil")?;
    Ok(Value::Int(val.ceil() as i64))
}

/// `trunc(x)`: integer part.
pub(crate) fn trunc(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "trunc", &args, 1)?;
    let val = to_float(pos, &args[0], "trunc")?;
    Ok(Value::Int(val.trunc() as i64))
}

// === Trigonometric ===

macro_rules! float_fn {
    ($(#[$doc:meta])* $name:ident, $method:ident) => {
        $(#[$doc])*
        pub(crate) fn $name(
            _interp: &mut Interpreter,
            pos: Position,
            args: Vec<Value>,
        ) -> Exec<Value> {
            ensure_args(pos, stringify!($name), &args, 1)?;
            let val = to_float(pos, &args[0], stringify!($name))?;
            Ok(Value::Float(val.$method()))
        }
    };
}

float_fn!(
    /// `sin(x)`.
    sin, sin
);
float_fn!(
    /// `cos(x)`.
    cos, cos
);
float_fn!(
    /// `tan(x)`.
    tan, tan
);
float_fn!(
    /// `atan(x)`.
    atan, atan
);
float_fn!(
    /// `sinh(x)`.
    sinh, sinh
);
float_fn!(
    /// `cosh(x)`.
    cosh, cosh
);
float_fn!(
    /// `tanh(x)`.
    tanh, tanh
);
float_fn!(
    /// `exp(x)`: e^x.
    exp, exp
);
float_fn!(
    /// `exp2(x)`: 2^x.
    exp2, exp2
);

/// `asin(x)`, domain `[-1, 1]`.
pub(crate) fn asin(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "asin", &args, 1)?;
    let val = to_float(pos, &args[0], "asin")?;
    if !(-1.0..=1.0).contains(&val) {
        return Err(value_error(pos, "asin() input must be between -1 and 1"));
    }
    Ok(Value::Float(val.asin()))
}

/// `acos(x)`, domain `[-1, 1]`.
pub(crate) fn acos(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "acos", &args, 1)?;
    let val = to_float(pos, &args[0], "acos")?;
    if !(-1.0..=1.0).contains(&val) {
        return Err(value_error(pos, "acos() input must be between -1 and 1"));
    }
    Ok(Value::Float(val.acos()))
}

/// `atan2(y, x)`.
pub(crate) fn atan2(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "atan2", &args, 2)?;
    let y = to_float(pos, &args[0], "atan2")?;
    let x = to_float(pos, &args[1], "atan2")?;
    Ok(Value::Float(y.atan2(x)))
}

// === Logarithms ===

/// `log(x)`: natural logarithm of a positive number.
pub(crate) fn log(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "log", &args, 1)?;
    let val = to_float(pos, &args[0], "log")?;
    if val <= 0.0 {
        return Err(value_error(pos, "log() of non-positive number"));
    }
    Ok(Value::Float(val.ln()))
}

/// `log10(x)`.
pub(crate) fn log10(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "log10", &args, 1)?;
    let val = to_float(pos, &args[0], "log10")?;
    if val <= 0.0 {
        return Err(value_error(pos, "log10() of non-positive number"));
    }
    Ok(Value::Float(val.log10()))
}

/// `log2(x)`.
pub(crate) fn log2(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "log2", &args, 1)?;
    let val = to_float(pos, &args[0], "log2")?;
    if val <= 0.0 {
        return Err(value_error(pos, "log2() of non-positive number"));
    }
    Ok(Value::Float(val.log2()))
}

/// `logb(x, base)`: logarithm in an arbitrary base.
pub(crate) fn logb(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "logb", &args, 2)?;
    let val = to_float(pos, &args[0], "logb")?;
    let base = to_float(pos, &args[1], "logb")?;
    if val <= 0.0 {
        return Err(value_error(pos, "logb() value must be positive"));
    }
    if base <= 0.0 || base == 1.0 {
        return Err(value_error(
            pos,
            "logb() base must be positive and not equal to 1",
        ));
    }
    Ok(Value::Float(val.ln() / base.ln()))
}
