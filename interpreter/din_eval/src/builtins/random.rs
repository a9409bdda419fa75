//! Random number built-ins: `random`, `random_int`, `random_float`,
//! `random_choice`, `shuffle`, `seed_random`.
//!
//! All of them draw from the interpreter instance's RNG, so
//! `seed_random` makes a single interpreter's run reproducible without
//! touching any global state.

use din_ir::Position;

use crate::control::Exec;
use crate::errors::{type_error, value_error};
use crate::interpreter::Interpreter;
use crate::value::Value;

use super::{ensure_args, to_float, to_int};

/// `random()`: uniform float in `[0, 1)`.
pub(crate) fn random(interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "random", &args, 0)?;
    Ok(Value::Float(interp.rng.float_unit()))
}

/// `random_int(min, max)`: uniform integer in `[min, max)`.
pub(crate) fn random_int(interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "random_int", &args, 2)?;
    let min = to_int(pos, &args[0], "random_int")?;
    let max = to_int(pos, &args[1], "random_int")?;
    if min >= max {
        return Err(value_error(pos, "random_int() min must be less than max"));
    }
    Ok(Value::Int(interp.rng.int_range(min, max)))
}

/// `random_float(min, max)`: uniform float in `[min, max)`.
pub(crate) fn random_float(
    interp: &mut Interpreter,
    pos: Position,
    args: Vec<Value>,
) -> Exec<Value> {
    ensure_args(pos, "random_float", &args, 2)?;
    let min = to_float(pos, &args[0], "random_float")?;
    let max = to_float(pos, &args[1], "random_float")?;
    if min >= max {
        return Err(value_error(pos, "random_float() min must be less than max"));
    }
    Ok(Value::Float(interp.rng.float_range(min, max)))
}

/// `random_choice(list)`: a uniformly chosen element.
pub(crate) fn random_choice(
    interp: &mut Interpreter,
    pos: Position,
    args: Vec<Value>,
) -> Exec<Value> {
    ensure_args(pos, "random_choice", &args, 1)?;
    let Value::Array(items) = &args[0] else {
        return Err(type_error(pos, "random_choice() requires an array"));
    };
    let items = items.borrow();
    if items.is_empty() {
        return Err(value_error(pos, "random_choice() of empty array"));
    }
    let idx = interp.rng.index(items.len());
    Ok(items[idx].clone())
}

/// `shuffle(list)`: in-place Fisher-Yates shuffle.
pub(crate) fn shuffle(interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "shuffle", &args, 1)?;
    let Value::Array(items) = &args[0] else {
        return Err(type_error(pos, "shuffle() requires an array"));
    };
    let mut items = items.borrow_mut();
    for i in (1..items.len()).rev() {
        let j = interp.rng.index(i + 1);
        items.swap(i, j);
    }
    Ok(Value::Null)
}

/// `seed_random(n)`: reseed this interpreter's RNG.
pub(crate) fn seed_random(interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "seed_random", &args, 1)?;
    let seed = to_int(pos, &args[0], "seed_random")?;
    interp.rng.reseed(seed);
    Ok(Value::Null)
}
