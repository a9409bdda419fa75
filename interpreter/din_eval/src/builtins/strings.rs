//! String built-ins: `upper`, `lower`, `substr`, `str_pad`,
//! `is_regex_match`.

use din_ir::Position;
use regex::Regex;

use crate::control::Exec;
use crate::errors::{type_error, value_error};
use crate::interpreter::Interpreter;
use crate::value::Value;

use super::ensure_args;

/// `upper(s)`: uppercase.
pub(crate) fn upper(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "upper", &args, 1)?;
    let Value::Str(s) = &args[0] else {
        return Err(type_error(pos, "upper() requires a string"));
    };
    Ok(Value::string(s.to_uppercase()))
}

/// `lower(s)`: lowercase.
pub(crate) fn lower(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "lower", &args, 1)?;
    let Value::Str(s) = &args[0] else {
        return Err(type_error(pos, "lower() requires a string"));
    };
    Ok(Value::string(s.to_lowercase()))
}

/// `substr(s, start, end)`: the scalars in `[start, end)`.
pub(crate) fn substr(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "substr", &args, 3)?;
    let Value::Str(s) = &args[0] else {
        return Err(type_error(
            pos,
            "substr() requires first argument to be a string",
        ));
    };
    let Value::Int(start) = args[1] else {
        return Err(type_error(
            pos,
            "substr() requires second argument to be an integer",
        ));
    };
    let Value::Int(end) = args[2] else {
        return Err(type_error(
            pos,
            "substr() requires third argument to be an integer",
        ));
    };

    let chars: Vec<char> = s.chars().collect();
    if start < 0 || end > chars.len() as i64 || start > end {
        return Err(value_error(pos, "substr() start or end out of bounds"));
    }
    let out: String = chars[start as usize..end as usize].iter().collect();
    Ok(Value::string(out))
}

/// `str_pad(s, n, pad)`: append `pad` repeated `n` times.
pub(crate) fn str_pad(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "str_pad", &args, 3)?;
    let Value::Str(s) = &args[0] else {
        return Err(type_error(
            pos,
            "str_pad() requires first argument to be a string",
        ));
    };
    let Value::Int(pad_len) = args[1] else {
        return Err(type_error(
            pos,
            "str_pad() requires second argument to be an integer",
        ));
    };
    let Value::Str(pad) = &args[2] else {
        return Err(type_error(
            pos,
            "str_pad() requires third argument to be a string",
        ));
    };
    if pad_len < 0 {
        return Err(value_error(pos, "str_pad() length must not be negative"));
    }
    let mut out = s.to_string();
    out.push_str(&pad.repeat(pad_len as usize));
    Ok(Value::string(out))
}

/// `is_regex_match(pattern, s)`: whether `s` matches `pattern`. An
/// invalid pattern is simply no match.
pub(crate) fn is_regex_match(
    _interp: &mut Interpreter,
    pos: Position,
    args: Vec<Value>,
) -> Exec<Value> {
    ensure_args(pos, "regex_match", &args, 2)?;
    let Value::Str(pattern) = &args[0] else {
        return Err(type_error(
            pos,
            "regex() requires first argument to be a string",
        ));
    };
    let Value::Str(s) = &args[1] else {
        return Err(type_error(
            pos,
            "regex() requires second argument to be a string",
        ));
    };
    match Regex::new(pattern) {
        Ok(re) => Ok(Value::Bool(re.is_match(s))),
        Err(_) => Ok(Value::Bool(false)),
    }
}
