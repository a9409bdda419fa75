//! Sequence and collection built-ins: `len`, `append`, `slice`, `sort`,
//! `range`, `find`, `contains`, `join`, `split`, `char`, `rune`.

use std::cmp::Ordering;

use din_ir::Position;

use crate::control::{Exec, Unwind};
use crate::errors::{type_error, value_error};
use crate::interpreter::Interpreter;
use crate::operators::{eval_equal, eval_less};
use crate::value::Value;

use super::ensure_args;

/// `len(x)`: string length in Unicode scalars, array element count, or
/// object entry count.
pub(crate) fn len(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "len", &args, 1)?;
    let length = match &args[0] {
        Value::Str(s) => s.chars().count(),
        Value::Array(items) => items.borrow().len(),
        Value::Object(map) => map.borrow().len(),
        _ => return Err(type_error(pos, "len() requires a string, array, or object")),
    };
    Ok(Value::Int(length as i64))
}

/// `append(list, ...items)`: push items onto the array in place.
pub(crate) fn append(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    if args.is_empty() {
        return Err(type_error(
            pos,
            format!("append() requires at least 1 arg, got {}", args.len()),
        ));
    }
    let mut args = args;
    let rest = args.split_off(1);
    let Value::Array(items) = &args[0] else {
        return Err(type_error(pos, "append() requires first argument to be list"));
    };
    items.borrow_mut().extend(rest);
    Ok(Value::Null)
}

/// `slice(x, start, end)`: substring or subarray over `[start, end)`,
/// with strict bounds.
pub(crate) fn slice(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "slice", &args, 3)?;
    let (Value::Int(start), Value::Int(end)) = (&args[1], &args[2]) else {
        return Err(type_error(
            pos,
            "slice() requires start and end to be integers",
        ));
    };
    let (start, end) = (*start, *end);

    match &args[0] {
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            if start < 0 || end > chars.len() as i64 || start > end {
                return Err(value_error(pos, "slice() start or end out of bounds"));
            }
            let out: String = chars[start as usize..end as usize].iter().collect();
            Ok(Value::string(out))
        }
        Value::Array(items) => {
            let items = items.borrow();
            if start < 0 || end > items.len() as i64 || start > end {
                return Err(value_error(pos, "slice() start or end out of bounds"));
            }
            Ok(Value::array(items[start as usize..end as usize].to_vec()))
        }
        _ => Err(type_error(
            pos,
            "slice() requires first argument to be a str or array",
        )),
    }
}

/// Stable sort of a value slice by the `<` ordering, surfacing the first
/// comparison error.
fn sort_values(pos: Position, items: &mut [Value]) -> Exec<()> {
    let mut first_err: Option<Unwind> = None;
    items.sort_by(|a, b| {
        if first_err.is_some() {
            return Ordering::Equal;
        }
        match eval_less(pos, a, b) {
            Ok(true) => Ordering::Less,
            Ok(false) => match eval_less(pos, b, a) {
                Ok(true) => Ordering::Greater,
                Ok(false) => Ordering::Equal,
                Err(e) => {
                    first_err = Some(e);
                    Ordering::Equal
                }
            },
            Err(e) => {
                first_err = Some(e);
                Ordering::Equal
            }
        }
    });
    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// `sort(list [, key_fn])`: stable in-place sort. With a key function,
/// keys are computed once per element (decorate-sort-undecorate).
pub(crate) fn sort(interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    if args.len() != 1 && args.len() != 2 {
        return Err(type_error(
            pos,
            format!("sort() requires 1 or 2 args, got {}", args.len()),
        ));
    }
    let Value::Array(list) = &args[0] else {
        return Err(type_error(
            pos,
            "sort() requires first argument to be a array",
        ));
    };
    if list.borrow().len() <= 1 {
        return Ok(Value::Null);
    }

    if args.len() == 1 {
        let mut items = list.borrow_mut();
        sort_values(pos, &mut items)?;
        return Ok(Value::Null);
    }

    let Value::Function(key_fn) = &args[1] else {
        return Err(type_error(
            pos,
            "sort() requires second argument to be a function",
        ));
    };

    // Snapshot before calling user code: the key function can observe (or
    // even mutate) the list.
    let snapshot: Vec<Value> = list.borrow().clone();
    let mut pairs: Vec<(Value, Value)> = Vec::with_capacity(snapshot.len());
    for value in snapshot {
        let key = interp.call_function(pos, key_fn, vec![value.clone()])?;
        pairs.push((key, value));
    }

    let mut first_err: Option<Unwind> = None;
    pairs.sort_by(|(ka, _), (kb, _)| {
        if first_err.is_some() {
            return Ordering::Equal;
        }
        match eval_less(pos, ka, kb) {
            Ok(true) => Ordering::Less,
            Ok(false) => match eval_less(pos, kb, ka) {
                Ok(true) => Ordering::Greater,
                Ok(false) => Ordering::Equal,
                Err(e) => {
                    first_err = Some(e);
                    Ordering::Equal
                }
            },
            Err(e) => {
                first_err = Some(e);
                Ordering::Equal
            }
        }
    });
    if let Some(e) = first_err {
        return Err(e);
    }

    *list.borrow_mut() = pairs.into_iter().map(|(_, v)| v).collect();
    Ok(Value::Null)
}

/// `range(n)` or `range(start, stop)`: fresh integer array; empty when
/// `start > stop`.
pub(crate) fn range(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    match args.len() {
        1 => {
            let Value::Int(n) = args[0] else {
                return Err(type_error(pos, "range() requires an integer"));
            };
            if n < 0 {
                return Err(value_error(pos, "range() argument must not be negative"));
            }
            Ok(Value::array((0..n).map(Value::Int).collect()))
        }
        2 => {
            let (Value::Int(start), Value::Int(stop)) = (&args[0], &args[1]) else {
                return Err(type_error(pos, "range() requires integer arguments"));
            };
            if start > stop {
                return Ok(Value::array(Vec::new()));
            }
            Ok(Value::array((*start..*stop).map(Value::Int).collect()))
        }
        n => Err(value_error(
            pos,
            format!("range() requires 1 or 2 arguments, got {n}"),
        )),
    }
}

/// `find(haystack, needle)`: first index (scalar index for strings) or
/// -1.
pub(crate) fn find(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "find", &args, 2)?;
    match &args[0] {
        Value::Str(haystack) => {
            let Value::Str(needle) = &args[1] else {
                return Err(type_error(
                    pos,
                    "find() on string requires second argument to be a string",
                ));
            };
            match haystack.find(&**needle) {
                Some(byte_idx) => Ok(Value::Int(haystack[..byte_idx].chars().count() as i64)),
                None => Ok(Value::Int(-1)),
            }
        }
        Value::Array(items) => {
            let needle = &args[1];
            for (i, v) in items.borrow().iter().enumerate() {
                if eval_equal(needle, v) {
                    return Ok(Value::Int(i as i64));
                }
            }
            Ok(Value::Int(-1))
        }
        _ => Err(type_error(
            pos,
            "find() requires first argument to be a string or array",
        )),
    }
}

/// `contains(haystack, needle)`: substring or element membership.
pub(crate) fn contains(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "contains", &args, 2)?;
    match &args[0] {
        Value::Str(haystack) => {
            let Value::Str(needle) = &args[1] else {
                return Err(type_error(
                    pos,
                    "contains() on str requires second argument to be a string",
                ));
            };
            Ok(Value::Bool(haystack.contains(&**needle)))
        }
        Value::Array(items) => Ok(Value::Bool(
            items.borrow().iter().any(|v| eval_equal(&args[1], v)),
        )),
        _ => Err(type_error(
            pos,
            "contains() requires first argument to be a string or array",
        )),
    }
}

/// `join(list, sep)`: join the canonical (quoted) forms of the elements.
pub(crate) fn join(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "join", &args, 2)?;
    let Value::Array(items) = &args[0] else {
        return Err(type_error(
            pos,
            "join() requires first argument to be an array",
        ));
    };
    let Value::Str(sep) = &args[1] else {
        return Err(type_error(
            pos,
            "join() requires second argument to be a string",
        ));
    };
    let parts: Vec<String> = items.borrow().iter().map(|v| v.display(true)).collect();
    Ok(Value::string(parts.join(sep)))
}

/// `split(s [, sep])`: split on `sep`, or on whitespace runs when `sep`
/// is omitted or `null`. An empty separator splits into single
/// characters.
pub(crate) fn split(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    if args.len() != 1 && args.len() != 2 {
        return Err(type_error(
            pos,
            format!("split() requires 1 or 2 args, got {}", args.len()),
        ));
    }
    let Value::Str(s) = &args[0] else {
        return Err(type_error(
            pos,
            "split() requires first argument to be a string",
        ));
    };

    let parts: Vec<Value> = match args.get(1) {
        None | Some(Value::Null) => s.split_whitespace().map(Value::string).collect(),
        Some(Value::Str(sep)) if sep.is_empty() => {
            s.chars().map(|c| Value::string(c.to_string())).collect()
        }
        Some(Value::Str(sep)) => s.split(&**sep).map(Value::string).collect(),
        Some(_) => {
            return Err(type_error(
                pos,
                "split() requires separator to be a str or null",
            ));
        }
    };
    Ok(Value::array(parts))
}

/// `char(n)`: the character for a Unicode code point.
pub(crate) fn char_(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "char", &args, 1)?;
    let Value::Int(code) = args[0] else {
        return Err(type_error(
            pos,
            format!("char() requires an integer, not {}", args[0].type_name()),
        ));
    };
    let ch = u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER);
    Ok(Value::string(ch.to_string()))
}

/// `rune(s)`: the code point of a one-character string.
pub(crate) fn rune(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "rune", &args, 1)?;
    let Value::Str(s) = &args[0] else {
        return Err(type_error(pos, "rune() requires a string"));
    };
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Value::Int(c as i64)),
        _ => Err(value_error(pos, "rune() requires a 1-character string")),
    }
}
