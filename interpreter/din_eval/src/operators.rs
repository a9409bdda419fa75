//! Binary operator semantics.
//!
//! Enum-dispatched implementations for every binary operator. The
//! short-circuit behavior of `and`/`or` lives in the expression evaluator
//! (it controls whether the right operand is evaluated at all); the
//! value-level semantics here are total over already-evaluated operands.
//!
//! Comparisons and equality follow the language rules: equality is deep
//! and heterogeneous (mixed int/float compare by float value, arrays and
//! objects compare recursively, functions by identity), ordering is
//! defined for numbers, strings, and arrays only.

use din_ir::{BinaryOp, Position};

use crate::control::Exec;
use crate::errors::{type_error, value_error};
use crate::value::{ObjectMap, Value};

/// Evaluate `l op r` for any binary operator.
pub fn evaluate_binary(pos: Position, op: BinaryOp, l: &Value, r: &Value) -> Exec<Value> {
    match op {
        BinaryOp::Add => eval_plus(pos, l, r),
        BinaryOp::Sub => eval_minus(pos, l, r),
        BinaryOp::Mul => eval_times(pos, l, r),
        BinaryOp::Div => eval_divide(pos, l, r),
        BinaryOp::Mod => eval_modulo(pos, l, r),
        BinaryOp::Eq => Ok(Value::Bool(eval_equal(l, r))),
        BinaryOp::NotEq => Ok(Value::Bool(!eval_equal(l, r))),
        BinaryOp::Lt => Ok(Value::Bool(eval_less(pos, l, r)?)),
        BinaryOp::LtEq => Ok(Value::Bool(!eval_less(pos, r, l)?)),
        BinaryOp::Gt => Ok(Value::Bool(eval_less(pos, r, l)?)),
        BinaryOp::GtEq => Ok(Value::Bool(!eval_less(pos, l, r)?)),
        BinaryOp::In => eval_in(pos, l, r),
        // Short-circuiting happens in the evaluator; over two evaluated
        // operands the logical operators reduce to truthiness arithmetic.
        BinaryOp::And => Ok(Value::Bool(l.is_truthy() && r.is_truthy())),
        BinaryOp::Or => Ok(Value::Bool(l.is_truthy() || r.is_truthy())),
        BinaryOp::Xor => Ok(Value::Bool(l.is_truthy() != r.is_truthy())),
    }
}

/// Deep heterogeneous equality.
///
/// Mixed int/float compare by float value; arrays and objects compare
/// element/key-wise recursively; functions compare by identity; values of
/// different types are never equal.
pub fn eval_equal(l: &Value, r: &Value) -> bool {
    match (l, r) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Int(a), Value::Float(b)) => *a as f64 == *b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::Float(a), Value::Int(b)) => *a == *b as f64,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            if a.ptr_eq(b) {
                return true;
            }
            let a = a.borrow();
            let b = b.borrow();
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| eval_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            if a.ptr_eq(b) {
                return true;
            }
            let a = a.borrow();
            let b = b.borrow();
            a.len() == b.len()
                && a.iter()
                    .all(|(k, v)| b.get(k).is_some_and(|w| eval_equal(v, w)))
        }
        (Value::Function(a), Value::Function(b)) => a.same_identity(b),
        _ => false,
    }
}

/// The `<` ordering: numbers (with promotion), strings (lexicographic),
/// and arrays (lexicographic, length as tiebreaker).
pub fn eval_less(pos: Position, l: &Value, r: &Value) -> Exec<bool> {
    match (l, r) {
        (Value::Int(a), Value::Int(b)) => Ok(a < b),
        (Value::Int(a), Value::Float(b)) => Ok((*a as f64) < *b),
        (Value::Float(a), Value::Float(b)) => Ok(a < b),
        (Value::Float(a), Value::Int(b)) => Ok(*a < *b as f64),
        (Value::Str(a), Value::Str(b)) => Ok(a < b),
        (Value::Array(a), Value::Array(b)) => {
            let a = a.borrow();
            let b = b.borrow();
            for (x, y) in a.iter().zip(b.iter()) {
                if !eval_equal(x, y) {
                    return eval_less(pos, x, y);
                }
            }
            Ok(a.len() < b.len())
        }
        _ => Err(type_error(
            pos,
            "comparison requires two integers or two strings (or arrays of integers or strings)",
        )),
    }
}

/// `+`: numeric addition (ints wrap), string concatenation, array
/// concatenation (new array), object merge (right wins, new object).
pub fn eval_plus(pos: Position, l: &Value, r: &Value) -> Exec<Value> {
    match (l, r) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_add(*b))),
        (Value::Int(a), Value::Float(b)) => Ok(Value::Float(*a as f64 + b)),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a + b)),
        (Value::Float(a), Value::Int(b)) => Ok(Value::Float(a + *b as f64)),
        (Value::Str(a), Value::Str(b)) => {
            let mut s = String::with_capacity(a.len() + b.len());
            s.push_str(a);
            s.push_str(b);
            Ok(Value::string(s))
        }
        (Value::Array(a), Value::Array(b)) => {
            let mut items = a.borrow().clone();
            items.extend(b.borrow().iter().cloned());
            Ok(Value::array(items))
        }
        (Value::Object(a), Value::Object(b)) => {
            let mut map: ObjectMap = a.borrow().clone();
            for (k, v) in b.borrow().iter() {
                map.insert(k.clone(), v.clone());
            }
            Ok(Value::object(map))
        }
        _ => Err(type_error(
            pos,
            "+ requires two integers, strings, arrays, or objects",
        )),
    }
}

/// `-`: numeric subtraction with int/float promotion (ints wrap).
pub fn eval_minus(pos: Position, l: &Value, r: &Value) -> Exec<Value> {
    match (l, r) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_sub(*b))),
        (Value::Int(a), Value::Float(b)) => Ok(Value::Float(*a as f64 - b)),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a - b)),
        (Value::Float(a), Value::Int(b)) => Ok(Value::Float(a - *b as f64)),
        _ => Err(type_error(
            pos,
            format!(
                "- requires two floats or integers, got {} and {}",
                l.type_name(),
                r.type_name()
            ),
        )),
    }
}

/// `*`: numeric multiplication (ints wrap), plus string/array repetition
/// by a non-negative integer.
pub fn eval_times(pos: Position, l: &Value, r: &Value) -> Exec<Value> {
    match (l, r) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_mul(*b))),
        (Value::Int(a), Value::Float(b)) => Ok(Value::Float(*a as f64 * b)),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a * b)),
        (Value::Float(a), Value::Int(b)) => Ok(Value::Float(a * *b as f64)),
        (Value::Int(n), Value::Str(s)) => repeat_string(pos, s, *n),
        (Value::Str(s), Value::Int(n)) => repeat_string(pos, s, *n),
        (Value::Int(n), Value::Array(items)) => repeat_array(pos, &items.borrow(), *n),
        (Value::Array(items), Value::Int(n)) => repeat_array(pos, &items.borrow(), *n),
        _ => Err(type_error(
            pos,
            "* requires two integers or floats, or a string or array and an integer",
        )),
    }
}

fn repeat_string(pos: Position, s: &str, n: i64) -> Exec<Value> {
    if n < 0 {
        return Err(value_error(
            pos,
            "can't multiply string by a negative number",
        ));
    }
    Ok(Value::string(s.repeat(n as usize)))
}

fn repeat_array(pos: Position, items: &[Value], n: i64) -> Exec<Value> {
    if n < 0 {
        return Err(value_error(
            pos,
            "can't multiply array by a negative number",
        ));
    }
    let mut out = Vec::with_capacity(items.len() * n as usize);
    for _ in 0..n {
        out.extend(items.iter().cloned());
    }
    Ok(Value::array(out))
}

/// Coerce both operands to floats for `/` and `%`.
fn ensure_floats(pos: Position, l: &Value, r: &Value, operation: &str) -> Exec<(f64, f64)> {
    match (l.as_float(), r.as_float()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(type_error(
            pos,
            format!("{operation} requires two floats or integers"),
        )),
    }
}

/// `/`: always float division.
pub fn eval_divide(pos: Position, l: &Value, r: &Value) -> Exec<Value> {
    let (a, b) = ensure_floats(pos, l, r, "/")?;
    if b == 0.0 {
        return Err(value_error(pos, "can't divide by zero"));
    }
    Ok(Value::Float(a / b))
}

/// `%`: integer remainder of the truncated operands.
pub fn eval_modulo(pos: Position, l: &Value, r: &Value) -> Exec<Value> {
    let (a, b) = ensure_floats(pos, l, r, "%")?;
    if b == 0.0 || b as i64 == 0 {
        return Err(value_error(pos, "can't divide by zero"));
    }
    Ok(Value::Int((a as i64).wrapping_rem(b as i64)))
}

/// `in`: substring, array membership, or object key membership.
pub fn eval_in(pos: Position, l: &Value, r: &Value) -> Exec<Value> {
    match r {
        Value::Str(haystack) => match l {
            Value::Str(needle) => Ok(Value::Bool(haystack.contains(&**needle))),
            _ => Err(type_error(pos, "in string requires string on left side")),
        },
        Value::Array(items) => Ok(Value::Bool(
            items.borrow().iter().any(|v| eval_equal(l, v)),
        )),
        Value::Object(map) => match l {
            Value::Str(key) => Ok(Value::Bool(map.borrow().contains_key(&**key))),
            _ => Err(type_error(pos, "in object requires string on left side")),
        },
        _ => Err(type_error(
            pos,
            "in requires string, array, or object on right side",
        )),
    }
}

/// Subscript read: `container[index]`.
///
/// Strings index by Unicode scalar and yield a one-character string;
/// negative indices count from the end for strings and arrays; a missing
/// object key yields `null`.
pub fn eval_subscript(pos: Position, container: &Value, index: &Value) -> Exec<Value> {
    match container {
        Value::Str(s) => {
            let Value::Int(i) = index else {
                return Err(type_error(pos, "string subscript must be an integer"));
            };
            let len = s.chars().count() as i64;
            let idx = if *i < 0 { len + i } else { *i };
            if idx < 0 || idx >= len {
                return Err(value_error(pos, format!("subscript {idx} out of range")));
            }
            let ch = s
                .chars()
                .nth(idx as usize)
                .expect("index validated against char count");
            Ok(Value::string(ch.to_string()))
        }
        Value::Array(items) => {
            let Value::Int(i) = index else {
                return Err(type_error(pos, "array subscript must be an integer"));
            };
            let items = items.borrow();
            let len = items.len() as i64;
            let idx = if *i < 0 { len + i } else { *i };
            if idx < 0 || idx >= len {
                return Err(value_error(pos, format!("subscript {idx} out of range")));
            }
            Ok(items[idx as usize].clone())
        }
        Value::Object(map) => {
            let Value::Str(key) = index else {
                return Err(type_error(pos, "object subscript must be a string"));
            };
            Ok(map.borrow().get(&**key).cloned().unwrap_or(Value::Null))
        }
        _ => Err(type_error(
            pos,
            "can only subscript string, array, or object",
        )),
    }
}

/// Subscript write: `container[index] = value`.
///
/// Arrays require a non-negative in-range integer index; objects accept
/// any string key (creating or overwriting).
pub fn assign_subscript(
    pos: Position,
    container: &Value,
    index: &Value,
    value: Value,
) -> Exec<()> {
    match container {
        Value::Array(items) => {
            let Value::Int(i) = index else {
                return Err(type_error(pos, "array subscript must be an integer"));
            };
            let mut items = items.borrow_mut();
            if *i < 0 || *i >= items.len() as i64 {
                return Err(value_error(pos, format!("subscript {i} out of range")));
            }
            items[*i as usize] = value;
            Ok(())
        }
        Value::Object(map) => {
            let Value::Str(key) = index else {
                return Err(type_error(pos, "object subscript must be a string"));
            };
            map.borrow_mut().insert(key.to_string(), value);
            Ok(())
        }
        _ => Err(type_error(
            pos,
            "can only assign to subscript of array or object",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos() -> Position {
        Position::new(1, 1)
    }

    fn unwrap_msg<T: std::fmt::Debug>(result: Exec<T>) -> String {
        match result {
            Err(crate::Unwind::Failure(diag)) => diag.to_string(),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    // === Equality ===

    #[test]
    fn equality_promotes_mixed_numbers() {
        assert!(eval_equal(&Value::Int(3), &Value::Float(3.0)));
        assert!(eval_equal(&Value::Float(2.5), &Value::Float(2.5)));
        assert!(!eval_equal(&Value::Int(3), &Value::Float(3.5)));
    }

    #[test]
    fn equality_is_deep_for_arrays() {
        let a = Value::array(vec![Value::Int(1), Value::array(vec![Value::Int(2)])]);
        let b = Value::array(vec![Value::Int(1), Value::array(vec![Value::Int(2)])]);
        assert!(eval_equal(&a, &b));

        let c = Value::array(vec![Value::Int(1), Value::array(vec![Value::Int(3)])]);
        assert!(!eval_equal(&a, &c));
    }

    #[test]
    fn equality_is_deep_for_objects() {
        let mut m1 = ObjectMap::default();
        m1.insert("x".into(), Value::Int(1));
        let mut m2 = ObjectMap::default();
        m2.insert("x".into(), Value::Int(1));
        assert!(eval_equal(&Value::object(m1.clone()), &Value::object(m2)));

        let mut m3 = ObjectMap::default();
        m3.insert("y".into(), Value::Int(1));
        assert!(!eval_equal(&Value::object(m1), &Value::object(m3)));
    }

    #[test]
    fn different_types_are_never_equal() {
        assert!(!eval_equal(&Value::Int(0), &Value::Null));
        assert!(!eval_equal(&Value::string("1"), &Value::Int(1)));
        assert!(!eval_equal(&Value::Bool(false), &Value::Int(0)));
    }

    #[test]
    fn nan_is_not_equal_to_itself() {
        assert!(!eval_equal(&Value::Float(f64::NAN), &Value::Float(f64::NAN)));
    }

    // === Ordering ===

    #[test]
    fn ordering_over_numbers_and_strings() {
        assert!(eval_less(pos(), &Value::Int(1), &Value::Int(2)).unwrap());
        assert!(eval_less(pos(), &Value::Int(1), &Value::Float(1.5)).unwrap());
        assert!(eval_less(pos(), &Value::string("apple"), &Value::string("banana")).unwrap());
        assert!(!eval_less(pos(), &Value::string("b"), &Value::string("a")).unwrap());
    }

    #[test]
    fn ordering_over_arrays_uses_length_tiebreak() {
        let short = Value::array(vec![Value::Int(1)]);
        let long = Value::array(vec![Value::Int(1), Value::Int(2)]);
        assert!(eval_less(pos(), &short, &long).unwrap());

        let bigger_head = Value::array(vec![Value::Int(2)]);
        assert!(eval_less(pos(), &short, &bigger_head).unwrap());
    }

    #[test]
    fn ordering_rejects_mixed_types() {
        let msg = unwrap_msg(eval_less(pos(), &Value::Int(1), &Value::string("a")));
        assert!(msg.contains("comparison requires"), "{msg}");
    }

    // === Arithmetic ===

    #[test]
    fn plus_concatenates_strings_and_arrays() {
        let s = eval_plus(pos(), &Value::string("ab"), &Value::string("cd")).unwrap();
        assert_eq!(s.display(false), "abcd");

        let a = Value::array(vec![Value::Int(1)]);
        let b = Value::array(vec![Value::Int(2)]);
        let joined = eval_plus(pos(), &a, &b).unwrap();
        assert_eq!(joined.display(false), "[1, 2]");
        // A fresh array: mutating the result leaves the inputs alone.
        if let Value::Array(items) = &joined {
            items.borrow_mut().push(Value::Int(3));
        }
        assert_eq!(a.display(false), "[1]");
    }

    #[test]
    fn plus_merges_objects_right_wins() {
        let mut l = ObjectMap::default();
        l.insert("a".into(), Value::Int(1));
        l.insert("b".into(), Value::Int(2));
        let mut r = ObjectMap::default();
        r.insert("b".into(), Value::Int(20));
        let merged = eval_plus(pos(), &Value::object(l), &Value::object(r)).unwrap();
        assert_eq!(merged.display(false), "{\"a\": 1, \"b\": 20}");
    }

    #[test]
    fn int_arithmetic_wraps() {
        let v = eval_plus(pos(), &Value::Int(i64::MAX), &Value::Int(1)).unwrap();
        assert!(matches!(v, Value::Int(i64::MIN)));
    }

    #[test]
    fn times_repeats_strings_and_arrays() {
        let s = eval_times(pos(), &Value::string("ab"), &Value::Int(3)).unwrap();
        assert_eq!(s.display(false), "ababab");
        let s = eval_times(pos(), &Value::Int(2), &Value::string("xy")).unwrap();
        assert_eq!(s.display(false), "xyxy");
        let a = eval_times(pos(), &Value::array(vec![Value::Int(1)]), &Value::Int(2)).unwrap();
        assert_eq!(a.display(false), "[1, 1]");
    }

    #[test]
    fn negative_repetition_is_a_value_error() {
        let msg = unwrap_msg(eval_times(pos(), &Value::string("x"), &Value::Int(-1)));
        assert!(msg.contains("can't multiply string by a negative number"), "{msg}");
    }

    #[test]
    fn division_always_yields_float() {
        let v = eval_divide(pos(), &Value::Int(7), &Value::Int(2)).unwrap();
        assert!(matches!(v, Value::Float(f) if f == 3.5));
    }

    #[test]
    fn division_by_zero_is_a_value_error() {
        let msg = unwrap_msg(eval_divide(pos(), &Value::Int(1), &Value::Int(0)));
        assert!(msg.contains("can't divide by zero"), "{msg}");
    }

    #[test]
    fn modulo_truncates_to_integers() {
        let v = eval_modulo(pos(), &Value::Int(7), &Value::Int(3)).unwrap();
        assert!(matches!(v, Value::Int(1)));
        // Operands truncate before the remainder.
        let v = eval_modulo(pos(), &Value::Float(7.9), &Value::Float(3.2)).unwrap();
        assert!(matches!(v, Value::Int(1)));
    }

    #[test]
    fn modulo_by_fractional_zero_is_a_value_error() {
        let msg = unwrap_msg(eval_modulo(pos(), &Value::Int(1), &Value::Float(0.5)));
        assert!(msg.contains("can't divide by zero"), "{msg}");
    }

    // === in ===

    #[test]
    fn in_checks_substrings_elements_and_keys() {
        let v = eval_in(pos(), &Value::string("ell"), &Value::string("hello")).unwrap();
        assert!(matches!(v, Value::Bool(true)));

        let arr = Value::array(vec![Value::Int(1), Value::Int(2)]);
        let v = eval_in(pos(), &Value::Int(2), &arr).unwrap();
        assert!(matches!(v, Value::Bool(true)));
        let v = eval_in(pos(), &Value::Int(9), &arr).unwrap();
        assert!(matches!(v, Value::Bool(false)));

        let mut map = ObjectMap::default();
        map.insert("k".into(), Value::Null);
        let v = eval_in(pos(), &Value::string("k"), &Value::object(map)).unwrap();
        assert!(matches!(v, Value::Bool(true)));
    }

    #[test]
    fn in_rejects_non_string_needle_for_strings() {
        let msg = unwrap_msg(eval_in(pos(), &Value::Int(1), &Value::string("x")));
        assert!(msg.contains("in string requires string on left side"), "{msg}");
    }

    // === Subscripts ===

    #[test]
    fn subscript_negative_indices_count_from_the_end() {
        let arr = Value::array(vec![Value::Int(10), Value::Int(20), Value::Int(30)]);
        let v = eval_subscript(pos(), &arr, &Value::Int(-1)).unwrap();
        assert!(matches!(v, Value::Int(30)));

        let s = Value::string("Hello");
        let v = eval_subscript(pos(), &s, &Value::Int(-1)).unwrap();
        assert_eq!(v.display(false), "o");
    }

    #[test]
    fn subscript_out_of_range_is_a_value_error() {
        let arr = Value::array(vec![Value::Int(1)]);
        let msg = unwrap_msg(eval_subscript(pos(), &arr, &Value::Int(5)));
        assert!(msg.contains("subscript 5 out of range"), "{msg}");
    }

    #[test]
    fn subscript_string_indexes_by_scalar() {
        let s = Value::string("héllo");
        let v = eval_subscript(pos(), &s, &Value::Int(1)).unwrap();
        assert_eq!(v.display(false), "é");
    }

    #[test]
    fn subscript_missing_object_key_yields_null() {
        let obj = Value::object(ObjectMap::default());
        let v = eval_subscript(pos(), &obj, &Value::string("missing")).unwrap();
        assert!(matches!(v, Value::Null));
    }

    #[test]
    fn assign_subscript_mutates_in_place() {
        let arr = Value::array(vec![Value::Int(1), Value::Int(2)]);
        assign_subscript(pos(), &arr, &Value::Int(1), Value::Int(9)).unwrap();
        assert_eq!(arr.display(false), "[1, 9]");
    }

    #[test]
    fn assign_subscript_rejects_negative_indices() {
        let arr = Value::array(vec![Value::Int(1)]);
        let msg = unwrap_msg(assign_subscript(pos(), &arr, &Value::Int(-1), Value::Null));
        assert!(msg.contains("subscript -1 out of range"), "{msg}");
    }

    #[test]
    fn assign_subscript_creates_object_keys() {
        let obj = Value::object(ObjectMap::default());
        assign_subscript(pos(), &obj, &Value::string("k"), Value::Int(1)).unwrap();
        assert_eq!(obj.display(false), "{\"k\": 1}");
    }
}
