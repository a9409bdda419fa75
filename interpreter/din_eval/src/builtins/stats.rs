//! Statistical built-ins over numeric arrays: `sum`, `mean`, `median`,
//! `mode`, `std_dev`, `variance`.
//!
//! `std_dev` and `variance` use the sample formulas (divide by N-1) and
//! define arrays of length <= 1 as having zero spread.

use din_ir::Position;

use crate::control::Exec;
use crate::errors::{type_error, value_error};
use crate::interpreter::Interpreter;
use crate::value::Value;

use super::ensure_args;

/// Extract a numeric array as floats, or fail with `<name>() array must
/// contain only numbers`.
fn numeric_array(pos: Position, value: &Value, func: &str) -> Exec<Vec<f64>> {
    let Value::Array(items) = value else {
        return Err(type_error(pos, format!("{func}() requires an array")));
    };
    let items = items.borrow();
    let mut out = Vec::with_capacity(items.len());
    for v in items.iter() {
        match v.as_float() {
            Some(f) => out.push(f),
            None => {
                return Err(type_error(
                    pos,
                    format!("{func}() array must contain only numbers"),
                ));
            }
        }
    }
    Ok(out)
}

/// `sum(array)`: total; int unless the array contains a float.
pub(crate) fn sum(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "sum", &args, 1)?;
    let Value::Array(items) = &args[0] else {
        return Err(type_error(pos, "sum() requires an array"));
    };
    let items = items.borrow();
    let mut total = 0.0;
    let mut has_float = false;
    for v in items.iter() {
        match v {
            Value::Int(n) => total += *n as f64,
            Value::Float(f) => {
                total += f;
                has_float = true;
            }
            _ => return Err(type_error(pos, "sum() array must contain only numbers")),
        }
    }
    if has_float {
        Ok(Value::Float(total))
    } else {
        Ok(Value::Int(total as i64))
    }
}

/// `mean(array)`: arithmetic mean of a non-empty numeric array.
pub(crate) fn mean(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "mean", &args, 1)?;
    let nums = numeric_array(pos, &args[0], "mean")?;
    if nums.is_empty() {
        return Err(value_error(pos, "mean() of empty array"));
    }
    Ok(Value::Float(nums.iter().sum::<f64>() / nums.len() as f64))
}

/// `median(array)`: middle value, or the mean of the middle two.
pub(crate) fn median(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "median", &args, 1)?;
    let mut nums = numeric_array(pos, &args[0], "median")?;
    if nums.is_empty() {
        return Err(value_error(pos, "median() of empty array"));
    }
    nums.sort_by(f64::total_cmp);
    let n = nums.len();
    if n % 2 == 0 {
        Ok(Value::Float((nums[n / 2 - 1] + nums[n / 2]) / 2.0))
    } else {
        Ok(Value::Float(nums[n / 2]))
    }
}

/// `mode(array)`: the most frequent element; the earliest-seen wins a
/// tie.
pub(crate) fn mode(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "mode", &args, 1)?;
    let Value::Array(items) = &args[0] else {
        return Err(type_error(pos, "mode() requires an array"));
    };
    let items = items.borrow();
    if items.is_empty() {
        return Err(value_error(pos, "mode() of empty array"));
    }

    // Count by canonical rendering; track first-seen order for stable
    // tie-breaking.
    let mut counts: Vec<(String, u64, Value)> = Vec::new();
    for v in items.iter() {
        let key = v.display(true);
        match counts.iter_mut().find(|(k, _, _)| *k == key) {
            Some((_, count, _)) => *count += 1,
            None => counts.push((key, 1, v.clone())),
        }
    }
    let mut best = &counts[0];
    for entry in &counts[1..] {
        if entry.1 > best.1 {
            best = entry;
        }
    }
    Ok(best.2.clone())
}

/// Sample variance of `nums` (N-1 denominator); zero for N <= 1.
fn sample_variance(nums: &[f64]) -> f64 {
    if nums.len() <= 1 {
        return 0.0;
    }
    let mean = nums.iter().sum::<f64>() / nums.len() as f64;
    let sum_sq: f64 = nums.iter().map(|v| (v - mean) * (v - mean)).sum();
    sum_sq / (nums.len() - 1) as f64
}

/// `std_dev(array)`: sample standard deviation.
pub(crate) fn std_dev(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "std_dev", &args, 1)?;
    let nums = numeric_array(pos, &args[0], "std_dev")?;
    Ok(Value::Float(sample_variance(&nums).sqrt()))
}

/// `variance(array)`: sample variance.
pub(crate) fn variance(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "variance", &args, 1)?;
    let nums = numeric_array(pos, &args[0], "variance")?;
    Ok(Value::Float(sample_variance(&nums)))
}
