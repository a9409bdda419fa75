//! The built-in function library.
//!
//! ~90 functions across conversion, sequences, strings, I/O, dates, math,
//! statistics, number theory, random numbers, utilities, and module
//! import. Each built-in validates its own argument count and types and
//! reports mismatches as type errors in the `"<name>() requires ..."`
//! form.
//!
//! Dispatch is a static name-to-implementation table; [`install`] binds
//! every entry into the global frame as a
//! [`FunctionValue::Builtin`](crate::FunctionValue).

mod conversion;
mod date;
mod io;
mod math;
mod number_theory;
mod random;
mod sequence;
mod stats;
mod strings;
mod util;

use din_ir::Position;

use crate::control::Exec;
use crate::environment::Environment;
use crate::errors::type_error;
use crate::value::{BuiltinImpl, FunctionValue, Value};

/// The builtin dispatch table.
pub(crate) const TABLE: &[(&str, BuiltinImpl)] = &[
    // Conversion / inspection
    ("bool", conversion::bool_),
    ("float", conversion::float),
    ("int", conversion::int),
    ("str", conversion::str_),
    ("typeof", conversion::typeof_),
    // Sequences
    ("append", sequence::append),
    ("char", sequence::char_),
    ("contains", sequence::contains),
    ("find", sequence::find),
    ("join", sequence::join),
    ("len", sequence::len),
    ("range", sequence::range),
    ("rune", sequence::rune),
    ("slice", sequence::slice),
    ("sort", sequence::sort),
    ("split", sequence::split),
    // Strings
    ("is_regex_match", strings::is_regex_match),
    ("lower", strings::lower),
    ("str_pad", strings::str_pad),
    ("substr", strings::substr),
    ("upper", strings::upper),
    // I/O and process
    ("args", io::args),
    ("exit", io::exit),
    ("import", io::import),
    ("print", io::print),
    ("read", io::read),
    // Date
    ("date_format", date::date_format),
    ("date_now", date::date_now),
    // Math: elementary
    ("abs", math::abs),
    ("cbrt", math::cbrt),
    ("max", math::max),
    ("min", math::min),
    ("pow", math::pow),
    ("sqrt", math::sqrt),
    // Math: rounding
    ("ceil", math::ceil),
    ("floor", math::floor),
    ("round", math::round),
    ("trunc", math::trunc),
    // Math: trigonometric and hyperbolic
    ("acos", math::acos),
    ("asin", math::asin),
    ("atan", math::atan),
    ("atan2", math::atan2),
    ("cos", math::cos),
    ("cosh", math::cosh),
    ("sin", math::sin),
    ("sinh", math::sinh),
    ("tan", math::tan),
    ("tanh", math::tanh),
    // Math: logarithms and exponentials
    ("exp", math::exp),
    ("exp2", math::exp2),
    ("log", math::log),
    ("log10", math::log10),
    ("log2", math::log2),
    ("logb", math::logb),
    // Statistics
    ("mean", stats::mean),
    ("median", stats::median),
    ("mode", stats::mode),
    ("std_dev", stats::std_dev),
    ("sum", stats::sum),
    ("variance", stats::variance),
    // Number theory
    ("factorial", number_theory::factorial),
    ("fibonacci", number_theory::fibonacci),
    ("gcd", number_theory::gcd),
    ("is_prime", number_theory::is_prime),
    ("lcm", number_theory::lcm),
    ("prime_factors", number_theory::prime_factors),
    // Random
    ("random", random::random),
    ("random_choice", random::random_choice),
    ("random_float", random::random_float),
    ("random_int", random::random_int),
    ("seed_random", random::seed_random),
    ("shuffle", random::shuffle),
    // Utility
    ("clamp", util::clamp),
    ("degrees", util::degrees),
    ("is_infinite", util::is_infinite),
    ("is_nan", util::is_nan),
    ("lerp", util::lerp),
    ("radians", util::radians),
    ("sign", util::sign),
];

/// Bind every built-in into the global frame.
pub(crate) fn install(env: &mut Environment) {
    for &(name, func) in TABLE {
        env.assign_outer(name, Value::Function(FunctionValue::Builtin { name, func }));
    }
}

/// Check an exact argument count.
pub(crate) fn ensure_args(pos: Position, name: &str, args: &[Value], required: usize) -> Exec<()> {
    if args.len() != required {
        let plural = if required == 1 { "" } else { "s" };
        return Err(type_error(
            pos,
            format!(
                "{name}() requires {required} arg{plural}, got {}",
                args.len()
            ),
        ));
    }
    Ok(())
}

/// Numeric argument as a float, promoting ints.
pub(crate) fn to_float(pos: Position, v: &Value, func: &str) -> Exec<f64> {
    v.as_float().ok_or_else(|| {
        type_error(
            pos,
            format!("{func}() requires a number, got {}", v.type_name()),
        )
    })
}

/// Numeric argument as an int, truncating floats.
pub(crate) fn to_int(pos: Position, v: &Value, func: &str) -> Exec<i64> {
    match v {
        Value::Int(n) => Ok(*n),
        Value::Float(f) => Ok(*f as i64),
        _ => Err(type_error(
            pos,
            format!("{func}() requires a number, got {}", v.type_name()),
        )),
    }
}
