//! Date built-ins: `date_now`, `date_format`.

use chrono::{DateTime, SecondsFormat, Utc};
use din_ir::Position;

use crate::control::Exec;
use crate::errors::type_error;
use crate::interpreter::Interpreter;
use crate::value::Value;

use super::ensure_args;

/// Pattern tokens and their strftime equivalents, longest-first so `YYYY`
/// wins over a would-be `YY`, and the case-sensitive pairs (`MM`/`mm`,
/// `EE`/`ee`, `NN`/`nn`) stay distinct.
const TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("MM", "%m"),
    ("DD", "%d"),
    ("hh", "%H"),
    ("mm", "%M"),
    ("ss", "%S"),
    ("ee", "%a"),
    ("EE", "%A"),
    ("nn", "%b"),
    ("NN", "%B"),
];

/// `date_now()`: the current UTC time as an RFC 3339 string.
pub(crate) fn date_now(_interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "date_now", &args, 0)?;
    Ok(Value::string(
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    ))
}

/// Translate a user pattern into a strftime format string in one pass,
/// so replacements never overlap (e.g. the `%m` produced by `MM` is
/// never re-read as a token).
fn translate_pattern(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;
    'outer: while !rest.is_empty() {
        for (token, replacement) in TOKENS {
            if rest.starts_with(token) {
                out.push_str(replacement);
                rest = &rest[token.len()..];
                continue 'outer;
            }
        }
        let ch = rest.chars().next().expect("rest is non-empty");
        if ch == '%' {
            out.push_str("%%");
        } else {
            out.push(ch);
        }
        rest = &rest[ch.len_utf8()..];
    }
    out
}

/// `date_format(iso, pattern)`: format an RFC 3339 date with the
/// `YYYY MM DD hh mm ss ee EE nn NN` tokens. Unparseable input yields
/// `null`.
pub(crate) fn date_format(
    _interp: &mut Interpreter,
    pos: Position,
    args: Vec<Value>,
) -> Exec<Value> {
    ensure_args(pos, "date_format", &args, 2)?;
    let Value::Str(input) = &args[0] else {
        return Err(type_error(
            pos,
            "date_format() requires first argument to be a string",
        ));
    };
    let Value::Str(pattern) = &args[1] else {
        return Err(type_error(
            pos,
            "date_format() requires second argument to be a string",
        ));
    };

    let Ok(parsed) = DateTime::parse_from_rfc3339(input) else {
        return Ok(Value::Null);
    };
    let format = translate_pattern(pattern);
    Ok(Value::string(parsed.format(&format).to_string()))
}
