//! I/O and process built-ins: `print`, `read`, `args`, `exit`, and the
//! `import()` function form.

use din_ir::Position;

use crate::control::{Exec, Unwind};
use crate::errors::type_error;
use crate::interpreter::import::{load_module, ImportError};
use crate::interpreter::Interpreter;
use crate::value::Value;

use super::ensure_args;

/// `print(...)`: space-separated, newline-terminated, to the configured
/// output.
pub(crate) fn print(interp: &mut Interpreter, _pos: Position, args: Vec<Value>) -> Exec<Value> {
    let parts: Vec<String> = args.iter().map(|v| v.display(false)).collect();
    interp.output.println(&parts.join(" "));
    Ok(Value::Null)
}

/// `read()`: one line from the configured input, or `null` at end of
/// input.
pub(crate) fn read(interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "read", &args, 0)?;
    Ok(interp
        .input
        .read_line()
        .map(Value::string)
        .unwrap_or(Value::Null))
}

/// `args()`: the program arguments as an array of strings.
pub(crate) fn args(interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "args", &args, 0)?;
    Ok(Value::array(
        interp.args.iter().map(Value::string).collect(),
    ))
}

/// `exit([code])`: invoke the configured exit hook, then unwind.
/// Evaluation never continues past this call.
pub(crate) fn exit(interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    if args.len() > 1 {
        return Err(type_error(
            pos,
            format!("exit() requires 0 or 1 args, got {}", args.len()),
        ));
    }
    let code = match args.first() {
        None => 0,
        Some(Value::Int(code)) => *code as i32,
        Some(other) => {
            return Err(type_error(
                pos,
                format!("exit() requires an integer, not {}", other.type_name()),
            ));
        }
    };
    if let Some(hook) = &interp.exit {
        hook(code);
    }
    Err(Unwind::Exit(code))
}

/// `import(filename)`: the function form of `import`. Returns `true` on
/// success; on failure prints a diagnostic line to the configured output
/// and returns `false`.
pub(crate) fn import(interp: &mut Interpreter, pos: Position, args: Vec<Value>) -> Exec<Value> {
    ensure_args(pos, "import", &args, 1)?;
    let Value::Str(filename) = &args[0] else {
        return Err(type_error(pos, "import() requires a string filename"));
    };

    match load_module(filename) {
        Ok((_, program)) => {
            interp.exec_imported_program(&program)?;
            Ok(Value::Bool(true))
        }
        Err(ImportError::NotFound) => {
            interp.output.println(&format!(
                "Error importing file {filename}: file not found in any of the search paths"
            ));
            Ok(Value::Bool(false))
        }
        Err(ImportError::Parse(path, diag)) => {
            interp.output.println(&format!(
                "Error parsing imported file {}: {diag}",
                path.display()
            ));
            Ok(Value::Bool(false))
        }
    }
}
