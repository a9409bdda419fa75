//! Runtime values.
//!
//! A [`Value`] is one of eight dynamic types. Scalars (`Null`, `Bool`,
//! `Int`, `Float`, `Str`) are value-semantic; arrays and objects live in
//! [`Shared`] cells and are reference-semantic, so every binding of the
//! same container sees the same mutations. Functions are either user
//! functions (with a captured closure frame) or built-ins (a native fn
//! pointer).

use std::rc::Rc;

use din_ir::{Block, Position};
use rustc_hash::FxHashMap;

use crate::control::Exec;
use crate::environment::Frame;
use crate::interpreter::Interpreter;
use crate::shared::Shared;

/// String-keyed object storage.
///
/// Plain hash map; canonical display and iteration sort the keys, so the
/// storage order is never observable.
pub type ObjectMap = FxHashMap<String, Value>;

/// Native implementation signature for built-in functions.
pub type BuiltinImpl = fn(&mut Interpreter, Position, Vec<Value>) -> Exec<Value>;

/// A user-defined function: parameters, body, and the captured frame.
#[derive(Clone, Debug)]
pub struct UserFunction {
    /// Function name; empty for anonymous function expressions.
    pub name: String,
    /// Parameter names, duplicates rejected by the parser.
    pub params: Vec<String>,
    /// Whether the last parameter collects extra positional arguments.
    pub variadic: bool,
    /// The function body.
    pub body: Block,
    /// The frame on top of the scope stack when the function was created.
    /// A reference, not a copy: mutations through the closure persist.
    pub closure: Shared<Frame>,
}

/// A callable value.
#[derive(Clone, Debug)]
pub enum FunctionValue {
    /// A user-defined function (named or anonymous).
    User(Rc<UserFunction>),
    /// A built-in function.
    Builtin {
        name: &'static str,
        func: BuiltinImpl,
    },
}

impl FunctionValue {
    /// Display name: `<fun name>` / `<fun>` for user functions,
    /// `<builtin name>` for built-ins.
    pub fn display_name(&self) -> String {
        match self {
            FunctionValue::User(f) if f.name.is_empty() => "<fun>".to_string(),
            FunctionValue::User(f) => format!("<fun {}>", f.name),
            FunctionValue::Builtin { name, .. } => format!("<builtin {name}>"),
        }
    }

    /// Identity comparison: user functions by allocation, built-ins by
    /// implementation pointer.
    pub fn same_identity(&self, other: &FunctionValue) -> bool {
        match (self, other) {
            (FunctionValue::User(a), FunctionValue::User(b)) => Rc::ptr_eq(a, b),
            (
                FunctionValue::Builtin { func: a, .. },
                FunctionValue::Builtin { func: b, .. },
            ) => *a as usize == *b as usize,
            _ => false,
        }
    }
}

/// A runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Array(Shared<Vec<Value>>),
    Object(Shared<ObjectMap>),
    Function(FunctionValue),
}

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::Str(Rc::from(s.as_ref()))
    }

    /// Create an array value.
    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Shared::new(items))
    }

    /// Create an object value.
    #[inline]
    pub fn object(map: ObjectMap) -> Self {
        Value::Object(Shared::new(map))
    }

    /// The value's type name, one of the closed `typeof` set:
    /// `nullable boolean integer float string array object function`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "nullable",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
        }
    }

    /// Truthiness: `null`, `false`, `0`, `0.0`, `""`, `[]`, and `{}` are
    /// falsy; everything else (functions included) is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Array(items) => !items.borrow().is_empty(),
            Value::Object(map) => !map.borrow().is_empty(),
            Value::Function(_) => true,
        }
    }

    /// Whether the value is an int or float.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Numeric value as `f64`, promoting ints.
    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Recursively copy arrays and objects; scalars and functions pass
    /// through (functions keep their identity).
    pub fn deep_copy(&self) -> Value {
        match self {
            Value::Array(items) => {
                let copied: Vec<Value> = items.borrow().iter().map(Value::deep_copy).collect();
                Value::array(copied)
            }
            Value::Object(map) => {
                let copied: ObjectMap = map
                    .borrow()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.deep_copy()))
                    .collect();
                Value::object(copied)
            }
            other => other.clone(),
        }
    }

    /// Canonical display form.
    ///
    /// `quote_strings` selects the nested form: inside arrays and objects,
    /// strings render quoted; at top level (`print`, `str()`) they render
    /// raw. Object entries are sorted by key so the output is stable.
    pub fn display(&self, quote_strings: bool) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(true) => "true".to_string(),
            Value::Bool(false) => "false".to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => format_float(*f),
            Value::Str(s) => {
                if quote_strings {
                    format!("{s:?}")
                } else {
                    s.to_string()
                }
            }
            Value::Array(items) => {
                let parts: Vec<String> =
                    items.borrow().iter().map(|v| v.display(true)).collect();
                format!("[{}]", parts.join(", "))
            }
            Value::Object(map) => {
                let mut parts: Vec<String> = map
                    .borrow()
                    .iter()
                    .map(|(k, v)| format!("{k:?}: {}", v.display(true)))
                    .collect();
                parts.sort();
                format!("{{{}}}", parts.join(", "))
            }
            Value::Function(f) => f.display_name(),
        }
    }
}

/// Float display: shortest round-tripping decimal, `NaN`/`inf` spelled by
/// the platform formatter.
fn format_float(f: f64) -> String {
    f.to_string()
}
