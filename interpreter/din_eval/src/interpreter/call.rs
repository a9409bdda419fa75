//! Function calls and parameter binding.

use din_ir::Position;

use crate::control::{Exec, Unwind};
use crate::errors::type_error;
use crate::stack::ensure_sufficient_stack;
use crate::value::{FunctionValue, Value};

use super::Interpreter;

impl Interpreter {
    /// Call a function value with already-evaluated arguments.
    ///
    /// User calls push the callee's captured closure frame, then a fresh
    /// parameter frame; both are popped on every exit path. A `Return`
    /// unwinding out of the body becomes the call's result; a body that
    /// falls off the end yields `null`.
    pub(crate) fn call_function(
        &mut self,
        pos: Position,
        function: &FunctionValue,
        args: Vec<Value>,
    ) -> Exec<Value> {
        match function {
            FunctionValue::Builtin { func, .. } => {
                self.stats.builtin_calls += 1;
                func(self, pos, args)
            }
            FunctionValue::User(f) => {
                let mut args = args;
                if f.variadic && args.len() + 1 >= f.params.len() {
                    let extras = args.split_off(f.params.len() - 1);
                    args.push(Value::array(extras));
                }
                if args.len() != f.params.len() {
                    let required = f.params.len();
                    let plural = if required == 1 { "" } else { "s" };
                    return Err(type_error(
                        pos,
                        format!(
                            "{}() requires {} arg{}, got {}",
                            f.name,
                            required,
                            plural,
                            args.len()
                        ),
                    ));
                }

                self.env.push_frame(f.closure.clone());
                self.env.push();
                for (param, arg) in f.params.iter().zip(args) {
                    self.env.define(param.clone(), arg);
                }
                self.stats.user_calls += 1;

                let result = ensure_sufficient_stack(|| self.exec_block(&f.body));

                self.env.pop();
                self.env.pop();

                match result {
                    Ok(()) => Ok(Value::Null),
                    Err(Unwind::Return(value, _)) => Ok(value),
                    Err(other) => Err(other),
                }
            }
        }
    }
}
