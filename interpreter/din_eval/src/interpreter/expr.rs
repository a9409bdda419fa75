//! Expression evaluation.

use std::rc::Rc;

use din_ir::{BinaryOp, Block, Expr, Literal, MapItem};

use crate::control::Exec;
use crate::errors::{name_error, type_error};
use crate::iterator::iterate;
use crate::operators::{eval_subscript, evaluate_binary};
use crate::unary_operators::evaluate_unary;
use crate::value::{FunctionValue, ObjectMap, UserFunction, Value};

use super::Interpreter;

impl Interpreter {
    /// Evaluate an expression to a value.
    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> Exec<Value> {
        self.stats.ops += 1;
        match expr {
            Expr::Literal { value, .. } => Ok(literal_value(value)),
            Expr::Variable { pos, name } => self
                .env
                .lookup(name)
                .ok_or_else(|| name_error(*pos, format!("name \"{name}\" not found"))),
            Expr::Binary {
                pos,
                left,
                op,
                right,
            } => {
                // and/or decide here whether the right operand runs at all.
                match op {
                    BinaryOp::And => {
                        let l = self.eval_expr(left)?;
                        if !l.is_truthy() {
                            return Ok(Value::Bool(false));
                        }
                        let r = self.eval_expr(right)?;
                        Ok(Value::Bool(r.is_truthy()))
                    }
                    BinaryOp::Or => {
                        let l = self.eval_expr(left)?;
                        if l.is_truthy() {
                            return Ok(Value::Bool(true));
                        }
                        let r = self.eval_expr(right)?;
                        Ok(Value::Bool(r.is_truthy()))
                    }
                    _ => {
                        let l = self.eval_expr(left)?;
                        let r = self.eval_expr(right)?;
                        evaluate_binary(*pos, *op, &l, &r)
                    }
                }
            }
            Expr::Unary { pos, op, operand } => {
                let v = self.eval_expr(operand)?;
                evaluate_unary(*pos, *op, &v)
            }
            Expr::Ternary {
                condition,
                then_expr,
                else_expr,
                ..
            } => {
                let cond = self.eval_expr(condition)?;
                if cond.is_truthy() {
                    self.eval_expr(then_expr)
                } else {
                    self.eval_expr(else_expr)
                }
            }
            Expr::Call {
                callee,
                args,
                spread_last,
                ..
            } => self.eval_call(callee, args, *spread_last),
            Expr::List { items, .. } => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.eval_expr(item)?);
                }
                Ok(Value::array(values))
            }
            Expr::Map { items, .. } => self.eval_map(items),
            Expr::Subscript {
                container, index, ..
            } => {
                let container_val = self.eval_expr(container)?;
                let index_val = self.eval_expr(index)?;
                eval_subscript(index.pos(), &container_val, &index_val)
            }
            Expr::Function {
                params,
                variadic,
                body,
                ..
            } => Ok(self.make_function(String::new(), params.clone(), *variadic, body)),
        }
    }

    /// Build a function value capturing the current top frame.
    pub(crate) fn make_function(
        &self,
        name: String,
        params: Vec<String>,
        variadic: bool,
        body: &Block,
    ) -> Value {
        Value::Function(FunctionValue::User(Rc::new(UserFunction {
            name,
            params,
            variadic,
            body: body.clone(),
            closure: self.env.top(),
        })))
    }

    fn eval_call(&mut self, callee: &Expr, args: &[Expr], spread_last: bool) -> Exec<Value> {
        let function = self.eval_expr(callee)?;
        let Value::Function(function) = function else {
            return Err(type_error(
                callee.pos(),
                format!("can't call non-function type {}", function.type_name()),
            ));
        };

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_expr(arg)?);
        }
        if spread_last {
            // The parser guarantees a spread call has at least one
            // argument.
            let spread = values.pop().expect("spread call has a final argument");
            let spread_pos = args.last().map(Expr::pos).unwrap_or(callee.pos());
            values.extend(iterate(spread_pos, &spread)?);
        }

        self.call_function(callee.pos(), &function, values)
    }

    fn eval_map(&mut self, items: &[MapItem]) -> Exec<Value> {
        let mut map = ObjectMap::default();
        for item in items {
            let key = self.eval_expr(&item.key)?;
            let Value::Str(key) = key else {
                return Err(type_error(
                    item.key.pos(),
                    format!("object key must be string, not {}", key.type_name()),
                ));
            };
            let value = self.eval_expr(&item.value)?;
            map.insert(key.to_string(), value);
        }
        Ok(Value::object(map))
    }
}

/// Convert a literal AST node to its runtime value.
fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Null => Value::Null,
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Int(n) => Value::Int(*n),
        Literal::Float(f) => Value::Float(*f),
        Literal::Str(s) => Value::string(s),
    }
}
