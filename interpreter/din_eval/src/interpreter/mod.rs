//! The tree-walking interpreter.
//!
//! Statement execution lives here; expression evaluation in `expr`,
//! function calls in `call`, module imports in `import`. The interpreter
//! owns the scope stack, the I/O handles from [`Config`], the RNG, and
//! the execution counters.
//!
//! # Scope discipline
//!
//! Plain blocks and loop iterations do not push frames — a loop body's
//! `i = i + 1` writes the same `i` the condition reads. Frames are pushed
//! for user-function calls (the callee's closure frame, then a fresh
//! parameter frame) and for `try`/`catch` (a fresh frame for each block).
//! Every push is paired with a pop on all exit paths, including unwinds.

mod call;
mod expr;
pub(crate) mod import;

use din_ir::{Block, Expr, Position, Program, Stmt};

use crate::builtins;
use crate::config::{Config, ExitHook, Stats};
use crate::control::{Exec, Unwind};
use crate::environment::Environment;
use crate::errors::type_error;
use crate::input::InputHandler;
use crate::iterator::iterate;
use crate::operators::assign_subscript;
use crate::print_handler::SharedPrintHandler;
use crate::rng::EvalRng;
use crate::value::{FunctionValue, Value};

/// Mathematical constants seeded into the global frame.
const CONSTANTS: &[(&str, f64)] = &[
    ("PI", std::f64::consts::PI),
    ("E", std::f64::consts::E),
    ("TAU", std::f64::consts::TAU),
    ("PHI", 1.618_033_988_749_895),
    ("LN2", std::f64::consts::LN_2),
    ("LN10", std::f64::consts::LN_10),
    ("SQRT2", std::f64::consts::SQRT_2),
    ("SQRT3", 1.732_050_807_568_877_2),
];

/// Interpreter state for one program execution.
pub struct Interpreter {
    pub(crate) env: Environment,
    pub(crate) args: Vec<String>,
    pub(crate) input: InputHandler,
    pub(crate) output: SharedPrintHandler,
    pub(crate) exit: Option<ExitHook>,
    pub(crate) rng: EvalRng,
    pub(crate) stats: Stats,
    is_unit_test: bool,
}

impl Interpreter {
    /// Create an interpreter with the built-ins, the mathematical
    /// constants, and the configuration's pre-seeded variables bound in
    /// the global frame.
    pub fn new(config: Config) -> Self {
        let mut env = Environment::new();
        builtins::install(&mut env);
        for &(name, value) in CONSTANTS {
            env.assign_outer(name, Value::Float(value));
        }
        for (name, value) in config.vars {
            env.assign_outer(name, value);
        }
        Interpreter {
            env,
            args: config.args,
            input: config.input,
            output: config.output,
            exit: config.exit,
            rng: EvalRng::from_entropy(),
            stats: Stats::default(),
            is_unit_test: config.is_unit_test,
        }
    }

    /// Execution statistics so far.
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Execute a program's top-level statements, then invoke a
    /// zero-argument `main` if one was defined (suppressed in unit-test
    /// mode).
    pub fn execute(&mut self, program: &Program) -> Exec<()> {
        for stmt in &program.statements {
            self.exec_stmt(stmt)?;
        }

        if self.is_unit_test {
            return Ok(());
        }
        if let Some(Value::Function(main)) = self.env.lookup("main") {
            if matches!(main, FunctionValue::User(_)) {
                self.call_function(Position::DUMMY, &main, Vec::new())?;
            }
        }
        Ok(())
    }

    /// Execute the statements of a block in order.
    pub(crate) fn exec_block(&mut self, block: &Block) -> Exec<()> {
        for stmt in block {
            self.exec_stmt(stmt)?;
        }
        Ok(())
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> Exec<()> {
        self.stats.ops += 1;
        match stmt {
            Stmt::Expression { expr, .. } => {
                self.eval_expr(expr)?;
                Ok(())
            }
            Stmt::Assign { target, value, .. } => self.exec_assign(target, value),
            Stmt::If {
                condition,
                body,
                else_body,
                ..
            } => {
                let cond = self.eval_expr(condition)?;
                match cond {
                    Value::Bool(true) => self.exec_block(body),
                    Value::Bool(false) => self.exec_block(else_body),
                    other => Err(type_error(
                        condition.pos(),
                        format!("if condition must be bool, got {}", other.type_name()),
                    )),
                }
            }
            Stmt::While {
                condition, body, ..
            } => self.exec_while(condition, body),
            Stmt::For {
                name,
                iterable,
                body,
                ..
            } => self.exec_for(name, iterable, body),
            Stmt::FunctionDef {
                name,
                params,
                variadic,
                body,
                ..
            } => {
                let function = self.make_function(name.clone(), params.clone(), *variadic, body);
                self.env.define(name.clone(), function);
                Ok(())
            }
            Stmt::Return { pos, value } => {
                let result = self.eval_expr(value)?;
                Err(Unwind::Return(result, *pos))
            }
            Stmt::Break { pos } => Err(Unwind::Break(*pos)),
            Stmt::Continue { pos } => Err(Unwind::Continue(*pos)),
            Stmt::TryCatch {
                try_block,
                err_name,
                catch_block,
                ..
            } => self.exec_try_catch(try_block, err_name, catch_block),
            Stmt::Import { pos, filename } => self.exec_import_statement(*pos, filename),
        }
    }

    fn exec_assign(&mut self, target: &Expr, value: &Expr) -> Exec<()> {
        match target {
            Expr::Variable { name, .. } => {
                let value = self.eval_expr(value)?;
                self.env.assign(name, value);
                Ok(())
            }
            Expr::Subscript {
                container, index, ..
            } => {
                let container_val = self.eval_expr(container)?;
                let index_val = self.eval_expr(index)?;
                let value = self.eval_expr(value)?;
                assign_subscript(index.pos(), &container_val, &index_val, value)
            }
            // The parser only builds variable or subscript targets.
            _ => Err(type_error(
                target.pos(),
                "can only assign to variable or subscript",
            )),
        }
    }

    fn exec_while(&mut self, condition: &Expr, body: &Block) -> Exec<()> {
        loop {
            let cond = self.eval_expr(condition)?;
            match cond {
                Value::Bool(true) => {}
                Value::Bool(false) => return Ok(()),
                other => {
                    return Err(type_error(
                        condition.pos(),
                        format!("while condition must be bool, got {}", other.type_name()),
                    ));
                }
            }
            match self.exec_block(body) {
                Ok(()) => {}
                Err(Unwind::Break(_)) => return Ok(()),
                Err(Unwind::Continue(_)) => {}
                Err(other) => return Err(other),
            }
        }
    }

    fn exec_for(&mut self, name: &str, iterable: &Expr, body: &Block) -> Exec<()> {
        let value = self.eval_expr(iterable)?;
        let items = iterate(iterable.pos(), &value)?;
        for item in items {
            self.env.assign(name, item);
            match self.exec_block(body) {
                Ok(()) => {}
                Err(Unwind::Break(_)) => return Ok(()),
                Err(Unwind::Continue(_)) => {}
                Err(other) => return Err(other),
            }
        }
        Ok(())
    }

    /// `try` recovers from `Failure` only: `break`, `continue`, `return`,
    /// and `exit` propagate through it. The catch variable is bound to
    /// the failure's rendered message in a fresh frame.
    fn exec_try_catch(
        &mut self,
        try_block: &Block,
        err_name: &str,
        catch_block: &Block,
    ) -> Exec<()> {
        self.env.push();
        let result = self.exec_block(try_block);
        self.env.pop();

        match result {
            Ok(()) => Ok(()),
            Err(Unwind::Failure(diag)) => {
                self.env.push();
                self.env.define(err_name, Value::string(diag.to_string()));
                let result = self.exec_block(catch_block);
                self.env.pop();
                result
            }
            Err(other) => Err(other),
        }
    }
}
