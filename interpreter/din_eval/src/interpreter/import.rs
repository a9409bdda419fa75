//! Module loading for the `import` statement and built-in.
//!
//! Both forms share one resolution routine: the `.din` suffix is appended
//! when absent, then candidate paths are tried in order — the path as
//! given, the current directory (for relative paths), `examples/`, and
//! `../examples/`. The first readable file wins.
//!
//! An imported file's top-level statements execute in the **current**
//! environment, except that top-level `fun main` definitions are skipped
//! so a library's demonstration `main` never competes with the importing
//! program's.

use std::path::PathBuf;

use din_diagnostic::Diagnostic;
use din_ir::{Position, Program, Stmt};
use tracing::debug;

use crate::control::Exec;
use crate::errors::runtime_error;

use super::Interpreter;

/// Why a module could not be loaded.
pub(crate) enum ImportError {
    /// No candidate path could be read.
    NotFound,
    /// A candidate was read but did not parse.
    Parse(PathBuf, Diagnostic),
}

/// Candidate paths for `filename`, in resolution order.
fn candidate_paths(filename: &str) -> Vec<PathBuf> {
    let filename = if filename.ends_with(".din") {
        filename.to_string()
    } else {
        format!("{filename}.din")
    };

    let mut candidates = vec![PathBuf::from(&filename)];
    let path = PathBuf::from(&filename);
    if path.is_relative() {
        if let Ok(cwd) = std::env::current_dir() {
            candidates.push(cwd.join(&filename));
        }
    }
    candidates.push(PathBuf::from("examples").join(&filename));
    candidates.push(PathBuf::from("..").join("examples").join(&filename));
    candidates
}

/// Resolve, read, and parse a module.
pub(crate) fn load_module(filename: &str) -> Result<(PathBuf, Program), ImportError> {
    for path in candidate_paths(filename) {
        let Ok(contents) = std::fs::read(&path) else {
            continue;
        };
        debug!(path = %path.display(), "loading module");
        return match din_parse::parse_program(&contents) {
            Ok(program) => Ok((path, program)),
            Err(diag) => Err(ImportError::Parse(path, diag)),
        };
    }
    Err(ImportError::NotFound)
}

impl Interpreter {
    /// Execute an imported program's top-level statements in the current
    /// environment, skipping top-level `main` definitions.
    pub(crate) fn exec_imported_program(&mut self, program: &Program) -> Exec<()> {
        for stmt in &program.statements {
            if matches!(stmt, Stmt::FunctionDef { name, .. } if name == "main") {
                continue;
            }
            self.exec_stmt(stmt)?;
        }
        Ok(())
    }

    /// The `import "file"` statement: failure to resolve or parse is a
    /// runtime error naming the file.
    pub(crate) fn exec_import_statement(&mut self, pos: Position, filename: &str) -> Exec<()> {
        match load_module(filename) {
            Ok((_, program)) => self.exec_imported_program(&program),
            Err(ImportError::NotFound) => Err(runtime_error(
                pos,
                format!("failed to import file '{filename}': file not found"),
            )),
            Err(ImportError::Parse(path, diag)) => Err(runtime_error(
                pos,
                format!(
                    "failed to parse imported file '{}': {diag}",
                    path.display()
                ),
            )),
        }
    }
}
