//! Diagnostic categories and the positioned diagnostic value.

use std::fmt;

use din_ir::Position;

/// The closed set of diagnostic categories.
///
/// The first four are runtime categories that `try`/`catch` can observe;
/// `Parse` is raised only by the parser and is never catchable by user
/// code.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Category {
    /// Invalid types or wrong argument counts.
    Type,
    /// Type-correct but contextually invalid values (index out of range,
    /// division by zero, domain errors).
    Value,
    /// A variable or function name that is not bound.
    Name,
    /// Everything else: import failures, control flow escaping its scope.
    Runtime,
    /// A syntax error. Terminates execution before evaluation starts.
    Parse,
}

impl Category {
    /// Lowercase label used in rendered messages.
    pub fn label(self) -> &'static str {
        match self {
            Category::Type => "type error",
            Category::Value => "value error",
            Category::Name => "name error",
            Category::Runtime => "runtime error",
            Category::Parse => "parse error",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A positioned diagnostic.
///
/// Renders as `"<category> at <line>:<column>: <message>"`. That exact text
/// is what a `catch` variable receives, so changes here are
/// behavior-visible.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Diagnostic {
    pub category: Category,
    pub pos: Position,
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic.
    pub fn new(category: Category, pos: Position, message: impl Into<String>) -> Self {
        Diagnostic {
            category,
            pos,
            message: message.into(),
        }
    }

    /// Shorthand constructor for [`Category::Type`].
    pub fn type_error(pos: Position, message: impl Into<String>) -> Self {
        Diagnostic::new(Category::Type, pos, message)
    }

    /// Shorthand constructor for [`Category::Value`].
    pub fn value_error(pos: Position, message: impl Into<String>) -> Self {
        Diagnostic::new(Category::Value, pos, message)
    }

    /// Shorthand constructor for [`Category::Name`].
    pub fn name_error(pos: Position, message: impl Into<String>) -> Self {
        Diagnostic::new(Category::Name, pos, message)
    }

    /// Shorthand constructor for [`Category::Runtime`].
    pub fn runtime_error(pos: Position, message: impl Into<String>) -> Self {
        Diagnostic::new(Category::Runtime, pos, message)
    }

    /// Shorthand constructor for [`Category::Parse`].
    pub fn parse_error(pos: Position, message: impl Into<String>) -> Self {
        Diagnostic::new(Category::Parse, pos, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.category, self.pos, self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_category_position_and_message() {
        let diag = Diagnostic::type_error(Position::new(3, 5), "if condition must be bool");
        assert_eq!(
            diag.to_string(),
            "type error at 3:5: if condition must be bool"
        );
    }

    #[test]
    fn all_categories_have_distinct_labels() {
        let labels = [
            Category::Type,
            Category::Value,
            Category::Name,
            Category::Runtime,
            Category::Parse,
        ]
        .map(Category::label);
        for (i, a) in labels.iter().enumerate() {
            for b in &labels[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn parse_error_renders_like_the_parser_reports() {
        let diag = Diagnostic::parse_error(Position::new(1, 9), "expected ( and not =");
        assert_eq!(diag.to_string(), "parse error at 1:9: expected ( and not =");
    }
}
