//! Iteration over values, for `for` loops and spread arguments.
//!
//! Iteration takes a snapshot when the loop starts: mutating the
//! underlying array or object during iteration does not change the
//! sequence of values already produced. Object keys iterate in sorted
//! order, matching the canonical display order.

use din_ir::Position;

use crate::control::Exec;
use crate::errors::type_error;
use crate::value::Value;

/// The sequence of values `for (x in value)` walks.
///
/// Strings yield one single-character string per Unicode scalar; arrays
/// yield their elements in order; objects yield their keys sorted.
pub fn iterate(pos: Position, value: &Value) -> Exec<Vec<Value>> {
    match value {
        Value::Str(s) => Ok(s.chars().map(|c| Value::string(c.to_string())).collect()),
        Value::Array(items) => Ok(items.borrow().clone()),
        Value::Object(map) => {
            let mut keys: Vec<String> = map.borrow().keys().cloned().collect();
            keys.sort();
            Ok(keys.into_iter().map(Value::string).collect())
        }
        other => Err(type_error(
            pos,
            format!(
                "expected iterable (string, array, or object), got {}",
                other.type_name()
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ObjectMap;

    fn pos() -> Position {
        Position::new(1, 1)
    }

    #[test]
    fn strings_iterate_by_scalar() {
        let seq = iterate(pos(), &Value::string("héy")).unwrap();
        let rendered: Vec<String> = seq.iter().map(|v| v.display(false)).collect();
        assert_eq!(rendered, vec!["h", "é", "y"]);
    }

    #[test]
    fn arrays_iterate_in_order() {
        let arr = Value::array(vec![Value::Int(1), Value::Int(2)]);
        let seq = iterate(pos(), &arr).unwrap();
        assert_eq!(seq.len(), 2);
        assert!(matches!(seq[0], Value::Int(1)));
    }

    #[test]
    fn array_iteration_is_a_snapshot() {
        let arr = Value::array(vec![Value::Int(1)]);
        let seq = iterate(pos(), &arr).unwrap();
        if let Value::Array(items) = &arr {
            items.borrow_mut().push(Value::Int(2));
        }
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn objects_iterate_keys_sorted() {
        let mut map = ObjectMap::default();
        map.insert("b".into(), Value::Int(2));
        map.insert("a".into(), Value::Int(1));
        map.insert("c".into(), Value::Int(3));
        let seq = iterate(pos(), &Value::object(map)).unwrap();
        let keys: Vec<String> = seq.iter().map(|v| v.display(false)).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn non_iterables_are_type_errors() {
        let err = iterate(pos(), &Value::Int(3)).unwrap_err();
        let crate::Unwind::Failure(diag) = err else {
            panic!("expected failure");
        };
        assert!(diag
            .to_string()
            .contains("expected iterable (string, array, or object), got integer"));
    }
}
