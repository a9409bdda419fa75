//! The scope stack.
//!
//! An [`Environment`] is a stack of [`Frame`]s, each a name-to-value map
//! behind a [`Shared`] cell. The bottom frame is global; lookup walks from
//! the top down. Frames are shared so that a closure can capture the frame
//! it was created in and keep it alive — and keep seeing (and making)
//! mutations — after the creating call has returned.
//!
//! Assignment updates the nearest enclosing binding and only creates a new
//! binding in the top frame when the name is unbound everywhere. That is
//! what makes `count = count + 1` inside a closure mutate the captured
//! `count` rather than shadow it; `define` exists for the cases that must
//! bind locally regardless (parameters, the catch variable, function
//! definitions).

use rustc_hash::FxHashMap;

use crate::shared::Shared;
use crate::value::Value;

/// One level of the scope stack.
pub type Frame = FxHashMap<String, Value>;

/// A stack of scope frames, global frame at the bottom.
pub struct Environment {
    frames: Vec<Shared<Frame>>,
}

impl Environment {
    /// Create an environment holding only an empty global frame.
    pub fn new() -> Self {
        Environment {
            frames: vec![Shared::default()],
        }
    }

    /// Number of frames currently on the stack.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Push a fresh empty frame.
    #[inline]
    pub fn push(&mut self) {
        self.frames.push(Shared::default());
    }

    /// Push an existing frame (a closure's captured frame).
    #[inline]
    pub fn push_frame(&mut self, frame: Shared<Frame>) {
        self.frames.push(frame);
    }

    /// Pop the top frame. The global frame is never popped.
    #[inline]
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// The frame currently on top of the stack (the global frame when no
    /// other frame has been pushed). Used for closure capture.
    #[inline]
    pub fn top(&self) -> Shared<Frame> {
        self.frames
            .last()
            .expect("environment always has a global frame")
            .clone()
    }

    /// Bind `name` in the top frame unconditionally, shadowing any outer
    /// binding of the same name.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        if let Some(frame) = self.frames.last() {
            frame.borrow_mut().insert(name.into(), value);
        }
    }

    /// Bind `name` in the global frame.
    pub fn assign_outer(&mut self, name: impl Into<String>, value: Value) {
        self.frames[0].borrow_mut().insert(name.into(), value);
    }

    /// Assign to `name`: update the nearest enclosing binding, or create
    /// one in the top frame if the name is unbound.
    pub fn assign(&mut self, name: &str, value: Value) {
        for frame in self.frames.iter().rev() {
            let mut map = frame.borrow_mut();
            if let Some(slot) = map.get_mut(name) {
                *slot = value;
                return;
            }
        }
        self.define(name, value);
    }

    /// Resolve `name`, scanning from the top frame down.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        for frame in self.frames.iter().rev() {
            if let Some(value) = frame.borrow().get(name) {
                return Some(value.clone());
            }
        }
        None
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_then_lookup() {
        let mut env = Environment::new();
        env.define("x", Value::Int(42));
        assert!(matches!(env.lookup("x"), Some(Value::Int(42))));
        assert!(env.lookup("y").is_none());
    }

    #[test]
    fn lookup_walks_from_top_to_bottom() {
        let mut env = Environment::new();
        env.define("x", Value::Int(1));
        env.push();
        env.define("x", Value::Int(2));
        assert!(matches!(env.lookup("x"), Some(Value::Int(2))));
        env.pop();
        assert!(matches!(env.lookup("x"), Some(Value::Int(1))));
    }

    #[test]
    fn assign_updates_the_nearest_enclosing_binding() {
        let mut env = Environment::new();
        env.define("x", Value::Int(1));
        env.push();
        env.assign("x", Value::Int(5));
        env.pop();
        assert!(matches!(env.lookup("x"), Some(Value::Int(5))));
    }

    #[test]
    fn assign_creates_in_top_frame_when_unbound() {
        let mut env = Environment::new();
        env.push();
        env.assign("fresh", Value::Int(1));
        assert!(matches!(env.lookup("fresh"), Some(Value::Int(1))));
        env.pop();
        // Created in the popped frame, not the global one.
        assert!(env.lookup("fresh").is_none());
    }

    #[test]
    fn define_shadows_instead_of_updating() {
        let mut env = Environment::new();
        env.define("x", Value::Int(1));
        env.push();
        env.define("x", Value::Int(2));
        env.pop();
        assert!(matches!(env.lookup("x"), Some(Value::Int(1))));
    }

    #[test]
    fn assign_outer_writes_the_global_frame() {
        let mut env = Environment::new();
        env.push();
        env.assign_outer("g", Value::Int(9));
        env.pop();
        assert!(matches!(env.lookup("g"), Some(Value::Int(9))));
    }

    #[test]
    fn global_frame_survives_excess_pops() {
        let mut env = Environment::new();
        env.define("x", Value::Int(1));
        env.pop();
        env.pop();
        assert_eq!(env.depth(), 1);
        assert!(matches!(env.lookup("x"), Some(Value::Int(1))));
    }

    #[test]
    fn captured_frame_sees_later_mutations() {
        let mut env = Environment::new();
        env.push();
        env.define("count", Value::Int(0));
        let captured = env.top();
        env.assign("count", Value::Int(7));
        env.pop();
        assert!(matches!(
            captured.borrow().get("count"),
            Some(Value::Int(7))
        ));
    }

    #[test]
    fn pushed_closure_frame_is_visible_and_writable() {
        let mut env = Environment::new();
        let closure = Shared::new(Frame::default());
        closure.borrow_mut().insert("n".to_string(), Value::Int(1));

        env.push_frame(closure.clone());
        env.push();
        assert!(matches!(env.lookup("n"), Some(Value::Int(1))));
        env.assign("n", Value::Int(2));
        env.pop();
        env.pop();

        assert!(matches!(closure.borrow().get("n"), Some(Value::Int(2))));
    }
}
