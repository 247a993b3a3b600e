//! Variable store used while rendering.
//!
//! A [`Context`] is a stack of scopes. Lookups walk from the innermost scope
//! outward and then descend into the found value along a dotted path:
//!
//! - Simple keys: `title`
//! - Nested objects: `user.profile.name`
//! - Array indices: `items.0` or `items.0.name`
//!
//! Tags that need private bookkeeping during a render pass do not store it
//! here; the block engine hands them a dedicated per-pass state value instead
//! (see [`crate::tag::Invocation`]).
//!
//! # Example
//!
//! ```rust
//! use easytag::Context;
//! use serde_json::json;
//!
//! let mut ctx = Context::from_value(json!({"user": {"name": "Ada"}})).unwrap();
//! assert_eq!(ctx.get("user.name"), Some(&json!("Ada")));
//!
//! ctx.push();
//! ctx.insert("user", json!({"name": "Grace"}));
//! assert_eq!(ctx.get("user.name"), Some(&json!("Grace")));
//! ctx.pop();
//! assert_eq!(ctx.get("user.name"), Some(&json!("Ada")));
//! ```

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::RenderError;

/// Scoped key-value store for template variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    scopes: Vec<Map<String, Value>>,
}

impl Context {
    /// Creates a context with one empty scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Map::new()],
        }
    }

    /// Creates a context from a JSON object.
    ///
    /// `null` yields an empty context; any other non-object value is an error.
    pub fn from_value(value: Value) -> Result<Self, RenderError> {
        match value {
            Value::Object(map) => Ok(Self { scopes: vec![map] }),
            Value::Null => Ok(Self::new()),
            other => Err(RenderError::Context(format!(
                "expected an object at the context root, got {}",
                kind(&other)
            ))),
        }
    }

    /// Serializes `data` and uses the result as the root scope.
    pub fn from_serialize<T: Serialize + ?Sized>(data: &T) -> Result<Self, RenderError> {
        Self::from_value(serde_json::to_value(data)?)
    }

    /// Pushes a new, empty innermost scope.
    pub fn push(&mut self) {
        self.scopes.push(Map::new());
    }

    /// Pops the innermost scope. The root scope is never removed.
    pub fn pop(&mut self) -> Option<Map<String, Value>> {
        if self.scopes.len() > 1 {
            self.scopes.pop()
        } else {
            None
        }
    }

    /// Sets `key` in the innermost scope.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(key.into(), value.into());
        }
    }

    /// Looks up a dotted path.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };

        let root = self.scopes.iter().rev().find_map(|scope| scope.get(head))?;
        match rest {
            Some(rest) => resolve_path(root, rest),
            None => Some(root),
        }
    }

    /// Looks up a dotted path, returning `null` when it does not resolve.
    pub fn resolve(&self, path: &str) -> Value {
        self.get(path).cloned().unwrap_or(Value::Null)
    }

    /// Number of scopes currently on the stack.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Map<String, Value>> for Context {
    fn from(map: Map<String, Value>) -> Self {
        Self { scopes: vec![map] }
    }
}

/// Descends into `value` along a dotted path.
fn resolve_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;

    for part in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(arr) => {
                let index: usize = part.parse().ok()?;
                arr.get(index)?
            }
            _ => return None,
        };
    }

    Some(current)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
