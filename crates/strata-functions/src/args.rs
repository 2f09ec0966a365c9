//! Argument expressions and typed resolution.
//!
//! Named arguments in a function call are JSON values that mean one of three
//! things: an object carrying a `call` key is a nested invocation, an object
//! carrying a `path` key is a reference into the data store, and anything
//! else is a literal. Resolution narrows to the requested type; a failed
//! narrowing makes the argument absent.

use serde_json::{Map, Value};
use strata_state::DataContext;

/// A decoded argument expression.
#[derive(Clone, Debug, PartialEq)]
pub enum ArgExpr {
    /// Nested function invocation: `{"call": name, "args": {...}}`.
    Call {
        /// Function name.
        name: String,
        /// Call arguments (empty map when omitted).
        args: Map<String, Value>,
    },
    /// Data-store reference: `{"path": "..."}`.
    PathRef(String),
    /// A plain literal.
    Literal(Value),
}

impl ArgExpr {
    /// Decode a JSON value into an argument expression.
    pub fn from_value(value: &Value) -> Self {
        if let Value::Object(obj) = value {
            if let Some(name) = obj.get("call").and_then(Value::as_str) {
                let args = obj
                    .get("args")
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default();
                return ArgExpr::Call {
                    name: name.to_owned(),
                    args,
                };
            }
            if let Some(path) = obj.get("path").and_then(Value::as_str) {
                return ArgExpr::PathRef(path.to_owned());
            }
        }
        ArgExpr::Literal(value.clone())
    }

    /// Resolve this expression to a string.
    ///
    /// Path references try string, then number rendered as string, then
    /// boolean rendered as string; first success wins.
    pub fn resolve_string(&self, ctx: &DataContext) -> Option<String> {
        match self {
            ArgExpr::PathRef(path) => ctx
                .get_string(path)
                .or_else(|| ctx.get_number(path).map(|n| n.to_string()))
                .or_else(|| ctx.get_bool(path).map(|b| b.to_string())),
            ArgExpr::Literal(value) => value.as_str().map(str::to_owned),
            ArgExpr::Call { .. } => None,
        }
    }

    /// Resolve this expression to a number.
    pub fn resolve_number(&self, ctx: &DataContext) -> Option<f64> {
        match self {
            ArgExpr::PathRef(path) => ctx.get_number(path),
            ArgExpr::Literal(value) => value.as_f64(),
            ArgExpr::Call { .. } => None,
        }
    }

    /// Resolve this expression to a boolean.
    pub fn resolve_bool(&self, ctx: &DataContext) -> Option<bool> {
        match self {
            ArgExpr::PathRef(path) => ctx.get_bool(path),
            ArgExpr::Literal(value) => value.as_bool(),
            ArgExpr::Call { .. } => None,
        }
    }
}

/// View over a call's named arguments with typed resolution.
#[derive(Clone, Copy, Debug)]
pub struct Args<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Args<'a> {
    /// Wrap an argument map.
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }

    /// Get the raw JSON value of a named argument.
    pub fn raw(&self, name: &str) -> Option<&'a Value> {
        self.map.get(name)
    }

    /// Get the decoded expression of a named argument.
    pub fn expr(&self, name: &str) -> Option<ArgExpr> {
        self.map.get(name).map(ArgExpr::from_value)
    }

    /// Resolve a named argument to a string.
    pub fn string(&self, name: &str, ctx: &DataContext) -> Option<String> {
        self.expr(name)?.resolve_string(ctx)
    }

    /// Resolve a named argument to a number.
    pub fn number(&self, name: &str, ctx: &DataContext) -> Option<f64> {
        self.expr(name)?.resolve_number(ctx)
    }

    /// Resolve a named argument to a boolean.
    pub fn boolean(&self, name: &str, ctx: &DataContext) -> Option<bool> {
        self.expr(name)?.resolve_bool(ctx)
    }
}
