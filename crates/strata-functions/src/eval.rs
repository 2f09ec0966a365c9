//! Function dispatch.
//!
//! `evaluate` maps a `(name, args, context)` triple to a JSON result.
//! Validation and logic functions yield booleans, formatting functions yield
//! strings, `openUrl` is an action (no result), and unknown names resolve to
//! no result with a log line, never an error.

use crate::{format, logic, validate, Args};
use serde_json::{Map, Value};
use strata_state::DataContext;
use tracing::debug;

/// Name of the `openUrl` action.
pub const OPEN_URL: &str = "openUrl";

/// Evaluate a named function against a data context.
///
/// Returns `None` for `openUrl` (an action identifier, not a value — see
/// [`Action::from_call`]) and for unknown function names.
///
/// # Examples
///
/// ```
/// use serde_json::{json, Value};
/// use std::sync::Arc;
/// use strata_functions::evaluate;
/// use strata_state::DataStore;
///
/// let store = Arc::new(DataStore::new());
/// store.update("/email", json!("ada@example.com"));
///
/// let args = json!({"value": {"path": "/email"}});
/// let result = evaluate("email", args.as_object().unwrap(), &store.context());
/// assert_eq!(result, Some(Value::Bool(true)));
/// ```
pub fn evaluate(name: &str, args: &Map<String, Value>, ctx: &DataContext) -> Option<Value> {
    let args = Args::new(args);
    match name {
        "required" => Some(Value::Bool(validate::required(args, ctx))),
        "regex" => Some(Value::Bool(validate::regex(args, ctx))),
        "length" => Some(Value::Bool(validate::length(args, ctx))),
        "numeric" => Some(Value::Bool(validate::numeric(args, ctx))),
        "email" => Some(Value::Bool(validate::email(args, ctx))),
        "and" => Some(Value::Bool(logic::and(args, ctx))),
        "or" => Some(Value::Bool(logic::or(args, ctx))),
        "not" => Some(Value::Bool(logic::not(args, ctx))),
        "formatString" => Some(Value::String(format::format_string(args, ctx))),
        "formatNumber" => Some(Value::String(format::format_number(args, ctx))),
        "formatCurrency" => Some(Value::String(format::format_currency(args, ctx))),
        "formatDate" => Some(Value::String(format::format_date(args, ctx))),
        "pluralize" => Some(Value::String(format::pluralize(args, ctx))),
        OPEN_URL => None,
        other => {
            debug!(function = other, "unknown function name, no result");
            None
        }
    }
}

/// A side-effecting instruction surfaced by the evaluator's callers.
///
/// Actions carry no value: `evaluate` yields `None` for them, and hosts that
/// encounter one dispatch the side effect instead of binding data.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Open an external URL.
    OpenUrl {
        /// Resolved target URL, when present.
        url: Option<String>,
    },
}

impl Action {
    /// Decode an action from a function call, resolving its arguments.
    ///
    /// Returns `None` when the name is not an action identifier.
    pub fn from_call(name: &str, args: &Map<String, Value>, ctx: &DataContext) -> Option<Action> {
        match name {
            OPEN_URL => Some(Action::OpenUrl {
                url: Args::new(args).string("url", ctx),
            }),
            _ => None,
        }
    }

    /// Check whether a function name identifies an action.
    pub fn is_action(name: &str) -> bool {
        name == OPEN_URL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use strata_state::DataStore;

    fn ctx() -> DataContext {
        let store = Arc::new(DataStore::new());
        store.update("/url", json!("https://example.com"));
        store.context()
    }

    #[test]
    fn test_unknown_function_no_result() {
        let ctx = ctx();
        let args = json!({}).as_object().cloned().unwrap();
        assert_eq!(evaluate("frobnicate", &args, &ctx), None);
    }

    #[test]
    fn test_open_url_yields_no_value() {
        let ctx = ctx();
        let args = json!({"url": {"path": "/url"}}).as_object().cloned().unwrap();
        assert_eq!(evaluate(OPEN_URL, &args, &ctx), None);
    }

    #[test]
    fn test_open_url_action_decodes() {
        let ctx = ctx();
        let args = json!({"url": {"path": "/url"}}).as_object().cloned().unwrap();
        let action = Action::from_call(OPEN_URL, &args, &ctx);
        assert_eq!(
            action,
            Some(Action::OpenUrl {
                url: Some("https://example.com".into())
            })
        );
    }

    #[test]
    fn test_non_action_name() {
        let ctx = ctx();
        let args = json!({}).as_object().cloned().unwrap();
        assert_eq!(Action::from_call("required", &args, &ctx), None);
        assert!(Action::is_action(OPEN_URL));
        assert!(!Action::is_action("formatDate"));
    }
}
