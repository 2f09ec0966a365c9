//! Declarative function evaluation for data-bound UI expressions.
//!
//! `strata-functions` resolves named functions — validation, logic, and
//! formatting — whose arguments may be literals, `{"path": "..."}` references
//! into a [`strata_state::DataStore`], or nested `{"call": ..., "args": ...}`
//! invocations for boolean composition.
//!
//! The evaluator is stateless and total: type mismatches and malformed
//! patterns degrade to documented falsy/empty defaults, unknown names yield
//! no result, and nothing here ever raises an error.
//!
//! ```
//! use serde_json::{json, Value};
//! use std::sync::Arc;
//! use strata_functions::evaluate;
//! use strata_state::DataStore;
//!
//! let store = Arc::new(DataStore::new());
//! store.update("/cart", json!({"total": 19.999, "count": 0}));
//! let ctx = store.context();
//!
//! let args = json!({"value": {"path": "/cart/total"}, "currency": "EUR"});
//! let price = evaluate("formatCurrency", args.as_object().unwrap(), &ctx);
//! assert_eq!(price, Some(Value::String("€20.00".into())));
//! ```

mod args;
mod eval;
mod format;
mod logic;
mod validate;

pub use args::{ArgExpr, Args};
pub use eval::{evaluate, Action, OPEN_URL};
