//! Boolean-composing logic functions.
//!
//! `and`/`or` fold over a `conditions` array; `not` negates a single
//! `condition`. Each operand is either a literal boolean or a nested
//! function call; any other operand evaluates to `false`.

use crate::{evaluate, ArgExpr, Args};
use serde_json::Value;
use strata_state::DataContext;

/// `and`: every operand in `conditions` holds.
pub fn and(args: Args<'_>, ctx: &DataContext) -> bool {
    let Some(conditions) = args.raw("conditions").and_then(Value::as_array) else {
        return false;
    };
    conditions.iter().all(|cond| eval_condition(cond, ctx))
}

/// `or`: at least one operand in `conditions` holds.
pub fn or(args: Args<'_>, ctx: &DataContext) -> bool {
    let Some(conditions) = args.raw("conditions").and_then(Value::as_array) else {
        return false;
    };
    conditions.iter().any(|cond| eval_condition(cond, ctx))
}

/// `not`: negation of the single `condition` operand.
pub fn not(args: Args<'_>, ctx: &DataContext) -> bool {
    match args.raw("condition") {
        Some(condition) => !eval_condition(condition, ctx),
        None => false,
    }
}

fn eval_condition(operand: &Value, ctx: &DataContext) -> bool {
    match ArgExpr::from_value(operand) {
        ArgExpr::Literal(Value::Bool(b)) => b,
        ArgExpr::Call { name, args } => evaluate(&name, &args, ctx)
            .and_then(|v| v.as_bool())
            .unwrap_or(false),
        _ => false,
    }
}
