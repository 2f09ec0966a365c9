//! Validation functions.
//!
//! Every validator resolves to a boolean. Absent, blank, or non-matching
//! input yields `false`; a malformed pattern yields `false` rather than an
//! error.

use crate::Args;
use once_cell::sync::Lazy;
use regex::Regex;
use strata_state::DataContext;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

/// `required`: the resolved value is present and non-blank.
pub fn required(args: Args<'_>, ctx: &DataContext) -> bool {
    args.string("value", ctx)
        .is_some_and(|s| !s.trim().is_empty())
}

/// `regex`: full match of `value` against `pattern`.
///
/// The pattern is anchored (`^(?:pat)$`), so partial matches do not count.
pub fn regex(args: Args<'_>, ctx: &DataContext) -> bool {
    let Some(value) = args.string("value", ctx) else {
        return false;
    };
    let Some(pattern) = args.string("pattern", ctx) else {
        return false;
    };
    match Regex::new(&format!("^(?:{pattern})$")) {
        Ok(re) => re.is_match(&value),
        Err(_) => false,
    }
}

/// `length`: char count of `value` within optional `min`/`max` bounds.
pub fn length(args: Args<'_>, ctx: &DataContext) -> bool {
    let Some(value) = args.string("value", ctx) else {
        return false;
    };
    let count = value.chars().count() as f64;
    if args.number("min", ctx).is_some_and(|min| count < min) {
        return false;
    }
    if args.number("max", ctx).is_some_and(|max| count > max) {
        return false;
    }
    true
}

/// `numeric`: `value` is a number, or a string that parses as one.
pub fn numeric(args: Args<'_>, ctx: &DataContext) -> bool {
    if args.number("value", ctx).is_some() {
        return true;
    }
    args.string("value", ctx)
        .is_some_and(|s| s.trim().parse::<f64>().is_ok_and(|n| n.is_finite()))
}

/// `email`: structural email shape check.
pub fn email(args: Args<'_>, ctx: &DataContext) -> bool {
    args.string("value", ctx)
        .is_some_and(|s| EMAIL.is_match(&s))
}
