//! Formatting functions.
//!
//! Every formatter resolves to a string; an unresolvable input yields the
//! empty string. Numbers render as plain decimal expansions, never in
//! scientific notation, and fractional digits are truncated (not rounded)
//! to the configured maximum.

use crate::{ArgExpr, Args};
use once_cell::sync::Lazy;
use regex::Regex;
use strata_state::DataContext;

static TEMPLATE_EXPR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]*)\}").expect("template pattern is valid"));

/// `formatString`: substitute every `${expr}` occurrence in `template` with
/// the path resolution of `expr` against the data context.
///
/// Each expression resolves as string, else stringified number, else
/// stringified boolean, else the empty string.
pub fn format_string(args: Args<'_>, ctx: &DataContext) -> String {
    let Some(template) = args.string("template", ctx) else {
        return String::new();
    };
    TEMPLATE_EXPR
        .replace_all(&template, |caps: &regex::Captures<'_>| {
            ArgExpr::PathRef(caps[1].to_owned())
                .resolve_string(ctx)
                .unwrap_or_default()
        })
        .into_owned()
}

/// `formatNumber`: decimal rendering with grouping and fraction bounds.
///
/// Options: `minimumFractionDigits` (default 0), `maximumFractionDigits`
/// (default 3), `useGrouping` (default true). The fraction is truncated to
/// the maximum, padded to the minimum, and dropped entirely when all zero
/// unless the minimum forces padding.
pub fn format_number(args: Args<'_>, ctx: &DataContext) -> String {
    let Some(value) = args.number("value", ctx) else {
        return String::new();
    };
    let min_frac = args
        .number("minimumFractionDigits", ctx)
        .map_or(0, |n| n.max(0.0) as usize);
    let max_frac = args
        .number("maximumFractionDigits", ctx)
        .map_or(3, |n| n.max(0.0) as usize);
    let grouping = args.boolean("useGrouping", ctx).unwrap_or(true);

    // f64 Display always produces a plain decimal expansion.
    let raw = format!("{}", value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (raw.as_str(), ""),
    };

    let mut frac: String = frac_part.chars().take(max_frac).collect();
    if frac.chars().all(|c| c == '0') {
        frac.clear();
    }
    while frac.len() < min_frac {
        frac.push('0');
    }

    let int_rendered = if grouping {
        group_digits(int_part)
    } else {
        int_part.to_owned()
    };
    let sign = if value < 0.0 { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{int_rendered}")
    } else {
        format!("{sign}{int_rendered}.{frac}")
    }
}

/// `formatCurrency`: symbol, grouped integer part, and two-digit cents.
///
/// Cents are round-half-up of `(value − floor(value)) × 100`, carrying into
/// the integer part when they round to 100. Known symbols: USD `$`, EUR `€`,
/// GBP `£`, JPY `¥`; any other currency code prints as itself.
pub fn format_currency(args: Args<'_>, ctx: &DataContext) -> String {
    let Some(value) = args.number("value", ctx) else {
        return String::new();
    };
    let currency = args
        .string("currency", ctx)
        .unwrap_or_else(|| "USD".to_owned());
    let symbol = match currency.as_str() {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        other => other,
    };

    let abs = value.abs();
    let mut whole = abs.floor();
    let mut cents = ((abs - whole) * 100.0 + 0.5).floor() as u64;
    if cents >= 100 {
        whole += 1.0;
        cents -= 100;
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{symbol}{}.{cents:02}", group_digits(&format!("{whole}")))
}

/// `formatDate`: pass-through of the string value.
///
/// Calendar-aware formatting is a renderer concern; the core forwards the
/// value untouched.
pub fn format_date(args: Args<'_>, ctx: &DataContext) -> String {
    args.string("value", ctx).unwrap_or_default()
}

/// `pluralize`: select `zero`/`one`/`other` by `count`.
pub fn pluralize(args: Args<'_>, ctx: &DataContext) -> String {
    let count = args.number("count", ctx);
    if count == Some(0.0) {
        if let Some(zero) = args.string("zero", ctx) {
            return zero;
        }
    }
    if count == Some(1.0) {
        if let Some(one) = args.string("one", ctx) {
            return one;
        }
    }
    args.string("other", ctx).unwrap_or_default()
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
