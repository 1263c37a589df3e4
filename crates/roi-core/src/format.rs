//! Display formatting for calculator quantities.
//!
//! These strings are for rendering only. Nothing parses them back: share links
//! are always built from the raw numeric inputs.

/// Separator between the low and high end of a displayed range.
pub const RANGE_SEPARATOR: &str = " – ";

/// Whole values render without decimals, fractional values with exactly one.
///
/// # Examples
///
/// ```
/// use roi_core::format::format_days;
/// assert_eq!(format_days(10.0), "10");
/// assert_eq!(format_days(2.6), "2.6");
/// ```
pub fn format_days(days: f64) -> String {
    if days.fract() == 0.0 {
        format!("{days:.0}")
    } else {
        format!("{days:.1}")
    }
}

/// Low end follows [`format_days`]; high end is floored to a whole day so the
/// upper bound of a savings range is never overstated.
///
/// # Examples
///
/// ```
/// use roi_core::format::format_days_range;
/// assert_eq!(format_days_range(4.1, 7.4), "4.1 – 7");
/// ```
pub fn format_days_range(low: f64, high: f64) -> String {
    format!("{}{RANGE_SEPARATOR}{}", format_days(low), high.floor())
}

/// `"day"` for exactly one, `"days"` otherwise. Callers pass the floored value.
pub fn day_label(days: f64) -> &'static str {
    if days == 1.0 { "day" } else { "days" }
}

/// Exactly 100 renders as `"100%"`; everything else with one decimal.
pub fn format_percent(percent: f64) -> String {
    if percent == 100.0 {
        "100%".to_string()
    } else {
        format!("{percent:.1}%")
    }
}

/// Whole currency units with thousands separators, prefixed by `symbol`.
///
/// # Examples
///
/// ```
/// use roi_core::format::format_currency;
/// assert_eq!(format_currency(99_750.4, "$"), "$99,750");
/// assert_eq!(format_currency(187_500.5, "€"), "€187,501");
/// ```
pub fn format_currency(amount: f64, symbol: &str) -> String {
    format!("{symbol}{}", group_thousands(round_to_unit(amount)))
}

/// Whole counts with thousands separators.
pub fn format_count(count: f64) -> String {
    group_thousands(round_to_unit(count))
}

/// Insert `,` every three digits, en-US style.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Half away from zero; non-finite input renders as zero.
fn round_to_unit(value: f64) -> i64 {
    if value.is_finite() {
        value.round() as i64
    } else {
        0
    }
}
