//! Rounding and currency formatting.
//!
//! All rounding is half away from zero (`f64::round`), so `2.5 -> 3` and
//! `-2.5 -> -3`. Formatting is locale-independent: `.` groups thousands and
//! no decimals are printed.

/// Prices are always rounded to a multiple of this many euros.
pub const PRICE_STEP: i64 = 5;

/// Round to the nearest integer, halves away from zero.
pub fn round_half_away(value: f64) -> i64 {
    value.round() as i64
}

/// Round `value` to the nearest multiple of `multiple`.
///
/// Computed as `multiple * round(value / multiple)`, saturating at the
/// `i64` bounds.
pub fn round_to_multiple(value: f64, multiple: i64) -> i64 {
    multiple.saturating_mul(round_half_away(value / multiple as f64))
}

/// Format whole euros with `.` as the thousands separator, e.g. `1.020`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        out.push('-');
    }

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }

    out
}

/// Format a price as `€1.020`.
pub fn format_euro(value: i64) -> String {
    format!("€{}", format_thousands(value))
}

/// Format an hourly rate: whole values like prices, fractional ones with a
/// decimal comma (`34.5 -> €34,50`).
pub fn format_rate(value: f64) -> String {
    if value.fract() == 0.0 {
        format_euro(value as i64)
    } else {
        format!("€{value:.2}").replace('.', ",")
    }
}
