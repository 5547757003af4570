//! General-format number rendering for text exports
//!
//! Mirrors the classic `%g` conversion with six significant digits: decimal
//! notation when the rounded magnitude lies in `[1e-4, 1e6)`, scientific
//! notation otherwise. Trailing zeros are kept so every value of a column has
//! the same number of significant digits.

/// Significant digits written for every value
pub const SIGNIFICANT_DIGITS: usize = 6;

/// Render `value` in general format
pub fn format_general(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return format!("{:.*}", SIGNIFICANT_DIGITS - 1, value);
    }

    // Rounding to the requested precision decides which notation applies
    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => return scientific,
    };

    if (-4..SIGNIFICANT_DIGITS as i32).contains(&exponent) {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent) as usize;
        format!("{:.*}", decimals, value)
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}
