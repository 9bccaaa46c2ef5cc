//! Lenient decimal parsing for user-entered amounts.
//!
//! Inputs are whatever the user typed. The longest numeric prefix wins
//! (`"12abc"` is 12, `"1,500"` is 1) and anything without a numeric prefix
//! is 0. Malformed input never produces an error.

/// Parse the longest leading decimal number of `input`.
///
/// Blank, non-numeric and non-finite values parse as `0.0`.
#[must_use]
pub fn parse_amount(input: &str) -> f64 {
    let trimmed = input.trim_start();
    let end = numeric_prefix_len(trimmed.as_bytes());
    if end == 0 {
        return 0.0;
    }
    match trimmed[..end].parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Render an amount the way it is stored in the record.
///
/// Integral values have no fractional part (`250000`, not `250000.0`).
#[must_use]
pub fn format_amount(value: f64) -> String {
    if value == 0.0 {
        // normalizes -0
        return "0".to_string();
    }
    value.to_string()
}

/// Length in bytes of the `[sign] digits [. digits] [e [sign] digits]` prefix.
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    let mut digits = i - int_start;

    if bytes.get(i) == Some(&b'.') {
        let frac_start = i + 1;
        let mut j = frac_start;
        while bytes.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }

    if digits == 0 {
        return 0;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while bytes.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}
