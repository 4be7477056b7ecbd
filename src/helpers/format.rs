//! Number formatting for the metric cards.

/// Formats an integer with `,` thousands separators (`1234567` -> `1,234,567`).
pub fn thousands(value: i64) -> String {
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

/// Rounds to the nearest integer (ties to even), then adds thousands separators.
pub fn rounded_thousands(value: f64) -> String {
    thousands(value.round_ties_even() as i64)
}
