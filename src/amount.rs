//! Amount parsing and formatting.
//!
//! Amounts arrive as free text typed by people at a table, so parsing is
//! tolerant of both `1,234.56` and `1.234,56` styles and never fails:
//! anything unreadable is treated as zero.

/// Parse user-entered text into an amount.
///
/// When both `,` and `.` appear, whichever occurs last is the decimal point
/// and the other is dropped as a thousands separator. A lone `,` is read as
/// the decimal point. Everything outside `[0-9+-.]` is then discarded and the
/// longest numeric prefix is parsed. Empty, unparsable or non-finite input
/// yields `0.0`.
///
/// ```
/// use pot_split::amount::parse_amount;
///
/// assert_eq!(parse_amount("1.234,56"), 1234.56);
/// assert_eq!(parse_amount("1,234.56"), 1234.56);
/// assert_eq!(parse_amount("12,5"), 12.5);
/// assert_eq!(parse_amount("€ 40"), 40.0);
/// assert_eq!(parse_amount("abc"), 0.0);
/// ```
pub fn parse_amount(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    let normalized = normalize_separators(s);
    let kept: String = normalized
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.'))
        .collect();
    numeric_prefix(&kept).parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn normalize_separators(s: &str) -> String {
    match (s.rfind(','), s.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => s.replace('.', "").replacen(',', ".", 1),
        (Some(_), Some(_)) => s.replace(',', ""),
        (Some(_), None) => s.replacen(',', ".", 1),
        _ => s.to_string(),
    }
}

// Longest prefix of the form [+-]?digits*(.digits*)? with at least one digit.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if frac_end > frac_start || digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return "";
    }
    &s[..end]
}

/// Round to whole cents, half away from zero.
pub fn round_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    // Adding 0.0 turns a negative zero into a positive one.
    (value * 100.0).round() / 100.0 + 0.0
}

/// Render an amount with exactly two decimals.
///
/// ```
/// use pot_split::amount::format_amount;
///
/// assert_eq!(format_amount(12.5), "12.50");
/// assert_eq!(format_amount(-0.001), "0.00");
/// assert_eq!(format_amount(-3.456), "-3.46");
/// ```
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", round_cents(value))
}

/// Render an amount rounded to the nearest integer.
///
/// ```
/// use pot_split::amount::format_integer;
///
/// assert_eq!(format_integer(19.6), "20");
/// assert_eq!(format_integer(-0.3), "0");
/// ```
pub fn format_integer(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    format!("{:.0}", value.round() + 0.0)
}

/// True when `a` and `b` agree to the cent.
pub fn cents_balanced(a: f64, b: f64) -> bool {
    ((a - b) * 100.0).round() == 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_garbage_parse_to_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("   "), 0.0);
        assert_eq!(parse_amount("."), 0.0);
        assert_eq!(parse_amount("--5"), 0.0);
        assert_eq!(parse_amount("+-5"), 0.0);
    }

    #[test]
    fn last_separator_wins() {
        assert_eq!(parse_amount("1.234,56"), 1234.56);
        assert_eq!(parse_amount("1,234.56"), 1234.56);
        assert_eq!(parse_amount("1,234,567.5"), 1234567.5);
        assert_eq!(parse_amount("1.234.567,5"), 1234567.5);
    }

    #[test]
    fn lone_comma_is_decimal_point() {
        assert_eq!(parse_amount("0,5"), 0.5);
        // Only the first comma becomes the point; the rest are stripped.
        assert_eq!(parse_amount("1,234,5"), 1.2345);
    }

    #[test]
    fn prefix_parsing_stops_at_junk() {
        assert_eq!(parse_amount("1.2.3"), 1.2);
        assert_eq!(parse_amount("5-3"), 5.0);
        assert_eq!(parse_amount(".5"), 0.5);
        assert_eq!(parse_amount("-.5"), -0.5);
        assert_eq!(parse_amount("7."), 7.0);
        assert_eq!(parse_amount("  -12,75 "), -12.75);
        assert_eq!(parse_amount("$1 000"), 1000.0);
    }

    #[test]
    fn format_rounds_and_canonicalizes_zero() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(-0.0), "0.00");
        assert_eq!(format_amount(-0.004), "0.00");
        assert_eq!(format_amount(-0.006), "-0.01");
        assert_eq!(format_amount(2.675_1), "2.68");
        assert_eq!(format_amount(1234.5), "1234.50");
        assert_eq!(format_amount(f64::NAN), "0.00");
    }

    #[test]
    fn format_integer_rounds() {
        assert_eq!(format_integer(0.0), "0");
        assert_eq!(format_integer(-0.49), "0");
        assert_eq!(format_integer(2.5), "3");
        assert_eq!(format_integer(-2.5), "-3");
        assert_eq!(format_integer(150.0), "150");
    }

    #[test]
    fn balance_is_to_the_cent() {
        assert!(cents_balanced(60.0, 60.0));
        assert!(cents_balanced(0.1 + 0.2, 0.3));
        assert!(cents_balanced(10.004, 10.0));
        assert!(!cents_balanced(10.01, 10.0));
    }
}
