// Parsing and number-formatting helpers shared by the loader and reports.
//
// Parsing is forgiving so CSV exports with stray spaces or thousands
// separators still load; formatting is only ever applied on the
// presentation side, never inside the analyzer.
use num_format::{Locale, ToFormattedString};

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that are common in CSV exports.
///
/// - Trims whitespace and strips a trailing `%`.
/// - Rejects values that contain alphabetic characters.
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim().trim_end_matches('%').trim_end();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(',', "");
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a year column into `i32`.
///
/// Unlike [`parse_f64_safe`] no cleanup is attempted: a year with a decimal
/// point or separator is treated as malformed and yields `None`.
pub fn parse_i32_safe(s: Option<&str>) -> Option<i32> {
    // `?` propagates `None` early if the field is missing.
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<i32>().ok()
}

/// Arithmetic mean of a slice of shares or metrics.
///
/// Returns `0.0` for an empty slice. The analyzer checks point counts
/// before calling this, so the fallback only ever reaches report code.
pub fn average(v: &[f64]) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    let sum: f64 = v.iter().copied().sum();
    sum / v.len() as f64
}

/// Format a value with a fixed number of decimals and `1,234,567.89` style
/// thousands separators.
///
/// This is the single formatter for numeric report cells; the analyzer
/// itself never formats.
pub fn format_number(n: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    // Avoid rendering `-0.00` for values that round to zero.
    if n.is_sign_negative() && s.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_percent(ratio: f64) -> String {
    format!("{}%", format_number(ratio * 100.0, 1))
}

/// Thousands-separated rendering of a count, e.g. `9,855` rows loaded.
pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tolerant_floats() {
        assert_eq!(parse_f64_safe(Some(" 23.5 ")), Some(23.5));
        assert_eq!(parse_f64_safe(Some("22.4%")), Some(22.4));
        assert_eq!(parse_f64_safe(Some("1,234.5")), Some(1234.5));
        assert_eq!(parse_f64_safe(Some("n/a")), None);
        assert_eq!(parse_f64_safe(Some("")), None);
        assert_eq!(parse_f64_safe(None), None);
    }

    #[test]
    fn parses_years() {
        assert_eq!(parse_i32_safe(Some("2023")), Some(2023));
        assert_eq!(parse_i32_safe(Some("2023.5")), None);
        assert_eq!(parse_i32_safe(Some("  ")), None);
    }

    #[test]
    fn averages() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(average(&[1.0, 2.0, 3.0]), 2.0);
    }

    #[test]
    fn formats_numbers() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-30.555, 1), "-30.6");
        assert_eq!(format_number(-0.001, 2), "0.00");
        assert_eq!(format_number(890.0, 0), "890");
        assert_eq!(format_percent(0.75), "75.0%");
        assert_eq!(format_int(9855), "9,855");
    }
}
