//! String forms of scalar values, matching what a script host would produce.

use chrono::{DateTime, Datelike, Utc};

/// Formats a number the way ECMAScript `Number.prototype.toString()` does.
pub fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }
    // Covers -0 as well.
    if value == 0.0 {
        return "0".to_string();
    }

    if (1e-6..1e21).contains(&value.abs()) {
        return format!("{value}");
    }

    let exponential = format!("{value:e}");
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exponential,
    }
}

/// Formats a UTC timestamp the way ECMAScript `Date.prototype.toString()`
/// does in a UTC time zone.
///
/// Years are zero-padded to four digits and only negative years carry a sign.
pub fn date_to_string(value: &DateTime<Utc>) -> String {
    let year = value.year();
    let year = if year < 0 {
        format!("-{:04}", year.unsigned_abs())
    } else {
        format!("{year:04}")
    };
    format!(
        "{} {year} {} GMT+0000 (Coordinated Universal Time)",
        value.format("%a %b %d"),
        value.format("%H:%M:%S"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn integers_have_no_fraction() {
        assert_eq!(number_to_string(1.0), "1");
        assert_eq!(number_to_string(42.0), "42");
        assert_eq!(number_to_string(-7.0), "-7");
    }

    #[test]
    fn fractions_use_shortest_form() {
        assert_eq!(number_to_string(0.1), "0.1");
        assert_eq!(number_to_string(1.5), "1.5");
        assert_eq!(number_to_string(0.000001), "0.000001");
    }

    #[test]
    fn special_values() {
        assert_eq!(number_to_string(f64::NAN), "NaN");
        assert_eq!(number_to_string(f64::INFINITY), "Infinity");
        assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(number_to_string(-0.0), "0");
    }

    #[test]
    fn exponent_form_outside_decimal_range() {
        assert_eq!(number_to_string(1e21), "1e+21");
        assert_eq!(number_to_string(-2.5e22), "-2.5e+22");
        assert_eq!(number_to_string(1.5e-7), "1.5e-7");
        assert_eq!(number_to_string(1e20), "100000000000000000000");
    }

    #[test]
    fn dates_use_long_form() {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        assert_eq!(
            date_to_string(&date),
            "Tue Mar 05 2024 14:07:09 GMT+0000 (Coordinated Universal Time)"
        );

        let far = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            date_to_string(&far),
            "Sat Jan 01 10000 00:00:00 GMT+0000 (Coordinated Universal Time)"
        );

        let early = Utc.with_ymd_and_hms(999, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(
            date_to_string(&early),
            "Tue Dec 31 0999 23:59:59 GMT+0000 (Coordinated Universal Time)"
        );
    }
}
