//! Formatting helpers shared by the exporters and assemblers: report-facing
//! date rendering, file-name timestamps, and currency strings.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// Human-readable date used in report cells, e.g. `Nov 01, 2023`.
pub fn long_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Date-only stamp embedded in file names, e.g. `2023-11-01`.
pub fn file_date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Second-resolution stamp embedded in file names,
/// e.g. `2023-11-01_14-05-09`.
pub fn file_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d_%H-%M-%S").to_string()
}

/// Renders a monetary amount with thousands separators and two decimal
/// places: `12,345.60`. Negative amounts keep a leading minus sign.
pub fn currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let raw = format!("{rounded:.2}");
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn long_date_is_month_day_year() {
        let date = NaiveDate::from_ymd_opt(2023, 11, 1).unwrap();
        assert_eq!(long_date(date), "Nov 01, 2023");
    }

    #[test]
    fn file_stamps_match_both_legacy_schemes() {
        let at = Utc.with_ymd_and_hms(2023, 11, 1, 14, 5, 9).unwrap();
        assert_eq!(file_date(at), "2023-11-01");
        assert_eq!(file_timestamp(at), "2023-11-01_14-05-09");
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(currency(dec!(0)), "0.00");
        assert_eq!(currency(dec!(999.9)), "999.90");
        assert_eq!(currency(dec!(1250)), "1,250.00");
        assert_eq!(currency(dec!(1234567.891)), "1,234,567.89");
        assert_eq!(currency(dec!(-45000.5)), "-45,000.50");
    }
}
