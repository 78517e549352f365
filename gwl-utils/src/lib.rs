//! Shared utility functions for GWL crates.

/// Date utility functions
pub mod dates {
    use chrono::{Days, NaiveDate};

    /// Wire format used by the monitoring service for every date.
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    ///
    /// Only the canonical form is accepted: four-digit years, zero-padded
    /// month and day, no sign.
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        let s = s.trim();
        let date = NaiveDate::parse_from_str(s, DATE_FORMAT)?;
        if s.len() != 10 || format_date(&date) != s {
            anyhow::bail!("'{}' is not a YYYY-MM-DD date", s);
        }
        Ok(date)
    }

    /// The `count` calendar days after `last`, formatted as "YYYY-MM-DD".
    ///
    /// Used to lay forecast values on the date axis when the service does
    /// not send its own forecast dates. Returns `None` if the range runs
    /// past the last representable date.
    pub fn following_days(last: &NaiveDate, count: usize) -> Option<Vec<String>> {
        (1..=count as u64)
            .map(|offset| last.checked_add_days(Days::new(offset)).map(|d| format_date(&d)))
            .collect()
    }

    /// Index of the first date that is earlier than its predecessor.
    ///
    /// Dates must already be valid; equal neighbours are allowed.
    pub fn first_out_of_order(dates: &[NaiveDate]) -> Option<usize> {
        dates
            .windows(2)
            .position(|pair| pair[1] < pair[0])
            .map(|i| i + 1)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2023-06-15");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
        }

        #[test]
        fn test_parse_rejects_compact_format() {
            assert!(parse_date("20230615").is_err());
            assert!(parse_date("2023-02-30").is_err());
            assert!(parse_date("2023-6-5").is_err());
            assert!(parse_date("+262142-12-31").is_err());
            assert_eq!(
                parse_date(" 2023-06-05 ").unwrap(),
                NaiveDate::from_ymd_opt(2023, 6, 5).unwrap()
            );
        }

        #[test]
        fn test_following_days_crosses_month_end() {
            let last = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
            assert_eq!(
                following_days(&last, 3).unwrap(),
                vec!["2024-02-28", "2024-02-29", "2024-03-01"]
            );
            assert_eq!(following_days(&last, 0), Some(vec![]));
        }

        #[test]
        fn test_following_days_past_calendar_end() {
            assert_eq!(following_days(&NaiveDate::MAX, 1), None);
            let near_end = NaiveDate::MAX.pred_opt().unwrap();
            assert_eq!(following_days(&near_end, 1).map(|d| d.len()), Some(1));
            assert_eq!(following_days(&near_end, 2), None);
        }

        #[test]
        fn test_first_out_of_order() {
            let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
            assert_eq!(first_out_of_order(&[d(1), d(2), d(2), d(5)]), None);
            assert_eq!(first_out_of_order(&[d(1), d(3), d(2)]), Some(2));
            assert_eq!(first_out_of_order(&[]), None);
        }
    }
}
