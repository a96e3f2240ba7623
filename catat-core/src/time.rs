//! Time utilities: the ledger keeps local wall-clock time for one configured zone.

use anyhow::Result;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Parse an IANA zone name like "Asia/Jakarta".
pub fn parse_timezone(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))
}

/// Current wall-clock time in `tz`, without offset.
pub fn local_now(tz: Tz) -> NaiveDateTime {
    Utc::now().with_timezone(&tz).naive_local()
}

/// Same calendar day.
pub fn same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// Same calendar month of the same year.
pub fn same_month(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Build a date the way a calendar "rolls" out-of-range days: day 0 is the
/// last day of the previous month, day 31 in a 30-day month is the 1st of
/// the next one. `month0` is zero-based.
pub fn rolled_date(year: i32, month0: u32, day: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1)?;
    if day == 0 {
        return first.pred_opt();
    }
    first.checked_add_days(chrono::Days::new(u64::from(day) - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timezone() {
        assert!(parse_timezone("Asia/Jakarta").is_ok());
        assert!(parse_timezone("Mars/Olympus").is_err());
    }

    #[test]
    fn test_rolled_date() {
        assert_eq!(rolled_date(2026, 0, 10), NaiveDate::from_ymd_opt(2026, 1, 10));
        assert_eq!(rolled_date(2026, 1, 31), NaiveDate::from_ymd_opt(2026, 3, 3));
        assert_eq!(rolled_date(2026, 2, 0), NaiveDate::from_ymd_opt(2026, 2, 28));
        assert_eq!(rolled_date(2026, 12, 1), None);
    }

    #[test]
    fn test_same_month_checks_year() {
        let a = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let b = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert!(!same_month(a, b));
        assert!(same_month(a, a));
        assert!(same_day(a, a));
    }
}
