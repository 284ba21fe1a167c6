//! Monday-to-Friday date arithmetic.
//!
//! Durations throughout capplan are expressed in working days. Callers clamp
//! durations to at least 1 before calling in; these helpers do not validate,
//! but they always terminate (a count of 0 behaves like 1).

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Working days in one FTE week.
pub const DAYS_PER_FTE: f64 = 5.0;

/// True for Monday through Friday.
pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Inclusive count of working days in `[start, end]`.
///
/// Returns 0 when `end` is before `start`.
pub fn count_working_days(start: NaiveDate, end: NaiveDate) -> u32 {
    if end < start {
        return 0;
    }
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| is_working_day(*d))
        .count() as u32
}

/// Date reached after counting `n` working days from `start`.
///
/// `start` itself counts as day 1 when it is a working day. A weekend start
/// rolls forward to the following Monday, which becomes day 1. The returned
/// date is always the last counted working day.
pub fn add_working_days(start: NaiveDate, n: u32) -> NaiveDate {
    let mut date = start;
    let mut counted = 0u32;
    loop {
        if is_working_day(date) {
            counted += 1;
            if counted >= n {
                return date;
            }
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => return date,
        }
    }
}

/// Monday of the week containing `date`.
///
/// Sunday belongs to the week that started six days earlier.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn weekends_are_not_working_days() {
        // 2026-10-17 is a Saturday
        assert!(!is_working_day(d("2026-10-17")));
        assert!(!is_working_day(d("2026-10-18")));
        assert!(is_working_day(d("2026-10-19")));
        assert!(is_working_day(d("2026-10-23")));
    }

    #[test]
    fn count_full_week() {
        assert_eq!(count_working_days(d("2026-10-19"), d("2026-10-25")), 5);
        assert_eq!(count_working_days(d("2026-10-19"), d("2026-10-19")), 1);
        assert_eq!(count_working_days(d("2026-10-17"), d("2026-10-18")), 0);
    }

    #[test]
    fn count_reversed_range_is_zero() {
        assert_eq!(count_working_days(d("2026-10-23"), d("2026-10-19")), 0);
    }

    #[test]
    fn add_counts_start_as_day_one() {
        assert_eq!(add_working_days(d("2026-10-19"), 1), d("2026-10-19"));
        assert_eq!(add_working_days(d("2026-10-19"), 5), d("2026-10-23"));
    }

    #[test]
    fn add_skips_weekend() {
        // Thursday + 3 working days lands on the following Monday
        assert_eq!(add_working_days(d("2026-10-22"), 3), d("2026-10-26"));
        assert_eq!(add_working_days(d("2026-10-19"), 10), d("2026-10-30"));
    }

    #[test]
    fn add_from_weekend_rolls_to_monday() {
        assert_eq!(add_working_days(d("2026-10-17"), 1), d("2026-10-19"));
        assert_eq!(add_working_days(d("2026-10-18"), 2), d("2026-10-20"));
    }

    #[test]
    fn add_zero_behaves_like_one() {
        assert_eq!(add_working_days(d("2026-10-19"), 0), d("2026-10-19"));
        assert_eq!(add_working_days(d("2026-10-17"), 0), d("2026-10-19"));
    }

    #[test]
    fn week_start_is_monday() {
        assert_eq!(week_start(d("2026-10-19")), d("2026-10-19"));
        assert_eq!(week_start(d("2026-10-22")), d("2026-10-19"));
        assert_eq!(week_start(d("2026-10-24")), d("2026-10-19"));
        // Sunday belongs to the preceding Monday's week
        assert_eq!(week_start(d("2026-10-25")), d("2026-10-19"));
    }
}
