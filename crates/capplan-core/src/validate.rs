//! Clamping rules applied before data reaches the engine.

use chrono::NaiveDate;

pub const MIN_FTE: f64 = 0.1;
pub const MAX_FTE: f64 = 1.0;
pub const MIN_DURATION: u32 = 1;
pub const MAX_DURATION: u32 = 260;
pub const MAX_SKILL: u8 = 5;

/// Clamp a total-FTE fraction to `[0.1, 1.0]`. NaN becomes full time.
pub fn clamp_fte(v: f64) -> f64 {
    if v.is_nan() {
        return MAX_FTE;
    }
    v.clamp(MIN_FTE, MAX_FTE)
}

/// Clamp a baseline commitment to `[0.0, 1.0]`. NaN becomes 0.
pub fn clamp_baseline(v: f64) -> f64 {
    if v.is_nan() {
        return 0.0;
    }
    v.clamp(0.0, 1.0)
}

/// Clamp a duration in working days to `[1, 260]`.
pub fn clamp_duration(days: i64) -> u32 {
    days.clamp(MIN_DURATION as i64, MAX_DURATION as i64) as u32
}

pub fn clamp_skill(level: i64) -> u8 {
    level.clamp(0, MAX_SKILL as i64) as u8
}

/// Parse a calendar date. Blank or malformed input is "no date".
///
/// Accepts ISO `YYYY-MM-DD`, an RFC 3339 timestamp, or `DD/MM/YYYY`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| NaiveDate::parse_from_str(raw, "%d/%m/%Y").ok())
}

/// Drop blanks and duplicates, keeping first-seen order.
pub fn dedup_ids<I, S>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for id in ids {
        let id = id.as_ref().trim();
        if !id.is_empty() && !out.iter().any(|o| o == id) {
            out.push(id.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fte_bounds() {
        assert_eq!(clamp_fte(0.0), 0.1);
        assert_eq!(clamp_fte(1.7), 1.0);
        assert_eq!(clamp_fte(0.6), 0.6);
        assert_eq!(clamp_fte(f64::NAN), 1.0);
    }

    #[test]
    fn baseline_bounds() {
        assert_eq!(clamp_baseline(-0.2), 0.0);
        assert_eq!(clamp_baseline(1.2), 1.0);
        assert_eq!(clamp_baseline(f64::NAN), 0.0);
    }

    #[test]
    fn duration_bounds() {
        assert_eq!(clamp_duration(0), 1);
        assert_eq!(clamp_duration(-4), 1);
        assert_eq!(clamp_duration(400), 260);
        assert_eq!(clamp_duration(20), 20);
    }

    #[test]
    fn dates_degrade_to_none() {
        assert_eq!(parse_date("2026-10-19"), NaiveDate::from_ymd_opt(2026, 10, 19));
        assert_eq!(parse_date("19/10/2026"), NaiveDate::from_ymd_opt(2026, 10, 19));
        assert_eq!(
            parse_date("2026-10-19T09:30:00+01:00"),
            NaiveDate::from_ymd_opt(2026, 10, 19)
        );
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("next tuesday"), None);
        assert_eq!(parse_date("2026-02-30"), None);
    }

    #[test]
    fn dedup_keeps_order() {
        assert_eq!(
            dedup_ids(["CM01", "PM01", "CM01", " ", "PBA01"]),
            vec!["CM01", "PM01", "PBA01"]
        );
    }
}
