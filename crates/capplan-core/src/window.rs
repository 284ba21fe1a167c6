//! Rolling four-week planning frame.
//!
//! Week 0 starts on the Monday of the week containing "today"; weeks 1-3
//! follow. The frame moves every calendar week, so it is always built from an
//! injected date rather than the wall clock.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{add_working_days, week_start};
use crate::model::WorkItem;
use crate::status::Status;

/// Number of weeks in the planning horizon.
pub const FRAME_WEEKS: usize = 4;

/// Monday..=Friday span of one frame week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekSpan {
    /// True when `[from, to]` shares at least one day with this week.
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        from <= self.end && to >= self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningFrame {
    weeks: [WeekSpan; FRAME_WEEKS],
}

impl PlanningFrame {
    /// Frame whose first week contains `today`.
    pub fn anchored(today: NaiveDate) -> Self {
        let monday = week_start(today);
        let weeks = std::array::from_fn(|i| {
            let start = monday + Duration::weeks(i as i64);
            WeekSpan {
                start,
                end: start + Duration::days(4),
            }
        });
        Self { weeks }
    }

    pub fn weeks(&self) -> &[WeekSpan; FRAME_WEEKS] {
        &self.weeks
    }

    pub fn week_starts(&self) -> [NaiveDate; FRAME_WEEKS] {
        self.weeks.map(|w| w.start)
    }

    /// Column headings, e.g. `W/C 19 Oct`.
    pub fn labels(&self) -> [String; FRAME_WEEKS] {
        self.weeks
            .map(|w| format!("W/C {}", w.start.format("%-d %b")))
    }
}

/// Last working day of an item that has a start date.
pub fn item_end_date(item: &WorkItem) -> Option<NaiveDate> {
    item.start_date
        .map(|start| add_working_days(start, item.duration.max(1)))
}

/// Which frame weeks an item occupies.
///
/// Undated items count in every week when they are already in progress or
/// blocked, and in none otherwise.
pub fn active_weeks(item: &WorkItem, frame: &PlanningFrame) -> [bool; FRAME_WEEKS] {
    match (item.start_date, item_end_date(item)) {
        (Some(start), Some(end)) => frame.weeks.map(|w| w.overlaps(start, end)),
        _ => {
            let active = matches!(item.status(), Status::InProgress | Status::Blocked);
            [active; FRAME_WEEKS]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimation::Size;
    use crate::model::Portfolio;
    use crate::status::StatusTracking;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn item(start: Option<NaiveDate>, duration: u32, status: StatusTracking) -> WorkItem {
        WorkItem {
            id: "WI-1".into(),
            title: "Item".into(),
            portfolio: Portfolio::Pstom,
            category: String::new(),
            size: Size::M,
            duration,
            start_date: start,
            status,
            assigned: vec![],
        }
    }

    #[test]
    fn frame_starts_on_monday() {
        let frame = PlanningFrame::anchored(d("2026-10-21"));
        assert_eq!(
            frame.week_starts(),
            [d("2026-10-19"), d("2026-10-26"), d("2026-11-02"), d("2026-11-09")]
        );
        assert_eq!(frame.weeks()[0].end, d("2026-10-23"));
    }

    #[test]
    fn sunday_anchors_to_previous_monday() {
        let frame = PlanningFrame::anchored(d("2026-10-25"));
        assert_eq!(frame.week_starts()[0], d("2026-10-19"));
    }

    #[test]
    fn labels_use_week_commencing() {
        let frame = PlanningFrame::anchored(d("2026-10-19"));
        assert_eq!(frame.labels()[0], "W/C 19 Oct");
        assert_eq!(frame.labels()[2], "W/C 2 Nov");
    }

    #[test]
    fn item_in_single_week() {
        let frame = PlanningFrame::anchored(d("2026-10-19"));
        let wi = item(Some(d("2026-10-26")), 5, StatusTracking::default());
        assert_eq!(active_weeks(&wi, &frame), [false, true, false, false]);
    }

    #[test]
    fn item_spanning_weekend() {
        let frame = PlanningFrame::anchored(d("2026-10-19"));
        // Thursday + 3 working days ends Monday of week 1
        let wi = item(Some(d("2026-10-22")), 3, StatusTracking::default());
        assert_eq!(active_weeks(&wi, &frame), [true, true, false, false]);
    }

    #[test]
    fn item_entirely_before_frame() {
        let frame = PlanningFrame::anchored(d("2026-10-19"));
        let wi = item(Some(d("2026-09-01")), 5, StatusTracking::default());
        assert_eq!(active_weeks(&wi, &frame), [false; 4]);
    }

    #[test]
    fn undated_in_progress_fills_frame() {
        let frame = PlanningFrame::anchored(d("2026-10-19"));
        let wi = item(None, 20, StatusTracking::Auto(Status::InProgress));
        assert_eq!(active_weeks(&wi, &frame), [true; 4]);
        let wi = item(None, 20, StatusTracking::Manual(Status::Blocked));
        assert_eq!(active_weeks(&wi, &frame), [true; 4]);
    }

    #[test]
    fn undated_upcoming_is_idle() {
        let frame = PlanningFrame::anchored(d("2026-10-19"));
        let wi = item(None, 20, StatusTracking::default());
        assert_eq!(active_weeks(&wi, &frame), [false; 4]);
    }
}
