//! Work item lifecycle.
//!
//! ## State Transitions
//!
//! ```text
//! Auto:    upcoming -> in-progress -> complete    (driven by dates and today)
//! Manual:  blocked | complete                     (pinned until a user changes it)
//! ```
//!
//! A status is either derived from the item's start date and duration, or
//! pinned by a user. Pinned statuses are never touched by re-derivation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::calendar::add_working_days;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Upcoming,
    #[serde(alias = "progress")]
    InProgress,
    Blocked,
    Complete,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Upcoming,
        Status::InProgress,
        Status::Blocked,
        Status::Complete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Upcoming => "upcoming",
            Status::InProgress => "in-progress",
            Status::Blocked => "blocked",
            Status::Complete => "complete",
        }
    }

    /// Statuses a user sets that derivation must not overwrite.
    pub fn is_sticky(self) -> bool {
        matches!(self, Status::Blocked | Status::Complete)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upcoming" => Ok(Status::Upcoming),
            "in-progress" | "in_progress" | "progress" => Ok(Status::InProgress),
            "blocked" => Ok(Status::Blocked),
            "complete" | "completed" | "done" => Ok(Status::Complete),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// Where a work item's status comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "status", rename_all = "lowercase")]
pub enum StatusTracking {
    /// Last status derived from the item's dates.
    Auto(Status),
    /// Pinned by a user.
    Manual(Status),
}

impl Default for StatusTracking {
    fn default() -> Self {
        StatusTracking::Auto(Status::Upcoming)
    }
}

impl StatusTracking {
    /// Tracking for a status supplied from outside (a user or an import row).
    /// Sticky statuses are pinned, the rest stay automatic.
    pub fn from_status(status: Status) -> Self {
        if status.is_sticky() {
            StatusTracking::Manual(status)
        } else {
            StatusTracking::Auto(status)
        }
    }

    pub fn status(self) -> Status {
        match self {
            StatusTracking::Auto(s) | StatusTracking::Manual(s) => s,
        }
    }

    pub fn is_pinned(self) -> bool {
        matches!(self, StatusTracking::Manual(_))
    }

    /// Re-derive from dates. Pinned statuses are returned unchanged.
    ///
    /// Items with no start date keep their current automatic status; that is
    /// how an undated item already marked in progress keeps consuming
    /// capacity.
    pub fn rederive(self, start: Option<NaiveDate>, duration: u32, today: NaiveDate) -> Self {
        match self {
            StatusTracking::Manual(_) => self,
            StatusTracking::Auto(current) => match start {
                Some(_) => StatusTracking::Auto(derive_status(start, duration, today)),
                None => StatusTracking::Auto(current),
            },
        }
    }

    /// Derive strictly from dates, as after an explicit start date edit.
    /// Pinned statuses are returned unchanged; no start date means upcoming.
    pub fn rederive_strict(self, start: Option<NaiveDate>, duration: u32, today: NaiveDate) -> Self {
        match self {
            StatusTracking::Manual(_) => self,
            StatusTracking::Auto(_) => StatusTracking::Auto(derive_status(start, duration, today)),
        }
    }
}

/// Status implied by a start date and working-day duration on `today`.
pub fn derive_status(start: Option<NaiveDate>, duration: u32, today: NaiveDate) -> Status {
    let Some(start) = start else {
        return Status::Upcoming;
    };
    if today < start {
        return Status::Upcoming;
    }
    let end = add_working_days(start, duration.max(1));
    if today <= end {
        Status::InProgress
    } else {
        Status::Complete
    }
}
