//! Effort estimation.
//!
//! A work item is sized with a T-shirt category that maps to a fixed number
//! of effort days. Spreading that effort over the item's duration gives the
//! FTE percentage the item demands, which is then split evenly across its
//! assignees.
//!
//! Two rounding precisions are used on purpose: the total is a whole
//! percentage, per-person figures keep one decimal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// T-shirt size of a work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Size {
    Xs,
    S,
    #[default]
    M,
    L,
    Xl,
    Xxl,
}

impl Size {
    pub const ALL: [Size; 6] = [Size::Xs, Size::S, Size::M, Size::L, Size::Xl, Size::Xxl];

    /// Person-days this size is deemed to require.
    pub fn effort_days(self) -> u32 {
        match self {
            Size::Xs => 1,
            Size::S => 3,
            Size::M => 7,
            Size::L => 15,
            Size::Xl => 30,
            Size::Xxl => 50,
        }
    }

    /// Parse a size label, falling back to `M` for anything unrecognised.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Size::Xs => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::Xl => "XL",
            Size::Xxl => "XXL",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "XS" => Ok(Size::Xs),
            "S" => Ok(Size::S),
            "M" => Ok(Size::M),
            "L" => Ok(Size::L),
            "XL" => Ok(Size::Xl),
            "XXL" => Ok(Size::Xxl),
            other => Err(format!("unknown size: {other}")),
        }
    }
}

/// Effort days for a size.
pub fn effort_days(size: Size) -> u32 {
    size.effort_days()
}

/// Whole-number FTE percentage an item of `size` demands over `duration`
/// working days. Zero duration yields 0.
pub fn fte_total_percent(size: Size, duration: u32) -> f64 {
    if duration == 0 {
        return 0.0;
    }
    (size.effort_days() as f64 / duration as f64 * 100.0).round()
}

/// Share of `total` carried by each of `assigned` people, to one decimal.
///
/// With nobody assigned the full total is returned: the item still costs its
/// percentage, it is just attributable to no one.
pub fn per_person_percent(total: f64, assigned: usize) -> f64 {
    if assigned == 0 {
        return total;
    }
    round1(total / assigned as f64)
}

/// Round to one decimal place.
pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Figures shown alongside a work item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub effort_days: u32,
    pub total_fte_percent: f64,
    pub per_person_percent: f64,
}

/// Effort, total and per-person percentages for one item.
pub fn compute_work_item_estimate(size: Size, duration: u32, assigned: usize) -> Estimate {
    let total = fte_total_percent(size, duration);
    Estimate {
        effort_days: size.effort_days(),
        total_fte_percent: total,
        per_person_percent: per_person_percent(total, assigned),
    }
}
