//! Allocation aggregator.
//!
//! Sums, per resource and per frame week, the per-person percentage of every
//! non-complete work item the resource is assigned to and that is active in
//! that week. Everything here is a pure function of a [`Plan`] snapshot and a
//! [`PlanningFrame`]; nothing is cached, each query recomputes from scratch.
//!
//! Intermediate figures are rounded at the same points the numbers are shown:
//! one decimal for week sums and day equivalents, whole percentages for
//! averages. Do not carry extra precision through; downstream figures are
//! expected to match the displayed ones.

use serde::{Deserialize, Serialize};

use crate::estimation::{fte_total_percent, per_person_percent, round1};
use crate::model::{available_days_per_week, Resource, WorkItem};
use crate::plan::Plan;
use crate::window::{active_weeks, PlanningFrame, FRAME_WEEKS};

/// Load classification used to colour a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatBand {
    Available,
    Ok,
    Tight,
    Full,
    Over,
    Critical,
}

impl HeatBand {
    pub fn from_percent(v: f64) -> Self {
        if v < 70.0 {
            HeatBand::Available
        } else if v < 85.0 {
            HeatBand::Ok
        } else if v < 95.0 {
            HeatBand::Tight
        } else if v <= 100.0 {
            HeatBand::Full
        } else if v <= 120.0 {
            HeatBand::Over
        } else {
            HeatBand::Critical
        }
    }
}

pub type WeekFigures = [f64; FRAME_WEEKS];

/// Per-person percentage an item charges each of its assignees.
pub fn item_per_person_percent(item: &WorkItem) -> f64 {
    per_person_percent(fte_total_percent(item.size, item.duration), item.assigned.len())
}

/// Weekly load of `resource` as a percentage of its capacity.
pub fn resource_week_percent(
    resource: &Resource,
    items: &[WorkItem],
    frame: &PlanningFrame,
) -> WeekFigures {
    let mut weeks = [0.0; FRAME_WEEKS];
    for item in items
        .iter()
        .filter(|w| !w.is_complete() && w.is_assigned(&resource.id))
    {
        let share = item_per_person_percent(item);
        for (week, active) in weeks.iter_mut().zip(active_weeks(item, frame)) {
            if active {
                *week += share;
            }
        }
    }
    weeks.map(round1)
}

/// Weekly load of `resource` in days.
pub fn resource_week_days(
    resource: &Resource,
    items: &[WorkItem],
    frame: &PlanningFrame,
) -> WeekFigures {
    let available = available_days_per_week(resource);
    resource_week_percent(resource, items, frame).map(|p| round1(p / 100.0 * available))
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn peak(values: &[f64]) -> f64 {
    values.iter().copied().fold(0.0, f64::max)
}

/// Load summary for one resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLoad {
    pub resource_id: String,
    pub name: String,
    pub available_days_per_week: f64,
    pub week_percent: WeekFigures,
    pub week_days: WeekFigures,
    pub week_bands: [HeatBand; FRAME_WEEKS],
    /// Mean of the four weeks, rounded to a whole percentage.
    pub average_percent: f64,
    pub average_band: HeatBand,
    pub peak_percent: f64,
    /// Any week above 100%.
    pub at_risk: bool,
    /// Non-complete items the resource is assigned to.
    pub open_items: usize,
}

impl ResourceLoad {
    pub fn compute(resource: &Resource, items: &[WorkItem], frame: &PlanningFrame) -> Self {
        let week_percent = resource_week_percent(resource, items, frame);
        let available = available_days_per_week(resource);
        let week_days = week_percent.map(|p| round1(p / 100.0 * available));
        let average = mean(&week_percent).unwrap_or(0.0).round();
        Self {
            resource_id: resource.id.clone(),
            name: resource.name.clone(),
            available_days_per_week: available,
            week_percent,
            week_days,
            week_bands: week_percent.map(HeatBand::from_percent),
            average_percent: average,
            average_band: HeatBand::from_percent(average),
            peak_percent: peak(&week_percent),
            at_risk: week_percent.iter().any(|&p| p > 100.0),
            open_items: items
                .iter()
                .filter(|w| !w.is_complete() && w.is_assigned(&resource.id))
                .count(),
        }
    }
}

/// Team-wide figures. Only defined for a non-empty roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamLoad {
    /// Per-week mean across resources, whole percentages.
    pub week_percent: WeekFigures,
    pub week_bands: [HeatBand; FRAME_WEEKS],
    /// Mean of the four weekly figures, whole percentage.
    pub average_percent: f64,
    pub average_band: HeatBand,
}

impl TeamLoad {
    /// `None` for an empty roster.
    pub fn compute(loads: &[ResourceLoad]) -> Option<Self> {
        if loads.is_empty() {
            return None;
        }
        let n = loads.len() as f64;
        let week_percent: WeekFigures = std::array::from_fn(|i| {
            (loads.iter().map(|l| l.week_percent[i]).sum::<f64>() / n).round()
        });
        let average = mean(&week_percent).unwrap_or(0.0).round();
        Some(Self {
            week_percent,
            week_bands: week_percent.map(HeatBand::from_percent),
            average_percent: average,
            average_band: HeatBand::from_percent(average),
        })
    }
}

/// Headline numbers for a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub in_flight_items: usize,
    /// Sum of every resource's available days per week, one decimal.
    pub total_available_days: f64,
    /// Mean of per-resource four-week averages, whole percentage.
    /// `None` when the roster is empty.
    pub average_load_percent: Option<f64>,
    /// Resources with at least one week above 100%.
    pub at_risk_resources: usize,
}

/// Allocation queries over one snapshot and frame.
#[derive(Debug, Clone, Copy)]
pub struct Allocator<'a> {
    plan: &'a Plan,
    frame: PlanningFrame,
}

impl<'a> Allocator<'a> {
    pub fn new(plan: &'a Plan, frame: PlanningFrame) -> Self {
        Self { plan, frame }
    }

    pub fn frame(&self) -> &PlanningFrame {
        &self.frame
    }

    /// Weekly percentages for a resource, `None` if it is unknown.
    pub fn compute_weekly_load(&self, resource_id: &str) -> Option<WeekFigures> {
        self.plan
            .resource(resource_id)
            .map(|r| resource_week_percent(r, &self.plan.work_items, &self.frame))
    }

    /// Weekly day equivalents for a resource, `None` if it is unknown.
    pub fn compute_weekly_days(&self, resource_id: &str) -> Option<WeekFigures> {
        self.plan
            .resource(resource_id)
            .map(|r| resource_week_days(r, &self.plan.work_items, &self.frame))
    }

    pub fn resource_load(&self, resource_id: &str) -> Option<ResourceLoad> {
        self.plan
            .resource(resource_id)
            .map(|r| ResourceLoad::compute(r, &self.plan.work_items, &self.frame))
    }

    /// Load for every resource, in roster order.
    pub fn resource_loads(&self) -> Vec<ResourceLoad> {
        self.plan
            .resources
            .iter()
            .map(|r| ResourceLoad::compute(r, &self.plan.work_items, &self.frame))
            .collect()
    }

    pub fn team_load(&self) -> Option<TeamLoad> {
        TeamLoad::compute(&self.resource_loads())
    }

    pub fn dashboard(&self) -> DashboardStats {
        let loads = self.resource_loads();
        let total_days: f64 = self.plan.resources.iter().map(available_days_per_week).sum();
        let averages: Vec<f64> = loads
            .iter()
            .map(|l| mean(&l.week_percent).unwrap_or(0.0))
            .collect();
        DashboardStats {
            in_flight_items: self.plan.in_flight().count(),
            total_available_days: round1(total_days),
            average_load_percent: mean(&averages).map(f64::round),
            at_risk_resources: loads.iter().filter(|l| l.at_risk).count(),
        }
    }
}
