//! Roster and backlog types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::calendar::DAYS_PER_FTE;
use crate::estimation::{compute_work_item_estimate, Estimate, Size};
use crate::status::{Status, StatusTracking};

/// Job role of a resource. Determines the id prefix given at onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    ChangeManager,
    HeadOfChange,
    ProjectManager,
    HeadOfPmo,
    ProjectAnalyst,
    BusinessAnalyst,
    ProjectSupportOfficer,
    DirectorOfChange,
}

impl Role {
    pub const ALL: [Role; 8] = [
        Role::ChangeManager,
        Role::HeadOfChange,
        Role::ProjectManager,
        Role::HeadOfPmo,
        Role::ProjectAnalyst,
        Role::BusinessAnalyst,
        Role::ProjectSupportOfficer,
        Role::DirectorOfChange,
    ];

    pub fn id_prefix(self) -> &'static str {
        match self {
            Role::ChangeManager | Role::HeadOfChange => "CM",
            Role::ProjectManager | Role::HeadOfPmo => "PM",
            Role::ProjectAnalyst | Role::BusinessAnalyst => "PBA",
            Role::ProjectSupportOfficer => "PSO",
            Role::DirectorOfChange => "DC",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::ChangeManager => "Change Manager",
            Role::HeadOfChange => "Head of Change",
            Role::ProjectManager => "Project Manager",
            Role::HeadOfPmo => "Head of PMO",
            Role::ProjectAnalyst => "Project Analyst",
            Role::BusinessAnalyst => "Business Analyst",
            Role::ProjectSupportOfficer => "Project Support Officer",
            Role::DirectorOfChange => "Director of Change",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = String;

    /// Accepts either the display label ("Head of PMO") or its kebab-case
    /// form ("head-of-pmo"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        Role::ALL
            .into_iter()
            .find(|r| r.label().to_ascii_lowercase() == wanted)
            .ok_or_else(|| format!("unknown role: {s}"))
    }
}

/// Portfolio a work item is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Portfolio {
    #[default]
    Pstom,
    Integration,
    Strategic,
    Adhoc,
}

impl Portfolio {
    pub fn label(self) -> &'static str {
        match self {
            Portfolio::Pstom => "PSTOM",
            Portfolio::Integration => "Integration",
            Portfolio::Strategic => "Strategic",
            Portfolio::Adhoc => "Ad-hoc",
        }
    }
}

impl FromStr for Portfolio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "").as_str() {
            "pstom" => Ok(Portfolio::Pstom),
            "integration" => Ok(Portfolio::Integration),
            "strategic" => Ok(Portfolio::Strategic),
            "adhoc" => Ok(Portfolio::Adhoc),
            other => Err(format!("unknown portfolio: {other}")),
        }
    }
}

/// A member of staff whose weekly capacity is planned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub role: Role,
    /// Contracted fraction of a full week, in `(0, 1]`.
    pub total_fte: f64,
    /// Fraction of `total_fte` already committed outside the backlog.
    #[serde(default)]
    pub baseline_commitment: f64,
    /// Category name to skill level (0..=5).
    #[serde(default)]
    pub skills: BTreeMap<String, u8>,
}

impl Resource {
    /// FTE left for backlog work, never negative.
    pub fn available_fraction(&self) -> f64 {
        (self.total_fte - self.baseline_commitment).max(0.0)
    }

    pub fn skill(&self, category: &str) -> u8 {
        self.skills.get(category).copied().unwrap_or(0)
    }
}

/// Days per week a resource can give to backlog work.
pub fn available_days_per_week(resource: &Resource) -> f64 {
    resource.available_fraction() * DAYS_PER_FTE
}

/// A sized piece of backlog work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub portfolio: Portfolio,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub size: Size,
    /// Working days, `1..=260`.
    pub duration: u32,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: StatusTracking,
    /// Assigned resource ids, no duplicates.
    #[serde(default)]
    pub assigned: Vec<String>,
}

impl WorkItem {
    pub fn status(&self) -> Status {
        self.status.status()
    }

    pub fn is_complete(&self) -> bool {
        self.status() == Status::Complete
    }

    pub fn is_assigned(&self, resource_id: &str) -> bool {
        self.assigned.iter().any(|r| r == resource_id)
    }

    pub fn estimate(&self) -> Estimate {
        compute_work_item_estimate(self.size, self.duration, self.assigned.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(total: f64, baseline: f64) -> Resource {
        Resource {
            id: "CM01".into(),
            name: "Ada Lovelace".into(),
            role: Role::ChangeManager,
            total_fte: total,
            baseline_commitment: baseline,
            skills: BTreeMap::new(),
        }
    }

    #[test]
    fn available_days_full_time() {
        assert_eq!(available_days_per_week(&resource(1.0, 0.0)), 5.0);
    }

    #[test]
    fn available_days_with_baseline() {
        assert!((available_days_per_week(&resource(0.8, 0.2)) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn over_committed_is_zero_not_negative() {
        assert_eq!(available_days_per_week(&resource(0.5, 0.9)), 0.0);
    }

    #[test]
    fn role_prefixes() {
        assert_eq!(Role::HeadOfChange.id_prefix(), "CM");
        assert_eq!(Role::HeadOfPmo.id_prefix(), "PM");
        assert_eq!(Role::BusinessAnalyst.id_prefix(), "PBA");
        assert_eq!(Role::ProjectSupportOfficer.id_prefix(), "PSO");
        assert_eq!(Role::DirectorOfChange.id_prefix(), "DC");
    }

    #[test]
    fn role_parses_label_and_kebab() {
        assert_eq!("Head of PMO".parse::<Role>().unwrap(), Role::HeadOfPmo);
        assert_eq!("project-support-officer".parse::<Role>().unwrap(), Role::ProjectSupportOfficer);
        assert!("Wizard".parse::<Role>().is_err());
    }

    #[test]
    fn portfolio_parses_hyphenated() {
        assert_eq!("Ad-hoc".parse::<Portfolio>().unwrap(), Portfolio::Adhoc);
        assert_eq!("PSTOM".parse::<Portfolio>().unwrap(), Portfolio::Pstom);
    }

    #[test]
    fn work_item_defaults_on_sparse_json() {
        let item: WorkItem =
            serde_json::from_str(r#"{"id":"WI-1","title":"Survey","duration":10}"#).unwrap();
        assert_eq!(item.size, Size::M);
        assert_eq!(item.status(), Status::Upcoming);
        assert!(item.start_date.is_none());
        assert!(item.assigned.is_empty());
    }
}
