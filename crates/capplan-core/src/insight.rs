//! Staffing hints derived from skills and current load.

use serde::{Deserialize, Serialize};

use crate::allocation::resource_week_percent;
use crate::model::Resource;
use crate::plan::Plan;
use crate::validate::MAX_SKILL;
use crate::window::PlanningFrame;

const SKILL_WEIGHT: f64 = 0.6;
const AVAILABILITY_WEIGHT: f64 = 0.4;
const MIN_SCORE: f64 = 0.1;

/// A resource worth considering for a work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub resource_id: String,
    pub name: String,
    pub skill_level: u8,
    /// Mean weekly load, whole percentage.
    pub average_load: f64,
    pub score: f64,
}

fn score(resource: &Resource, category: &str, plan: &Plan, frame: &PlanningFrame) -> Suggestion {
    let level = resource.skill(category);
    let weeks = resource_week_percent(resource, &plan.work_items, frame);
    let average = weeks.iter().sum::<f64>() / weeks.len() as f64;
    let skill = level as f64 / MAX_SKILL as f64;
    let availability = ((100.0 - average) / 100.0).max(0.0);
    Suggestion {
        resource_id: resource.id.clone(),
        name: resource.name.clone(),
        skill_level: level,
        average_load: average.round(),
        score: skill * SKILL_WEIGHT + availability * AVAILABILITY_WEIGHT,
    }
}

/// Best-placed resources for work in `category`, highest score first.
///
/// Scores blend skill (60%) with spare capacity (40%). Resources in
/// `exclude` and anyone scoring 0.1 or less are left out.
pub fn suggest_resources(
    plan: &Plan,
    category: &str,
    exclude: &[String],
    frame: &PlanningFrame,
    limit: usize,
) -> Vec<Suggestion> {
    let mut out: Vec<Suggestion> = plan
        .resources
        .iter()
        .filter(|r| !exclude.contains(&r.id))
        .map(|r| score(r, category, plan, frame))
        .filter(|s| s.score > MIN_SCORE)
        .collect();
    out.sort_by(|a, b| b.score.total_cmp(&a.score));
    out.truncate(limit);
    out
}

/// Skill supply against open demand for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCoverage {
    pub category: String,
    /// Sum of skill levels x 20, capped at 100.
    pub capacity: u32,
    /// Open items in the category x 25, capped at 100.
    pub demand: u32,
    /// `demand - capacity`; positive means a shortfall.
    pub gap: i32,
}

/// Coverage for the first `limit` categories, in list order.
pub fn category_coverage(plan: &Plan, limit: usize) -> Vec<CategoryCoverage> {
    plan.categories
        .iter()
        .take(limit)
        .map(|cat| {
            let capacity: u32 = plan
                .resources
                .iter()
                .map(|r| r.skill(cat) as u32 * 20)
                .sum::<u32>()
                .min(100);
            let demand = (plan.in_flight().filter(|w| &w.category == cat).count() as u32 * 25).min(100);
            CategoryCoverage {
                category: cat.clone(),
                capacity,
                demand,
                gap: demand as i32 - capacity as i32,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;
    use crate::plan::NewWorkItem;
    use crate::status::Status;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn plan() -> Plan {
        let mut plan = Plan::default();
        plan.onboard_resource("Ada", Role::ChangeManager, 1.0, 0.0).unwrap();
        plan.onboard_resource("Grace", Role::ProjectManager, 1.0, 0.0).unwrap();
        plan.onboard_resource("Alan", Role::BusinessAnalyst, 1.0, 0.0).unwrap();
        plan.set_skill("CM01", "Data Analysis", 5).unwrap();
        plan.set_skill("PM01", "Data Analysis", 3).unwrap();
        plan
    }

    #[test]
    fn skilled_and_free_ranks_first() {
        let plan = plan();
        let frame = PlanningFrame::anchored(today());
        let s = suggest_resources(&plan, "Data Analysis", &[], &frame, 4);
        let ids: Vec<&str> = s.iter().map(|s| s.resource_id.as_str()).collect();
        assert_eq!(ids, vec!["CM01", "PM01", "PBA01"]);
        assert!((s[0].score - 1.0).abs() < 1e-9);
        // No skill but fully free still clears the threshold
        assert!((s[2].score - 0.4).abs() < 1e-9);
    }

    #[test]
    fn load_pushes_resource_down() {
        let mut plan = plan();
        let id = plan
            .add_work_item(NewWorkItem {
                title: "Busy".into(),
                duration: 10,
                size: crate::estimation::Size::L,
                assigned: vec!["CM01".into()],
                ..Default::default()
            })
            .unwrap()
            .id
            .clone();
        plan.set_status(&id, Status::InProgress, today()).unwrap();
        let frame = PlanningFrame::anchored(today());
        let s = suggest_resources(&plan, "Data Analysis", &[], &frame, 4);
        assert_eq!(s[0].resource_id, "PM01");
        let ada = s.iter().find(|s| s.resource_id == "CM01").unwrap();
        assert_eq!(ada.average_load, 75.0);
    }

    #[test]
    fn excluded_and_limited() {
        let plan = plan();
        let frame = PlanningFrame::anchored(today());
        let s = suggest_resources(&plan, "Data Analysis", &["CM01".to_string()], &frame, 1);
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].resource_id, "PM01");
    }

    #[test]
    fn coverage_caps_and_gaps() {
        let mut plan = plan();
        for title in ["One", "Two", "Three", "Four", "Five"] {
            plan.add_work_item(NewWorkItem {
                title: title.into(),
                category: "Data Analysis".into(),
                duration: 20,
                ..Default::default()
            })
            .unwrap();
        }
        let coverage = category_coverage(&plan, usize::MAX);
        let data = coverage.iter().find(|c| c.category == "Data Analysis").unwrap();
        assert_eq!(data.capacity, 100);
        assert_eq!(data.demand, 100);
        assert_eq!(data.gap, 0);
        let comms = coverage.iter().find(|c| c.category == "Communications").unwrap();
        assert_eq!((comms.capacity, comms.demand, comms.gap), (0, 0, 0));
    }

    #[test]
    fn coverage_respects_limit() {
        let plan = plan();
        assert_eq!(category_coverage(&plan, 5).len(), 5);
    }
}
