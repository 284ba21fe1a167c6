//! The planning snapshot and the mutations collaborators perform on it.
//!
//! A [`Plan`] holds everything that gets persisted: the roster, the backlog,
//! the category list and the time of the last write. Every mutation keeps the
//! cross-references intact (assignments only name existing resources, skills
//! only name existing categories), so the allocation engine can trust what it
//! is given.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, Result, ValidationError};
use crate::estimation::Size;
use crate::model::{Portfolio, Resource, Role, WorkItem};
use crate::status::{derive_status, Status, StatusTracking};
use crate::validate::{clamp_baseline, clamp_duration, clamp_fte, clamp_skill, dedup_ids};

/// Categories a fresh plan starts with.
pub const DEFAULT_CATEGORIES: [&str; 12] = [
    "Change Management",
    "Impact Assessment",
    "Project Delivery",
    "Business Analysis",
    "Service Design",
    "Benefits Measurement",
    "Performance Measurement",
    "Process Mapping",
    "Stakeholder Engagement",
    "Data Analysis",
    "Communications",
    "Training & Development",
];

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub work_items: Vec<WorkItem>,
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for Plan {
    fn default() -> Self {
        Self {
            resources: Vec::new(),
            work_items: Vec::new(),
            categories: default_categories(),
            last_updated: None,
        }
    }
}

/// Fields for a new work item. Duration is clamped, assignments must exist.
#[derive(Debug, Clone, Default)]
pub struct NewWorkItem {
    pub title: String,
    pub portfolio: Portfolio,
    pub category: String,
    pub size: Size,
    pub duration: i64,
    pub assigned: Vec<String>,
}

/// Partial update of a resource; `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct ResourceUpdate {
    pub name: Option<String>,
    pub total_fte: Option<f64>,
    pub baseline_commitment: Option<f64>,
}

/// Partial update of a work item; `None` leaves a field as is.
///
/// `start_date: Some(None)` clears the start date.
#[derive(Debug, Clone, Default)]
pub struct WorkItemUpdate {
    pub title: Option<String>,
    pub portfolio: Option<Portfolio>,
    pub category: Option<String>,
    pub size: Option<Size>,
    pub duration: Option<i64>,
    pub start_date: Option<Option<NaiveDate>>,
}

/// Next free id for `role`, e.g. `CM03` after `CM01` and `CM02`.
///
/// Suffixes that do not parse as numbers count as 0.
pub fn generate_resource_id(role: Role, existing: &[Resource]) -> String {
    let prefix = role.id_prefix();
    let next = existing
        .iter()
        .filter_map(|r| r.id.strip_prefix(prefix))
        .map(|suffix| suffix.parse::<u32>().unwrap_or(0))
        .max()
        .map_or(1, |max| max.saturating_add(1));
    format!("{prefix}{next:02}")
}

pub(crate) fn generate_work_item_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("WI-{}", &hex[..8])
}

fn require_text(field: &'static str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Empty(field).into());
    }
    Ok(value.to_string())
}

impl Plan {
    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    pub fn work_item(&self, id: &str) -> Option<&WorkItem> {
        self.work_items.iter().find(|w| w.id == id)
    }

    fn resource_mut(&mut self, id: &str) -> Result<&mut Resource> {
        self.resources
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CoreError::not_found("resource", id))
    }

    fn work_item_mut(&mut self, id: &str) -> Result<&mut WorkItem> {
        self.work_items
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| CoreError::not_found("work item", id))
    }

    fn check_category(&self, category: &str) -> Result<()> {
        if category.is_empty() || self.categories.iter().any(|c| c == category) {
            Ok(())
        } else {
            Err(CoreError::not_found("category", category))
        }
    }

    fn check_assignees(&self, ids: &[String]) -> Result<()> {
        match ids.iter().find(|id| self.resource(id).is_none()) {
            Some(missing) => Err(CoreError::not_found("resource", missing.as_str())),
            None => Ok(()),
        }
    }

    /// Work items that are not complete.
    pub fn in_flight(&self) -> impl Iterator<Item = &WorkItem> {
        self.work_items.iter().filter(|w| !w.is_complete())
    }

    // ── Resources ───────────────────────────────────────────────────────

    /// Add a resource with an id derived from its role.
    ///
    /// FTE and baseline are clamped; every known category is seeded at
    /// skill level 0.
    pub fn onboard_resource(
        &mut self,
        name: &str,
        role: Role,
        total_fte: f64,
        baseline_commitment: f64,
    ) -> Result<&Resource> {
        let name = require_text("name", name)?;
        let id = generate_resource_id(role, &self.resources);
        let skills = self.categories.iter().map(|c| (c.clone(), 0)).collect();
        tracing::debug!(%id, %role, "onboarding resource");
        let idx = self.resources.len();
        self.resources.push(Resource {
            id,
            name,
            role,
            total_fte: clamp_fte(total_fte),
            baseline_commitment: clamp_baseline(baseline_commitment),
            skills,
        });
        Ok(&self.resources[idx])
    }

    pub fn update_resource(&mut self, id: &str, update: ResourceUpdate) -> Result<&Resource> {
        let name = update
            .name
            .as_deref()
            .map(|n| require_text("name", n))
            .transpose()?;
        let resource = self.resource_mut(id)?;
        if let Some(name) = name {
            resource.name = name;
        }
        if let Some(fte) = update.total_fte {
            resource.total_fte = clamp_fte(fte);
        }
        if let Some(baseline) = update.baseline_commitment {
            resource.baseline_commitment = clamp_baseline(baseline);
        }
        Ok(&*resource)
    }

    /// Remove a resource and unassign it from every work item.
    pub fn delete_resource(&mut self, id: &str) -> Result<Resource> {
        let idx = self
            .resources
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| CoreError::not_found("resource", id))?;
        let removed = self.resources.remove(idx);

        let mut unassigned = 0usize;
        for item in &mut self.work_items {
            let before = item.assigned.len();
            item.assigned.retain(|r| r != id);
            unassigned += before - item.assigned.len();
        }
        tracing::info!(resource = %id, unassigned, "resource deleted");
        Ok(removed)
    }

    pub fn set_skill(&mut self, resource_id: &str, category: &str, level: i64) -> Result<&Resource> {
        if !self.categories.iter().any(|c| c == category) {
            return Err(CoreError::not_found("category", category));
        }
        let resource = self.resource_mut(resource_id)?;
        resource.skills.insert(category.to_string(), clamp_skill(level));
        Ok(&*resource)
    }

    // ── Work items ──────────────────────────────────────────────────────

    /// Add a work item. It starts `upcoming` with no start date.
    pub fn add_work_item(&mut self, new: NewWorkItem) -> Result<&WorkItem> {
        let title = require_text("title", &new.title)?;
        let category = new.category.trim().to_string();
        self.check_category(&category)?;
        let assigned = dedup_ids(&new.assigned);
        self.check_assignees(&assigned)?;

        let id = generate_work_item_id();
        tracing::debug!(%id, size = %new.size, "adding work item");
        let idx = self.work_items.len();
        self.work_items.push(WorkItem {
            id,
            title,
            portfolio: new.portfolio,
            category,
            size: new.size,
            duration: clamp_duration(new.duration),
            start_date: None,
            status: StatusTracking::Auto(Status::Upcoming),
            assigned,
        });
        Ok(&self.work_items[idx])
    }

    /// Apply an edit. Changing the start date or duration re-derives the
    /// status against `today` unless it is pinned.
    pub fn update_work_item(
        &mut self,
        id: &str,
        update: WorkItemUpdate,
        today: NaiveDate,
    ) -> Result<&WorkItem> {
        let title = update
            .title
            .as_deref()
            .map(|t| require_text("title", t))
            .transpose()?;
        let category = update.category.as_deref().map(|c| c.trim().to_string());
        if let Some(ref c) = category {
            self.check_category(c)?;
        }

        let item = self.work_item_mut(id)?;
        if let Some(title) = title {
            item.title = title;
        }
        if let Some(portfolio) = update.portfolio {
            item.portfolio = portfolio;
        }
        if let Some(category) = category {
            item.category = category;
        }
        if let Some(size) = update.size {
            item.size = size;
        }

        let duration_changed = update.duration.is_some();
        if let Some(duration) = update.duration {
            item.duration = clamp_duration(duration);
        }
        let start_changed = update.start_date.is_some();
        if let Some(start) = update.start_date {
            item.start_date = start;
        }
        if start_changed || duration_changed {
            let before = item.status;
            // An edited start date always decides; a duration edit alone
            // leaves an undated item's status as is.
            item.status = if start_changed {
                item.status.rederive_strict(item.start_date, item.duration, today)
            } else {
                item.status.rederive(item.start_date, item.duration, today)
            };
            if before != item.status {
                tracing::debug!(id = %item.id, from = %before.status(), to = %item.status(), "status re-derived");
            }
        }
        Ok(&*item)
    }

    /// Set a status by hand.
    ///
    /// - `blocked` and `complete` are pinned.
    /// - `in-progress` moves the start date to today when there is none, or
    ///   when the existing dates would not put the item in progress today.
    /// - `upcoming` clears a start date that is today or earlier.
    pub fn set_status(&mut self, id: &str, status: Status, today: NaiveDate) -> Result<&WorkItem> {
        let item = self.work_item_mut(id)?;
        item.status = match status {
            Status::Blocked | Status::Complete => StatusTracking::Manual(status),
            Status::InProgress => {
                if derive_status(item.start_date, item.duration, today) != Status::InProgress {
                    item.start_date = Some(today);
                }
                StatusTracking::Auto(Status::InProgress)
            }
            Status::Upcoming => {
                if item.start_date.is_some_and(|start| start <= today) {
                    item.start_date = None;
                }
                StatusTracking::Auto(Status::Upcoming)
            }
        };
        Ok(&*item)
    }

    pub fn assign(&mut self, id: &str, resource_id: &str) -> Result<&WorkItem> {
        if self.resource(resource_id).is_none() {
            return Err(CoreError::not_found("resource", resource_id));
        }
        let item = self.work_item_mut(id)?;
        if !item.is_assigned(resource_id) {
            item.assigned.push(resource_id.to_string());
        }
        Ok(&*item)
    }

    pub fn unassign(&mut self, id: &str, resource_id: &str) -> Result<&WorkItem> {
        let item = self.work_item_mut(id)?;
        item.assigned.retain(|r| r != resource_id);
        Ok(&*item)
    }

    /// Remove a work item. Resources are left untouched.
    pub fn delete_work_item(&mut self, id: &str) -> Result<WorkItem> {
        let idx = self
            .work_items
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| CoreError::not_found("work item", id))?;
        Ok(self.work_items.remove(idx))
    }

    /// Re-derive every unpinned dated item against `today`.
    ///
    /// Returns how many statuses changed.
    pub fn refresh_statuses(&mut self, today: NaiveDate) -> usize {
        let mut changed = 0;
        for item in &mut self.work_items {
            let next = item.status.rederive(item.start_date, item.duration, today);
            if next != item.status {
                tracing::debug!(id = %item.id, from = %item.status(), to = %next.status(), "status re-derived");
                item.status = next;
                changed += 1;
            }
        }
        changed
    }

    // ── Categories ──────────────────────────────────────────────────────

    pub fn add_category(&mut self, name: &str) -> Result<()> {
        let name = require_text("category", name)?;
        if self.categories.contains(&name) {
            return Err(ValidationError::Duplicate {
                kind: "category",
                value: name,
            }
            .into());
        }
        for resource in &mut self.resources {
            resource.skills.insert(name.clone(), 0);
        }
        self.categories.push(name);
        Ok(())
    }

    /// Rename a category, carrying skill levels and work item tags along.
    pub fn rename_category(&mut self, from: &str, to: &str) -> Result<()> {
        let to = require_text("category", to)?;
        let idx = self
            .categories
            .iter()
            .position(|c| c == from)
            .ok_or_else(|| CoreError::not_found("category", from))?;
        if to == from {
            return Ok(());
        }
        if self.categories.contains(&to) {
            return Err(ValidationError::Duplicate {
                kind: "category",
                value: to,
            }
            .into());
        }
        self.categories[idx] = to.clone();
        for resource in &mut self.resources {
            if let Some(level) = resource.skills.remove(from) {
                resource.skills.insert(to.clone(), level);
            }
        }
        for item in &mut self.work_items {
            if item.category == from {
                item.category = to.clone();
            }
        }
        Ok(())
    }

    /// Delete a category. Skill entries go, tagged work items become
    /// uncategorised.
    pub fn delete_category(&mut self, name: &str) -> Result<()> {
        let before = self.categories.len();
        self.categories.retain(|c| c != name);
        if self.categories.len() == before {
            return Err(CoreError::not_found("category", name));
        }
        for resource in &mut self.resources {
            resource.skills.remove(name);
        }
        for item in &mut self.work_items {
            if item.category == name {
                item.category.clear();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn plan_with_two() -> (Plan, String, String) {
        let mut plan = Plan::default();
        let a = plan
            .onboard_resource("Ada Lovelace", Role::ChangeManager, 1.0, 0.0)
            .unwrap()
            .id
            .clone();
        let b = plan
            .onboard_resource("Grace Hopper", Role::ProjectManager, 0.8, 0.2)
            .unwrap()
            .id
            .clone();
        (plan, a, b)
    }

    fn new_item(title: &str, assigned: &[&str]) -> NewWorkItem {
        NewWorkItem {
            title: title.into(),
            duration: 20,
            assigned: assigned.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn ids_follow_role_prefix() {
        let (mut plan, a, b) = plan_with_two();
        assert_eq!(a, "CM01");
        assert_eq!(b, "PM01");
        let c = plan
            .onboard_resource("Alan Turing", Role::HeadOfChange, 1.0, 0.0)
            .unwrap();
        assert_eq!(c.id, "CM02");
    }

    #[test]
    fn id_continues_from_highest_suffix() {
        let (mut plan, _, _) = plan_with_two();
        plan.resources[0].id = "CM09".into();
        let next = generate_resource_id(Role::ChangeManager, &plan.resources);
        assert_eq!(next, "CM10");
        assert_eq!(generate_resource_id(Role::DirectorOfChange, &plan.resources), "DC01");
    }

    #[test]
    fn onboarding_clamps_and_seeds_skills() {
        let mut plan = Plan::default();
        let r = plan
            .onboard_resource("Edsger", Role::BusinessAnalyst, 3.0, -1.0)
            .unwrap();
        assert_eq!(r.total_fte, 1.0);
        assert_eq!(r.baseline_commitment, 0.0);
        assert_eq!(r.skills.len(), DEFAULT_CATEGORIES.len());
        assert!(r.skills.values().all(|&l| l == 0));
    }

    #[test]
    fn blank_name_rejected() {
        let mut plan = Plan::default();
        let err = plan
            .onboard_resource("   ", Role::ChangeManager, 1.0, 0.0)
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::Empty("name"))));
    }

    #[test]
    fn new_item_is_upcoming_and_undated() {
        let (mut plan, a, _) = plan_with_two();
        let item = plan.add_work_item(new_item("Survey", &[&a, &a])).unwrap();
        assert_eq!(item.status(), Status::Upcoming);
        assert!(item.start_date.is_none());
        assert_eq!(item.assigned, vec![a]);
        assert!(item.id.starts_with("WI-"));
    }

    #[test]
    fn assigning_unknown_resource_fails() {
        let (mut plan, _, _) = plan_with_two();
        let err = plan.add_work_item(new_item("Survey", &["XX99"])).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { kind: "resource", .. }));
    }

    #[test]
    fn deleting_resource_cascades_to_assignments() {
        let (mut plan, a, b) = plan_with_two();
        plan.add_work_item(new_item("One", &[&a, &b])).unwrap();
        plan.add_work_item(new_item("Two", &[&a])).unwrap();
        plan.delete_resource(&a).unwrap();
        assert!(plan.work_items.iter().all(|w| !w.is_assigned(&a)));
        assert_eq!(plan.work_items[0].assigned, vec![b]);
        assert_eq!(plan.work_items.len(), 2);
    }

    #[test]
    fn deleting_work_item_leaves_resources() {
        let (mut plan, a, _) = plan_with_two();
        let id = plan.add_work_item(new_item("One", &[&a])).unwrap().id.clone();
        let before = plan.resources.clone();
        plan.delete_work_item(&id).unwrap();
        assert_eq!(plan.resources, before);
        assert!(plan.work_items.is_empty());
    }

    #[test]
    fn editing_start_rederives() {
        let (mut plan, a, _) = plan_with_two();
        let today = d("2026-10-19");
        let id = plan.add_work_item(new_item("One", &[&a])).unwrap().id.clone();
        let item = plan
            .update_work_item(
                &id,
                WorkItemUpdate {
                    start_date: Some(Some(today)),
                    ..Default::default()
                },
                today,
            )
            .unwrap();
        assert_eq!(item.status(), Status::InProgress);

        let item = plan
            .update_work_item(
                &id,
                WorkItemUpdate {
                    start_date: Some(Some(d("2026-08-03"))),
                    duration: Some(5),
                    ..Default::default()
                },
                today,
            )
            .unwrap();
        assert_eq!(item.status(), Status::Complete);
        assert!(!item.status.is_pinned());
    }

    #[test]
    fn clearing_start_makes_item_upcoming() {
        let (mut plan, a, _) = plan_with_two();
        let today = d("2026-10-19");
        let id = plan.add_work_item(new_item("One", &[&a])).unwrap().id.clone();
        for start in [Some(today), None] {
            plan.update_work_item(
                &id,
                WorkItemUpdate {
                    start_date: Some(start),
                    ..Default::default()
                },
                today,
            )
            .unwrap();
        }
        assert_eq!(plan.work_item(&id).unwrap().status(), Status::Upcoming);

        let frame = crate::window::PlanningFrame::anchored(today);
        let load = crate::allocation::Allocator::new(&plan, frame).compute_weekly_load(&a);
        assert_eq!(load, Some([0.0; 4]));
    }

    #[test]
    fn duration_edit_keeps_undated_in_progress() {
        let (mut plan, a, _) = plan_with_two();
        let today = d("2026-10-19");
        let id = plan.add_work_item(new_item("One", &[&a])).unwrap().id.clone();
        plan.work_items[0].status = StatusTracking::Auto(Status::InProgress);
        let item = plan
            .update_work_item(
                &id,
                WorkItemUpdate {
                    duration: Some(10),
                    ..Default::default()
                },
                today,
            )
            .unwrap();
        assert_eq!(item.status(), Status::InProgress);
    }

    #[test]
    fn id_suffix_at_limit_does_not_overflow() {
        let (mut plan, _, _) = plan_with_two();
        plan.resources[0].id = format!("CM{}", u32::MAX);
        assert_eq!(generate_resource_id(Role::ChangeManager, &plan.resources), format!("CM{}", u32::MAX));
    }

    #[test]
    fn pinned_status_ignores_date_edits() {
        let (mut plan, a, _) = plan_with_two();
        let today = d("2026-10-19");
        let id = plan.add_work_item(new_item("One", &[&a])).unwrap().id.clone();
        plan.set_status(&id, Status::Blocked, today).unwrap();
        let item = plan
            .update_work_item(
                &id,
                WorkItemUpdate {
                    start_date: Some(Some(d("2026-01-05"))),
                    ..Default::default()
                },
                today,
            )
            .unwrap();
        assert_eq!(item.status, StatusTracking::Manual(Status::Blocked));
        assert_eq!(plan.refresh_statuses(d("2027-06-01")), 0);
    }

    #[test]
    fn in_progress_without_date_starts_today() {
        let (mut plan, a, _) = plan_with_two();
        let today = d("2026-10-21");
        let id = plan.add_work_item(new_item("One", &[&a])).unwrap().id.clone();
        let item = plan.set_status(&id, Status::InProgress, today).unwrap();
        assert_eq!(item.start_date, Some(today));
        assert_eq!(item.status, StatusTracking::Auto(Status::InProgress));
    }

    #[test]
    fn upcoming_clears_past_start() {
        let (mut plan, a, _) = plan_with_two();
        let today = d("2026-10-21");
        let id = plan.add_work_item(new_item("One", &[&a])).unwrap().id.clone();
        plan.set_status(&id, Status::InProgress, today).unwrap();
        let item = plan.set_status(&id, Status::Upcoming, today).unwrap();
        assert!(item.start_date.is_none());
        assert_eq!(item.status(), Status::Upcoming);
    }

    #[test]
    fn upcoming_keeps_future_start() {
        let (mut plan, a, _) = plan_with_two();
        let today = d("2026-10-21");
        let future = d("2026-11-16");
        let id = plan.add_work_item(new_item("One", &[&a])).unwrap().id.clone();
        plan.update_work_item(
            &id,
            WorkItemUpdate {
                start_date: Some(Some(future)),
                ..Default::default()
            },
            today,
        )
        .unwrap();
        let item = plan.set_status(&id, Status::Upcoming, today).unwrap();
        assert_eq!(item.start_date, Some(future));
    }

    #[test]
    fn refresh_moves_items_along() {
        let (mut plan, a, _) = plan_with_two();
        let id = plan.add_work_item(new_item("One", &[&a])).unwrap().id.clone();
        plan.update_work_item(
            &id,
            WorkItemUpdate {
                start_date: Some(Some(d("2026-10-26"))),
                duration: Some(5),
                ..Default::default()
            },
            d("2026-10-19"),
        )
        .unwrap();
        assert_eq!(plan.work_items[0].status(), Status::Upcoming);
        assert_eq!(plan.refresh_statuses(d("2026-10-27")), 1);
        assert_eq!(plan.work_items[0].status(), Status::InProgress);
        assert_eq!(plan.refresh_statuses(d("2026-11-02")), 1);
        assert_eq!(plan.work_items[0].status(), Status::Complete);
    }

    #[test]
    fn assign_is_idempotent() {
        let (mut plan, a, b) = plan_with_two();
        let id = plan.add_work_item(new_item("One", &[&a])).unwrap().id.clone();
        plan.assign(&id, &a).unwrap();
        let item = plan.assign(&id, &b).unwrap();
        assert_eq!(item.assigned, vec![a.clone(), b.clone()]);
        let item = plan.unassign(&id, &a).unwrap();
        assert_eq!(item.assigned, vec![b]);
    }

    #[test]
    fn category_rename_propagates() {
        let (mut plan, a, _) = plan_with_two();
        plan.set_skill(&a, "Data Analysis", 4).unwrap();
        let id = plan
            .add_work_item(NewWorkItem {
                category: "Data Analysis".into(),
                ..new_item("One", &[])
            })
            .unwrap()
            .id
            .clone();
        plan.rename_category("Data Analysis", "Analytics").unwrap();
        assert!(plan.categories.contains(&"Analytics".to_string()));
        assert_eq!(plan.resource(&a).unwrap().skill("Analytics"), 4);
        assert!(!plan.resource(&a).unwrap().skills.contains_key("Data Analysis"));
        assert_eq!(plan.work_item(&id).unwrap().category, "Analytics");
    }

    #[test]
    fn category_rename_rejects_existing_name() {
        let mut plan = Plan::default();
        let err = plan.rename_category("Data Analysis", "Communications").unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::Duplicate { .. })));
    }

    #[test]
    fn category_delete_clears_tags() {
        let (mut plan, a, _) = plan_with_two();
        let id = plan
            .add_work_item(NewWorkItem {
                category: "Communications".into(),
                ..new_item("One", &[])
            })
            .unwrap()
            .id
            .clone();
        plan.delete_category("Communications").unwrap();
        assert_eq!(plan.work_item(&id).unwrap().category, "");
        assert!(!plan.resource(&a).unwrap().skills.contains_key("Communications"));
    }

    #[test]
    fn new_category_seeds_skills() {
        let (mut plan, a, _) = plan_with_two();
        plan.add_category("Procurement").unwrap();
        assert_eq!(plan.resource(&a).unwrap().skills.get("Procurement"), Some(&0));
        assert!(plan.add_category("Procurement").is_err());
    }

    #[test]
    fn skill_levels_clamped() {
        let (mut plan, a, _) = plan_with_two();
        let r = plan.set_skill(&a, "Service Design", 9).unwrap();
        assert_eq!(r.skill("Service Design"), 5);
        assert!(plan.set_skill(&a, "Astrology", 3).is_err());
    }

    #[test]
    fn unknown_category_on_item_rejected() {
        let mut plan = Plan::default();
        let err = plan
            .add_work_item(NewWorkItem {
                category: "Astrology".into(),
                ..new_item("One", &[])
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound { kind: "category", .. }));
    }
}
