//! Read-only allocation reports over the current frame.

use capplan_core::{
    category_coverage, compute_work_item_estimate, suggest_resources, Config, DashboardStats,
    ResourceLoad, Size, TeamLoad, FRAME_WEEKS,
};
use serde::Serialize;

use super::{print_json, split_list, CmdResult, Session};

#[derive(Serialize)]
struct LoadReport {
    weeks: [String; FRAME_WEEKS],
    resources: Vec<ResourceLoad>,
}

#[derive(Serialize)]
struct TeamReport {
    weeks: [String; FRAME_WEEKS],
    team: Option<TeamLoad>,
}

#[derive(Serialize)]
struct StatsReport {
    #[serde(flatten)]
    stats: DashboardStats,
    last_updated: Option<chrono::DateTime<chrono::Utc>>,
}

/// Weekly load for one resource, or every resource.
pub fn load(session: &Session, resource: Option<String>) -> CmdResult {
    let allocator = session.allocator();
    let resources = match resource {
        Some(id) => vec![allocator
            .resource_load(&id)
            .ok_or_else(|| format!("Resource not found: {id}"))?],
        None => allocator.resource_loads(),
    };
    print_json(&LoadReport {
        weeks: allocator.frame().labels(),
        resources,
    })
}

pub fn team(session: &Session) -> CmdResult {
    let allocator = session.allocator();
    print_json(&TeamReport {
        weeks: allocator.frame().labels(),
        team: allocator.team_load(),
    })
}

pub fn stats(session: &Session) -> CmdResult {
    print_json(&StatsReport {
        stats: session.allocator().dashboard(),
        last_updated: session.plan.last_updated,
    })
}

/// Estimate without touching the plan.
pub fn estimate(size: Size, duration: u32, assigned: usize) -> CmdResult {
    print_json(&compute_work_item_estimate(size, duration, assigned))
}

/// Suggest resources for a work item's category, or for a bare category.
///
/// For an item, its current assignees are excluded.
pub fn suggest(
    session: &Session,
    item: Option<String>,
    category: Option<String>,
    exclude: Option<String>,
) -> CmdResult {
    let mut excluded = exclude.as_deref().map(split_list).unwrap_or_default();
    let category = match (item, category) {
        (Some(id), _) => {
            let item = session
                .plan
                .work_item(&id)
                .ok_or_else(|| format!("Work item not found: {id}"))?;
            excluded.extend(item.assigned.iter().cloned());
            item.category.clone()
        }
        (None, Some(category)) => category,
        (None, None) => return Err("either an item id or --category is required".into()),
    };
    let limit = Config::load_or_default().suggestions.limit;
    let suggestions = suggest_resources(&session.plan, &category, &excluded, &session.frame(), limit);
    print_json(&suggestions)
}

pub fn coverage(session: &Session, limit: Option<usize>) -> CmdResult {
    let limit = limit.unwrap_or_else(|| Config::load_or_default().display.coverage_categories);
    print_json(&category_coverage(&session.plan, limit))
}
