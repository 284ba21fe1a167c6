//! Bulk import of work items.
//!
//! Rows arrive loosely typed (every field optional, sizes and statuses as
//! free text) and go through the same clamping and status derivation as an
//! interactive edit before they are merged into the plan.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::estimation::Size;
use crate::model::{Portfolio, WorkItem};
use crate::plan::{generate_work_item_id, Plan};
use crate::status::{Status, StatusTracking};
use crate::validate::{clamp_duration, dedup_ids, parse_date};

const DEFAULT_DURATION: i64 = 20;

/// One untrusted work item row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkItemRecord {
    pub id: Option<String>,
    pub title: String,
    pub portfolio: Option<String>,
    pub category: Option<String>,
    pub size: Option<String>,
    pub duration: Option<i64>,
    pub start_date: Option<String>,
    pub status: Option<String>,
    pub assigned: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// Zero-based position in the input.
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub added: Vec<String>,
    pub updated: Vec<String>,
    pub skipped: Vec<SkippedRow>,
    /// Assignments dropped because the resource does not exist.
    pub dropped_assignments: usize,
}

/// Turn a raw row into a work item valid against `plan`.
///
/// Returns the item and how many assignments were dropped.
fn normalize(
    record: &WorkItemRecord,
    plan: &Plan,
    today: NaiveDate,
) -> Result<(WorkItem, usize), String> {
    let title = record.title.trim();
    if title.is_empty() {
        return Err("missing title".into());
    }

    let size = record
        .size
        .as_deref()
        .map(Size::parse_lenient)
        .unwrap_or_default();
    let portfolio = record
        .portfolio
        .as_deref()
        .and_then(|p| p.parse::<Portfolio>().ok())
        .unwrap_or(Portfolio::Adhoc);
    let category = record
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| plan.categories.iter().any(|k| k == c))
        .unwrap_or_default()
        .to_string();
    let duration = clamp_duration(record.duration.unwrap_or(DEFAULT_DURATION));
    let start_date: Option<NaiveDate> = record.start_date.as_deref().and_then(parse_date);
    let status = record
        .status
        .as_deref()
        .and_then(|s| s.parse::<Status>().ok())
        .unwrap_or_default();

    let requested = dedup_ids(&record.assigned);
    let total = requested.len();
    let assigned: Vec<String> = requested
        .into_iter()
        .filter(|id| plan.resource(id).is_some())
        .collect();
    let dropped = total - assigned.len();

    let id = record
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(generate_work_item_id);

    let tracking = StatusTracking::from_status(status).rederive(start_date, duration, today);

    Ok((
        WorkItem {
            id,
            title: title.to_string(),
            portfolio,
            category,
            size,
            duration,
            start_date,
            status: tracking,
            assigned,
        },
        dropped,
    ))
}

/// Merge rows into `plan`, matching existing items by id.
///
/// Bad rows are reported, never fatal.
pub fn import_work_items(plan: &mut Plan, records: &[WorkItemRecord], today: NaiveDate) -> ImportReport {
    let mut report = ImportReport::default();
    for (row, record) in records.iter().enumerate() {
        match normalize(record, plan, today) {
            Ok((item, dropped)) => {
                report.dropped_assignments += dropped;
                match plan.work_items.iter_mut().find(|w| w.id == item.id) {
                    Some(existing) => {
                        report.updated.push(item.id.clone());
                        *existing = item;
                    }
                    None => {
                        report.added.push(item.id.clone());
                        plan.work_items.push(item);
                    }
                }
            }
            Err(reason) => {
                tracing::warn!(row, %reason, "skipping import row");
                report.skipped.push(SkippedRow { row, reason });
            }
        }
    }
    tracing::info!(
        added = report.added.len(),
        updated = report.updated.len(),
        skipped = report.skipped.len(),
        "import finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn plan() -> Plan {
        let mut plan = Plan::default();
        plan.onboard_resource("Ada", Role::ChangeManager, 1.0, 0.0).unwrap();
        plan
    }

    #[test]
    fn rows_are_clamped_and_derived() {
        let mut plan = plan();
        let rows = vec![WorkItemRecord {
            id: Some("WI-100".into()),
            title: "Migration".into(),
            size: Some("huge".into()),
            duration: Some(999),
            start_date: Some("2026-10-19".into()),
            status: Some("upcoming".into()),
            assigned: vec!["CM01".into(), "CM01".into(), "ZZ01".into()],
            ..Default::default()
        }];
        let report = import_work_items(&mut plan, &rows, today());
        assert_eq!(report.added, vec!["WI-100"]);
        assert_eq!(report.dropped_assignments, 1);
        let item = plan.work_item("WI-100").unwrap();
        assert_eq!(item.size, Size::M);
        assert_eq!(item.duration, 260);
        assert_eq!(item.status(), Status::InProgress);
        assert_eq!(item.assigned, vec!["CM01"]);
    }

    #[test]
    fn pinned_status_survives_import() {
        let mut plan = plan();
        let rows = vec![WorkItemRecord {
            title: "Stuck".into(),
            start_date: Some("2026-10-19".into()),
            status: Some("blocked".into()),
            ..Default::default()
        }];
        import_work_items(&mut plan, &rows, today());
        assert_eq!(plan.work_items[0].status, StatusTracking::Manual(Status::Blocked));
    }

    #[test]
    fn undated_in_progress_kept() {
        let mut plan = plan();
        let rows = vec![WorkItemRecord {
            title: "Ongoing".into(),
            status: Some("progress".into()),
            ..Default::default()
        }];
        import_work_items(&mut plan, &rows, today());
        assert_eq!(plan.work_items[0].status(), Status::InProgress);
        assert_eq!(plan.work_items[0].duration, 20);
    }

    #[test]
    fn bad_date_means_no_date() {
        let mut plan = plan();
        let rows = vec![WorkItemRecord {
            title: "Someday".into(),
            start_date: Some("soon".into()),
            ..Default::default()
        }];
        import_work_items(&mut plan, &rows, today());
        assert!(plan.work_items[0].start_date.is_none());
        assert_eq!(plan.work_items[0].status(), Status::Upcoming);
    }

    #[test]
    fn blank_title_skipped_and_existing_updated() {
        let mut plan = plan();
        let first = vec![WorkItemRecord {
            id: Some("WI-1".into()),
            title: "First".into(),
            ..Default::default()
        }];
        import_work_items(&mut plan, &first, today());

        let second = vec![
            WorkItemRecord {
                id: Some("WI-1".into()),
                title: "First, renamed".into(),
                ..Default::default()
            },
            WorkItemRecord::default(),
        ];
        let report = import_work_items(&mut plan, &second, today());
        assert_eq!(report.updated, vec!["WI-1"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].row, 1);
        assert_eq!(plan.work_items.len(), 1);
        assert_eq!(plan.work_items[0].title, "First, renamed");
    }

    #[test]
    fn records_deserialize_from_sparse_json() {
        let rows: Vec<WorkItemRecord> =
            serde_json::from_str(r#"[{"title":"A","size":"xl","duration":30}]"#).unwrap();
        assert_eq!(rows[0].size.as_deref(), Some("xl"));
        assert!(rows[0].assigned.is_empty());
    }
}
