//! Work item (backlog) commands.

use std::path::PathBuf;

use capplan_core::{
    import_work_items, Config, Estimate, NewWorkItem, Portfolio, Size, Status, WorkItem,
    WorkItemRecord, WorkItemUpdate,
};
use chrono::NaiveDate;
use clap::Subcommand;
use serde::Serialize;

use super::{print_json, split_list, CmdResult, Session};

#[derive(Subcommand)]
pub enum ItemAction {
    /// Add a work item to the backlog
    Add {
        /// Item title
        title: String,
        /// Category (must already exist); omit for none
        #[arg(long)]
        category: Option<String>,
        /// T-shirt size: XS, S, M, L, XL, XXL
        #[arg(long)]
        size: Option<Size>,
        /// Duration in working days
        #[arg(long)]
        duration: Option<i64>,
        /// Portfolio: pstom, integration, strategic, adhoc
        #[arg(long)]
        portfolio: Option<Portfolio>,
        /// Comma-separated resource IDs
        #[arg(long)]
        assign: Option<String>,
    },
    /// List work items
    List {
        /// Filter by status
        #[arg(long)]
        status: Option<Status>,
        /// Only items assigned to this resource
        #[arg(long)]
        resource: Option<String>,
    },
    /// Show one work item with its estimate
    Get {
        /// Work item ID
        id: String,
    },
    /// Edit a work item
    Edit {
        /// Work item ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        size: Option<Size>,
        #[arg(long)]
        duration: Option<i64>,
        #[arg(long)]
        portfolio: Option<Portfolio>,
        /// Start date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "clear_start")]
        start: Option<NaiveDate>,
        /// Remove the start date
        #[arg(long)]
        clear_start: bool,
    },
    /// Set the status by hand
    Status {
        /// Work item ID
        id: String,
        /// upcoming, in-progress, blocked or complete
        status: Status,
    },
    /// Assign a resource
    Assign {
        /// Work item ID
        id: String,
        /// Resource ID
        resource: String,
    },
    /// Remove a resource from an item
    Unassign {
        /// Work item ID
        id: String,
        /// Resource ID
        resource: String,
    },
    /// Delete a work item
    Delete {
        /// Work item ID
        id: String,
    },
    /// Import work items from a JSON array file
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },
}

#[derive(Serialize)]
struct ItemView<'a> {
    #[serde(flatten)]
    item: &'a WorkItem,
    estimate: Estimate,
}

impl<'a> From<&'a WorkItem> for ItemView<'a> {
    fn from(item: &'a WorkItem) -> Self {
        Self {
            item,
            estimate: item.estimate(),
        }
    }
}

pub fn run(action: ItemAction, session: &mut Session) -> CmdResult {
    let today = session.today;
    match action {
        ItemAction::Add {
            title,
            category,
            size,
            duration,
            portfolio,
            assign,
        } => {
            let defaults = Config::load_or_default().defaults;
            let item = session.plan.add_work_item(NewWorkItem {
                title,
                portfolio: portfolio.unwrap_or(defaults.portfolio),
                category: category.unwrap_or_default(),
                size: size.unwrap_or(defaults.size),
                duration: duration.unwrap_or(i64::from(defaults.duration)),
                assigned: assign.as_deref().map(split_list).unwrap_or_default(),
            })?;
            eprintln!("Work item added: {}", item.id);
            print_json(&ItemView::from(item))?;
            session.save()?;
        }
        ItemAction::List { status, resource } => {
            let items: Vec<ItemView> = session
                .plan
                .work_items
                .iter()
                .filter(|w| status.map_or(true, |s| w.status() == s))
                .filter(|w| resource.as_deref().map_or(true, |r| w.is_assigned(r)))
                .map(ItemView::from)
                .collect();
            print_json(&items)?;
        }
        ItemAction::Get { id } => {
            let item = session
                .plan
                .work_item(&id)
                .ok_or_else(|| format!("Work item not found: {id}"))?;
            print_json(&ItemView::from(item))?;
        }
        ItemAction::Edit {
            id,
            title,
            category,
            size,
            duration,
            portfolio,
            start,
            clear_start,
        } => {
            let start_date = if clear_start { Some(None) } else { start.map(Some) };
            let item = session.plan.update_work_item(
                &id,
                WorkItemUpdate {
                    title,
                    portfolio,
                    category,
                    size,
                    duration,
                    start_date,
                },
                today,
            )?;
            print_json(&ItemView::from(item))?;
            session.save()?;
        }
        ItemAction::Status { id, status } => {
            let item = session.plan.set_status(&id, status, today)?;
            print_json(&ItemView::from(item))?;
            session.save()?;
        }
        ItemAction::Assign { id, resource } => {
            let item = session.plan.assign(&id, &resource)?;
            print_json(&ItemView::from(item))?;
            session.save()?;
        }
        ItemAction::Unassign { id, resource } => {
            let item = session.plan.unassign(&id, &resource)?;
            print_json(&ItemView::from(item))?;
            session.save()?;
        }
        ItemAction::Delete { id } => {
            session.plan.delete_work_item(&id)?;
            session.save()?;
            println!("Work item deleted: {id}");
        }
        ItemAction::Import { file } => {
            let raw = std::fs::read_to_string(&file)?;
            let records: Vec<WorkItemRecord> = serde_json::from_str(&raw)?;
            let report = import_work_items(&mut session.plan, &records, today);
            print_json(&report)?;
            session.save()?;
        }
    }
    Ok(())
}
