//! # capplan Core Library
//!
//! This library provides the core logic for capplan, a capacity planner for
//! small delivery teams. Given a roster of resources with fractional
//! availability and a backlog of sized work items, it works out how much of
//! each person's weekly capacity is consumed over a rolling four-week frame
//! and flags over-allocation.
//!
//! ## Architecture
//!
//! - **Calendar**: Monday-to-Friday date arithmetic
//! - **Estimation**: T-shirt size and duration to FTE percentages
//! - **Window**: the rolling four-week frame and overlap test
//! - **Status**: lifecycle derivation with manual pinning
//! - **Allocation**: per-resource and team load, heat bands
//! - **Plan**: the persisted snapshot and its mutations
//! - **Storage**: SQLite snapshot store and TOML configuration
//!
//! The engine is pure: every figure is computed from an injected [`Plan`]
//! and a "today" date, so results are reproducible.
//!
//! ## Key Components
//!
//! - [`Allocator`]: allocation queries over one snapshot
//! - [`Plan`]: roster, backlog and categories
//! - [`Store`]: snapshot persistence
//! - [`Config`]: application configuration management

pub mod allocation;
pub mod calendar;
pub mod error;
pub mod estimation;
pub mod import;
pub mod insight;
pub mod model;
pub mod plan;
pub mod status;
pub mod storage;
pub mod validate;
pub mod window;

pub use allocation::{
    resource_week_days, resource_week_percent, Allocator, DashboardStats, HeatBand, ResourceLoad,
    TeamLoad,
};
pub use calendar::{add_working_days, count_working_days, is_working_day, week_start};
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use estimation::{
    compute_work_item_estimate, effort_days, fte_total_percent, per_person_percent, Estimate, Size,
};
pub use import::{import_work_items, ImportReport, WorkItemRecord};
pub use insight::{category_coverage, suggest_resources, CategoryCoverage, Suggestion};
pub use model::{available_days_per_week, Portfolio, Resource, Role, WorkItem};
pub use plan::{NewWorkItem, Plan, ResourceUpdate, WorkItemUpdate};
pub use status::{derive_status, Status, StatusTracking};
pub use storage::{Config, Store};
pub use window::{active_weeks, PlanningFrame, WeekSpan, FRAME_WEEKS};
