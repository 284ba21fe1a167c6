pub mod category;
pub mod config;
pub mod item;
pub mod report;
pub mod resource;

use capplan_core::{Allocator, CoreError, Plan, PlanningFrame, Store};
use chrono::NaiveDate;
use serde::Serialize;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// The stored plan, refreshed for `today`, and the store it came from.
pub struct Session {
    store: Store,
    pub plan: Plan,
    pub today: NaiveDate,
}

impl Session {
    pub fn open(today: NaiveDate) -> Result<Self, CoreError> {
        let store = Store::open()?;
        let plan = store.load_refreshed(today)?;
        Ok(Self { store, plan, today })
    }

    pub fn save(&mut self) -> Result<(), CoreError> {
        self.store.save(&mut self.plan)
    }

    pub fn frame(&self) -> PlanningFrame {
        PlanningFrame::anchored(self.today)
    }

    pub fn allocator(&self) -> Allocator<'_> {
        Allocator::new(&self.plan, self.frame())
    }
}

/// Split a comma-separated list, dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
