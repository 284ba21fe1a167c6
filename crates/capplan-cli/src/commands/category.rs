use clap::Subcommand;

use super::{print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum CategoryAction {
    /// List categories
    List,
    /// Add a category
    Add {
        /// Category name
        name: String,
    },
    /// Rename a category; items and skills follow
    Rename {
        /// Current name
        from: String,
        /// New name
        to: String,
    },
    /// Delete a category; items using it become uncategorised
    Delete {
        /// Category name
        name: String,
    },
}

pub fn run(action: CategoryAction, session: &mut Session) -> CmdResult {
    match action {
        CategoryAction::List => {
            print_json(&session.plan.categories)?;
            return Ok(());
        }
        CategoryAction::Add { name } => session.plan.add_category(&name)?,
        CategoryAction::Rename { from, to } => session.plan.rename_category(&from, &to)?,
        CategoryAction::Delete { name } => session.plan.delete_category(&name)?,
    }
    session.save()?;
    print_json(&session.plan.categories)
}
