//! Resource (roster) commands.

use capplan_core::{available_days_per_week, Config, Resource, ResourceUpdate, Role};
use clap::Subcommand;
use serde::Serialize;

use super::{print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum ResourceAction {
    /// Onboard a resource; the id is derived from the role
    Add {
        /// Display name
        name: String,
        /// Role, e.g. "Change Manager" or change-manager
        #[arg(long)]
        role: String,
        /// Total FTE, 0.1 to 1.0
        #[arg(long)]
        fte: Option<f64>,
        /// FTE already committed elsewhere, 0.0 to 1.0
        #[arg(long)]
        baseline: Option<f64>,
    },
    /// List resources with their weekly availability
    List,
    /// Show one resource
    Get {
        /// Resource ID
        id: String,
    },
    /// Edit a resource
    Edit {
        /// Resource ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        fte: Option<f64>,
        #[arg(long)]
        baseline: Option<f64>,
    },
    /// Delete a resource and unassign it everywhere
    Delete {
        /// Resource ID
        id: String,
    },
    /// Rate a resource's skill in a category (0-5)
    Skill {
        /// Resource ID
        id: String,
        /// Category name
        category: String,
        /// Level 0-5
        level: i64,
    },
    /// List valid roles and their id prefixes
    Roles,
}

#[derive(Serialize)]
struct ResourceView<'a> {
    #[serde(flatten)]
    resource: &'a Resource,
    available_days_per_week: f64,
}

impl<'a> From<&'a Resource> for ResourceView<'a> {
    fn from(resource: &'a Resource) -> Self {
        Self {
            resource,
            available_days_per_week: available_days_per_week(resource),
        }
    }
}

#[derive(Serialize)]
struct RoleView {
    role: Role,
    prefix: &'static str,
}

pub fn run(action: ResourceAction, session: &mut Session) -> CmdResult {
    match action {
        ResourceAction::Add {
            name,
            role,
            fte,
            baseline,
        } => {
            let role: Role = role.parse()?;
            let config = Config::load_or_default();
            let resource = session.plan.onboard_resource(
                &name,
                role,
                fte.unwrap_or(config.defaults.total_fte),
                baseline.unwrap_or(config.defaults.baseline_commitment),
            )?;
            eprintln!("Resource added: {}", resource.id);
            print_json(&ResourceView::from(resource))?;
            session.save()?;
        }
        ResourceAction::List => {
            let views: Vec<ResourceView> = session.plan.resources.iter().map(ResourceView::from).collect();
            print_json(&views)?;
        }
        ResourceAction::Get { id } => {
            let resource = session
                .plan
                .resource(&id)
                .ok_or_else(|| format!("Resource not found: {id}"))?;
            print_json(&ResourceView::from(resource))?;
        }
        ResourceAction::Edit {
            id,
            name,
            fte,
            baseline,
        } => {
            let resource = session.plan.update_resource(
                &id,
                ResourceUpdate {
                    name,
                    total_fte: fte,
                    baseline_commitment: baseline,
                },
            )?;
            print_json(&ResourceView::from(resource))?;
            session.save()?;
        }
        ResourceAction::Delete { id } => {
            session.plan.delete_resource(&id)?;
            session.save()?;
            println!("Resource deleted: {id}");
        }
        ResourceAction::Skill {
            id,
            category,
            level,
        } => {
            let resource = session.plan.set_skill(&id, &category, level)?;
            print_json(&resource.skills)?;
            session.save()?;
        }
        ResourceAction::Roles => {
            let roles: Vec<RoleView> = Role::ALL
                .iter()
                .map(|&role| RoleView {
                    role,
                    prefix: role.id_prefix(),
                })
                .collect();
            print_json(&roles)?;
        }
    }
    Ok(())
}
