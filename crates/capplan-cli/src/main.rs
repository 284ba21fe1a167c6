use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use capplan_core::Size;

mod commands;

use commands::{CmdResult, Session};

#[derive(Parser)]
#[command(name = "capplan", version, about = "Capacity planning for small delivery teams")]
struct Cli {
    /// Date to plan from (YYYY-MM-DD); defaults to the local date
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roster management
    Resource {
        #[command(subcommand)]
        action: commands::resource::ResourceAction,
    },
    /// Backlog management
    Item {
        #[command(subcommand)]
        action: commands::item::ItemAction,
    },
    /// Category management
    Category {
        #[command(subcommand)]
        action: commands::category::CategoryAction,
    },
    /// Weekly load per resource over the four-week frame
    Load {
        /// Only this resource
        resource: Option<String>,
    },
    /// Team-wide weekly load
    Team,
    /// Headline figures
    Stats,
    /// Estimate an item without saving it
    Estimate {
        /// T-shirt size: XS, S, M, L, XL, XXL
        #[arg(long, default_value = "M")]
        size: Size,
        /// Duration in working days
        #[arg(long, default_value_t = 20)]
        duration: u32,
        /// Number of assignees
        #[arg(long, default_value_t = 1)]
        assigned: usize,
    },
    /// Suggest resources for a work item or a category
    Suggest {
        /// Work item ID; its assignees are excluded
        item: Option<String>,
        /// Category to staff, when no item is given
        #[arg(long, conflicts_with = "item")]
        category: Option<String>,
        /// Comma-separated resource IDs to leave out
        #[arg(long)]
        exclude: Option<String>,
    },
    /// Skill capacity against open demand per category
    Coverage {
        /// Number of categories to report
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CAPPLAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch(command: Commands, today: NaiveDate) -> CmdResult {
    match command {
        Commands::Resource { action } => commands::resource::run(action, &mut Session::open(today)?),
        Commands::Item { action } => commands::item::run(action, &mut Session::open(today)?),
        Commands::Category { action } => commands::category::run(action, &mut Session::open(today)?),
        Commands::Load { resource } => commands::report::load(&Session::open(today)?, resource),
        Commands::Team => commands::report::team(&Session::open(today)?),
        Commands::Stats => commands::report::stats(&Session::open(today)?),
        Commands::Estimate {
            size,
            duration,
            assigned,
        } => commands::report::estimate(size, duration, assigned),
        Commands::Suggest {
            item,
            category,
            exclude,
        } => commands::report::suggest(&Session::open(today)?, item, category, exclude),
        Commands::Coverage { limit } => commands::report::coverage(&Session::open(today)?, limit),
        Commands::Config { action } => commands::config::run(action),
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    if let Err(e) = dispatch(cli.command, today) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
