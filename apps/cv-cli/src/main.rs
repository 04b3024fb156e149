//! # cv-cli
//!
//! Command-line interface for the Canvass outreach planner.
//!
//! The CLI is a thin view layer: it resolves arguments, opens the stores,
//! and prints derived values from `cv-metrics`. It never computes a metric
//! itself and every mutation goes through a store operation:
//! - `cv segment list/add/set/delete` — manage voter segments
//! - `cv campaign list/create/edit/delete/script/log/pay` — manage outreach
//! - `cv goal set/show/clear` — per-segment touch goals
//! - `cv dashboard` — touches per voter and the selected week's outreach

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cv_store::PlannerConfig;
use tracing_subscriber::EnvFilter;

/// Canvass CLI — plan and track voter outreach.
#[derive(Parser)]
#[command(name = "cv", version, about)]
struct Cli {
    /// Planning project root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage voter segments.
    Segment {
        #[command(subcommand)]
        command: commands::segment::SegmentCommands,
    },
    /// Manage outreach campaigns.
    Campaign {
        #[command(subcommand)]
        command: commands::campaign::CampaignCommands,
    },
    /// Manage per-segment touch goals.
    Goal {
        #[command(subcommand)]
        command: commands::goal::GoalCommands,
    },
    /// Show touches per voter and the selected week's outreach.
    Dashboard {
        /// Calendar week to inspect (1-12).
        #[arg(long, default_value_t = 1)]
        week: u32,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);
    let config = PlannerConfig::for_project(&project_root);

    match &cli.command {
        Commands::Segment { command } => commands::segment::execute(command, &config),
        Commands::Campaign { command } => commands::campaign::execute(command, &config),
        Commands::Goal { command } => commands::goal::execute(command, &config),
        Commands::Dashboard { week } => commands::dashboard::execute(&config, *week),
    }
}
