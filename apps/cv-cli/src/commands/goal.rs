// goal.rs — Touch goal subcommands: set, show, clear.

use clap::Subcommand;
use cv_segment::{SegmentStore, TouchGoalStore, DEFAULT_TOUCH_GOAL};
use cv_store::{JsonFileStore, PlannerConfig};

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Set a segment's touch goal.
    Set {
        /// Segment id.
        segment: i64,
        /// Desired touches per voter over the campaign.
        goal: u32,
    },
    /// Show every segment's touch goal.
    Show,
    /// Reset a segment's touch goal to the default.
    Clear {
        /// Segment id.
        segment: i64,
    },
}

pub fn execute(cmd: &GoalCommands, config: &PlannerConfig) -> anyhow::Result<()> {
    let segments = SegmentStore::open(JsonFileStore::new(&config.data_dir)?)?;
    let mut goals = TouchGoalStore::open(JsonFileStore::new(&config.data_dir)?)?;

    match cmd {
        GoalCommands::Set { segment, goal } => {
            if segments.get(*segment).is_none() {
                anyhow::bail!("segment not found: {}", segment);
            }
            goals.set(*segment, *goal)?;
            println!("Touch goal for segment {} set to {}", segment, goal);
            Ok(())
        }
        GoalCommands::Show => {
            println!("{:<16} {:<20} {:>6}", "ID", "SEGMENT", "GOAL");
            println!("{}", "-".repeat(44));
            for segment in segments.list() {
                let goal = goals.goal_for(segment.id);
                let suffix = if goal == DEFAULT_TOUCH_GOAL { " (default)" } else { "" };
                println!(
                    "{:<16} {:<20} {:>6}{}",
                    segment.id, segment.name, goal, suffix
                );
            }
            Ok(())
        }
        GoalCommands::Clear { segment } => {
            goals.clear(*segment)?;
            println!(
                "Touch goal for segment {} reset to default ({})",
                segment, DEFAULT_TOUCH_GOAL
            );
            Ok(())
        }
    }
}
