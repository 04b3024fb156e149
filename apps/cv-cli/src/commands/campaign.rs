// campaign.rs — Campaign subcommands: list, create, edit, delete, script,
// log, pay.
//
// Create/edit resolve the target segment up front so the stores can
// enforce the placeholder exclusion; `pay` prints the simulated texting
// cost before confirming.

use clap::Subcommand;
use cv_campaign::{CampaignDraft, CampaignStore, Channel, PaymentState};
use cv_segment::{SegmentStore, VoterSegment};
use cv_store::{JsonFileStore, PlannerConfig};

#[derive(Subcommand)]
pub enum CampaignCommands {
    /// List all outreach campaigns.
    List,
    /// Create a new campaign.
    Create {
        /// Campaign name.
        name: String,
        /// Outreach channel (door-knocking, direct-mail, phone-banking,
        /// digital-advertising, texting, events-rallies, yard-signs).
        #[arg(long)]
        channel: String,
        /// Scheduled calendar weeks, e.g. --weeks 5,6,7.
        #[arg(long, value_delimiter = ',')]
        weeks: Vec<u32>,
        /// Target voter segment id.
        #[arg(long)]
        segment: i64,
        /// Outreach script (defaults to the stock placeholder text).
        #[arg(long)]
        script: Option<String>,
    },
    /// Edit an existing campaign (unset flags keep the stored values).
    Edit {
        /// Campaign id.
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        channel: Option<String>,
        /// Replacement week schedule, e.g. --weeks 5,6,7.
        #[arg(long, value_delimiter = ',')]
        weeks: Option<Vec<u32>>,
        /// New target voter segment id.
        #[arg(long)]
        segment: Option<i64>,
    },
    /// Delete a campaign.
    Delete {
        /// Campaign id.
        id: i64,
    },
    /// Show or replace a campaign's script.
    Script {
        /// Campaign id.
        id: i64,
        /// Replacement script text; omit to print the current one.
        #[arg(long)]
        set: Option<String>,
    },
    /// Log contacts made for a campaign week (additive; negative counts
    /// correct earlier logging).
    Log {
        /// Campaign id.
        id: i64,
        /// Calendar week (1-12).
        #[arg(long)]
        week: u32,
        /// Number of contacts made.
        #[arg(long, allow_hyphen_values = true)]
        count: i64,
    },
    /// Confirm the simulated texting payment for a campaign week.
    Pay {
        /// Campaign id.
        id: i64,
        /// Calendar week (1-12).
        #[arg(long)]
        week: u32,
    },
}

pub fn execute(cmd: &CampaignCommands, config: &PlannerConfig) -> anyhow::Result<()> {
    let segments = SegmentStore::open(JsonFileStore::new(&config.data_dir)?)?;
    let mut campaigns = CampaignStore::open(JsonFileStore::new(&config.data_dir)?)?;

    match cmd {
        CampaignCommands::List => list_campaigns(&campaigns, &segments),
        CampaignCommands::Create {
            name,
            channel,
            weeks,
            segment,
            script,
        } => {
            let channel: Channel = channel.parse().map_err(anyhow::Error::msg)?;
            let target = resolve_target(&segments, *segment)?;
            let mut draft = CampaignDraft::new(name, channel, weeks.clone());
            if let Some(script) = script {
                draft.script = script.clone();
            }
            if cv_metrics::has_unset_required_segments(segments.list()) {
                eprintln!("note: set your Base and Persuadables segments to better target outreach");
            }
            let campaign = campaigns.create(draft, target)?;
            println!(
                "Created campaign {} ({}) on {} targeting {}",
                campaign.id, campaign.name, campaign.channel, target.name
            );
            Ok(())
        }
        CampaignCommands::Edit {
            id,
            name,
            channel,
            weeks,
            segment,
        } => edit_campaign(
            &mut campaigns,
            &segments,
            *id,
            name.as_deref(),
            channel.as_deref(),
            weeks.as_deref(),
            *segment,
        ),
        CampaignCommands::Delete { id } => {
            campaigns.delete(*id)?;
            println!("Deleted campaign {}", id);
            Ok(())
        }
        CampaignCommands::Script { id, set } => match set {
            Some(script) => {
                campaigns.update_script(*id, script)?;
                println!("Script updated for campaign {}", id);
                Ok(())
            }
            None => {
                let campaign = campaigns
                    .get(*id)
                    .ok_or_else(|| anyhow::anyhow!("campaign not found: {}", id))?;
                println!("{}", campaign.script);
                Ok(())
            }
        },
        CampaignCommands::Log { id, week, count } => {
            let total = campaigns.log_contact(*id, *week, *count)?;
            println!("Week {} now has {} logged contacts", week, total);
            Ok(())
        }
        CampaignCommands::Pay { id, week } => pay_week(&mut campaigns, &segments, *id, *week),
    }
}

fn list_campaigns(
    campaigns: &CampaignStore<JsonFileStore>,
    segments: &SegmentStore<JsonFileStore>,
) -> anyhow::Result<()> {
    if campaigns.list().is_empty() {
        println!("No campaigns yet.");
        return Ok(());
    }

    println!(
        "{:<16} {:<24} {:<20} {:<16} {:<12} {:>8}",
        "ID", "NAME", "CHANNEL", "WEEKS", "SEGMENT", "LOGGED"
    );
    println!("{}", "-".repeat(100));
    for campaign in campaigns.list() {
        let segment_name = segments
            .get(campaign.voter_segment_id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| format!("#{}", campaign.voter_segment_id));
        println!(
            "{:<16} {:<24} {:<20} {:<16} {:<12} {:>8}",
            campaign.id,
            campaign.name,
            campaign.channel.to_string(),
            format_weeks(&campaign.weeks),
            segment_name,
            campaign.total_contacts(),
        );
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn edit_campaign(
    campaigns: &mut CampaignStore<JsonFileStore>,
    segments: &SegmentStore<JsonFileStore>,
    id: i64,
    name: Option<&str>,
    channel: Option<&str>,
    weeks: Option<&[u32]>,
    segment: Option<i64>,
) -> anyhow::Result<()> {
    let stored = campaigns
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("campaign not found: {}", id))?;

    let channel = match channel {
        Some(raw) => raw.parse().map_err(anyhow::Error::msg)?,
        None => stored.channel,
    };
    let draft = CampaignDraft {
        name: name.unwrap_or(&stored.name).to_string(),
        channel,
        weeks: weeks.map(<[u32]>::to_vec).unwrap_or_else(|| stored.weeks.clone()),
        script: stored.script.clone(),
        actual_contacts: None,
        paid_weeks: None,
    };
    let target_id = segment.unwrap_or(stored.voter_segment_id);
    let target = resolve_target(segments, target_id)?;

    let campaign = campaigns.update(id, draft, target)?;
    println!("Updated campaign {} ({})", campaign.id, campaign.name);
    Ok(())
}

fn pay_week(
    campaigns: &mut CampaignStore<JsonFileStore>,
    segments: &SegmentStore<JsonFileStore>,
    id: i64,
    week: u32,
) -> anyhow::Result<()> {
    let campaign = campaigns
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("campaign not found: {}", id))?;
    let target = resolve_target(segments, campaign.voter_segment_id)?;

    if let Some(cost) = cv_metrics::texting_cost(target) {
        println!(
            "Texting {} voters in \"{}\" costs ${:.2}",
            target.voters_in_segment, target.name, cost
        );
    }

    campaigns.confirm_payment(id, week, target)?;
    let campaign = campaigns
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("campaign not found: {}", id))?;
    println!(
        "Week {} paid ({}); {} contacts recorded",
        week,
        PaymentState::for_week(campaign, week),
        campaign.contacts_for_week(week)
    );
    Ok(())
}

fn resolve_target(
    segments: &SegmentStore<JsonFileStore>,
    id: i64,
) -> anyhow::Result<&VoterSegment> {
    segments
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("segment not found: {}", id))
}

fn format_weeks(weeks: &[u32]) -> String {
    weeks
        .iter()
        .map(|w| w.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cv_segment::{Population, SegmentDraft};
    use cv_store::JsonFileStore;
    use tempfile::tempdir;

    fn stores(
        data_dir: &std::path::Path,
    ) -> (SegmentStore<JsonFileStore>, CampaignStore<JsonFileStore>) {
        let segments = SegmentStore::open(JsonFileStore::new(data_dir).unwrap()).unwrap();
        let campaigns = CampaignStore::open(JsonFileStore::new(data_dir).unwrap()).unwrap();
        (segments, campaigns)
    }

    #[test]
    fn edit_keeps_unset_fields() {
        let dir = tempdir().unwrap();
        let (segments, mut campaigns) = stores(dir.path());

        let target = segments.get(0).unwrap();
        let id = campaigns
            .create(
                CampaignDraft::new("Doors", Channel::DoorKnocking, vec![1, 2]),
                target,
            )
            .unwrap()
            .id;

        edit_campaign(
            &mut campaigns,
            &segments,
            id,
            Some("North side doors"),
            None,
            None,
            None,
        )
        .unwrap();

        let campaign = campaigns.get(id).unwrap();
        assert_eq!(campaign.name, "North side doors");
        assert_eq!(campaign.channel, Channel::DoorKnocking);
        assert_eq!(campaign.weeks, vec![1, 2]);
    }

    #[test]
    fn pay_week_runs_the_full_workflow() {
        let dir = tempdir().unwrap();
        let (mut segments, mut campaigns) = stores(dir.path());

        let segment_id = segments
            .create(SegmentDraft {
                name: "Texting list".to_string(),
                description: String::new(),
                criteria: Default::default(),
                population: Population {
                    total: 1200,
                    with_address: 900,
                    with_phone: 1100,
                },
            })
            .unwrap()
            .id;
        let target = segments.get(segment_id).unwrap();

        let id = campaigns
            .create(CampaignDraft::new("Blast", Channel::Texting, vec![6]), target)
            .unwrap()
            .id;

        pay_week(&mut campaigns, &segments, id, 6).unwrap();
        let campaign = campaigns.get(id).unwrap();
        assert_eq!(campaign.contacts_for_week(6), 1200);
        assert_eq!(PaymentState::for_week(campaign, 6), PaymentState::Paid);

        // Second confirmation is rejected.
        assert!(pay_week(&mut campaigns, &segments, id, 6).is_err());
    }
}
