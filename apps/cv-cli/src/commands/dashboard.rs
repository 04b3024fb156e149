// dashboard.rs — Derived-metric summary: touches per voter by segment,
// plus the campaigns scheduled for a selected calendar week.
//
// All numbers come from cv-metrics; this module only formats.

use cv_campaign::{CampaignStore, OutreachCampaign, Phase};
use cv_segment::{SegmentStore, TouchGoalStore, VoterSegment};
use cv_store::{JsonFileStore, PlannerConfig};

pub fn execute(config: &PlannerConfig, week: u32) -> anyhow::Result<()> {
    if !(1..=cv_campaign::CALENDAR_WEEKS).contains(&week) {
        anyhow::bail!(
            "week {} is outside the {}-week calendar",
            week,
            cv_campaign::CALENDAR_WEEKS
        );
    }

    let segments = SegmentStore::open(JsonFileStore::new(&config.data_dir)?)?;
    let campaigns = CampaignStore::open(JsonFileStore::new(&config.data_dir)?)?;
    let goals = TouchGoalStore::open(JsonFileStore::new(&config.data_dir)?)?;

    if cv_metrics::has_unset_required_segments(segments.list()) {
        println!("note: set your Base and Persuadables segments to better target outreach\n");
    }

    print_touch_summary(&segments, &campaigns, &goals);
    print_week(week, &segments, &campaigns);
    Ok(())
}

fn print_touch_summary(
    segments: &SegmentStore<JsonFileStore>,
    campaigns: &CampaignStore<JsonFileStore>,
    goals: &TouchGoalStore<JsonFileStore>,
) {
    println!("Touches per voter");
    println!(
        "{:<20} {:>8} {:>10} {:>8} {:>6}",
        "SEGMENT", "VOTERS", "CONTACTS", "TOUCHES", "GOAL"
    );
    println!("{}", "-".repeat(58));
    for segment in segments.list() {
        let aggregate = cv_metrics::segment_aggregate_actuals(segment.id, campaigns.list());
        let touches = cv_metrics::touches_per_voter(segment, aggregate);
        println!(
            "{:<20} {:>8} {:>10} {:>8.1} {:>6}",
            segment.name,
            segment.voters_in_segment,
            aggregate,
            touches,
            goals.goal_for(segment.id),
        );
    }
    println!();
}

fn print_week(
    week: u32,
    segments: &SegmentStore<JsonFileStore>,
    campaigns: &CampaignStore<JsonFileStore>,
) {
    match Phase::for_week(week) {
        Some(phase) => println!("Week {} ({})", week, phase),
        None => println!("Week {}", week),
    }

    let scheduled = cv_metrics::campaigns_for_week(week, campaigns.list());
    if scheduled.is_empty() {
        println!("No outreach scheduled for week {}", week);
        return;
    }

    for campaign in scheduled {
        match segments.get(campaign.voter_segment_id) {
            Some(segment) => print_campaign_card(campaign, week, segment),
            None => println!(
                "  {} [{}] — target segment {} missing",
                campaign.name, campaign.channel, campaign.voter_segment_id
            ),
        }
    }
}

fn print_campaign_card(campaign: &OutreachCampaign, week: u32, segment: &VoterSegment) {
    let target = cv_metrics::weekly_target(campaign, segment);
    let actual = campaign.contacts_for_week(week);
    let gauge = match cv_metrics::week_progress_ratio(campaign, week, segment) {
        Some(ratio) => format!("{:.0}%", ratio * 100.0),
        None => "unknown".to_string(),
    };

    println!(
        "  {} [{}] — {} — segment: {}",
        campaign.name,
        campaign.channel,
        cv_metrics::progress_label(campaign, week),
        segment.name
    );
    println!(
        "    weekly goal {} / actual {} ({})",
        target, actual, gauge
    );
    if let (cv_campaign::Channel::Texting, Some(cost)) =
        (campaign.channel, cv_metrics::texting_cost(segment))
    {
        let paid = cv_campaign::PaymentState::for_week(campaign, week);
        println!("    texting cost ${:.2} — {}", cost, paid);
    }
}
