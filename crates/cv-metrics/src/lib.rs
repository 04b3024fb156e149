//! # cv-metrics
//!
//! Derived metrics over segment and campaign state for the Canvass planner.
//!
//! Everything here is a pure read-only function: the view layer asks for
//! progress labels, weekly targets, ratios, aggregates, and costs, and never
//! computes any of them itself. Nothing in this crate mutates a store.

use cv_campaign::{Channel, OutreachCampaign};
use cv_segment::{VoterSegment, BASE_ID, PERSUADABLES_ID};

/// Simulated cost of one text message, in dollars.
pub const COST_PER_TEXT: f64 = 0.035;

/// Human progress label for a campaign at a calendar week, e.g. "Week 3 of 4".
///
/// The denominator is the width of the span from the first to the last
/// scheduled week, not the count of scheduled weeks: a campaign scheduled
/// for weeks [5, 8] reads "of 4". Gap weeks count toward the span on
/// purpose; this mirrors how the planner board has always labeled
/// progress.
pub fn progress_label(campaign: &OutreachCampaign, current_week: u32) -> String {
    let (Some(&start), Some(&end)) = (campaign.weeks.first(), campaign.weeks.last()) else {
        return "Week 0 of 0".to_string();
    };
    let span = end - start + 1;
    let position = current_week as i64 - start as i64 + 1;
    format!("Week {} of {}", position, span)
}

/// Expected contacts per scheduled week.
///
/// Texting reaches the whole segment every scheduled week (texts are not
/// divided across weeks); every other channel spreads the segment across
/// the schedule, rounding up.
pub fn weekly_target(campaign: &OutreachCampaign, segment: &VoterSegment) -> u64 {
    if campaign.channel == Channel::Texting {
        return segment.voters_in_segment;
    }
    let weeks = campaign.weeks.len() as u64;
    if weeks == 0 {
        return 0;
    }
    segment.voters_in_segment.div_ceil(weeks)
}

/// Fraction of the weekly target reached in a week, for a 0–100%+ gauge.
///
/// `None` when the weekly target is 0 (an unconfigured placeholder
/// target): the value is unknown, and the caller must not render it as
/// zero progress. Negative logged corrections floor the ratio at 0; a
/// ratio above 1.0 means the week beat its target.
pub fn week_progress_ratio(
    campaign: &OutreachCampaign,
    week: u32,
    segment: &VoterSegment,
) -> Option<f64> {
    let target = weekly_target(campaign, segment);
    if target == 0 {
        return None;
    }
    let actual = campaign.contacts_for_week(week) as f64;
    Some((actual / target as f64).max(0.0))
}

/// Sum of all logged contacts, across every week of every campaign
/// targeting the segment.
pub fn segment_aggregate_actuals(segment_id: i64, campaigns: &[OutreachCampaign]) -> i64 {
    campaigns
        .iter()
        .filter(|c| c.voter_segment_id == segment_id)
        .map(|c| c.total_contacts())
        .sum()
}

/// Aggregate touches divided by segment population; 0 for an empty segment.
pub fn touches_per_voter(segment: &VoterSegment, aggregate: i64) -> f64 {
    if segment.voters_in_segment == 0 {
        return 0.0;
    }
    aggregate as f64 / segment.voters_in_segment as f64
}

/// Simulated cost of texting the whole segment once. `None` while the
/// segment is an unconfigured placeholder: the population, and therefore
/// the cost, is unknown.
pub fn texting_cost(segment: &VoterSegment) -> Option<f64> {
    if segment.is_placeholder {
        return None;
    }
    Some(segment.voters_in_segment as f64 * COST_PER_TEXT)
}

/// True while the Base or Persuadables segment is still a placeholder.
///
/// Gates the setup warning on scheduling views and keeps placeholder
/// segments out of the campaign target list.
pub fn has_unset_required_segments(segments: &[VoterSegment]) -> bool {
    segments
        .iter()
        .any(|s| (s.id == BASE_ID || s.id == PERSUADABLES_ID) && s.is_placeholder)
}

/// Campaigns scheduled for a calendar week, in collection order.
pub fn campaigns_for_week(week: u32, campaigns: &[OutreachCampaign]) -> Vec<&OutreachCampaign> {
    campaigns
        .iter()
        .filter(|c| c.is_scheduled_for(week))
        .collect()
}
