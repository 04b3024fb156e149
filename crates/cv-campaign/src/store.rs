// store.rs — CampaignStore: the source of truth for outreach campaigns.
//
// Loads the whole campaign collection once when it opens and rewrites the
// full snapshot after every mutation. Create and update take the resolved
// target segment so the placeholder exclusion can be enforced here rather
// than trusting the view layer.
//
// Contact logging is additive, not idempotent: logging 10 then 15 for the
// same (campaign, week) yields 25. Negative counts are accepted as a
// correction mechanism. Logging is open to any calendar week, scheduled
// or not.

use chrono::Utc;
use cv_segment::VoterSegment;
use cv_store::{KeyValueStore, CAMPAIGNS_KEY};

use crate::campaign::{CampaignDraft, OutreachCampaign, CALENDAR_WEEKS};
use crate::error::CampaignError;
use crate::payment::{check_payment_guard, PaymentState};

/// Persistent store for the outreach campaign collection.
pub struct CampaignStore<S: KeyValueStore> {
    campaigns: Vec<OutreachCampaign>,
    kv: S,
}

impl<S: KeyValueStore> CampaignStore<S> {
    /// Open the store, loading the persisted collection (empty if absent).
    pub fn open(kv: S) -> Result<Self, CampaignError> {
        let campaigns = kv.get_json(CAMPAIGNS_KEY)?.unwrap_or_default();
        Ok(Self { campaigns, kv })
    }

    /// All campaigns in insertion order.
    pub fn list(&self) -> &[OutreachCampaign] {
        &self.campaigns
    }

    /// Look up a campaign by id.
    pub fn get(&self, id: i64) -> Option<&OutreachCampaign> {
        self.campaigns.iter().find(|c| c.id == id)
    }

    /// Create a campaign targeting `target`. Placeholder segments are not
    /// selectable targets.
    pub fn create(
        &mut self,
        draft: CampaignDraft,
        target: &VoterSegment,
    ) -> Result<&OutreachCampaign, CampaignError> {
        let weeks = validate_draft(&draft)?;
        validate_target(target)?;

        let campaign = OutreachCampaign {
            id: self.next_id(),
            name: draft.name,
            channel: draft.channel,
            weeks,
            voter_segment_id: target.id,
            script: draft.script,
            actual_contacts: draft.actual_contacts.unwrap_or_default(),
            paid_weeks: draft.paid_weeks.unwrap_or_default(),
        };
        let index = self.campaigns.len();
        self.campaigns.push(campaign);
        self.persist()?;
        Ok(&self.campaigns[index])
    }

    /// Replace a campaign's record. Logged contacts and payment flags are
    /// preserved unless the draft explicitly supplies replacements.
    pub fn update(
        &mut self,
        id: i64,
        draft: CampaignDraft,
        target: &VoterSegment,
    ) -> Result<&OutreachCampaign, CampaignError> {
        let weeks = validate_draft(&draft)?;
        validate_target(target)?;
        let index = self.index_of(id)?;

        let stored = &mut self.campaigns[index];
        stored.name = draft.name;
        stored.channel = draft.channel;
        stored.weeks = weeks;
        stored.voter_segment_id = target.id;
        stored.script = draft.script;
        if let Some(actual_contacts) = draft.actual_contacts {
            stored.actual_contacts = actual_contacts;
        }
        if let Some(paid_weeks) = draft.paid_weeks {
            stored.paid_weeks = paid_weeks;
        }
        self.persist()?;
        Ok(&self.campaigns[index])
    }

    /// Replace a campaign's script, leaving everything else alone.
    pub fn update_script(&mut self, id: i64, script: &str) -> Result<(), CampaignError> {
        let index = self.index_of(id)?;
        self.campaigns[index].script = script.to_string();
        self.persist()
    }

    /// Delete a campaign.
    pub fn delete(&mut self, id: i64) -> Result<(), CampaignError> {
        let index = self.index_of(id)?;
        self.campaigns.remove(index);
        self.persist()
    }

    /// Add `count` contacts to a campaign week. Additive: repeated calls
    /// accumulate. Negative counts correct earlier over-logging.
    pub fn log_contact(&mut self, id: i64, week: u32, count: i64) -> Result<i64, CampaignError> {
        validate_week(week)?;
        let index = self.index_of(id)?;

        let entry = self.campaigns[index]
            .actual_contacts
            .entry(week)
            .or_insert(0);
        *entry += count;
        let total = *entry;
        tracing::debug!(campaign_id = id, week, count, total, "contacts logged");
        self.persist()?;
        Ok(total)
    }

    /// Confirm the simulated texting payment for a campaign week.
    ///
    /// Valid only for a Texting campaign whose target segment is fully
    /// configured, and only once per week (Paid is terminal). On success
    /// the week is marked paid and its actual contacts are overwritten
    /// with the segment's full population: the whole segment was texted.
    pub fn confirm_payment(
        &mut self,
        id: i64,
        week: u32,
        target: &VoterSegment,
    ) -> Result<(), CampaignError> {
        validate_week(week)?;
        let index = self.index_of(id)?;

        check_payment_guard(&self.campaigns[index], target)?;
        let state = PaymentState::for_week(&self.campaigns[index], week);
        if !state.can_transition_to(&PaymentState::Paid) {
            return Err(CampaignError::AlreadyPaid {
                campaign_id: id,
                week,
            });
        }

        let campaign = &mut self.campaigns[index];
        campaign.paid_weeks.insert(week, true);
        campaign
            .actual_contacts
            .insert(week, target.voters_in_segment as i64);
        tracing::info!(
            campaign_id = id,
            week,
            texted = target.voters_in_segment,
            "texting payment confirmed"
        );
        self.persist()
    }

    fn index_of(&self, id: i64) -> Result<usize, CampaignError> {
        self.campaigns
            .iter()
            .position(|c| c.id == id)
            .ok_or(CampaignError::NotFound(id))
    }

    /// Generated ids are creation-timestamp milliseconds, bumped past the
    /// current maximum so two creates in the same millisecond stay unique.
    fn next_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let max = self.campaigns.iter().map(|c| c.id).max().unwrap_or(0);
        now.max(max + 1)
    }

    fn persist(&mut self) -> Result<(), CampaignError> {
        self.kv.set_json(CAMPAIGNS_KEY, &self.campaigns)?;
        Ok(())
    }
}

/// Validate a draft and return its normalized (ascending, deduplicated)
/// week schedule.
fn validate_draft(draft: &CampaignDraft) -> Result<Vec<u32>, CampaignError> {
    if draft.name.trim().is_empty() {
        return Err(CampaignError::Validation("name is required".to_string()));
    }
    if draft.weeks.is_empty() {
        return Err(CampaignError::Validation(
            "at least one week must be scheduled".to_string(),
        ));
    }
    for &week in &draft.weeks {
        validate_week(week)?;
    }
    let mut weeks = draft.weeks.clone();
    weeks.sort_unstable();
    weeks.dedup();
    Ok(weeks)
}

fn validate_week(week: u32) -> Result<(), CampaignError> {
    if !(1..=CALENDAR_WEEKS).contains(&week) {
        return Err(CampaignError::Validation(format!(
            "week {} is outside the {}-week calendar",
            week, CALENDAR_WEEKS
        )));
    }
    Ok(())
}

fn validate_target(target: &VoterSegment) -> Result<(), CampaignError> {
    if target.is_placeholder {
        return Err(CampaignError::Precondition(format!(
            "segment \"{}\" has not been configured yet and cannot be targeted",
            target.name
        )));
    }
    Ok(())
}
