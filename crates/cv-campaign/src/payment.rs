// payment.rs — Payment state for Texting campaign weeks.
//
// Each (campaign, week) pair of a Texting campaign carries a payment
// state. The machine is one-way:
//   Unpaid → Paid
// Paid is terminal — there is no unpay. Confirming payment models "the
// whole segment was texted this week", which is why the transition
// overwrites the week's actual contacts with the full segment population.

use std::fmt;

use cv_segment::VoterSegment;
use serde::{Deserialize, Serialize};

use crate::campaign::{Channel, OutreachCampaign};
use crate::error::CampaignError;

/// Payment state of one campaign week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    Unpaid,
    Paid,
}

impl PaymentState {
    /// The state recorded for a week in a campaign's paid-week map.
    pub fn for_week(campaign: &OutreachCampaign, week: u32) -> Self {
        if campaign.paid_weeks.get(&week).copied().unwrap_or(false) {
            PaymentState::Paid
        } else {
            PaymentState::Unpaid
        }
    }

    /// Check whether transitioning from this state to `next` is valid.
    /// The only valid transition is Unpaid → Paid.
    pub fn can_transition_to(&self, next: &PaymentState) -> bool {
        matches!((self, next), (PaymentState::Unpaid, PaymentState::Paid))
    }
}

impl fmt::Display for PaymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentState::Unpaid => write!(f, "unpaid"),
            PaymentState::Paid => write!(f, "paid"),
        }
    }
}

/// Guard for the Unpaid → Paid transition: the campaign must be on the
/// Texting channel and its target segment must be fully configured.
pub(crate) fn check_payment_guard(
    campaign: &OutreachCampaign,
    segment: &VoterSegment,
) -> Result<(), CampaignError> {
    if campaign.channel != Channel::Texting {
        return Err(CampaignError::Precondition(format!(
            "payment confirmation applies to Texting campaigns, not {}",
            campaign.channel
        )));
    }
    if segment.id != campaign.voter_segment_id {
        return Err(CampaignError::Precondition(format!(
            "segment {} is not the campaign's target (expected {})",
            segment.id, campaign.voter_segment_id
        )));
    }
    if segment.is_placeholder {
        return Err(CampaignError::Precondition(format!(
            "segment \"{}\" has not been configured yet",
            segment.name
        )));
    }
    Ok(())
}
