// error.rs — Error types for the campaign subsystem.

use cv_store::StoreError;
use thiserror::Error;

/// Errors that can occur during campaign operations.
///
/// All local and recoverable; a failed operation never mutates state.
#[derive(Debug, Error)]
pub enum CampaignError {
    /// A required field was blank or a week fell outside the calendar.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The requested campaign was not found.
    #[error("campaign not found: {0}")]
    NotFound(i64),

    /// An operation's precondition was not met (wrong channel,
    /// placeholder target, mismatched segment).
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// Payment was already confirmed for this campaign week.
    /// Paid is terminal; there is no unpay.
    #[error("week {week} of campaign {campaign_id} is already paid")]
    AlreadyPaid { campaign_id: i64, week: u32 },

    /// The persistence layer failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
