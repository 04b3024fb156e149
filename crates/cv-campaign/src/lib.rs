//! # cv-campaign
//!
//! Outreach campaign scheduling and logging for the Canvass planner.
//!
//! An [`OutreachCampaign`] is one scheduled messaging effort: one channel,
//! one target voter segment, and a subset of the fixed 12-week campaign
//! calendar. Actual contacts are logged per week (additive, append-only in
//! spirit); Texting campaigns additionally carry a per-week payment state
//! driving the simulated texting-cost confirmation.
//!
//! ## Key components
//!
//! - [`OutreachCampaign`] — the campaign record, [`Channel`], and the
//!   12-week calendar with its three [`Phase`]s
//! - [`CampaignStore`] — CRUD, additive contact logging, and payment
//!   confirmation, persisted whole on every mutation
//! - [`PaymentState`] — the one-way Unpaid → Paid machine per
//!   campaign × week

pub mod campaign;
pub mod error;
pub mod payment;
pub mod store;

pub use campaign::{
    toggle_week, CampaignDraft, Channel, OutreachCampaign, Phase, CALENDAR_WEEKS, DEFAULT_SCRIPT,
};
pub use error::CampaignError;
pub use payment::PaymentState;
pub use store::CampaignStore;
