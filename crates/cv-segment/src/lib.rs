//! # cv-segment
//!
//! Voter segment model and stores for the Canvass outreach planner.
//!
//! A [`VoterSegment`] is a named cohort of voters with a population count and
//! a structured filter ([`SegmentCriteria`]). Three segments are reserved:
//! id 0 ("All voters") is fixed and immutable; ids 1 ("Base") and 2
//! ("Persuadables") must always exist and start out as placeholders with
//! zero population until the organizer configures them.
//!
//! ## Key components
//!
//! - [`VoterSegment`] — the segment record and reserved-id rules
//! - [`SegmentCriteria`] — four independent tag-set filter dimensions
//! - [`SegmentStore`] — CRUD with required-segment invariants, persisted
//!   whole on every mutation
//! - [`TouchGoalStore`] — per-segment touch goals (default 5)

pub mod criteria;
pub mod error;
pub mod goals;
pub mod segment;
pub mod store;

pub use criteria::{CriteriaDimension, SegmentCriteria};
pub use error::SegmentError;
pub use goals::{TouchGoalStore, DEFAULT_TOUCH_GOAL};
pub use segment::{
    Population, SegmentDraft, VoterSegment, ALL_VOTERS_ID, BASE_ID, PERSUADABLES_ID,
};
pub use store::SegmentStore;
