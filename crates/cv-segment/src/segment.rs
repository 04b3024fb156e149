// segment.rs — VoterSegment: a named cohort of voters.
//
// Three ids are reserved:
//   0 — "All voters", fixed population (5000, 4500, 4000), never edited
//       or deleted.
//   1 — "Base", 2 — "Persuadables": must always exist. They start as
//       placeholders with zero population; the first save that changes
//       their criteria assigns a randomized population and clears the
//       placeholder flag. They can be re-configured but never deleted.
//
// All other segments are user-created, freely editable, and deletable.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::criteria::SegmentCriteria;

/// Reserved id of the universal "All voters" segment.
pub const ALL_VOTERS_ID: i64 = 0;

/// Reserved id of the "Base" segment.
pub const BASE_ID: i64 = 1;

/// Reserved id of the "Persuadables" segment.
pub const PERSUADABLES_ID: i64 = 2;

/// Population counts for a segment. The sub-counts describe how many of
/// the segment's voters have a mailable address or a phone number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Population {
    pub total: u64,
    pub with_address: u64,
    pub with_phone: u64,
}

impl Population {
    /// The zero population of an unconfigured placeholder.
    pub fn zero() -> Self {
        Self {
            total: 0,
            with_address: 0,
            with_phone: 0,
        }
    }

    /// Draw a simulated population: total uniform in [500, 2000], each
    /// sub-count independently floor(total × u) with u uniform in [0.5, 1.0).
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let total = rng.gen_range(500..=2000u64);
        let with_address = (total as f64 * rng.gen_range(0.5..1.0)).floor() as u64;
        let with_phone = (total as f64 * rng.gen_range(0.5..1.0)).floor() as u64;
        Self {
            total,
            with_address,
            with_phone,
        }
    }
}

/// A voter segment — a named cohort with a population and a filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoterSegment {
    /// Identity. 0/1/2 are reserved; others are generated.
    pub id: i64,

    pub name: String,

    pub description: String,

    /// Structured filter. Empty dimensions mean "no restriction".
    pub criteria: SegmentCriteria,

    pub voters_in_segment: u64,

    pub voters_with_address: u64,

    pub voters_with_phone: u64,

    /// True only for segments 1/2 before the organizer configures them.
    #[serde(default)]
    pub is_placeholder: bool,
}

/// The caller-supplied fields of a create/update command. Identity,
/// placeholder state, and (for reserved segments) population are managed
/// by the store.
#[derive(Debug, Clone)]
pub struct SegmentDraft {
    pub name: String,
    pub description: String,
    pub criteria: SegmentCriteria,
    pub population: Population,
}

impl VoterSegment {
    /// The fixed universal segment (id 0).
    pub fn all_voters() -> Self {
        Self {
            id: ALL_VOTERS_ID,
            name: "All voters".to_string(),
            description: "Contains all voters".to_string(),
            criteria: SegmentCriteria::unrestricted(),
            voters_in_segment: 5000,
            voters_with_address: 4500,
            voters_with_phone: 4000,
            is_placeholder: false,
        }
    }

    /// The unconfigured "Base" placeholder (id 1).
    pub fn base_placeholder() -> Self {
        Self {
            id: BASE_ID,
            name: "Base".to_string(),
            description: "Your core voters who will likely support your campaign from the start"
                .to_string(),
            criteria: SegmentCriteria::unrestricted(),
            voters_in_segment: 0,
            voters_with_address: 0,
            voters_with_phone: 0,
            is_placeholder: true,
        }
    }

    /// The unconfigured "Persuadables" placeholder (id 2).
    pub fn persuadables_placeholder() -> Self {
        Self {
            id: PERSUADABLES_ID,
            name: "Persuadables".to_string(),
            description:
                "Voters who could be convinced to support your campaign with targeted messaging"
                    .to_string(),
            voters_in_segment: 0,
            voters_with_address: 0,
            voters_with_phone: 0,
            criteria: SegmentCriteria::unrestricted(),
            is_placeholder: true,
        }
    }

    /// True for the three reserved ids (0, 1, 2).
    pub fn is_reserved(&self) -> bool {
        matches!(self.id, ALL_VOTERS_ID | BASE_ID | PERSUADABLES_ID)
    }

    pub fn population(&self) -> Population {
        Population {
            total: self.voters_in_segment,
            with_address: self.voters_with_address,
            with_phone: self.voters_with_phone,
        }
    }

    pub fn set_population(&mut self, population: Population) {
        self.voters_in_segment = population.total;
        self.voters_with_address = population.with_address;
        self.voters_with_phone = population.with_phone;
    }
}
