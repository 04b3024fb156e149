// criteria.rs — SegmentCriteria: the structured voter filter.
//
// A criteria is four independent sets of string tags. An empty set means
// "no restriction on this dimension", so the default value matches every
// voter. Equality is structural — two criteria with the same tags compare
// equal regardless of where the values came from.

use serde::{Deserialize, Serialize};

/// Selectable vote-likelihood buckets.
pub const VOTE_LIKELIHOOD_OPTIONS: &[&str] = &[
    "Super Voters (75%+)",
    "Likely Voters (50%-75%)",
    "Unreliable Voters (25%-50%)",
    "Unlikely Voters (0%-25%)",
    "First Time Voters",
];

/// Selectable party affiliations.
pub const PARTY_OPTIONS: &[&str] = &["Independent / Non-Partisan", "Democrat", "Republican"];

/// Selectable age ranges.
pub const AGE_RANGE_OPTIONS: &[&str] = &["18-25", "25-35", "35-50", "50+"];

/// Selectable genders.
pub const GENDER_OPTIONS: &[&str] = &["Male", "Female", "Unknown"];

/// The four filter dimensions a criteria can restrict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriteriaDimension {
    Party,
    Gender,
    AgeRange,
    VoteLikelihood,
}

/// A structured filter over the voter file.
///
/// Each dimension is an independent tag set; empty means unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentCriteria {
    #[serde(default)]
    pub party: Vec<String>,

    #[serde(default)]
    pub gender: Vec<String>,

    #[serde(default)]
    pub age_range: Vec<String>,

    #[serde(default)]
    pub vote_likelihood: Vec<String>,
}

impl SegmentCriteria {
    /// A criteria with no restrictions on any dimension.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// True when no dimension restricts anything.
    pub fn is_empty(&self) -> bool {
        self.party.is_empty()
            && self.gender.is_empty()
            && self.age_range.is_empty()
            && self.vote_likelihood.is_empty()
    }

    /// Toggle a tag on a dimension: add it if absent, remove it if present.
    pub fn toggle(&mut self, dimension: CriteriaDimension, value: &str) {
        let tags = self.tags_mut(dimension);
        if let Some(pos) = tags.iter().position(|t| t == value) {
            tags.remove(pos);
        } else {
            tags.push(value.to_string());
        }
    }

    /// One-line human summary, e.g. "Party: Democrat; Age: 18-25, 25-35".
    /// Unrestricted dimensions are omitted.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        for (label, tags) in [
            ("Party", &self.party),
            ("Gender", &self.gender),
            ("Age Range", &self.age_range),
            ("Vote Likelihood", &self.vote_likelihood),
        ] {
            if !tags.is_empty() {
                parts.push(format!("{}: {}", label, tags.join(", ")));
            }
        }
        if parts.is_empty() {
            "All voters".to_string()
        } else {
            parts.join("; ")
        }
    }

    fn tags_mut(&mut self, dimension: CriteriaDimension) -> &mut Vec<String> {
        match dimension {
            CriteriaDimension::Party => &mut self.party,
            CriteriaDimension::Gender => &mut self.gender,
            CriteriaDimension::AgeRange => &mut self.age_range,
            CriteriaDimension::VoteLikelihood => &mut self.vote_likelihood,
        }
    }
}
