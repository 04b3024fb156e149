// segment.rs — Segment subcommands: list, add, set, delete.

use clap::Subcommand;
use cv_segment::{
    Population, SegmentCriteria, SegmentDraft, SegmentStore, VoterSegment, ALL_VOTERS_ID,
};
use cv_store::{JsonFileStore, PlannerConfig};

#[derive(Subcommand)]
pub enum SegmentCommands {
    /// List all voter segments.
    List,
    /// Add a new segment (population is drafted randomly, as the voter
    /// file is simulated).
    Add {
        /// Segment name.
        name: String,
        /// Free-text description.
        #[arg(long, default_value = "")]
        description: String,
        /// Party filter tags (repeatable).
        #[arg(long)]
        party: Vec<String>,
        /// Gender filter tags (repeatable).
        #[arg(long)]
        gender: Vec<String>,
        /// Age range filter tags (repeatable).
        #[arg(long = "age-range")]
        age_range: Vec<String>,
        /// Vote likelihood filter tags (repeatable).
        #[arg(long = "likelihood")]
        vote_likelihood: Vec<String>,
    },
    /// Edit a segment by id. For Base (1) and Persuadables (2) this is the
    /// configuration flow: changing their criteria assigns a population.
    Set {
        /// Segment id.
        id: i64,
        /// New name.
        #[arg(long)]
        name: Option<String>,
        /// New description.
        #[arg(long)]
        description: Option<String>,
        /// Replace the party filter (repeatable; pass none to keep).
        #[arg(long)]
        party: Vec<String>,
        /// Replace the gender filter (repeatable).
        #[arg(long)]
        gender: Vec<String>,
        /// Replace the age range filter (repeatable).
        #[arg(long = "age-range")]
        age_range: Vec<String>,
        /// Replace the vote likelihood filter (repeatable).
        #[arg(long = "likelihood")]
        vote_likelihood: Vec<String>,
        /// Reset all criteria dimensions to unrestricted.
        #[arg(long)]
        clear_criteria: bool,
    },
    /// Delete a user segment (reserved segments 0/1/2 refuse).
    Delete {
        /// Segment id.
        id: i64,
    },
}

pub fn execute(cmd: &SegmentCommands, config: &PlannerConfig) -> anyhow::Result<()> {
    let kv = JsonFileStore::new(&config.data_dir)?;
    let mut store = SegmentStore::open(kv)?;

    match cmd {
        SegmentCommands::List => list_segments(&store),
        SegmentCommands::Add {
            name,
            description,
            party,
            gender,
            age_range,
            vote_likelihood,
        } => {
            let criteria = SegmentCriteria {
                party: party.clone(),
                gender: gender.clone(),
                age_range: age_range.clone(),
                vote_likelihood: vote_likelihood.clone(),
            };
            add_segment(&mut store, name, description, criteria)
        }
        SegmentCommands::Set {
            id,
            name,
            description,
            party,
            gender,
            age_range,
            vote_likelihood,
            clear_criteria,
        } => {
            let criteria_flags = SegmentCriteria {
                party: party.clone(),
                gender: gender.clone(),
                age_range: age_range.clone(),
                vote_likelihood: vote_likelihood.clone(),
            };
            set_segment(
                &mut store,
                *id,
                name.as_deref(),
                description.as_deref(),
                criteria_flags,
                *clear_criteria,
            )
        }
        SegmentCommands::Delete { id } => {
            store.delete(*id)?;
            println!("Deleted segment {}", id);
            Ok(())
        }
    }
}

fn list_segments(store: &SegmentStore<JsonFileStore>) -> anyhow::Result<()> {
    println!(
        "{:<16} {:<20} {:>8} {:>8} {:>8}  {}",
        "ID", "NAME", "VOTERS", "ADDRESS", "PHONE", "CRITERIA"
    );
    println!("{}", "-".repeat(96));
    for segment in store.list() {
        let name = if segment.is_placeholder {
            format!("{} (unset)", segment.name)
        } else {
            segment.name.clone()
        };
        let criteria = if segment.id == ALL_VOTERS_ID {
            "All voters".to_string()
        } else {
            segment.criteria.summary()
        };
        println!(
            "{:<16} {:<20} {:>8} {:>8} {:>8}  {}",
            segment.id,
            name,
            segment.voters_in_segment,
            segment.voters_with_address,
            segment.voters_with_phone,
            criteria,
        );
    }
    Ok(())
}

fn add_segment(
    store: &mut SegmentStore<JsonFileStore>,
    name: &str,
    description: &str,
    criteria: SegmentCriteria,
) -> anyhow::Result<()> {
    let draft = SegmentDraft {
        name: name.to_string(),
        description: description.to_string(),
        criteria,
        population: Population::random(&mut rand::thread_rng()),
    };
    let segment = store.create(draft)?;
    println!(
        "Created segment {} ({}): {} voters",
        segment.id, segment.name, segment.voters_in_segment
    );
    Ok(())
}

fn set_segment(
    store: &mut SegmentStore<JsonFileStore>,
    id: i64,
    name: Option<&str>,
    description: Option<&str>,
    criteria_flags: SegmentCriteria,
    clear_criteria: bool,
) -> anyhow::Result<()> {
    let stored = store
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("segment not found: {}", id))?;
    let was_placeholder = stored.is_placeholder;

    let criteria = if clear_criteria {
        SegmentCriteria::unrestricted()
    } else if criteria_flags.is_empty() {
        stored.criteria.clone()
    } else {
        criteria_flags
    };

    let draft = SegmentDraft {
        name: name.unwrap_or(&stored.name).to_string(),
        description: description.unwrap_or(&stored.description).to_string(),
        criteria,
        population: stored.population(),
    };
    let segment = store.update(id, draft)?;
    print_update_summary(segment, was_placeholder);
    Ok(())
}

fn print_update_summary(segment: &VoterSegment, was_placeholder: bool) {
    if was_placeholder && !segment.is_placeholder {
        println!(
            "Configured {}: {} voters ({} with address, {} with phone)",
            segment.name,
            segment.voters_in_segment,
            segment.voters_with_address,
            segment.voters_with_phone
        );
    } else {
        println!("Updated segment {} ({})", segment.id, segment.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cv_segment::BASE_ID;
    use tempfile::tempdir;

    fn open_store(data_dir: &std::path::Path) -> SegmentStore<JsonFileStore> {
        SegmentStore::open(JsonFileStore::new(data_dir).unwrap()).unwrap()
    }

    #[test]
    fn add_segment_drafts_a_random_population() {
        let dir = tempdir().unwrap();
        let mut store = open_store(dir.path());

        add_segment(
            &mut store,
            "Students",
            "campus precincts",
            SegmentCriteria::unrestricted(),
        )
        .unwrap();

        let created = store
            .list()
            .iter()
            .find(|s| s.name == "Students")
            .cloned()
            .unwrap();
        assert!((500..=2000).contains(&created.voters_in_segment));
        assert!(!created.is_placeholder);
    }

    #[test]
    fn set_segment_configures_base_via_criteria_change() {
        let dir = tempdir().unwrap();
        let mut store = open_store(dir.path());

        let mut criteria = SegmentCriteria::unrestricted();
        criteria.vote_likelihood = vec!["Super Voters (75%+)".to_string()];
        set_segment(&mut store, BASE_ID, None, None, criteria, false).unwrap();

        let base = store.get(BASE_ID).unwrap();
        assert!(!base.is_placeholder);
        assert!((500..=2000).contains(&base.voters_in_segment));
    }

    #[test]
    fn set_segment_without_flags_keeps_criteria() {
        let dir = tempdir().unwrap();
        let mut store = open_store(dir.path());

        // No criteria flags: Base keeps its (empty) criteria, so it stays
        // an unconfigured placeholder.
        set_segment(
            &mut store,
            BASE_ID,
            Some("My base"),
            None,
            SegmentCriteria::unrestricted(),
            false,
        )
        .unwrap();

        let base = store.get(BASE_ID).unwrap();
        assert_eq!(base.name, "My base");
        assert!(base.is_placeholder);
        assert_eq!(base.voters_in_segment, 0);
    }
}
