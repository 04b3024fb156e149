// store.rs — SegmentStore: the source of truth for voter segments.
//
// The store loads the whole segment collection once when it opens, seeds
// any missing required segment (0/1/2), and rewrites the full snapshot
// after every mutation. All mutation goes through the operation methods;
// nothing else may touch the collection.
//
// Required-segment rules enforced here:
//   - id 0 rejects update and delete outright.
//   - ids 1/2 reject delete; an update that changes their criteria
//     (structural comparison) assigns a randomized population and clears
//     the placeholder flag.

use chrono::Utc;
use cv_store::{KeyValueStore, SEGMENTS_KEY};

use crate::error::SegmentError;
use crate::segment::{
    Population, SegmentDraft, VoterSegment, ALL_VOTERS_ID, BASE_ID, PERSUADABLES_ID,
};

/// Persistent store for the voter segment collection.
pub struct SegmentStore<S: KeyValueStore> {
    segments: Vec<VoterSegment>,
    kv: S,
}

impl<S: KeyValueStore> SegmentStore<S> {
    /// Open the store: load the persisted collection and seed any missing
    /// required segment. Seeding persists immediately so a reload sees the
    /// same collection.
    pub fn open(kv: S) -> Result<Self, SegmentError> {
        let segments: Vec<VoterSegment> = kv.get_json(SEGMENTS_KEY)?.unwrap_or_default();
        let mut store = Self { segments, kv };

        let mut seeded = false;
        for required in [
            VoterSegment::all_voters(),
            VoterSegment::base_placeholder(),
            VoterSegment::persuadables_placeholder(),
        ] {
            if !store.segments.iter().any(|s| s.id == required.id) {
                // Reserved segments lead the list, in id order.
                let pos = store
                    .segments
                    .iter()
                    .take_while(|s| s.is_reserved() && s.id < required.id)
                    .count();
                tracing::info!(id = required.id, name = %required.name, "seeding required segment");
                store.segments.insert(pos, required);
                seeded = true;
            }
        }
        if seeded {
            store.persist()?;
        }
        Ok(store)
    }

    /// All segments in insertion order, reserved segments first.
    pub fn list(&self) -> &[VoterSegment] {
        &self.segments
    }

    /// Look up a segment by id.
    pub fn get(&self, id: i64) -> Option<&VoterSegment> {
        self.segments.iter().find(|s| s.id == id)
    }

    /// Create a user segment from a draft. Fails on a blank name.
    /// The draft's population is taken as-is; the view layer decides how
    /// to draft it (typically `Population::random`).
    pub fn create(&mut self, draft: SegmentDraft) -> Result<&VoterSegment, SegmentError> {
        validate_name(&draft.name)?;
        let segment = VoterSegment {
            id: self.next_id(),
            name: draft.name,
            description: draft.description,
            criteria: draft.criteria,
            voters_in_segment: draft.population.total,
            voters_with_address: draft.population.with_address,
            voters_with_phone: draft.population.with_phone,
            is_placeholder: false,
        };
        let index = self.segments.len();
        self.segments.push(segment);
        self.persist()?;
        Ok(&self.segments[index])
    }

    /// Update a segment.
    ///
    /// - id 0 is immutable.
    /// - ids 1/2: name/description/criteria are replaced; if the criteria
    ///   changed (structural comparison), the population is re-randomized
    ///   and the placeholder flag cleared. Their population never comes
    ///   from the draft.
    /// - other ids: full replace, including population.
    pub fn update(&mut self, id: i64, draft: SegmentDraft) -> Result<&VoterSegment, SegmentError> {
        if id == ALL_VOTERS_ID {
            return Err(SegmentError::Immutable(id));
        }
        validate_name(&draft.name)?;
        let index = self
            .segments
            .iter()
            .position(|s| s.id == id)
            .ok_or(SegmentError::NotFound(id))?;

        let stored = &mut self.segments[index];
        if id == BASE_ID || id == PERSUADABLES_ID {
            let criteria_changed = stored.criteria != draft.criteria;
            stored.name = draft.name;
            stored.description = draft.description;
            stored.criteria = draft.criteria;
            if criteria_changed {
                let population = Population::random(&mut rand::thread_rng());
                tracing::info!(id, total = population.total, "required segment configured");
                stored.set_population(population);
                stored.is_placeholder = false;
            }
        } else {
            stored.name = draft.name;
            stored.description = draft.description;
            stored.criteria = draft.criteria;
            stored.set_population(draft.population);
        }
        self.persist()?;
        Ok(&self.segments[index])
    }

    /// Delete a user segment. Reserved ids (0/1/2) are never deletable.
    pub fn delete(&mut self, id: i64) -> Result<(), SegmentError> {
        if matches!(id, ALL_VOTERS_ID | BASE_ID | PERSUADABLES_ID) {
            return Err(SegmentError::Immutable(id));
        }
        let index = self
            .segments
            .iter()
            .position(|s| s.id == id)
            .ok_or(SegmentError::NotFound(id))?;
        self.segments.remove(index);
        self.persist()?;
        Ok(())
    }

    /// Generated ids are creation-timestamp milliseconds, bumped past the
    /// current maximum so two creates in the same millisecond stay unique.
    fn next_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let max = self.segments.iter().map(|s| s.id).max().unwrap_or(0);
        now.max(max + 1)
    }

    fn persist(&mut self) -> Result<(), SegmentError> {
        self.kv.set_json(SEGMENTS_KEY, &self.segments)?;
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), SegmentError> {
    if name.trim().is_empty() {
        return Err(SegmentError::Validation("name is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::{CriteriaDimension, SegmentCriteria};
    use cv_store::{JsonFileStore, MemoryStore};
    use tempfile::tempdir;

    fn draft(name: &str) -> SegmentDraft {
        SegmentDraft {
            name: name.to_string(),
            description: "test segment".to_string(),
            criteria: SegmentCriteria::unrestricted(),
            population: Population {
                total: 1000,
                with_address: 800,
                with_phone: 700,
            },
        }
    }

    #[test]
    fn open_seeds_required_segments() {
        let store = SegmentStore::open(MemoryStore::new()).unwrap();
        let segments = store.list();

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].id, ALL_VOTERS_ID);
        assert_eq!(segments[0].name, "All voters");
        assert_eq!(segments[1].id, BASE_ID);
        assert!(segments[1].is_placeholder);
        assert_eq!(segments[2].id, PERSUADABLES_ID);
        assert!(segments[2].is_placeholder);
    }

    #[test]
    fn all_voters_resists_update_and_delete() {
        let mut store = SegmentStore::open(MemoryStore::new()).unwrap();

        let result = store.update(ALL_VOTERS_ID, draft("Renamed"));
        assert!(matches!(result, Err(SegmentError::Immutable(0))));

        let result = store.delete(ALL_VOTERS_ID);
        assert!(matches!(result, Err(SegmentError::Immutable(0))));

        // Population untouched.
        let all = store.get(ALL_VOTERS_ID).unwrap();
        assert_eq!(all.voters_in_segment, 5000);
        assert_eq!(all.voters_with_address, 4500);
        assert_eq!(all.voters_with_phone, 4000);
    }

    #[test]
    fn create_rejects_blank_name() {
        let mut store = SegmentStore::open(MemoryStore::new()).unwrap();
        let before = store.list().len();

        let result = store.create(draft("   "));
        assert!(matches!(result, Err(SegmentError::Validation(_))));
        assert_eq!(store.list().len(), before);
    }

    #[test]
    fn create_assigns_unique_generated_ids() {
        let mut store = SegmentStore::open(MemoryStore::new()).unwrap();

        let id1 = store.create(draft("First")).unwrap().id;
        let id2 = store.create(draft("Second")).unwrap().id;

        assert!(id1 > PERSUADABLES_ID);
        assert!(id2 > id1);
    }

    #[test]
    fn configuring_base_randomizes_population_and_clears_placeholder() {
        let mut store = SegmentStore::open(MemoryStore::new()).unwrap();

        let mut criteria = SegmentCriteria::unrestricted();
        criteria.toggle(CriteriaDimension::VoteLikelihood, "Super Voters (75%+)");
        let configured = store
            .update(
                BASE_ID,
                SegmentDraft {
                    name: "Base".to_string(),
                    description: "Core supporters".to_string(),
                    criteria,
                    population: Population::zero(),
                },
            )
            .unwrap();

        assert!(!configured.is_placeholder);
        assert!((500..=2000).contains(&configured.voters_in_segment));
        assert!(configured.voters_with_address <= configured.voters_in_segment);
        assert!(configured.voters_with_phone <= configured.voters_in_segment);
    }

    #[test]
    fn resaving_equal_criteria_keeps_population() {
        let mut store = SegmentStore::open(MemoryStore::new()).unwrap();

        let mut criteria = SegmentCriteria::unrestricted();
        criteria.toggle(CriteriaDimension::Party, "Democrat");
        let first = SegmentDraft {
            name: "Base".to_string(),
            description: "Core supporters".to_string(),
            criteria: criteria.clone(),
            population: Population::zero(),
        };
        let population = store.update(BASE_ID, first.clone()).unwrap().population();

        // Same criteria values in a freshly built draft: structural equality
        // means no re-randomization.
        let again = store.update(BASE_ID, first).unwrap();
        assert_eq!(again.population(), population);
        assert!(!again.is_placeholder);
    }

    #[test]
    fn required_segments_cannot_be_deleted() {
        let mut store = SegmentStore::open(MemoryStore::new()).unwrap();

        for id in [BASE_ID, PERSUADABLES_ID] {
            let result = store.delete(id);
            assert!(matches!(result, Err(SegmentError::Immutable(_))));
        }
        assert_eq!(store.list().len(), 3);
    }

    #[test]
    fn user_segments_update_and_delete_freely() {
        let mut store = SegmentStore::open(MemoryStore::new()).unwrap();

        let id = store.create(draft("Students")).unwrap().id;

        let mut updated = draft("Commuter students");
        updated.population.total = 1234;
        let segment = store.update(id, updated).unwrap();
        assert_eq!(segment.name, "Commuter students");
        assert_eq!(segment.voters_in_segment, 1234);

        store.delete(id).unwrap();
        assert!(store.get(id).is_none());
    }

    #[test]
    fn update_unknown_id_returns_not_found() {
        let mut store = SegmentStore::open(MemoryStore::new()).unwrap();
        let result = store.update(424242, draft("Ghost"));
        assert!(matches!(result, Err(SegmentError::NotFound(424242))));
    }

    #[test]
    fn collection_reloads_identically() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("data");

        let created_id;
        {
            let kv = JsonFileStore::new(&data_dir).unwrap();
            let mut store = SegmentStore::open(kv).unwrap();
            created_id = store.create(draft("Volunteers")).unwrap().id;
        }

        {
            let kv = JsonFileStore::new(&data_dir).unwrap();
            let store = SegmentStore::open(kv).unwrap();
            assert_eq!(store.list().len(), 4);
            let reloaded = store.get(created_id).unwrap();
            assert_eq!(reloaded.name, "Volunteers");
            assert_eq!(reloaded.voters_in_segment, 1000);
        }
    }
}
