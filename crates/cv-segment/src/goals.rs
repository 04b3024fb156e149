// goals.rs — TouchGoalStore: per-segment touch goals.
//
// A touch goal is how many times the organizer wants each voter in a
// segment contacted over the campaign. It is a small independent map,
// persisted whole like every other collection. Segments without a stored
// goal fall back to the default.

use std::collections::BTreeMap;

use cv_store::{KeyValueStore, TOUCH_GOALS_KEY};

use crate::error::SegmentError;

/// Touch goal applied when a segment has none stored.
pub const DEFAULT_TOUCH_GOAL: u32 = 5;

/// Persistent map from segment id to touch goal.
pub struct TouchGoalStore<S: KeyValueStore> {
    goals: BTreeMap<i64, u32>,
    kv: S,
}

impl<S: KeyValueStore> TouchGoalStore<S> {
    /// Open the store, loading the persisted map (empty if absent).
    pub fn open(kv: S) -> Result<Self, SegmentError> {
        let goals = kv.get_json(TOUCH_GOALS_KEY)?.unwrap_or_default();
        Ok(Self { goals, kv })
    }

    /// The goal for a segment, falling back to [`DEFAULT_TOUCH_GOAL`].
    pub fn goal_for(&self, segment_id: i64) -> u32 {
        self.goals
            .get(&segment_id)
            .copied()
            .unwrap_or(DEFAULT_TOUCH_GOAL)
    }

    /// Set a segment's goal and persist.
    pub fn set(&mut self, segment_id: i64, goal: u32) -> Result<(), SegmentError> {
        self.goals.insert(segment_id, goal);
        self.persist()
    }

    /// Remove a segment's goal (reverting it to the default) and persist.
    pub fn clear(&mut self, segment_id: i64) -> Result<(), SegmentError> {
        self.goals.remove(&segment_id);
        self.persist()
    }

    /// All explicitly stored goals.
    pub fn entries(&self) -> impl Iterator<Item = (i64, u32)> + '_ {
        self.goals.iter().map(|(id, goal)| (*id, *goal))
    }

    fn persist(&mut self) -> Result<(), SegmentError> {
        self.kv.set_json(TOUCH_GOALS_KEY, &self.goals)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cv_store::{JsonFileStore, MemoryStore};
    use tempfile::tempdir;

    #[test]
    fn unset_segment_gets_default_goal() {
        let store = TouchGoalStore::open(MemoryStore::new()).unwrap();
        assert_eq!(store.goal_for(1), DEFAULT_TOUCH_GOAL);
    }

    #[test]
    fn set_and_clear_round_trip() {
        let mut store = TouchGoalStore::open(MemoryStore::new()).unwrap();

        store.set(2, 8).unwrap();
        assert_eq!(store.goal_for(2), 8);

        store.clear(2).unwrap();
        assert_eq!(store.goal_for(2), DEFAULT_TOUCH_GOAL);
    }

    #[test]
    fn goals_survive_reopen() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("data");

        {
            let kv = JsonFileStore::new(&data_dir).unwrap();
            let mut store = TouchGoalStore::open(kv).unwrap();
            store.set(1, 3).unwrap();
        }

        {
            let kv = JsonFileStore::new(&data_dir).unwrap();
            let store = TouchGoalStore::open(kv).unwrap();
            assert_eq!(store.goal_for(1), 3);
            assert_eq!(store.entries().count(), 1);
        }
    }
}
