//! In-memory entity store.
//!
//! Holds the three collections (exercises, workouts, workout exercises)
//! behind a single lock. A `Store` is a cloneable handle; every clone sees
//! the same data, so the repository and the statistics engine can each be
//! given one at construction time.

use crate::{Exercise, NewExercise, Workout, WorkoutExercise};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// Generate a fresh opaque identifier
pub fn next_id() -> String {
    Uuid::new_v4().to_string()
}

/// The raw collections, keyed by identifier
#[derive(Clone, Debug, Default)]
pub struct EntityStore {
    pub(crate) exercises: HashMap<String, Exercise>,
    pub(crate) workouts: HashMap<String, Workout>,
    pub(crate) workout_exercises: HashMap<String, WorkoutExercise>,
}

impl EntityStore {
    /// An empty store with no catalog
    pub fn empty() -> Self {
        Self::default()
    }

    /// A store seeded with the given exercises
    pub fn seeded<'a>(catalog: impl IntoIterator<Item = &'a NewExercise>) -> Self {
        let mut store = Self::empty();
        for exercise in catalog {
            store.insert_exercise(exercise.clone());
        }
        tracing::debug!("Seeded store with {} exercises", store.exercises.len());
        store
    }

    pub(crate) fn insert_exercise(&mut self, input: NewExercise) -> Exercise {
        let exercise = input.into_exercise(next_id());
        self.exercises.insert(exercise.id.clone(), exercise.clone());
        exercise
    }

    pub fn exercise_count(&self) -> usize {
        self.exercises.len()
    }

    pub fn workout_count(&self) -> usize {
        self.workouts.len()
    }

    pub fn workout_exercise_count(&self) -> usize {
        self.workout_exercises.len()
    }
}

/// Shared handle to an `EntityStore`
#[derive(Clone, Debug)]
pub struct Store {
    inner: Arc<RwLock<EntityStore>>,
}

impl Store {
    pub fn new(store: EntityStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// A store seeded with the built-in catalog
    pub fn with_default_catalog() -> Self {
        Self::new(EntityStore::seeded(crate::catalog::default_catalog()))
    }

    // Every write is a single step under the guard, so a poisoned lock
    // still protects consistent data.
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, EntityStore> {
        self.inner.read().unwrap_or_else(|poisoned| {
            tracing::warn!("Entity store lock was poisoned; recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, EntityStore> {
        self.inner.write().unwrap_or_else(|poisoned| {
            tracing::warn!("Entity store lock was poisoned; recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    /// A copy of the current contents
    pub fn snapshot(&self) -> EntityStore {
        self.read().clone()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::with_default_catalog()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;

    #[test]
    fn test_seeded_store_assigns_unique_ids() {
        let store = EntityStore::seeded(default_catalog());
        assert_eq!(store.exercise_count(), 15);
        for (id, exercise) in &store.exercises {
            assert_eq!(id, &exercise.id);
        }
    }

    #[test]
    fn test_separate_stores_do_not_share_ids() {
        let a = EntityStore::seeded(default_catalog());
        let b = EntityStore::seeded(default_catalog());
        assert!(a.exercises.keys().all(|id| !b.exercises.contains_key(id)));
    }

    #[test]
    fn test_clones_share_state() {
        let store = Store::new(EntityStore::empty());
        let other = store.clone();
        store.write().insert_exercise(default_catalog()[0].clone());
        assert_eq!(other.snapshot().exercise_count(), 1);
    }

    #[test]
    fn test_empty_store() {
        let store = EntityStore::empty();
        assert_eq!(store.exercise_count(), 0);
        assert_eq!(store.workout_count(), 0);
        assert_eq!(store.workout_exercise_count(), 0);
    }
}
