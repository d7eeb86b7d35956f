//! CRUD operations and queries over the entity store.
//!
//! Reads return owned copies; nothing handed out by the repository keeps
//! the store locked. Missing identifiers are a normal outcome and come back
//! as `None` / `false`. Only writes that reference other entities can fail.

use crate::store::{next_id, EntityStore, Store};
use crate::{
    EntityKind, Error, Exercise, NewExercise, NewWorkout, NewWorkoutExercise, Result, Workout,
    WorkoutExercise, WorkoutExerciseDetail, WorkoutExercisePatch, WorkoutPatch,
    WorkoutWithExercises,
};
use chrono::Utc;

/// Repository over a shared `Store`
#[derive(Clone, Debug)]
pub struct Repository {
    store: Store,
}

impl Repository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    // ========================================================================
    // Exercises
    // ========================================================================

    /// All exercises, sorted by name
    pub fn list_exercises(&self) -> Vec<Exercise> {
        self.collect_exercises(|_| true)
    }

    /// Exercises whose category label matches exactly (case-sensitive)
    pub fn list_exercises_by_category(&self, category: &str) -> Vec<Exercise> {
        self.collect_exercises(|e| e.category.as_str() == category)
    }

    /// Case-insensitive substring search over name, description and target muscles
    ///
    /// An empty query matches every exercise.
    pub fn search_exercises(&self, query: &str) -> Vec<Exercise> {
        let needle = query.to_lowercase();
        self.collect_exercises(|e| {
            e.name.to_lowercase().contains(&needle)
                || e
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
                || e
                    .target_muscles
                    .iter()
                    .any(|m| m.to_lowercase().contains(&needle))
        })
    }

    pub fn get_exercise(&self, id: &str) -> Option<Exercise> {
        self.store.read().exercises.get(id).cloned()
    }

    /// Store a new exercise. Names are not required to be unique.
    pub fn create_exercise(&self, input: NewExercise) -> Exercise {
        let exercise = self.store.write().insert_exercise(input);
        tracing::debug!("Created exercise {} ({})", exercise.id, exercise.name);
        exercise
    }

    fn collect_exercises(&self, keep: impl Fn(&Exercise) -> bool) -> Vec<Exercise> {
        let store = self.store.read();
        let mut exercises: Vec<_> = store
            .exercises
            .values()
            .filter(|e| keep(e))
            .cloned()
            .collect();
        exercises.sort_by(|a, b| a.name.cmp(&b.name));
        exercises
    }

    // ========================================================================
    // Workouts
    // ========================================================================

    /// All workouts, newest first
    pub fn list_workouts(&self) -> Vec<Workout> {
        let mut workouts: Vec<_> = self.store.read().workouts.values().cloned().collect();
        workouts.sort_by(|a, b| b.date.cmp(&a.date));
        workouts
    }

    /// A workout joined with its exercises
    pub fn get_workout(&self, id: &str) -> Option<WorkoutWithExercises> {
        let store = self.store.read();
        let workout = store.workouts.get(id)?.clone();
        let exercises = join_exercises(&store, id);
        Some(WorkoutWithExercises { workout, exercises })
    }

    pub fn create_workout(&self, input: NewWorkout) -> Workout {
        let workout = input.into_workout(next_id(), Utc::now());
        self.store
            .write()
            .workouts
            .insert(workout.id.clone(), workout.clone());
        tracing::debug!("Created workout {} ({})", workout.id, workout.name);
        workout
    }

    pub fn update_workout(&self, id: &str, patch: WorkoutPatch) -> Option<Workout> {
        let mut store = self.store.write();
        let workout = store.workouts.get_mut(id)?;
        patch.apply(workout);
        tracing::debug!("Updated workout {}", id);
        Some(workout.clone())
    }

    /// Remove a workout and every workout exercise that belongs to it
    ///
    /// Returns whether the workout existed.
    pub fn delete_workout(&self, id: &str) -> bool {
        let mut store = self.store.write();
        let existed = store.workouts.remove(id).is_some();

        let before = store.workout_exercises.len();
        store.workout_exercises.retain(|_, we| we.workout_id != id);
        let cascaded = before - store.workout_exercises.len();

        if existed {
            tracing::debug!(
                "Deleted workout {} and {} linked exercises",
                id,
                cascaded
            );
        }
        existed
    }

    // ========================================================================
    // Workout exercises
    // ========================================================================

    /// Link an exercise to a workout
    ///
    /// Fails with `DanglingReference` if either side does not exist.
    pub fn add_workout_exercise(&self, input: NewWorkoutExercise) -> Result<WorkoutExercise> {
        let mut store = self.store.write();
        check_references(&store, &input.workout_id, &input.exercise_id)?;

        let entry = input.into_workout_exercise(next_id());
        store
            .workout_exercises
            .insert(entry.id.clone(), entry.clone());
        tracing::debug!(
            "Added exercise {} to workout {} as {}",
            entry.exercise_id,
            entry.workout_id,
            entry.id
        );
        Ok(entry)
    }

    pub fn get_workout_exercise(&self, id: &str) -> Option<WorkoutExercise> {
        self.store.read().workout_exercises.get(id).cloned()
    }

    /// Every workout exercise linked to `workout_id`
    pub fn list_workout_exercises(&self, workout_id: &str) -> Vec<WorkoutExercise> {
        self.store
            .read()
            .workout_exercises
            .values()
            .filter(|we| we.workout_id == workout_id)
            .cloned()
            .collect()
    }

    pub fn remove_workout_exercise(&self, id: &str) -> bool {
        let removed = self.store.write().workout_exercises.remove(id).is_some();
        if removed {
            tracing::debug!("Removed workout exercise {}", id);
        }
        removed
    }

    /// Shallow-merge `patch` onto a workout exercise
    ///
    /// `Ok(None)` when `id` is unknown; `DanglingReference` when the patch
    /// re-points the entry at a missing workout or exercise.
    pub fn update_workout_exercise(
        &self,
        id: &str,
        patch: WorkoutExercisePatch,
    ) -> Result<Option<WorkoutExercise>> {
        let mut store = self.store.write();
        let Some(current) = store.workout_exercises.get(id) else {
            return Ok(None);
        };

        let mut updated = current.clone();
        patch.apply(&mut updated);
        check_references(&store, &updated.workout_id, &updated.exercise_id)?;

        store
            .workout_exercises
            .insert(id.to_string(), updated.clone());
        tracing::debug!("Updated workout exercise {}", id);
        Ok(Some(updated))
    }
}

fn check_references(store: &EntityStore, workout_id: &str, exercise_id: &str) -> Result<()> {
    if !store.workouts.contains_key(workout_id) {
        return Err(Error::dangling(EntityKind::Workout, workout_id));
    }
    if !store.exercises.contains_key(exercise_id) {
        return Err(Error::dangling(EntityKind::Exercise, exercise_id));
    }
    Ok(())
}

fn join_exercises(store: &EntityStore, workout_id: &str) -> Vec<WorkoutExerciseDetail> {
    store
        .workout_exercises
        .values()
        .filter(|we| we.workout_id == workout_id)
        .filter_map(|we| match store.exercises.get(&we.exercise_id) {
            Some(exercise) => Some(WorkoutExerciseDetail {
                entry: we.clone(),
                exercise: exercise.clone(),
            }),
            None => {
                tracing::warn!(
                    "Workout exercise {} references unknown exercise {}",
                    we.id,
                    we.exercise_id
                );
                None
            }
        })
        .collect()
}
