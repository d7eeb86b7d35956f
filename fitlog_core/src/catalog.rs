//! Default exercise catalog.
//!
//! This module provides the built-in exercises every store is seeded with.

use crate::{ExerciseCategory, NewExercise};
use once_cell::sync::Lazy;

/// Cached default catalog - built once and reused across all stores
static DEFAULT_CATALOG: Lazy<Vec<NewExercise>> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn default_catalog() -> &'static [NewExercise] {
    &DEFAULT_CATALOG
}

fn entry(
    name: &str,
    category: ExerciseCategory,
    muscles: &[&str],
    description: &str,
) -> NewExercise {
    NewExercise {
        name: name.into(),
        category,
        target_muscles: muscles.iter().map(|m| (*m).to_string()).collect(),
        description: Some(description.into()),
    }
}

/// Builds the 15 built-in exercises
///
/// **Note**: prefer `default_catalog()`, which returns the cached copy.
pub fn build_default_catalog() -> Vec<NewExercise> {
    use ExerciseCategory::*;

    vec![
        // Strength
        entry(
            "Push-ups",
            Strength,
            &["chest", "triceps", "shoulders"],
            "Bodyweight chest exercise",
        ),
        entry(
            "Pull-ups",
            Strength,
            &["back", "biceps"],
            "Bodyweight back exercise",
        ),
        entry(
            "Squats",
            Strength,
            &["legs", "glutes"],
            "Bodyweight leg exercise",
        ),
        entry(
            "Deadlift",
            Strength,
            &["back", "legs", "glutes"],
            "Compound strength exercise",
        ),
        entry(
            "Bench Press",
            Strength,
            &["chest", "triceps", "shoulders"],
            "Chest pressing exercise",
        ),
        // Cardio
        entry(
            "Running",
            Cardio,
            &["legs", "core"],
            "Cardiovascular exercise",
        ),
        entry("Cycling", Cardio, &["legs"], "Low-impact cardio"),
        entry(
            "Burpees",
            Cardio,
            &["full body"],
            "High-intensity full body exercise",
        ),
        entry("Planks", Strength, &["core"], "Core stability exercise"),
        entry(
            "Mountain Climbers",
            Cardio,
            &["core", "legs"],
            "Dynamic core exercise",
        ),
        // Yoga
        entry("Yoga Flow", Yoga, &["full body"], "Flowing yoga sequence"),
        entry(
            "Warrior Pose",
            Yoga,
            &["legs", "core"],
            "Standing yoga pose",
        ),
        entry(
            "Downward Dog",
            Yoga,
            &["shoulders", "back", "legs"],
            "Inverted yoga pose",
        ),
        // Flexibility
        entry(
            "Hamstring Stretch",
            Flexibility,
            &["hamstrings"],
            "Leg flexibility",
        ),
        entry(
            "Shoulder Stretch",
            Flexibility,
            &["shoulders"],
            "Upper body flexibility",
        ),
    ]
}

/// Validate a catalog for consistency and completeness
///
/// Returns a list of validation errors, or empty Vec if valid.
pub fn catalog_errors(catalog: &[NewExercise]) -> Vec<String> {
    let mut errors = Vec::new();

    for (index, exercise) in catalog.iter().enumerate() {
        if let Err(crate::Error::Validation(problems)) = exercise.validate() {
            for problem in problems {
                errors.push(format!(
                    "Catalog entry {} ('{}'): {}",
                    index, exercise.name, problem
                ));
            }
        }
    }

    for category in ExerciseCategory::BUILT_IN.iter() {
        if !catalog.iter().any(|e| &e.category == category) {
            errors.push(format!("Catalog has no {} exercises", category));
        }
    }

    errors
}
