//! Core domain types for fitlog.
//!
//! This module defines the records held by the entity store and the
//! shapes derived from them on read:
//! - Exercises and their categories
//! - Workouts and the exercises performed within them
//! - Aggregate workout statistics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Exercise Types
// ============================================================================

/// Category of an exercise
///
/// The four named categories drive derived behaviour (calorie rates,
/// intensity). Any other label is kept verbatim in `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExerciseCategory {
    Strength,
    Cardio,
    Yoga,
    Flexibility,
    Other(String),
}

impl ExerciseCategory {
    /// The built-in categories, in display order
    pub const BUILT_IN: [ExerciseCategory; 4] = [
        ExerciseCategory::Strength,
        ExerciseCategory::Cardio,
        ExerciseCategory::Yoga,
        ExerciseCategory::Flexibility,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ExerciseCategory::Strength => "strength",
            ExerciseCategory::Cardio => "cardio",
            ExerciseCategory::Yoga => "yoga",
            ExerciseCategory::Flexibility => "flexibility",
            ExerciseCategory::Other(label) => label,
        }
    }
}

impl From<String> for ExerciseCategory {
    fn from(label: String) -> Self {
        // Exact, case-sensitive: "Yoga" is not "yoga"
        match label.as_str() {
            "strength" => ExerciseCategory::Strength,
            "cardio" => ExerciseCategory::Cardio,
            "yoga" => ExerciseCategory::Yoga,
            "flexibility" => ExerciseCategory::Flexibility,
            _ => ExerciseCategory::Other(label),
        }
    }
}

impl From<&str> for ExerciseCategory {
    fn from(label: &str) -> Self {
        ExerciseCategory::from(label.to_owned())
    }
}

impl From<ExerciseCategory> for String {
    fn from(category: ExerciseCategory) -> Self {
        match category {
            ExerciseCategory::Other(label) => label,
            named => named.as_str().to_owned(),
        }
    }
}

impl fmt::Display for ExerciseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry (e.g., "Push-ups")
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub category: ExerciseCategory,
    pub target_muscles: Vec<String>,
    pub description: Option<String>,
}

// ============================================================================
// Workout Types
// ============================================================================

/// A logged workout session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    pub name: String,
    pub date: DateTime<Utc>,
    /// Minutes
    pub duration: Option<u32>,
    pub notes: Option<String>,
    pub calories_burned: Option<u32>,
}

/// One exercise's performance within one workout
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    pub id: String,
    pub workout_id: String,
    pub exercise_id: String,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    /// Pounds
    pub weight: Option<u32>,
    /// Meters
    pub distance: Option<u32>,
    /// Seconds
    pub time: Option<u32>,
    pub notes: Option<String>,
}

/// A workout exercise paired with the catalog entry it refers to
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExerciseDetail {
    #[serde(flatten)]
    pub entry: WorkoutExercise,
    pub exercise: Exercise,
}

/// A workout joined with all of its exercises. Computed on read, never stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkoutWithExercises {
    #[serde(flatten)]
    pub workout: Workout,
    pub exercises: Vec<WorkoutExerciseDetail>,
}

// ============================================================================
// Statistics Types
// ============================================================================

/// Aggregate statistics over every stored workout
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStats {
    pub total_workouts: usize,
    /// Minutes
    pub total_time: u64,
    pub total_calories: u64,
    /// Consecutive days, ending today or yesterday, with at least one workout
    pub current_streak: u32,
    pub workouts_this_month: usize,
}
