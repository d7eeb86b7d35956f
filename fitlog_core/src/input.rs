//! Input records accepted by the repository.
//!
//! These mirror the stored entities minus `id`. Patch types carry only the
//! fields a caller wants to change; `None` always means "leave as is".

use crate::{Error, Exercise, ExerciseCategory, Result, Workout, WorkoutExercise};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn into_result(errors: Vec<String>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(errors))
    }
}

/// A new catalog entry
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExercise {
    pub name: String,
    pub category: ExerciseCategory,
    #[serde(default)]
    pub target_muscles: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewExercise {
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if is_blank(&self.name) {
            errors.push("name must not be empty".to_string());
        }
        if is_blank(self.category.as_str()) {
            errors.push("category must not be empty".to_string());
        }
        into_result(errors)
    }

    pub(crate) fn into_exercise(self, id: String) -> Exercise {
        Exercise {
            id,
            name: self.name,
            category: self.category,
            target_muscles: self.target_muscles,
            description: self.description,
        }
    }
}

/// A new workout; `date` defaults to the time of creation
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkout {
    pub name: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub calories_burned: Option<u32>,
}

impl NewWorkout {
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if is_blank(&self.name) {
            errors.push("name must not be empty".to_string());
        }
        into_result(errors)
    }

    pub(crate) fn into_workout(self, id: String, now: DateTime<Utc>) -> Workout {
        Workout {
            id,
            name: self.name,
            date: self.date.unwrap_or(now),
            duration: self.duration,
            notes: self.notes,
            calories_burned: self.calories_burned,
        }
    }
}

/// Partial update for a workout
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub calories_burned: Option<u32>,
}

impl WorkoutPatch {
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if self.name.as_deref().is_some_and(is_blank) {
            errors.push("name must not be empty".to_string());
        }
        into_result(errors)
    }

    /// Shallow merge onto `workout`
    pub fn apply(self, workout: &mut Workout) {
        if let Some(name) = self.name {
            workout.name = name;
        }
        if let Some(date) = self.date {
            workout.date = date;
        }
        if self.duration.is_some() {
            workout.duration = self.duration;
        }
        if self.notes.is_some() {
            workout.notes = self.notes;
        }
        if self.calories_burned.is_some() {
            workout.calories_burned = self.calories_burned;
        }
    }
}

/// Links an exercise to a workout with optional performance metrics
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkoutExercise {
    pub workout_id: String,
    pub exercise_id: String,
    #[serde(default)]
    pub sets: Option<u32>,
    #[serde(default)]
    pub reps: Option<u32>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub distance: Option<u32>,
    #[serde(default)]
    pub time: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewWorkoutExercise {
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if is_blank(&self.workout_id) {
            errors.push("workoutId must not be empty".to_string());
        }
        if is_blank(&self.exercise_id) {
            errors.push("exerciseId must not be empty".to_string());
        }
        into_result(errors)
    }

    pub(crate) fn into_workout_exercise(self, id: String) -> WorkoutExercise {
        WorkoutExercise {
            id,
            workout_id: self.workout_id,
            exercise_id: self.exercise_id,
            sets: self.sets,
            reps: self.reps,
            weight: self.weight,
            distance: self.distance,
            time: self.time,
            notes: self.notes,
        }
    }
}

/// Partial update for a workout exercise
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercisePatch {
    #[serde(default)]
    pub workout_id: Option<String>,
    #[serde(default)]
    pub exercise_id: Option<String>,
    #[serde(default)]
    pub sets: Option<u32>,
    #[serde(default)]
    pub reps: Option<u32>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub distance: Option<u32>,
    #[serde(default)]
    pub time: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl WorkoutExercisePatch {
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if self.workout_id.as_deref().is_some_and(is_blank) {
            errors.push("workoutId must not be empty".to_string());
        }
        if self.exercise_id.as_deref().is_some_and(is_blank) {
            errors.push("exerciseId must not be empty".to_string());
        }
        into_result(errors)
    }

    /// Shallow merge onto `entry`
    pub fn apply(self, entry: &mut WorkoutExercise) {
        if let Some(workout_id) = self.workout_id {
            entry.workout_id = workout_id;
        }
        if let Some(exercise_id) = self.exercise_id {
            entry.exercise_id = exercise_id;
        }
        let metrics = [
            (&mut entry.sets, self.sets),
            (&mut entry.reps, self.reps),
            (&mut entry.weight, self.weight),
            (&mut entry.distance, self.distance),
            (&mut entry.time, self.time),
        ];
        for (slot, value) in metrics {
            if value.is_some() {
                *slot = value;
            }
        }
        if self.notes.is_some() {
            entry.notes = self.notes;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_workout() -> Workout {
        Workout {
            id: "w1".into(),
            name: "A".into(),
            date: Utc::now(),
            duration: Some(30),
            notes: Some("x".into()),
            calories_burned: Some(200),
        }
    }

    #[test]
    fn test_patch_only_touches_supplied_fields() {
        let mut workout = sample_workout();
        let patch = WorkoutPatch {
            name: Some("B".into()),
            ..Default::default()
        };
        patch.apply(&mut workout);

        assert_eq!(workout.name, "B");
        assert_eq!(workout.notes, Some("x".into()));
        assert_eq!(workout.duration, Some(30));
        assert_eq!(workout.calories_burned, Some(200));
    }

    #[test]
    fn test_null_in_json_patch_does_not_clear() {
        let mut workout = sample_workout();
        let patch: WorkoutPatch = serde_json::from_str(r#"{"notes": null}"#).unwrap();
        patch.apply(&mut workout);
        assert_eq!(workout.notes, Some("x".into()));
    }

    #[test]
    fn test_workout_exercise_patch_merges_metrics() {
        let mut entry = WorkoutExercise {
            id: "we1".into(),
            workout_id: "w1".into(),
            exercise_id: "e1".into(),
            sets: Some(3),
            reps: Some(10),
            weight: Some(100),
            distance: None,
            time: None,
            notes: None,
        };
        let patch = WorkoutExercisePatch {
            reps: Some(12),
            time: Some(90),
            ..Default::default()
        };
        patch.apply(&mut entry);

        assert_eq!(entry.sets, Some(3));
        assert_eq!(entry.reps, Some(12));
        assert_eq!(entry.weight, Some(100));
        assert_eq!(entry.time, Some(90));
        assert_eq!(entry.workout_id, "w1");
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let input = NewWorkout {
            name: "   ".into(),
            ..Default::default()
        };
        match input.validate() {
            Err(Error::Validation(errors)) => assert_eq!(errors.len(), 1),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_workout_exercise_reports_all_errors() {
        let input = NewWorkoutExercise::default();
        match input.validate() {
            Err(Error::Validation(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].contains("workoutId"));
                assert!(errors[1].contains("exerciseId"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_metric_fails_to_deserialize() {
        let result = serde_json::from_str::<NewWorkoutExercise>(
            r#"{"workoutId": "w", "exerciseId": "e", "reps": -3}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_new_workout_defaults_date() {
        let now = Utc::now();
        let workout = NewWorkout {
            name: "Run".into(),
            ..Default::default()
        }
        .into_workout("w9".into(), now);
        assert_eq!(workout.date, now);
    }
}
