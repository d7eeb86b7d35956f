//! Derived views over workouts: summaries, calorie estimates, weekly
//! activity and calendar months.

use crate::stats::local_midnight;
use crate::{
    ExerciseCategory, Workout, WorkoutExerciseDetail, WorkoutStats, WorkoutWithExercises,
};
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Minutes assumed for an exercise logged without a time
const DEFAULT_EXERCISE_MINUTES: f64 = 30.0;

/// Rough energy cost per minute, by category
fn calories_per_minute(category: &ExerciseCategory) -> f64 {
    match category {
        ExerciseCategory::Strength => 8.0,
        ExerciseCategory::Cardio => 12.0,
        ExerciseCategory::Yoga => 4.0,
        ExerciseCategory::Flexibility => 2.0,
        ExerciseCategory::Other(_) => 6.0,
    }
}

/// Coarse effort rating for a workout
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intensity {
    High,
    Medium,
    Low,
}

/// At-a-glance description of one workout
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSummary {
    pub workout_id: String,
    pub exercise_count: usize,
    pub duration: String,
    pub categories: Vec<ExerciseCategory>,
    pub intensity: Intensity,
    pub estimated_calories: u32,
}

/// Aggregate statistics plus the per-workout averages shown on progress views
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    #[serde(flatten)]
    pub stats: WorkoutStats,
    /// Minutes per workout, rounded
    pub average_duration: u64,
}

/// Workout count for one 7-day window
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyCount {
    pub week: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub workouts: usize,
}

/// Workouts that fall on one calendar day
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub workouts: Vec<Workout>,
}

/// A calendar month of workouts
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
    pub total_workouts: usize,
    pub avg_per_week: f64,
}

/// Format minutes as `45m` or `1h 30m`
pub fn format_duration(minutes: u32) -> String {
    if minutes < 60 {
        format!("{}m", minutes)
    } else {
        format!("{}h {}m", minutes / 60, minutes % 60)
    }
}

/// Estimate calories burned from the exercises in a workout
pub fn estimate_calories(exercises: &[WorkoutExerciseDetail]) -> u32 {
    let total: f64 = exercises
        .iter()
        .map(|detail| {
            let minutes = detail
                .entry
                .time
                .map(|seconds| f64::from(seconds) / 60.0)
                .unwrap_or(DEFAULT_EXERCISE_MINUTES);
            minutes * calories_per_minute(&detail.exercise.category)
        })
        .sum();
    total.round() as u32
}

/// High when cardio entries outnumber strength entries, Medium with more
/// than two strength entries, Low otherwise
pub fn intensity(exercises: &[WorkoutExerciseDetail]) -> Intensity {
    let count = |category: ExerciseCategory| {
        exercises
            .iter()
            .filter(|d| d.exercise.category == category)
            .count()
    };
    let strength = count(ExerciseCategory::Strength);
    let cardio = count(ExerciseCategory::Cardio);

    if cardio > strength {
        Intensity::High
    } else if strength > 2 {
        Intensity::Medium
    } else {
        Intensity::Low
    }
}

pub fn workout_summary(workout: &WorkoutWithExercises) -> WorkoutSummary {
    let mut categories: Vec<ExerciseCategory> = Vec::new();
    for detail in &workout.exercises {
        if !categories.contains(&detail.exercise.category) {
            categories.push(detail.exercise.category.clone());
        }
    }

    WorkoutSummary {
        workout_id: workout.workout.id.clone(),
        exercise_count: workout.exercises.len(),
        duration: workout
            .workout
            .duration
            .map(format_duration)
            .unwrap_or_else(|| "No duration".to_string()),
        categories,
        intensity: intensity(&workout.exercises),
        estimated_calories: estimate_calories(&workout.exercises),
    }
}

/// Mean session length in whole minutes, halves rounded up; 0 with no workouts
pub fn average_duration(stats: &WorkoutStats) -> u64 {
    let count = stats.total_workouts as u64;
    if count == 0 {
        return 0;
    }
    (stats.total_time * 2 + count) / (count * 2)
}

pub fn progress_stats(stats: WorkoutStats) -> ProgressStats {
    ProgressStats {
        average_duration: average_duration(&stats),
        stats,
    }
}

/// Workout counts for the `weeks` 7-day windows ending at `now`, oldest first
pub fn weekly_counts(workouts: &[Workout], now: DateTime<Utc>, weeks: u32) -> Vec<WeeklyCount> {
    let first_start = now - Duration::weeks(i64::from(weeks));

    (0..weeks)
        .map(|i| {
            let start = first_start + Duration::weeks(i64::from(i));
            let end = start + Duration::weeks(1);
            WeeklyCount {
                week: format!("Week {}", i + 1),
                start,
                end,
                workouts: workouts
                    .iter()
                    .filter(|w| w.date >= start && w.date < end)
                    .count(),
            }
        })
        .collect()
}

/// Group workouts by local day for one calendar month
///
/// Returns `None` for an invalid year/month pair.
pub fn calendar_month<Tz: TimeZone>(
    workouts: &[Workout],
    year: i32,
    month: u32,
    tz: &Tz,
) -> Option<CalendarMonth> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let start = local_midnight(tz, first);
    let end = local_midnight(tz, next);

    let mut by_day: BTreeMap<NaiveDate, Vec<Workout>> = BTreeMap::new();
    for workout in workouts.iter().filter(|w| w.date >= start && w.date < end) {
        let day = workout.date.with_timezone(tz).date_naive();
        by_day.entry(day).or_default().push(workout.clone());
    }

    let days: Vec<CalendarDay> = by_day
        .into_iter()
        .map(|(date, mut workouts)| {
            workouts.sort_by(|a, b| a.date.cmp(&b.date));
            CalendarDay { date, workouts }
        })
        .collect();
    let total_workouts = days.iter().map(|d| d.workouts.len()).sum();

    // Rows a Sunday-first month grid needs
    let days_in_month = (next - first).num_days() as u32;
    let leading = first.weekday().num_days_from_sunday();
    let weeks_in_month = (leading + days_in_month).div_ceil(7);
    let avg_per_week = (total_workouts as f64 / f64::from(weeks_in_month) * 10.0).round() / 10.0;

    Some(CalendarMonth {
        year,
        month,
        days,
        total_workouts,
        avg_per_week,
    })
}
