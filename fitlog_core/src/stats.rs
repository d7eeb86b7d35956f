//! Statistics engine.
//!
//! Derives totals, the monthly count and the current streak from the full
//! workout collection. Nothing is cached; every call reads the store fresh.
//!
//! Calendar math (what "today" and "this month" mean) happens in the time
//! zone of the `now` passed in. `compute_stats()` uses the process's local
//! zone.

use crate::store::Store;
use crate::{Workout, WorkoutStats};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use std::collections::BTreeSet;

/// Computes `WorkoutStats` over a shared `Store`
#[derive(Clone, Debug)]
pub struct StatsEngine {
    store: Store,
}

impl StatsEngine {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn compute_stats(&self) -> WorkoutStats {
        self.compute_stats_at(&Local::now())
    }

    pub fn compute_stats_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> WorkoutStats {
        let store = self.store.read();
        let workouts: Vec<&Workout> = store.workouts.values().collect();
        let stats = summarize(&workouts, now);
        tracing::debug!(
            "Computed stats over {} workouts (streak {})",
            stats.total_workouts,
            stats.current_streak
        );
        stats
    }
}

/// Aggregate a set of workouts as seen at `now`
pub fn summarize<Tz: TimeZone>(workouts: &[&Workout], now: &DateTime<Tz>) -> WorkoutStats {
    let month_start = start_of_month(now);

    WorkoutStats {
        total_workouts: workouts.len(),
        total_time: workouts
            .iter()
            .map(|w| u64::from(w.duration.unwrap_or(0)))
            .sum(),
        total_calories: workouts
            .iter()
            .map(|w| u64::from(w.calories_burned.unwrap_or(0)))
            .sum(),
        current_streak: current_streak(workouts.iter().map(|w| w.date), now),
        workouts_this_month: workouts.iter().filter(|w| w.date >= month_start).count(),
    }
}

/// Number of consecutive calendar days, ending today or yesterday, that have
/// at least one workout
///
/// Several workouts on one day count once. Dates after today are ignored.
pub fn current_streak<Tz: TimeZone>(
    dates: impl IntoIterator<Item = DateTime<Utc>>,
    now: &DateTime<Tz>,
) -> u32 {
    let tz = now.timezone();
    let days: BTreeSet<NaiveDate> = dates
        .into_iter()
        .map(|d| d.with_timezone(&tz).date_naive())
        .collect();

    let today = now.date_naive();
    let mut cursor = if days.contains(&today) {
        Some(today)
    } else {
        today.pred_opt().filter(|yesterday| days.contains(yesterday))
    };

    let mut streak = 0;
    while let Some(day) = cursor.filter(|d| days.contains(d)) {
        streak += 1;
        cursor = day.pred_opt();
    }
    streak
}

/// The first instant of `now`'s calendar month, in `now`'s zone
pub fn start_of_month<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let first = now.date_naive().with_day(1).unwrap_or(now.date_naive());
    local_midnight(&now.timezone(), first)
}

/// The first instant of `day` in `tz`, as UTC
///
/// Usually local midnight. When a DST transition skips midnight, the first
/// quarter hour after the gap is used instead.
pub(crate) fn local_midnight<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> DateTime<Utc> {
    let midnight = day.and_time(NaiveTime::MIN);
    (0..QUARTER_HOURS_PER_DAY)
        .map(|quarter| midnight + Duration::minutes(15 * quarter))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}

const QUARTER_HOURS_PER_DAY: i64 = 96;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EntityStore;
    use crate::{NewWorkout, Repository};
    use chrono::{FixedOffset, LocalResult, NaiveDateTime};

    /// UTC-3 until 2024-11-01 00:00 local, then clocks jump to 01:00 at UTC-2
    #[derive(Clone, Copy, Debug)]
    struct SkipsMidnight;

    impl SkipsMidnight {
        fn before() -> FixedOffset {
            FixedOffset::west_opt(3 * 3600).unwrap()
        }

        fn after() -> FixedOffset {
            FixedOffset::west_opt(2 * 3600).unwrap()
        }

        fn gap_start() -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2024, 11, 1).unwrap().and_time(NaiveTime::MIN)
        }
    }

    impl TimeZone for SkipsMidnight {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            SkipsMidnight
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_time(NaiveTime::MIN))
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let gap_start = Self::gap_start();
            if *local < gap_start {
                LocalResult::Single(Self::before())
            } else if *local < gap_start + Duration::hours(1) {
                LocalResult::None
            } else {
                LocalResult::Single(Self::after())
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_time(NaiveTime::MIN))
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < Self::gap_start() + Duration::hours(3) {
                Self::before()
            } else {
                Self::after()
            }
        }
    }

    fn noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    fn streak_for(days_ago: &[i64], now: DateTime<Utc>) -> u32 {
        current_streak(days_ago.iter().map(|d| now - Duration::days(*d)), &now)
    }

    #[test]
    fn test_streak_today_and_yesterday() {
        let now = noon(2024, 6, 15);
        assert_eq!(streak_for(&[0, 1], now), 2);
    }

    #[test]
    fn test_streak_broken_when_last_workout_three_days_ago() {
        let now = noon(2024, 6, 15);
        assert_eq!(streak_for(&[3], now), 0);
    }

    #[test]
    fn test_streak_three_consecutive_days() {
        let now = noon(2024, 6, 15);
        assert_eq!(streak_for(&[0, 1, 2], now), 3);
    }

    #[test]
    fn test_streak_stops_at_gap() {
        let now = noon(2024, 6, 15);
        assert_eq!(streak_for(&[0, 1, 2, 4], now), 3);
    }

    #[test]
    fn test_streak_may_end_yesterday() {
        let now = noon(2024, 6, 15);
        assert_eq!(streak_for(&[1, 2], now), 2);
    }

    #[test]
    fn test_same_day_workouts_collapse() {
        let now = noon(2024, 6, 15);
        let dates = vec![
            now,
            now - Duration::hours(3),
            now - Duration::days(1),
            now - Duration::days(1) - Duration::hours(2),
            now - Duration::days(2),
        ];
        assert_eq!(current_streak(dates, &now), 3);
    }

    #[test]
    fn test_future_workouts_ignored() {
        let now = noon(2024, 6, 15);
        assert_eq!(streak_for(&[-1, 0], now), 1);
    }

    #[test]
    fn test_streak_uses_calendar_days_not_24h_windows() {
        // 23:30 yesterday and 00:30 today are one hour apart but two days
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 0, 30, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 6, 14, 23, 30, 0).unwrap();
        assert_eq!(current_streak(vec![now, late], &now), 2);
    }

    #[test]
    fn test_streak_empty() {
        let now = noon(2024, 6, 15);
        assert_eq!(current_streak(Vec::new(), &now), 0);
    }

    #[test]
    fn test_month_boundary() {
        let now = noon(2024, 6, 15);
        let month_start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(start_of_month(&now), month_start);

        let store = Store::new(EntityStore::empty());
        let repo = Repository::new(store.clone());
        for date in [month_start, month_start - Duration::milliseconds(1)] {
            repo.create_workout(NewWorkout {
                name: "boundary".into(),
                date: Some(date),
                ..Default::default()
            });
        }

        let stats = StatsEngine::new(store).compute_stats_at(&now);
        assert_eq!(stats.total_workouts, 2);
        assert_eq!(stats.workouts_this_month, 1);
    }

    #[test]
    fn test_month_start_after_skipped_midnight() {
        let now = SkipsMidnight.with_ymd_and_hms(2024, 11, 15, 12, 0, 0).unwrap();
        // 01:00 local at UTC-2
        let expected = Utc.with_ymd_and_hms(2024, 11, 1, 3, 0, 0).unwrap();
        assert_eq!(start_of_month(&now), expected);
    }

    #[test]
    fn test_month_count_after_skipped_midnight() {
        let now = SkipsMidnight.with_ymd_and_hms(2024, 11, 15, 12, 0, 0).unwrap();
        let store = Store::new(EntityStore::empty());
        let repo = Repository::new(store.clone());
        // 23:30 on Oct 31 local, and 01:00 on Nov 1 local
        for date in [
            Utc.with_ymd_and_hms(2024, 11, 1, 2, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 11, 1, 3, 0, 0).unwrap(),
        ] {
            repo.create_workout(NewWorkout {
                name: "edge".into(),
                date: Some(date),
                ..Default::default()
            });
        }

        let stats = StatsEngine::new(store).compute_stats_at(&now);
        assert_eq!(stats.workouts_this_month, 1);
    }

    #[test]
    fn test_totals_treat_missing_as_zero() {
        let now = noon(2024, 6, 15);
        let store = Store::new(EntityStore::empty());
        let repo = Repository::new(store.clone());
        repo.create_workout(NewWorkout {
            name: "run".into(),
            date: Some(now),
            duration: Some(30),
            calories_burned: Some(300),
            ..Default::default()
        });
        repo.create_workout(NewWorkout {
            name: "lift".into(),
            date: Some(now - Duration::days(1)),
            duration: Some(45),
            ..Default::default()
        });
        repo.create_workout(NewWorkout {
            name: "stretch".into(),
            date: Some(now - Duration::days(40)),
            calories_burned: Some(50),
            ..Default::default()
        });

        let stats = StatsEngine::new(store).compute_stats_at(&now);
        assert_eq!(
            stats,
            WorkoutStats {
                total_workouts: 3,
                total_time: 75,
                total_calories: 350,
                current_streak: 2,
                workouts_this_month: 2,
            }
        );
    }

    #[test]
    fn test_stats_follow_deletes() {
        let store = Store::new(EntityStore::empty());
        let repo = Repository::new(store.clone());
        let engine = StatsEngine::new(store);
        let w = repo.create_workout(NewWorkout {
            name: "today".into(),
            ..Default::default()
        });
        assert_eq!(engine.compute_stats().total_workouts, 1);

        repo.delete_workout(&w.id);
        assert_eq!(engine.compute_stats(), WorkoutStats::default());
    }

    #[test]
    fn test_fixed_offset_zone_shifts_days() {
        // 02:00 UTC on the 15th is still the 14th at UTC-5
        let tz = chrono::FixedOffset::west_opt(5 * 3600).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 2, 0, 0).unwrap().with_timezone(&tz);
        let workout = Utc.with_ymd_and_hms(2024, 6, 13, 20, 0, 0).unwrap();
        assert_eq!(current_streak(vec![workout], &now), 1);
    }
}
