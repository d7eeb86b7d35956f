//! Statistics and calendar routes

use super::error::ApiError;
use super::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{Datelike, Local, Utc};
use fitlog_core::insights::{
    calendar_month, progress_stats, weekly_counts, CalendarMonth, ProgressStats, WeeklyCount,
};
use serde::Deserialize;
use std::sync::Arc;

const DEFAULT_WEEKS: u32 = 4;
const MAX_WEEKS: u32 = 52;

#[derive(Deserialize, Default)]
struct WeeklyQuery {
    #[serde(default)]
    weeks: Option<u32>,
}

#[derive(Deserialize, Default)]
struct CalendarQuery {
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    month: Option<u32>,
}

pub struct StatsRoutes;

impl StatsRoutes {
    pub fn routes(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/api/stats", get(Self::handle_stats))
            .route("/api/stats/weekly", get(Self::handle_weekly))
            .route("/api/calendar", get(Self::handle_calendar))
            .with_state(state)
    }

    async fn handle_stats(State(state): State<Arc<AppState>>) -> Json<ProgressStats> {
        Json(progress_stats(state.stats.compute_stats()))
    }

    async fn handle_weekly(
        State(state): State<Arc<AppState>>,
        query: Result<Query<WeeklyQuery>, QueryRejection>,
    ) -> Result<Json<Vec<WeeklyCount>>, ApiError> {
        const CONTEXT: &str = "Invalid weekly stats query";
        let Query(query) = query.map_err(|r| ApiError::bad_query(CONTEXT, r))?;

        let weeks = query.weeks.unwrap_or(DEFAULT_WEEKS);
        if !(1..=MAX_WEEKS).contains(&weeks) {
            return Err(ApiError::validation(
                CONTEXT,
                vec![format!("weeks must be between 1 and {}", MAX_WEEKS)],
            ));
        }

        let workouts = state.repository.list_workouts();
        Ok(Json(weekly_counts(&workouts, Utc::now(), weeks)))
    }

    async fn handle_calendar(
        State(state): State<Arc<AppState>>,
        query: Result<Query<CalendarQuery>, QueryRejection>,
    ) -> Result<Json<CalendarMonth>, ApiError> {
        const CONTEXT: &str = "Invalid calendar query";
        let Query(query) = query.map_err(|r| ApiError::bad_query(CONTEXT, r))?;

        let today = Local::now();
        let year = query.year.unwrap_or_else(|| today.year());
        let month = query.month.unwrap_or_else(|| today.month());

        let workouts = state.repository.list_workouts();
        calendar_month(&workouts, year, month, &Local)
            .map(Json)
            .ok_or_else(|| {
                ApiError::validation(
                    CONTEXT,
                    vec![format!("{}-{} is not a valid month", year, month)],
                )
            })
    }
}
