//! Workout routes

use super::error::ApiError;
use super::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use fitlog_core::{
    workout_summary, EntityKind, Error, NewWorkout, Workout, WorkoutPatch, WorkoutSummary,
    WorkoutWithExercises,
};
use std::sync::Arc;

const INVALID: &str = "Invalid workout data";

fn workout_not_found(id: String) -> ApiError {
    ApiError::from_core(INVALID, Error::not_found(EntityKind::Workout, id))
}

pub struct WorkoutRoutes;

impl WorkoutRoutes {
    pub fn routes(state: Arc<AppState>) -> Router {
        Router::new()
            .route(
                "/api/workouts",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/workouts/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .route("/api/workouts/:id/summary", get(Self::handle_summary))
            .with_state(state)
    }

    async fn handle_list(State(state): State<Arc<AppState>>) -> Json<Vec<Workout>> {
        Json(state.repository.list_workouts())
    }

    async fn handle_get(
        State(state): State<Arc<AppState>>,
        Path(id): Path<String>,
    ) -> Result<Json<WorkoutWithExercises>, ApiError> {
        state
            .repository
            .get_workout(&id)
            .map(Json)
            .ok_or_else(|| workout_not_found(id))
    }

    async fn handle_summary(
        State(state): State<Arc<AppState>>,
        Path(id): Path<String>,
    ) -> Result<Json<WorkoutSummary>, ApiError> {
        let workout = state
            .repository
            .get_workout(&id)
            .ok_or_else(|| workout_not_found(id))?;
        Ok(Json(workout_summary(&workout)))
    }

    async fn handle_create(
        State(state): State<Arc<AppState>>,
        payload: Result<Json<NewWorkout>, JsonRejection>,
    ) -> Result<Response, ApiError> {
        let Json(input) = payload.map_err(|r| ApiError::bad_json(INVALID, r))?;
        input
            .validate()
            .map_err(|e| ApiError::from_core(INVALID, e))?;

        let workout = state.repository.create_workout(input);
        Ok((StatusCode::CREATED, Json(workout)).into_response())
    }

    async fn handle_update(
        State(state): State<Arc<AppState>>,
        Path(id): Path<String>,
        payload: Result<Json<WorkoutPatch>, JsonRejection>,
    ) -> Result<Json<Workout>, ApiError> {
        let Json(patch) = payload.map_err(|r| ApiError::bad_json(INVALID, r))?;
        patch
            .validate()
            .map_err(|e| ApiError::from_core(INVALID, e))?;

        state
            .repository
            .update_workout(&id, patch)
            .map(Json)
            .ok_or_else(|| workout_not_found(id))
    }

    async fn handle_delete(
        State(state): State<Arc<AppState>>,
        Path(id): Path<String>,
    ) -> Result<StatusCode, ApiError> {
        if state.repository.delete_workout(&id) {
            Ok(StatusCode::NO_CONTENT)
        } else {
            Err(workout_not_found(id))
        }
    }
}
