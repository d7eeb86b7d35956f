//! Routes for exercises performed within a workout

use super::error::ApiError;
use super::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{post, put};
use axum::{Json, Router};
use fitlog_core::{EntityKind, Error, NewWorkoutExercise, WorkoutExercise, WorkoutExercisePatch};
use std::sync::Arc;

const INVALID: &str = "Invalid workout exercise data";

fn entry_not_found(id: String) -> ApiError {
    ApiError::from_core(INVALID, Error::not_found(EntityKind::WorkoutExercise, id))
}

pub struct WorkoutExerciseRoutes;

impl WorkoutExerciseRoutes {
    pub fn routes(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/api/workout-exercises", post(Self::handle_add))
            .route(
                "/api/workout-exercises/:id",
                put(Self::handle_update).delete(Self::handle_remove),
            )
            .with_state(state)
    }

    async fn handle_add(
        State(state): State<Arc<AppState>>,
        payload: Result<Json<NewWorkoutExercise>, JsonRejection>,
    ) -> Result<Response, ApiError> {
        let Json(input) = payload.map_err(|r| ApiError::bad_json(INVALID, r))?;
        input
            .validate()
            .map_err(|e| ApiError::from_core(INVALID, e))?;

        let entry = state
            .repository
            .add_workout_exercise(input)
            .map_err(|e| ApiError::from_core(INVALID, e))?;
        Ok((StatusCode::CREATED, Json(entry)).into_response())
    }

    async fn handle_update(
        State(state): State<Arc<AppState>>,
        Path(id): Path<String>,
        payload: Result<Json<WorkoutExercisePatch>, JsonRejection>,
    ) -> Result<Json<WorkoutExercise>, ApiError> {
        let Json(patch) = payload.map_err(|r| ApiError::bad_json(INVALID, r))?;
        patch
            .validate()
            .map_err(|e| ApiError::from_core(INVALID, e))?;

        state
            .repository
            .update_workout_exercise(&id, patch)
            .map_err(|e| ApiError::from_core(INVALID, e))?
            .map(Json)
            .ok_or_else(|| entry_not_found(id))
    }

    async fn handle_remove(
        State(state): State<Arc<AppState>>,
        Path(id): Path<String>,
    ) -> Result<StatusCode, ApiError> {
        if state.repository.remove_workout_exercise(&id) {
            Ok(StatusCode::NO_CONTENT)
        } else {
            Err(entry_not_found(id))
        }
    }
}
