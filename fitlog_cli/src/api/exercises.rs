//! Exercise catalog routes

use super::error::ApiError;
use super::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use fitlog_core::{Exercise, NewExercise, Repository};
use serde::Deserialize;
use std::sync::Arc;

/// Query parameters for listing exercises
#[derive(Deserialize, Default)]
pub struct ExerciseQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

/// Apply the listing rules: a non-empty search wins, then a category other
/// than `all`, otherwise everything
pub fn select_exercises(
    repository: &Repository,
    category: Option<&str>,
    search: Option<&str>,
) -> Vec<Exercise> {
    match (category, search) {
        (_, Some(query)) if !query.is_empty() => repository.search_exercises(query),
        (Some(category), _) if !category.is_empty() && category != "all" => {
            repository.list_exercises_by_category(category)
        }
        _ => repository.list_exercises(),
    }
}

pub struct ExerciseRoutes;

impl ExerciseRoutes {
    pub fn routes(state: Arc<AppState>) -> Router {
        Router::new()
            .route(
                "/api/exercises",
                get(Self::handle_list).post(Self::handle_create),
            )
            .with_state(state)
    }

    async fn handle_list(
        State(state): State<Arc<AppState>>,
        query: Result<Query<ExerciseQuery>, QueryRejection>,
    ) -> Result<Json<Vec<Exercise>>, ApiError> {
        let Query(query) = query.map_err(|r| ApiError::bad_query("Invalid exercise query", r))?;
        Ok(Json(select_exercises(
            &state.repository,
            query.category.as_deref(),
            query.search.as_deref(),
        )))
    }

    async fn handle_create(
        State(state): State<Arc<AppState>>,
        payload: Result<Json<NewExercise>, JsonRejection>,
    ) -> Result<Response, ApiError> {
        const CONTEXT: &str = "Invalid exercise data";
        let Json(input) = payload.map_err(|r| ApiError::bad_json(CONTEXT, r))?;
        input
            .validate()
            .map_err(|e| ApiError::from_core(CONTEXT, e))?;

        let exercise = state.repository.create_exercise(input);
        Ok((StatusCode::CREATED, Json(exercise)).into_response())
    }
}
