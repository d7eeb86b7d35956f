//! REST API for fitlog.
//!
//! Handlers are thin: they check input shape, call the repository or the
//! statistics engine, and turn the outcome into a status code.

pub mod error;
pub mod exercises;
pub mod stats;
pub mod workout_exercises;
pub mod workouts;

use axum::routing::get;
use axum::{Json, Router};
use fitlog_core::{Repository, StatsEngine, Store};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use exercises::ExerciseRoutes;
use stats::StatsRoutes;
use workout_exercises::WorkoutExerciseRoutes;
use workouts::WorkoutRoutes;

/// Shared state handed to every handler
#[derive(Clone, Debug)]
pub struct AppState {
    pub repository: Repository,
    pub stats: StatsEngine,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            repository: Repository::new(store.clone()),
            stats: StatsEngine::new(store),
        }
    }
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Build the full application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(ExerciseRoutes::routes(state.clone()))
        .merge(WorkoutRoutes::routes(state.clone()))
        .merge(WorkoutExerciseRoutes::routes(state.clone()))
        .merge(StatsRoutes::routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind `address` and serve until Ctrl-C
pub async fn serve(address: &str, state: Arc<AppState>) -> std::io::Result<()> {
    let listener = TcpListener::bind(address).await?;
    tracing::info!("fitlog API listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown requested"),
        Err(e) => tracing::warn!("Unable to listen for Ctrl-C: {}", e),
    }
}
