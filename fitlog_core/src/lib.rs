#![forbid(unsafe_code)]

//! Core domain model and business logic for fitlog.
//!
//! This crate provides:
//! - Domain types (exercises, workouts, workout exercises, statistics)
//! - Input records and their validation
//! - The seed exercise catalog
//! - The in-memory entity store and the repository over it
//! - The statistics engine and derived insights

pub mod types;
pub mod error;
pub mod input;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod store;
pub mod repository;
pub mod stats;
pub mod insights;

// Re-export commonly used types
pub use error::{EntityKind, Error, Result};
pub use types::*;
pub use input::{NewExercise, NewWorkout, NewWorkoutExercise, WorkoutExercisePatch, WorkoutPatch};
pub use catalog::{catalog_errors, default_catalog};
pub use config::Config;
pub use store::{EntityStore, Store};
pub use repository::Repository;
pub use stats::StatsEngine;
pub use insights::{workout_summary, Intensity, WorkoutSummary};
