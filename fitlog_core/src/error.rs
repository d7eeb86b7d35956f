//! Error types for the fitlog_core library.

use std::fmt;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// The kinds of stored entity an error can point at
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Exercise,
    Workout,
    WorkoutExercise,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Exercise => "Exercise",
            EntityKind::Workout => "Workout",
            EntityKind::WorkoutExercise => "Workout exercise",
        };
        f.write_str(name)
    }
}

/// Core error type for fitlog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input failed one or more shape constraints
    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// No entity with the requested identifier
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    /// A write referenced an entity that does not exist
    #[error("{entity} referenced but not found: {id}")]
    DanglingReference { entity: EntityKind, id: String },

    /// Seed catalog failed its consistency checks
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),
}

impl Error {
    pub fn not_found(entity: EntityKind, id: impl Into<String>) -> Self {
        Error::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn dangling(entity: EntityKind, id: impl Into<String>) -> Self {
        Error::DanglingReference {
            entity,
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_every_error() {
        let err = Error::Validation(vec!["name is empty".into(), "category is empty".into()]);
        assert_eq!(
            err.to_string(),
            "Validation error: name is empty; category is empty"
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = Error::not_found(EntityKind::Workout, "abc");
        assert_eq!(err.to_string(), "Workout not found: abc");
    }
}
