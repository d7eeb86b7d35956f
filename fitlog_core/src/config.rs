//! Configuration file support for fitlog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/fitlog/config.toml`.

use crate::catalog::{catalog_errors, default_catalog};
use crate::{Error, ExerciseCategory, NewExercise, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// HTTP listener configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Custom exercise seeded alongside the built-in catalog
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CustomExercise {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub target_muscles: Vec<String>,
    pub description: Option<String>,
}

impl From<&CustomExercise> for NewExercise {
    fn from(custom: &CustomExercise) -> Self {
        NewExercise {
            name: custom.name.clone(),
            category: ExerciseCategory::from(custom.category.clone()),
            target_muscles: custom.target_muscles.clone(),
            description: custom.description.clone(),
        }
    }
}

/// Exercise catalog configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_seed_defaults")]
    pub seed_defaults: bool,

    #[serde(default)]
    pub custom: Vec<CustomExercise>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed_defaults: default_seed_defaults(),
            custom: Vec::new(),
        }
    }
}

impl CatalogConfig {
    /// Exercises a fresh store should be seeded with
    pub fn seed_entries(&self) -> Vec<NewExercise> {
        let mut entries = if self.seed_defaults {
            default_catalog().to_vec()
        } else {
            Vec::new()
        };
        entries.extend(self.custom.iter().map(NewExercise::from));
        entries
    }

    /// Problems with the entries a store would be seeded with
    ///
    /// With the built-ins enabled the whole catalog must cover every
    /// built-in category. Without them only the custom entries are checked.
    pub fn errors(&self) -> Vec<String> {
        let seed = self.seed_entries();
        if self.seed_defaults {
            return catalog_errors(&seed);
        }

        let mut errors = Vec::new();
        for exercise in &seed {
            if let Err(Error::Validation(problems)) = exercise.validate() {
                errors.extend(
                    problems
                        .into_iter()
                        .map(|p| format!("custom exercise '{}': {}", exercise.name, p)),
                );
            }
        }
        errors
    }
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".into()
}

fn default_seed_defaults() -> bool {
    true
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = match dirs::config_dir() {
            Some(dir) => dir,
            None => std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .ok_or_else(|| Error::Config("cannot locate a config directory".into()))?,
        };
        Ok(base.join("fitlog").join("config.toml"))
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = self.to_toml()?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Check the configuration for values the server cannot run with
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.server.host.trim().is_empty() {
            errors.push("server.host must not be empty".to_string());
        }
        if self.server.port == 0 {
            errors.push("server.port must not be 0".to_string());
        }
        if !crate::logging::LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(format!(
                "logging.level '{}' is not one of {}",
                self.logging.level,
                crate::logging::LEVELS.join(", ")
            ));
        }

        errors.extend(self.catalog.errors());

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Config(errors.join("; ")))
        }
    }
}
