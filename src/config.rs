//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `--config <file>`, else `$XDG_CONFIG_HOME/pokedex/pokedex.toml`
//! 3. Environment variables: `POKEDEX_*` prefix, `__` between nested keys
//!    (e.g. `POKEDEX_MAX_WALK=20`, `POKEDEX_FIGHT__ATTACK_WEIGHT=2.0`)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// Weights of the fight score `attack * attack_weight + hp * hp_weight`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FightWeights {
    pub attack_weight: f64,
    pub hp_weight: f64,
}

impl Default for FightWeights {
    fn default() -> Self {
        Self {
            attack_weight: 1.5,
            hp_weight: 1.2,
        }
    }
}

/// Unified configuration for pokedex.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Upper bound for "print owners X times"
    pub max_walk: usize,
    /// Permit several owners with the same name (lookup then resolves to the first)
    pub allow_duplicate_owner_names: bool,
    /// Fight scoring
    pub fight: FightWeights,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_walk: 1000,
            allow_duplicate_owner_names: false,
            fight: FightWeights::default(),
        }
    }
}

/// Get the XDG config directory for pokedex.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "pokedex").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("pokedex.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Explicit config file; must exist. When `None`, the global
    ///   config file is used if present.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("max_walk", defaults.max_walk as i64)
            .map_err(config_err)?
            .set_default(
                "allow_duplicate_owner_names",
                defaults.allow_duplicate_owner_names,
            )
            .map_err(config_err)?
            .set_default("fight.attack_weight", defaults.fight.attack_weight)
            .map_err(config_err)?
            .set_default("fight.hp_weight", defaults.fight.hp_weight)
            .map_err(config_err)?;

        let file = match config_file {
            Some(path) if !path.exists() => {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            Some(path) => Some(path.to_path_buf()),
            None => global_config_path().filter(|p| p.exists()),
        };
        if let Some(path) = file {
            debug!("loading config file: {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("POKEDEX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;
        let settings: Self = config.try_deserialize().map_err(config_err)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the services cannot work with.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        let weights = [
            ("fight.attack_weight", self.fight.attack_weight),
            ("fight.hp_weight", self.fight.hp_weight),
        ];
        for (key, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ApplicationError::Config {
                    message: format!("{key} must be a non-negative number, got {value}"),
                });
            }
        }
        if self.max_walk == 0 {
            return Err(ApplicationError::Config {
                message: "max_walk must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# pokedex configuration
#
# Locations (by precedence, lowest to highest):
#   File: ~/.config/pokedex/pokedex.toml  (or --config <file>)
#   Env:  POKEDEX_* environment variables, e.g. POKEDEX_FIGHT__HP_WEIGHT=1.0

# Upper bound for "print owners X times"
# max_walk = 1000

# Allow several owners to share a name (lookups resolve to the first one)
# allow_duplicate_owner_names = false

[fight]
# score = attack * attack_weight + hp * hp_weight
# attack_weight = 1.5
# hp_weight = 1.2
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
