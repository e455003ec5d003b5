//! Configuration management for tripplanner.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::collections::HashSet;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::registry::CardKind;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "tripplanner";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "local-storage.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `TRIPPLANNER_`, `__` between levels)
/// 2. TOML config file at `~/.config/tripplanner/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Storage key names.
    pub keys: KeysConfig,
    /// Budget form configuration.
    pub budget: BudgetConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/tripplanner/local-storage.db`
    pub database_path: Option<PathBuf>,
    /// Maximum bytes of keys plus values the store may hold.
    /// Set to 0 for unlimited.
    pub quota_bytes: usize,
}

/// Keys each record is stored under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    /// Trip detail record.
    pub trip: String,
    /// Flight cards.
    pub flights: String,
    /// Hotel cards.
    pub hotels: String,
    /// Booking cards.
    pub bookings: String,
}

/// Budget form configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    /// Budget row labels, as displayed.
    pub items: Vec<String>,
    /// Symbol prefixed to amounts.
    pub currency_symbol: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None, // Will be resolved to default at runtime
            quota_bytes: 5 * 1024 * 1024,
        }
    }
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            trip: "tripPlannerData".to_string(),
            flights: CardKind::Flight.spec().default_key.to_string(),
            hotels: CardKind::Hotel.spec().default_key.to_string(),
            bookings: CardKind::Booking.spec().default_key.to_string(),
        }
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            items: default_budget_items(),
            currency_symbol: "$".to_string(),
        }
    }
}

fn default_budget_items() -> Vec<String> {
    [
        "Accommodation:",
        "Transportation:",
        "Food & Dining:",
        "Activities:",
        "Shopping:",
        "Miscellaneous:",
    ]
    .into_iter()
    .map(ToString::to_string)
    .collect()
}

impl KeysConfig {
    /// Storage key of a card collection.
    #[must_use]
    pub fn for_kind(&self, kind: CardKind) -> &str {
        match kind {
            CardKind::Flight => &self.flights,
            CardKind::Hotel => &self.hotels,
            CardKind::Booking => &self.bookings,
        }
    }

    fn all(&self) -> [(&'static str, &str); 4] {
        [
            ("trip", &self.trip),
            ("flights", &self.flights),
            ("hotels", &self.hotels),
            ("bookings", &self.bookings),
        ]
    }
}

impl Config {
    /// Load configuration from defaults, the config file (`config_path` or
    /// the default location) and `TRIPPLANNER_` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("TRIPPLANNER_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (name, key) in self.keys.all() {
            if key.trim().is_empty() {
                return Err(Error::ConfigValidation {
                    message: format!("keys.{name} must not be empty"),
                });
            }
            if !seen.insert(key) {
                return Err(Error::ConfigValidation {
                    message: format!("keys.{name} reuses storage key '{key}'"),
                });
            }
        }

        if self.budget.items.is_empty() {
            return Err(Error::ConfigValidation {
                message: "budget.items must list at least one item".to_string(),
            });
        }

        if self.budget.currency_symbol.is_empty() {
            return Err(Error::ConfigValidation {
                message: "budget.currency_symbol must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}
