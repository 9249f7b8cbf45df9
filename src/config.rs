use std::path::Path;

use tracing::warn;

use crate::error::ConfigError;

/// Highest selectable computer difficulty.
pub const MAX_DIFFICULTY: u8 = 4;

/// Who controls a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Human,
    Computer,
}

/// Configuration for one seat.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub name: String,
    pub kind: PlayerKind,
    /// Computer strength, 1 to 4. Ignored for human seats.
    pub difficulty: u8,
}

impl PlayerConfig {
    pub fn human(name: impl Into<String>) -> Self {
        PlayerConfig {
            name: name.into(),
            kind: PlayerKind::Human,
            difficulty: 3,
        }
    }

    pub fn computer(name: impl Into<String>, difficulty: u8) -> Self {
        PlayerConfig {
            name: name.into(),
            kind: PlayerKind::Computer,
            difficulty,
        }
    }

    /// Search depth for this difficulty: one ply deeper than the level.
    pub fn search_depth(&self) -> u32 {
        u32::from(self.difficulty) + 1
    }

    fn validate(&self, seat: &str) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{seat}.name must not be empty"
            )));
        }
        if self.kind == PlayerKind::Computer && !(1..=MAX_DIFFICULTY).contains(&self.difficulty) {
            return Err(ConfigError::Validation(format!(
                "{seat}.difficulty must be in 1..={MAX_DIFFICULTY}"
            )));
        }
        Ok(())
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig::human("Player")
    }
}

/// Tie-break randomness for computer seats.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Fixed seed for reproducible games; OS entropy when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub player_one: PlayerConfig,
    pub player_two: PlayerConfig,
    pub search: SearchConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            player_one: PlayerConfig::human("Player 1"),
            player_two: PlayerConfig::computer("Computer", 3),
            search: SearchConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.player_one.validate("player_one")?;
        self.player_two.validate("player_two")?;
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
