//! Configuration file loading for chess-play.
//!
//! Settings come from `chess-play.toml` in the current directory when it
//! exists. Command-line flags override them.

use chess_core::PromotionPiece;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// `auto_promote` names something a pawn cannot become.
    #[error("Invalid promotion piece: {0}")]
    InvalidPromotion(String),
}

/// Settings for a terminal session.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PlayConfig {
    /// Starting position in FEN. Defaults to the standard start.
    #[serde(default)]
    pub start_fen: Option<String>,
    /// Piece to promote to without asking (`queen`, `q`, ...).
    /// When absent the player is prompted.
    #[serde(default)]
    pub auto_promote: Option<String>,
    /// List destinations for `moves` queries instead of only counting them.
    #[serde(default = "default_show_moves")]
    pub show_moves: bool,
    /// Log filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_show_moves() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for PlayConfig {
    fn default() -> Self {
        PlayConfig {
            start_fen: None,
            auto_promote: None,
            show_moves: default_show_moves(),
            log_level: default_log_level(),
        }
    }
}

impl PlayConfig {
    /// Loads `chess-play.toml` from the current directory, or the defaults
    /// if there is no such file.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads the configuration at `path`, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Returns the default configuration file path.
    pub fn config_path() -> PathBuf {
        PathBuf::from("chess-play.toml")
    }

    /// Returns the configured automatic promotion, if any.
    pub fn auto_promote(&self) -> Result<Option<PromotionPiece>, ConfigError> {
        self.auto_promote
            .as_deref()
            .map(|name| {
                parse_promotion(name).ok_or_else(|| ConfigError::InvalidPromotion(name.to_string()))
            })
            .transpose()
    }
}

/// Parses a promotion piece from a letter or a full name, in any case.
pub fn parse_promotion(name: &str) -> Option<PromotionPiece> {
    let name = name.trim().to_ascii_lowercase();
    match name.as_str() {
        "queen" => Some(PromotionPiece::Queen),
        "rook" => Some(PromotionPiece::Rook),
        "bishop" => Some(PromotionPiece::Bishop),
        "knight" => Some(PromotionPiece::Knight),
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => PromotionPiece::from_char(c),
                _ => None,
            }
        }
    }
}
