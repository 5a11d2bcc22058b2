//! Story rule settings
//!
//! Defaults are the shipped story rules. Embedders may load
//! overrides from JSON; missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{TOTAL_HEARTS, TOTAL_STARS};
use crate::story::HeartId;

/// Rejected configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunable story rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    // === Easter egg ===
    /// Star clicks needed to trigger the easter egg
    pub easter_egg_clicks: u32,
    /// First bonus heart granted by the easter egg
    pub bonus_heart_first: u8,
    /// Last bonus heart granted by the easter egg (inclusive)
    pub bonus_heart_last: u8,

    // === Effects timing (consumed by the effects layer only) ===
    /// Delay before the unlock reveal animation
    pub unlock_reveal_delay_ms: u32,
    /// Delay before the secret message / journey overlay
    pub celebration_delay_ms: u32,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            easter_egg_clicks: TOTAL_STARS as u32,
            bonus_heart_first: 9,
            bonus_heart_last: TOTAL_HEARTS as u8,

            unlock_reveal_delay_ms: 300,
            celebration_delay_ms: 1000,
        }
    }
}

impl StoryConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.easter_egg_clicks == 0 {
            return Err(ConfigError::Invalid(
                "easter_egg_clicks must be at least 1".to_string(),
            ));
        }
        if self.bonus_hearts().is_none() {
            return Err(ConfigError::Invalid(format!(
                "bonus hearts {}..={} must be an ordered range within 1..={}",
                self.bonus_heart_first, self.bonus_heart_last, TOTAL_HEARTS
            )));
        }
        Ok(())
    }

    /// The easter egg's bonus hearts, or None if the range is unusable
    pub fn bonus_hearts(&self) -> Option<Vec<HeartId>> {
        if self.bonus_heart_first > self.bonus_heart_last {
            return None;
        }
        (self.bonus_heart_first..=self.bonus_heart_last)
            .map(HeartId::new)
            .collect()
    }
}
