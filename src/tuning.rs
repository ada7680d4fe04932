//! Data-driven game balance
//!
//! Every constant in [`crate::consts`] can be overridden at load time from a
//! JSON document. Missing fields keep their compiled-in defaults. A `Tuning`
//! is fixed for the lifetime of a [`crate::sim::GameState`].

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating a tuning file
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read tuning file: {err}"),
            Self::Parse(err) => write!(f, "failed to parse tuning JSON: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning value `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Craft ===
    pub craft_width: f32,
    pub craft_height: f32,
    pub craft_start_x: f32,
    pub min_vx: f32,
    pub max_vx: f32,
    pub gravity: f32,
    pub flight_power: f32,
    pub horizontal_accel: f32,
    pub horizontal_decay: f32,

    // === Objects ===
    pub obstacle_size: f32,
    pub fuel_size: f32,
    pub bonus_size: f32,
    pub finish_width: f32,

    // === Levels ===
    pub level_length: f32,
    pub safe_start: f32,
    pub finish_offset: f32,
    pub level_count: u32,
    pub moving_obstacle_level: u32,
    pub initial_scroll_speed: f32,
    pub scroll_speed_per_level: f32,

    // === Battery ===
    pub max_battery: f32,
    /// Units per second
    pub battery_drain_rate: f32,
    pub battery_recharge: f32,
    pub obstacle_damage: f32,
    pub collision_cooldown_ms: u64,

    // === Score ===
    pub score_per_second: f32,
    pub score_per_bonus: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            craft_width: CRAFT_WIDTH,
            craft_height: CRAFT_HEIGHT,
            craft_start_x: CRAFT_START_X,
            min_vx: CRAFT_MIN_VX,
            max_vx: CRAFT_MAX_VX,
            gravity: GRAVITY,
            flight_power: FLIGHT_POWER,
            horizontal_accel: HORIZONTAL_ACCEL,
            horizontal_decay: HORIZONTAL_DECAY,

            obstacle_size: OBSTACLE_SIZE,
            fuel_size: FUEL_SIZE,
            bonus_size: BONUS_SIZE,
            finish_width: FINISH_WIDTH,

            level_length: LEVEL_LENGTH,
            safe_start: SAFE_START,
            finish_offset: FINISH_OFFSET,
            level_count: LEVEL_COUNT,
            moving_obstacle_level: MOVING_OBSTACLE_LEVEL,
            initial_scroll_speed: INITIAL_SCROLL_SPEED,
            scroll_speed_per_level: SCROLL_SPEED_PER_LEVEL,

            max_battery: MAX_BATTERY,
            battery_drain_rate: BATTERY_DRAIN_RATE,
            battery_recharge: BATTERY_RECHARGE,
            obstacle_damage: OBSTACLE_DAMAGE,
            collision_cooldown_ms: COLLISION_COOLDOWN_MS,

            score_per_second: SCORE_PER_SECOND,
            score_per_bonus: SCORE_PER_BONUS,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load a tuning file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::warn!("Using default tuning: {err}");
                Self::default()
            }
        }
    }

    /// Check that the values describe a playable game
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive("screen_width", self.screen_width)?;
        positive("screen_height", self.screen_height)?;
        positive("craft_width", self.craft_width)?;
        positive("craft_height", self.craft_height)?;
        positive("obstacle_size", self.obstacle_size)?;
        positive("fuel_size", self.fuel_size)?;
        positive("bonus_size", self.bonus_size)?;
        positive("finish_width", self.finish_width)?;
        positive("level_length", self.level_length)?;
        positive("max_battery", self.max_battery)?;

        if self.craft_height >= self.screen_height {
            return Err(TuningError::Invalid {
                field: "craft_height",
                reason: "must be smaller than screen_height",
            });
        }
        let largest = self.obstacle_size.max(self.fuel_size).max(self.bonus_size);
        if largest >= self.screen_height {
            return Err(TuningError::Invalid {
                field: "obstacle_size",
                reason: "object sizes must be smaller than screen_height",
            });
        }
        if !(self.min_vx <= 0.0 && self.max_vx >= 0.0) {
            return Err(TuningError::Invalid {
                field: "min_vx",
                reason: "horizontal speed range must contain zero",
            });
        }
        if !(self.safe_start >= 0.0 && self.safe_start < self.level_length) {
            return Err(TuningError::Invalid {
                field: "safe_start",
                reason: "must lie within [0, level_length)",
            });
        }
        if self.level_count == 0 {
            return Err(TuningError::Invalid {
                field: "level_count",
                reason: "at least one level is required",
            });
        }
        if self.initial_scroll_speed + self.min_vx < 0.0 {
            return Err(TuningError::Invalid {
                field: "initial_scroll_speed",
                reason: "must be at least -min_vx so the world never scrolls backwards",
            });
        }
        if self.battery_drain_rate < 0.0 || self.battery_recharge < 0.0 || self.obstacle_damage < 0.0
        {
            return Err(TuningError::Invalid {
                field: "battery_drain_rate",
                reason: "battery rates must not be negative",
            });
        }
        Ok(())
    }

    /// Craft starting height (vertically centred)
    pub fn craft_start_y(&self) -> f32 {
        self.screen_height / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.3, "level_count": 3 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.3);
        assert_eq!(tuning.level_count, 3);
        assert_eq!(tuning.max_battery, MAX_BATTERY);
        assert_eq!(tuning.collision_cooldown_ms, COLLISION_COOLDOWN_MS);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Tuning::from_json(r#"{ "level_count": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "level_count",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "min_vx": 1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "min_vx", .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse"));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load_or_default("/nonexistent/sky-navigator/tuning.json");
        assert_eq!(tuning, Tuning::default());
    }
}
