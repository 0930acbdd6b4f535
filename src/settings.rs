//! Game settings and variant presets
//!
//! Every constant that differed between prototype builds of the game lives
//! here instead of being hardcoded. Settings load from JSON; missing fields
//! fall back to the pursuit defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::entity::Category;
use crate::sim::movement::{HomingStyle, PlayerMovementMode};
use crate::sim::spawn::Placement;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Named bundles of settings matching the builds the game shipped as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VariantPreset {
    /// Homing asteroids every 1.5 s from a ring 800 units out, 40 s lifetime
    #[default]
    Pursuit,
    /// Enemies every 5 s beside the player, one long move, 15 s lifetime
    Classic,
}

impl VariantPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantPreset::Pursuit => "Pursuit",
            VariantPreset::Classic => "Classic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pursuit" | "homing" => Some(VariantPreset::Pursuit),
            "classic" => Some(VariantPreset::Classic),
            _ => None,
        }
    }
}

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for spawn placement and homing jitter
    pub seed: u64,

    // === Spawning ===
    pub coin_interval: f32,
    pub enemy_interval: f32,
    pub coin_placement: Placement,
    pub enemy_placement: Placement,
    /// Which hostile category the enemy timer produces
    pub enemy_kind: Category,

    // === Player ===
    pub player_speed: f32,
    pub arrive_threshold: f32,
    pub movement_mode: PlayerMovementMode,

    // === Sizes ===
    pub player_size: Vec2,
    pub coin_size: Vec2,
    pub enemy_size: Vec2,

    // === Enemies ===
    pub homing: HomingStyle,
    /// Lifetime of homing enemies (seconds)
    pub enemy_lifetime: f32,

    // === World ===
    /// Size of the solid border rectangle around the origin
    pub world_size: Vec2,
    /// Vertical offset of the game over label above the player
    pub game_over_label_offset: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,

            coin_interval: COIN_SPAWN_INTERVAL,
            enemy_interval: ENEMY_SPAWN_INTERVAL,
            coin_placement: Placement::Radial {
                radius: COIN_SPAWN_RADIUS,
            },
            enemy_placement: Placement::Radial {
                radius: ENEMY_SPAWN_RADIUS,
            },
            enemy_kind: Category::SpecialEnemy,

            player_speed: PLAYER_SPEED,
            arrive_threshold: ARRIVE_THRESHOLD,
            movement_mode: PlayerMovementMode::DirectVelocity,

            player_size: Vec2::splat(PLAYER_SIZE),
            coin_size: Vec2::splat(COIN_SIZE),
            enemy_size: Vec2::splat(ENEMY_SIZE),

            homing: HomingStyle::Repeating {
                base: HOMING_BASE_DURATION,
                jitter_min: HOMING_JITTER_MIN,
                jitter_max: HOMING_JITTER_MAX,
                pause: HOMING_PAUSE,
            },
            enemy_lifetime: ENEMY_LIFETIME,

            world_size: Vec2::splat(WORLD_SIZE),
            game_over_label_offset: GAME_OVER_LABEL_OFFSET,
        }
    }
}

impl Settings {
    /// Create settings from a variant preset
    pub fn from_preset(preset: VariantPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a variant preset (only touches variant-dependent fields)
    pub fn apply_preset(&mut self, preset: VariantPreset) {
        match preset {
            VariantPreset::Pursuit => {
                let defaults = Self::default();
                self.enemy_interval = defaults.enemy_interval;
                self.enemy_placement = defaults.enemy_placement;
                self.enemy_kind = defaults.enemy_kind;
                self.homing = defaults.homing;
                self.enemy_lifetime = defaults.enemy_lifetime;
            }
            VariantPreset::Classic => {
                self.enemy_interval = CLASSIC_ENEMY_SPAWN_INTERVAL;
                self.enemy_placement = Placement::SameRow {
                    offset: CLASSIC_ENEMY_ROW_OFFSET,
                };
                self.enemy_kind = Category::SpecialEnemy;
                self.homing = HomingStyle::Single {
                    duration: CLASSIC_HOMING_DURATION,
                };
                self.enemy_lifetime = CLASSIC_ENEMY_LIFETIME;
            }
        }
        log::info!("Applied {} preset", preset.as_str());
    }

    /// Parse settings from JSON (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("coin_interval", self.coin_interval)?;
        positive("enemy_interval", self.enemy_interval)?;
        self.coin_placement.validate("coin_placement")?;
        self.enemy_placement.validate("enemy_placement")?;
        if !self.enemy_kind.is_hostile() {
            return Err(ConfigError::Invalid {
                field: "enemy_kind",
                reason: "must be Enemy or SpecialEnemy",
            });
        }

        positive("player_speed", self.player_speed)?;
        non_negative("arrive_threshold", self.arrive_threshold)?;

        positive_size("player_size", self.player_size)?;
        positive_size("coin_size", self.coin_size)?;
        positive_size("enemy_size", self.enemy_size)?;

        self.homing.validate()?;
        positive("enemy_lifetime", self.enemy_lifetime)?;

        positive_size("world_size", self.world_size)?;
        if self.world_size.cmple(self.player_size).any() {
            return Err(ConfigError::Invalid {
                field: "world_size",
                reason: "must be larger than the player",
            });
        }
        if !self.game_over_label_offset.is_finite() {
            return Err(ConfigError::Invalid {
                field: "game_over_label_offset",
                reason: "must be finite",
            });
        }
        Ok(())
    }

    /// Bounds size used for a spawned category
    pub fn size_of(&self, category: Category) -> Vec2 {
        match category {
            Category::Player => self.player_size,
            Category::Coin => self.coin_size,
            Category::Enemy | Category::SpecialEnemy => self.enemy_size,
            Category::Border => self.world_size,
        }
    }
}

pub(crate) fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be a positive number",
        })
    }
}

pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be zero or a positive number",
        })
    }
}

fn positive_size(field: &'static str, size: Vec2) -> Result<(), ConfigError> {
    if size.is_finite() && size.cmpgt(Vec2::ZERO).all() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "width and height must be positive",
        })
    }
}
