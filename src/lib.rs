//! Coin Chase - A top-down arcade game about grabbing coins and dodging asteroids
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, game state)
//! - `scene`: Scene description resolved into typed handles at startup
//! - `settings`: Data-driven tuning and variant presets
//! - `audio`: Sound cues raised by simulation events
//! - `ui`: HUD state (score label, game over label, d-pad)

pub mod audio;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod ui;

pub use scene::{SceneDescription, SetupError};
pub use settings::{ConfigError, Settings, VariantPreset};

use glam::Vec2;

/// Game configuration constants (defaults for [`Settings`])
pub mod consts {
    /// Coins appear every 2 seconds in every variant
    pub const COIN_SPAWN_INTERVAL: f32 = 2.0;
    /// Enemy cadence of the pursuit variant
    pub const ENEMY_SPAWN_INTERVAL: f32 = 1.5;
    /// Enemy cadence of the classic variant
    pub const CLASSIC_ENEMY_SPAWN_INTERVAL: f32 = 5.0;

    /// Coins land on a ring this far from the player
    pub const COIN_SPAWN_RADIUS: f32 = 200.0;
    /// Homing enemies appear on a ring this far from the player
    pub const ENEMY_SPAWN_RADIUS: f32 = 800.0;
    /// Classic enemies appear this far left or right of the player
    pub const CLASSIC_ENEMY_ROW_OFFSET: f32 = 600.0;

    /// Player speed (units/s) for d-pad and pointer steering
    pub const PLAYER_SPEED: f32 = 200.0;
    /// Pointer steering stops inside this distance to avoid jitter
    pub const ARRIVE_THRESHOLD: f32 = 1.0;

    /// Sprite sizes (square, centered on position)
    pub const PLAYER_SIZE: f32 = 80.0;
    pub const COIN_SIZE: f32 = 80.0;
    pub const ENEMY_SIZE: f32 = 80.0;

    /// Homing move: base duration plus a random jitter per enemy
    pub const HOMING_BASE_DURATION: f32 = 3.0;
    pub const HOMING_JITTER_MIN: f32 = 0.5;
    pub const HOMING_JITTER_MAX: f32 = 2.0;
    /// Rest between homing moves
    pub const HOMING_PAUSE: f32 = 0.5;
    /// Single long move used by the classic variant
    pub const CLASSIC_HOMING_DURATION: f32 = 15.0;

    /// Enemy lifetimes (seconds)
    pub const ENEMY_LIFETIME: f32 = 40.0;
    pub const CLASSIC_ENEMY_LIFETIME: f32 = 15.0;

    /// Solid world border (edge loop around the origin)
    pub const WORLD_SIZE: f32 = 4000.0;

    /// Game over label sits this far above the player
    pub const GAME_OVER_LABEL_OFFSET: f32 = 50.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}

/// Normalized angle to [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}
