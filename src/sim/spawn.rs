//! Timed spawning of coins and enemies
//!
//! Each category runs its own timer. A timer fires at most once per tick and
//! restarts from zero when it does, so a long frame never produces a burst
//! of catch-up spawns.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Category;
use crate::polar_to_cartesian;
use crate::settings::{ConfigError, Settings, non_negative};

/// Where a spawned entity lands relative to the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Placement {
    /// Uniformly random point on a ring around the player
    Radial { radius: f32 },
    /// Directly left or right of the player at a fixed offset
    SameRow { offset: f32 },
}

impl Placement {
    /// Pick a spawn position around `origin`
    pub fn place(&self, origin: Vec2, rng: &mut impl Rng) -> Vec2 {
        match *self {
            Placement::Radial { radius } => {
                let angle = rng.random_range(0.0..TAU);
                origin + polar_to_cartesian(radius, angle)
            }
            Placement::SameRow { offset } => {
                let side = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
                origin + Vec2::new(side * offset, 0.0)
            }
        }
    }

    pub(crate) fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        match *self {
            Placement::Radial { radius } => non_negative(field, radius),
            Placement::SameRow { offset } => non_negative(field, offset),
        }
    }
}

/// Request to create an entity; the registry instantiates it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnEvent {
    pub category: Category,
    pub pos: Vec2,
}

/// Fixed-interval timer for one spawned category
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    pub category: Category,
    pub interval: f32,
    pub placement: Placement,
    elapsed: f32,
}

impl SpawnTimer {
    pub fn new(category: Category, interval: f32, placement: Placement) -> Self {
        Self {
            category,
            interval,
            placement,
            elapsed: 0.0,
        }
    }

    /// Time accumulated since the last firing
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance by `dt`; returns true (at most once) when the interval is reached
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.interval {
            // Overshoot is discarded, not carried into the next period
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }
}

/// Coin and enemy timers
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    timers: Vec<SpawnTimer>,
}

impl SpawnScheduler {
    pub fn new(timers: Vec<SpawnTimer>) -> Self {
        Self { timers }
    }

    /// Build the coin timer and the enemy timer from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(vec![
            SpawnTimer::new(
                Category::Coin,
                settings.coin_interval,
                settings.coin_placement,
            ),
            SpawnTimer::new(
                settings.enemy_kind,
                settings.enemy_interval,
                settings.enemy_placement,
            ),
        ])
    }

    /// Advance every timer and emit one event per timer that fired
    pub fn tick(&mut self, dt: f32, player_pos: Vec2, rng: &mut impl Rng) -> Vec<SpawnEvent> {
        let mut events = Vec::new();
        for timer in &mut self.timers {
            if timer.advance(dt) {
                events.push(SpawnEvent {
                    category: timer.category,
                    pos: timer.placement.place(player_pos, rng),
                });
            }
        }
        events
    }
}
