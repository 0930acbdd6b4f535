//! Player and enemy movement
//!
//! Two ways to move an entity:
//! - velocity, integrated every tick
//! - a tween: explicit start/target/duration record with easing, which
//!   overrides velocity while it runs and is replaced wholesale by a new one

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::geometry::seek_velocity;
use crate::settings::{ConfigError, positive};

/// D-pad direction (world space is y-up)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn unit(&self) -> Vec2 {
        match self {
            Direction::Up => Vec2::Y,
            Direction::Down => Vec2::NEG_Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
        }
    }
}

/// Latest player intent from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PlayerInput {
    /// No new intent: pointer tracking ends, current motion carries on
    #[default]
    None,
    /// D-pad press
    Direction(Direction),
    /// Pointer/touch position in world space
    Target(Vec2),
}

/// How pointer targets move the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerMovementMode {
    /// Velocity re-aimed at the pointer every tick
    #[default]
    DirectVelocity,
    /// Eased move to the pointer; a new target pre-empts the old move
    Tweened,
}

/// Timing curve for tweens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    /// Slow start and stop (smoothstep)
    EaseInEaseOut,
}

impl Easing {
    /// Map linear progress `t` in [0, 1] to eased progress
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInEaseOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// An in-flight interpolated move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub start: Vec2,
    pub target: Vec2,
    pub duration: f32,
    pub elapsed: f32,
    pub easing: Easing,
}

impl Tween {
    pub fn new(start: Vec2, target: Vec2, duration: f32, easing: Easing) -> Self {
        Self {
            start,
            target,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    /// Move at `speed`: duration is distance / speed
    pub fn at_speed(start: Vec2, target: Vec2, speed: f32, easing: Easing) -> Self {
        let duration = if speed > 0.0 {
            start.distance(target) / speed
        } else {
            0.0
        };
        Self::new(start, target, duration, easing)
    }

    /// Linear progress in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    pub fn position(&self) -> Vec2 {
        self.start.lerp(self.target, self.easing.apply(self.progress()))
    }

    /// Advance by `dt` and return the new position
    pub fn advance(&mut self, dt: f32) -> Vec2 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.position()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// How homing enemies chase the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HomingStyle {
    /// Loop "move to the player's current position over D, rest `pause`",
    /// with D = base + random jitter picked once per enemy
    Repeating {
        base: f32,
        jitter_min: f32,
        jitter_max: f32,
        pause: f32,
    },
    /// One long move toward where the player stood at spawn time
    Single { duration: f32 },
}

impl HomingStyle {
    /// Roll the per-enemy homing state
    pub fn spawn(&self, rng: &mut impl Rng) -> Homing {
        match *self {
            HomingStyle::Repeating {
                base,
                jitter_min,
                jitter_max,
                pause,
            } => {
                let jitter = if jitter_max > jitter_min {
                    rng.random_range(jitter_min..=jitter_max)
                } else {
                    jitter_min
                };
                Homing {
                    move_duration: base + jitter,
                    pause,
                    repeat: true,
                    rest: 0.0,
                    moves: 0,
                }
            }
            HomingStyle::Single { duration } => Homing {
                move_duration: duration,
                pause: 0.0,
                repeat: false,
                rest: 0.0,
                moves: 0,
            },
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            HomingStyle::Repeating {
                base,
                jitter_min,
                jitter_max,
                pause,
            } => {
                positive("homing.base", base)?;
                if !(jitter_min.is_finite() && jitter_max.is_finite() && pause.is_finite())
                    || jitter_min < 0.0
                    || jitter_max < jitter_min
                    || pause < 0.0
                {
                    return Err(ConfigError::Invalid {
                        field: "homing",
                        reason: "jitter must satisfy 0 <= min <= max and pause must be >= 0",
                    });
                }
                Ok(())
            }
            HomingStyle::Single { duration } => positive("homing.duration", duration),
        }
    }
}

/// Per-enemy homing state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Homing {
    pub move_duration: f32,
    pub pause: f32,
    pub repeat: bool,
    /// Rest time left before the next move
    pub rest: f32,
    /// Moves started so far
    pub moves: u32,
}

/// Apply a fresh input to the player (called when input changes)
pub fn apply_player_input(
    player: &mut Entity,
    input: PlayerInput,
    mode: PlayerMovementMode,
    speed: f32,
) {
    match input {
        PlayerInput::None => {}
        PlayerInput::Direction(direction) => {
            player.tween = None;
            player.vel = direction.unit() * speed;
        }
        PlayerInput::Target(target) => match mode {
            PlayerMovementMode::DirectVelocity => {
                // Velocity is re-aimed every tick in advance_player
                player.tween = None;
            }
            PlayerMovementMode::Tweened => {
                player.vel = Vec2::ZERO;
                player.tween = Some(Tween::at_speed(
                    player.pos,
                    target,
                    speed,
                    Easing::EaseInEaseOut,
                ));
            }
        },
    }
}

/// Move the player one tick
pub fn advance_player(
    player: &mut Entity,
    input: PlayerInput,
    mode: PlayerMovementMode,
    speed: f32,
    arrive_threshold: f32,
    dt: f32,
) {
    if let (PlayerInput::Target(target), PlayerMovementMode::DirectVelocity) = (input, mode) {
        player.vel = seek_velocity(player.pos, target, speed, arrive_threshold);
    }

    if let Some(tween) = player.tween.as_mut() {
        player.pos = tween.advance(dt);
        if tween.is_finished() {
            player.tween = None;
        }
    } else {
        player.pos += player.vel * dt;
    }
}

/// Move a homing enemy one tick, starting a new move toward `player_pos`
/// whenever the previous move and its rest are over
pub fn advance_homing(entity: &mut Entity, player_pos: Vec2, dt: f32) {
    let Some(homing) = entity.homing.as_mut() else {
        entity.pos += entity.vel * dt;
        return;
    };

    let mut dt = dt;
    if entity.tween.is_none() {
        if homing.rest > dt {
            homing.rest -= dt;
            return;
        }
        dt -= homing.rest;
        homing.rest = 0.0;

        if !homing.repeat && homing.moves > 0 {
            return;
        }
        entity.tween = Some(Tween::new(
            entity.pos,
            player_pos,
            homing.move_duration,
            Easing::Linear,
        ));
        homing.moves += 1;
    }

    if let Some(tween) = entity.tween.as_mut() {
        entity.pos = tween.advance(dt);
        if tween.is_finished() {
            entity.tween = None;
            homing.rest = homing.pause;
        }
    }
}

/// Count down a lifetime; returns true once it has run out
pub fn expire(entity: &mut Entity, dt: f32) -> bool {
    match entity.ttl.as_mut() {
        Some(ttl) => {
            *ttl -= dt;
            *ttl <= 0.0
        }
        None => false,
    }
}

/// Camera that recentres on its target every tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub pos: Vec2,
}

impl Camera {
    pub fn follow(&mut self, target: Vec2) {
        self.pos = target;
    }
}
