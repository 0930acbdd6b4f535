//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied frame delta only, no clock reads
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod entity;
pub mod geometry;
pub mod movement;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Contact, Effect, find_contacts, rule};
pub use entity::{Category, Entity, EntityId, EntityView, Registry};
pub use geometry::Aabb;
pub use movement::{Camera, Direction, Easing, HomingStyle, PlayerInput, PlayerMovementMode, Tween};
pub use spawn::{Placement, SpawnEvent, SpawnScheduler, SpawnTimer};
pub use state::{GameEvent, GamePhase, GameState, Snapshot};
pub use tick::{TickReport, tick};
