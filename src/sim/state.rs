//! Game state and the running/game-over state machine
//!
//! `GameState` is the single owner of all mutable simulation data. It is only
//! mutated through `&mut self`, so one tick at a time is the only possible
//! schedule.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::world_bounds;
use super::entity::{Category, Entity, EntityId, EntityView, Registry};
use super::geometry::Aabb;
use super::movement::{Camera, PlayerInput, apply_player_input};
use super::spawn::{SpawnEvent, SpawnScheduler};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended (terminal)
    GameOver,
}

/// Notable things that happened during a tick (drive audio and HUD)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player picked up a coin; `score` is the new total
    CoinCollected { coin: EntityId, score: u64 },
    /// Player touched a hostile entity
    GameOver { by: EntityId, score: u64 },
    /// A homing enemy ran out of lifetime
    EnemyExpired { enemy: EntityId },
}

/// Read-only view of the whole simulation for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub entities: Vec<EntityView>,
    pub player: EntityId,
    pub camera: Vec2,
    pub score: u64,
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) settings: Settings,
    /// Score
    pub(crate) score: u64,
    /// Current phase
    pub(crate) phase: GamePhase,
    /// Seconds simulated so far
    pub time: f64,
    pub camera: Camera,
    pub(crate) registry: Registry,
    pub(crate) spawner: SpawnScheduler,
    pub(crate) rng: Pcg32,
    pub(crate) input: PlayerInput,
    world: Aabb,
    player: EntityId,
}

impl GameState {
    /// Create a session with the player at `player_pos`
    ///
    /// Settings are expected to be validated already (see
    /// [`crate::scene::SceneDescription::build`]).
    pub fn new(settings: Settings, player_pos: Vec2) -> Self {
        let mut registry = Registry::new();
        let player = registry.spawn(Category::Player, player_pos, settings.player_size);
        let rng = Pcg32::seed_from_u64(settings.seed);
        let spawner = SpawnScheduler::from_settings(&settings);
        let world = world_bounds(settings.world_size);

        log::info!(
            "New session: seed={}, coin every {}s, {} every {}s",
            settings.seed,
            settings.coin_interval,
            settings.enemy_kind.as_str(),
            settings.enemy_interval
        );

        Self {
            settings,
            score: 0,
            phase: GamePhase::Running,
            time: 0.0,
            camera: Camera { pos: player_pos },
            registry,
            spawner,
            rng,
            input: PlayerInput::None,
            world,
            player,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Player handle (valid for the whole session)
    pub fn player_id(&self) -> EntityId {
        self.player
    }

    pub fn player(&self) -> &Entity {
        self.registry
            .get(self.player)
            .expect("player entity lives for the whole session")
    }

    pub(crate) fn player_mut(&mut self) -> &mut Entity {
        self.registry
            .get_mut(self.player)
            .expect("player entity lives for the whole session")
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn world(&self) -> &Aabb {
        &self.world
    }

    pub fn input(&self) -> PlayerInput {
        self.input
    }

    /// Record the player's latest intent (ignored once the game is over)
    pub fn set_player_input(&mut self, input: PlayerInput) {
        if self.is_game_over() {
            log::debug!("Ignoring input after game over: {:?}", input);
            return;
        }
        if let PlayerInput::Target(target) = input {
            if !target.is_finite() {
                log::warn!("Ignoring non-finite pointer target {}", target);
                return;
            }
        }
        self.input = input;
        let mode = self.settings.movement_mode;
        let speed = self.settings.player_speed;
        apply_player_input(self.player_mut(), input, mode, speed);
    }

    /// Create the entity described by a spawn event
    ///
    /// Refuses (returns `None`) once the game is over.
    pub fn instantiate(&mut self, event: SpawnEvent) -> Option<EntityId> {
        if self.is_game_over() {
            return None;
        }

        let size = self.settings.size_of(event.category);
        let id = self.registry.spawn(event.category, event.pos, size);
        if event.category == Category::SpecialEnemy {
            let homing = self.settings.homing.spawn(&mut self.rng);
            let lifetime = self.settings.enemy_lifetime;
            if let Some(entity) = self.registry.get_mut(id) {
                entity.homing = Some(homing);
                entity.ttl = Some(lifetime);
            }
        }
        log::debug!(
            "Spawned {} {} at ({:.1}, {:.1})",
            event.category.as_str(),
            id,
            event.pos.x,
            event.pos.y
        );
        Some(id)
    }

    /// Add a score point (only while running)
    pub(crate) fn add_point(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        self.score += 1;
        true
    }

    /// Transition Running -> GameOver; returns false if already over
    pub(crate) fn trigger_game_over(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        self.phase = GamePhase::GameOver;
        self.input = PlayerInput::None;
        self.player_mut().halt();
        log::info!("Game over at {:.2}s with score {}", self.time, self.score);
        true
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            entities: self.registry.iter().map(EntityView::from).collect(),
            player: self.player,
            camera: self.camera.pos,
            score: self.score,
            game_over: self.is_game_over(),
        }
    }
}
