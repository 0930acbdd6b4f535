//! Per-frame simulation tick
//!
//! Order within a tick:
//! 1. advance spawn timers and instantiate spawns
//! 2. move the player and every mobile entity, expire lifetimes
//! 3. keep the player inside the border, find contacts
//! 4. apply score and game-over effects
//!
//! The camera recentres on the player last.

use super::collision::{Effect, contain, find_contacts};
use super::entity::{Category, EntityId, EntityView};
use super::movement::{advance_homing, advance_player, expire};
use super::state::{GameEvent, GameState};

/// Everything the presentation layer needs to sync with a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Entities created this tick
    pub spawned: Vec<EntityView>,
    /// Entities removed this tick (picked up or expired)
    pub removed: Vec<EntityId>,
    pub score_delta: u32,
    /// True only on the tick that ended the run
    pub game_over_triggered: bool,
    pub events: Vec<GameEvent>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.spawned.is_empty()
            && self.removed.is_empty()
            && self.score_delta == 0
            && !self.game_over_triggered
            && self.events.is_empty()
    }
}

/// Advance the game state by `dt` seconds (one rendered frame)
pub fn tick(state: &mut GameState, dt: f32) -> TickReport {
    let mut report = TickReport::default();

    // Nothing moves once the run is over
    if state.is_game_over() {
        return report;
    }

    let dt = if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        log::warn!("Ignoring invalid frame delta {}", dt);
        0.0
    };
    state.time += f64::from(dt);

    // 1. Spawning
    let player_pos = state.player().pos;
    let spawns = state.spawner.tick(dt, player_pos, &mut state.rng);
    for event in spawns {
        if let Some(id) = state.instantiate(event) {
            if let Some(entity) = state.registry.get(id) {
                report.spawned.push(EntityView::from(entity));
            }
        }
    }

    // 2. Movement
    let input = state.input;
    let mode = state.settings.movement_mode;
    let speed = state.settings.player_speed;
    let threshold = state.settings.arrive_threshold;
    advance_player(state.player_mut(), input, mode, speed, threshold, dt);

    let player_id = state.player_id();
    let player_pos = state.player().pos;
    for entity in state.registry.iter_mut() {
        if entity.id == player_id {
            continue;
        }
        advance_homing(entity, player_pos, dt);
    }

    let expired = state
        .registry
        .remove_where(|entity| entity.category != Category::Player && expire(entity, dt));
    for id in expired {
        log::debug!("Enemy {} expired", id);
        report.removed.push(id);
        report.events.push(GameEvent::EnemyExpired { enemy: id });
    }

    // 3. Collision detection
    let world = *state.world();
    contain(state.player_mut(), &world);
    let contacts = find_contacts(&state.registry);

    // 4. Effects, in contact order
    for contact in contacts {
        if state.is_game_over() {
            break;
        }
        let other = contact.other(player_id);
        match contact.effect {
            Effect::ConsumeAndScore => {
                // Each coin can only be taken once
                if state.registry.remove(other).is_none() {
                    continue;
                }
                if state.add_point() {
                    report.score_delta += 1;
                    report.removed.push(other);
                    report.events.push(GameEvent::CoinCollected {
                        coin: other,
                        score: state.score(),
                    });
                    log::debug!("Coin {} collected, score {}", other, state.score());
                }
            }
            Effect::EndGame => {
                if state.trigger_game_over() {
                    report.game_over_triggered = true;
                    report.events.push(GameEvent::GameOver {
                        by: other,
                        score: state.score(),
                    });
                }
            }
            // Border containment already ran above
            Effect::Block | Effect::Ignore => {}
        }
    }

    let player_pos = state.player().pos;
    state.camera.follow(player_pos);

    report
}
