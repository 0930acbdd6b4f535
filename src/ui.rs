//! HUD state for the presentation layer
//!
//! Holds what the score label, the game over banner and the on-screen d-pad
//! should show. The renderer only draws these; it never decides them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::geometry::Aabb;
use crate::sim::{Direction, GameEvent, GameState, PlayerInput, TickReport};

/// Banner text shown when the run ends
pub const GAME_OVER_TEXT: &str = "Game Over";

/// D-pad button size and spacing (camera space)
const DPAD_BUTTON_SIZE: f32 = 50.0;
const DPAD_SPACING: f32 = 45.0;
/// D-pad center inset from the bottom-left corner of the view
const DPAD_INSET: f32 = 100.0;

/// A text label in world space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    pub pos: Vec2,
    pub visible: bool,
}

/// A d-pad button in camera space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DPadButton {
    pub direction: Direction,
    pub bounds: Aabb,
}

/// Four arrow buttons anchored to the bottom-left of the view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DPad {
    pub buttons: [DPadButton; 4],
}

impl DPad {
    /// Lay out the d-pad for a view of `view_size` (camera space, origin at center)
    pub fn new(view_size: Vec2) -> Self {
        let center = -view_size * 0.5 + Vec2::splat(DPAD_INSET);
        let size = Vec2::splat(DPAD_BUTTON_SIZE);
        let button = |direction: Direction| DPadButton {
            direction,
            bounds: Aabb::new(center + direction.unit() * DPAD_SPACING, size),
        };
        Self {
            buttons: [
                button(Direction::Up),
                button(Direction::Down),
                button(Direction::Left),
                button(Direction::Right),
            ],
        }
    }

    /// Button under a touch point (camera space)
    pub fn hit_test(&self, point: Vec2) -> Option<Direction> {
        self.buttons
            .iter()
            .find(|b| b.bounds.contains_point(point))
            .map(|b| b.direction)
    }
}

/// Score label and game over banner
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    score_label: Option<Label>,
    game_over_label: Label,
    label_offset: f32,
    input_enabled: bool,
}

impl Hud {
    /// Build the HUD for a fresh session; `score_label_pos` is None when the
    /// scene has no score label
    pub fn new(state: &GameState, score_label_pos: Option<Vec2>) -> Self {
        Self {
            score_label: score_label_pos.map(|pos| Label {
                text: score_text(state.score()),
                pos,
                visible: true,
            }),
            game_over_label: Label {
                text: GAME_OVER_TEXT.to_string(),
                pos: Vec2::ZERO,
                visible: false,
            },
            label_offset: state.settings().game_over_label_offset,
            input_enabled: true,
        }
    }

    pub fn score_text(&self) -> Option<&str> {
        self.score_label.as_ref().map(|l| l.text.as_str())
    }

    pub fn score_label(&self) -> Option<&Label> {
        self.score_label.as_ref()
    }

    pub fn game_over_label(&self) -> &Label {
        &self.game_over_label
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Update labels from the events of one tick
    pub fn apply(&mut self, report: &TickReport, state: &GameState) {
        for event in &report.events {
            match *event {
                GameEvent::CoinCollected { score, .. } => {
                    if let Some(label) = self.score_label.as_mut() {
                        label.text = score_text(score);
                    }
                }
                GameEvent::GameOver { .. } => {
                    self.game_over_label.visible = true;
                    self.game_over_label.pos =
                        state.player().pos + Vec2::new(0.0, self.label_offset);
                    self.input_enabled = false;
                }
                GameEvent::EnemyExpired { .. } => {}
            }
        }
    }

    /// Turn a touch on the d-pad into player input (nothing once input is off)
    pub fn touch(&self, dpad: &DPad, point: Vec2) -> Option<PlayerInput> {
        if !self.input_enabled {
            return None;
        }
        dpad.hit_test(point).map(PlayerInput::Direction)
    }
}

fn score_text(score: u64) -> String {
    format!("Score: {}", score)
}
