//! Scene description and startup
//!
//! The presentation layer describes its scene as a list of named nodes
//! (loaded from JSON or built in code). Names are resolved exactly once
//! here into typed handles; nothing looks nodes up by name afterwards.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::{ConfigError, Settings};
use crate::sim::GameState;
use crate::ui::Hud;

/// Name of the node the player entity is created from
pub const PLAYER_NODE: &str = "player";
/// Name of the optional score label node
pub const SCORE_LABEL_NODE: &str = "scoreLabel";

/// Fatal problems found while building a scene
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("scene has no `player` sprite node")]
    MissingPlayer,
    #[error("scene node `{0}` appears more than once")]
    DuplicateNode(String),
    #[error("scene node `{name}` is invalid: {reason}")]
    InvalidNode { name: String, reason: &'static str },
    #[error("failed to parse scene: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Settings(#[from] ConfigError),
}

/// Node type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Sprite,
    Label,
}

/// A named node placed in the scene editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub name: String,
    pub kind: NodeKind,
    #[serde(default)]
    pub position: Vec2,
    /// Sprite size; settings decide when absent
    #[serde(default)]
    pub size: Option<Vec2>,
}

/// Index of a node in its scene description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(usize);

impl NodeHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handles resolved at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneHandles {
    pub player: NodeHandle,
    pub score_label: Option<NodeHandle>,
}

/// A running scene: simulation plus HUD
#[derive(Debug, Clone)]
pub struct Scene {
    pub state: GameState,
    pub hud: Hud,
    pub handles: SceneHandles,
}

/// The set of nodes making up a scene
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub nodes: Vec<SceneNode>,
}

impl SceneDescription {
    /// Player at the origin with the score label just above it
    pub fn default_scene() -> Self {
        Self {
            nodes: vec![
                SceneNode {
                    name: PLAYER_NODE.to_string(),
                    kind: NodeKind::Sprite,
                    position: Vec2::ZERO,
                    size: None,
                },
                SceneNode {
                    name: SCORE_LABEL_NODE.to_string(),
                    kind: NodeKind::Label,
                    position: Vec2::new(0.0, 60.0),
                    size: None,
                },
            ],
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Find a uniquely named node of the given kind
    fn resolve(&self, name: &str, kind: NodeKind) -> Result<Option<NodeHandle>, SetupError> {
        let mut found = None;
        for (idx, node) in self.nodes.iter().enumerate() {
            if node.name != name {
                continue;
            }
            if found.is_some() {
                return Err(SetupError::DuplicateNode(name.to_string()));
            }
            if node.kind != kind {
                return Err(SetupError::InvalidNode {
                    name: name.to_string(),
                    reason: "unexpected node kind",
                });
            }
            found = Some(NodeHandle(idx));
        }
        Ok(found)
    }

    pub fn node(&self, handle: NodeHandle) -> &SceneNode {
        &self.nodes[handle.0]
    }

    /// Resolve handles, validate settings and start the session
    pub fn build(&self, mut settings: Settings) -> Result<Scene, SetupError> {
        let player = self
            .resolve(PLAYER_NODE, NodeKind::Sprite)?
            .ok_or(SetupError::MissingPlayer)?;
        let score_label = self.resolve(SCORE_LABEL_NODE, NodeKind::Label)?;

        let player_node = self.node(player);
        if !player_node.position.is_finite() {
            return Err(SetupError::InvalidNode {
                name: player_node.name.clone(),
                reason: "position must be finite",
            });
        }
        if let Some(size) = player_node.size {
            settings.player_size = size;
        }
        settings.validate()?;

        let label_pos = score_label.map(|handle| self.node(handle).position);
        let state = GameState::new(settings, player_node.position);
        let hud = Hud::new(&state, label_pos);

        if label_pos.is_none() {
            log::warn!("Scene has no `{}` node, score will not be shown", SCORE_LABEL_NODE);
        }

        Ok(Scene {
            state,
            hud,
            handles: SceneHandles {
                player,
                score_label,
            },
        })
    }
}
