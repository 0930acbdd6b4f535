//! Entity registry
//!
//! Owns every live simulation entity. Ids are allocated monotonically and
//! never reused, so the backing vector stays sorted by id and iteration
//! order is stable across runs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use super::movement::{Homing, Tween};

/// Opaque, stable entity handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Role of an entity, used to pick collision effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Player,
    Coin,
    /// Stationary hazard, persists for the whole session
    Enemy,
    /// Homing hazard with a limited lifetime
    SpecialEnemy,
    Border,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Player,
        Category::Coin,
        Category::Enemy,
        Category::SpecialEnemy,
        Category::Border,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Player => "player",
            Category::Coin => "coin",
            Category::Enemy => "enemy",
            Category::SpecialEnemy => "special_enemy",
            Category::Border => "border",
        }
    }

    /// Whether contact with the player ends the run
    pub fn is_hostile(&self) -> bool {
        matches!(self, Category::Enemy | Category::SpecialEnemy)
    }
}

/// A simulation entity
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub category: Category,
    pub pos: Vec2,
    /// Full rectangle size, centered on `pos`
    pub size: Vec2,
    pub vel: Vec2,
    /// Seconds left before the entity removes itself
    pub ttl: Option<f32>,
    /// In-flight interpolated move (replaces velocity while active)
    pub tween: Option<Tween>,
    /// Periodic course correction toward the player
    pub homing: Option<Homing>,
}

impl Entity {
    fn new(id: EntityId, category: Category, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            category,
            pos,
            size,
            vel: Vec2::ZERO,
            ttl: None,
            tween: None,
            homing: None,
        }
    }

    /// Collision bounds at the current position
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Stop all motion: clear velocity and drop any in-flight tween
    pub fn halt(&mut self) {
        self.vel = Vec2::ZERO;
        self.tween = None;
    }
}

/// Read-only view of an entity for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub category: Category,
    pub pos: Vec2,
    pub size: Vec2,
}

impl From<&Entity> for EntityView {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id,
            category: entity.category,
            pos: entity.pos,
            size: entity.size,
        }
    }
}

/// Owner of all live entities (sorted by id)
#[derive(Debug, Clone)]
pub struct Registry {
    entities: Vec<Entity>,
    next_id: u32,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Create an entity at rest and return its handle
    pub fn spawn(&mut self, category: Category, pos: Vec2, size: Vec2) -> EntityId {
        let id = self.next_entity_id();
        self.entities.push(Entity::new(id, category, pos, size));
        id
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id).ok()
    }

    /// Remove an entity, returning it if it was still alive
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.index_of(id)?;
        Some(self.entities.remove(idx))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).map(|idx| &self.entities[idx])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.index_of(id).map(|idx| &mut self.entities[idx])
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index_of(id).is_some()
    }

    /// Iterate in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Iterate entities of a single category
    pub fn of_category(&self, category: Category) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.category == category)
    }

    pub fn count(&self, category: Category) -> usize {
        self.of_category(category).count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Drop every entity matching the predicate, returning the removed ids
    ///
    /// The predicate may update the entity it inspects (e.g. count down a lifetime).
    pub fn remove_where(
        &mut self,
        mut predicate: impl FnMut(&mut Entity) -> bool,
    ) -> Vec<EntityId> {
        let mut removed = Vec::new();
        self.entities.retain_mut(|e| {
            if predicate(e) {
                removed.push(e.id);
                false
            } else {
                true
            }
        });
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_stable_and_never_reused() {
        let mut registry = Registry::new();
        let a = registry.spawn(Category::Coin, Vec2::ZERO, Vec2::splat(80.0));
        let b = registry.spawn(Category::Coin, Vec2::X, Vec2::splat(80.0));
        assert!(registry.remove(a).is_some());
        let c = registry.spawn(Category::Enemy, Vec2::Y, Vec2::splat(80.0));

        assert_ne!(a, c);
        assert!(b < c);
        assert!(!registry.contains(a));
        assert_eq!(registry.get(c).map(|e| e.category), Some(Category::Enemy));
    }

    #[test]
    fn test_remove_twice_is_exclusive() {
        let mut registry = Registry::new();
        let id = registry.spawn(Category::Coin, Vec2::ZERO, Vec2::splat(80.0));
        assert!(registry.remove(id).is_some());
        assert!(registry.remove(id).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_iteration_sorted_by_id() {
        let mut registry = Registry::new();
        for i in 0..5 {
            registry.spawn(Category::Coin, Vec2::splat(i as f32), Vec2::ONE);
        }
        let first = registry.iter().next().map(|e| e.id);
        registry.remove(first.unwrap());
        let ids: Vec<_> = registry.iter().map(|e| e.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_remove_where_reports_ids() {
        let mut registry = Registry::new();
        let coin = registry.spawn(Category::Coin, Vec2::ZERO, Vec2::ONE);
        let enemy = registry.spawn(Category::Enemy, Vec2::ZERO, Vec2::ONE);
        let removed = registry.remove_where(|e| e.category == Category::Coin);
        assert_eq!(removed, vec![coin]);
        assert!(registry.contains(enemy));
        assert_eq!(registry.count(Category::Coin), 0);
    }

    #[test]
    fn test_remove_where_can_update_survivors() {
        let mut registry = Registry::new();
        let short = registry.spawn(Category::SpecialEnemy, Vec2::ZERO, Vec2::ONE);
        let long = registry.spawn(Category::SpecialEnemy, Vec2::X, Vec2::ONE);
        registry.get_mut(short).unwrap().ttl = Some(0.5);
        registry.get_mut(long).unwrap().ttl = Some(2.0);

        let removed = registry.remove_where(|e| {
            let ttl = e.ttl.as_mut().unwrap();
            *ttl -= 1.0;
            *ttl <= 0.0
        });
        assert_eq!(removed, vec![short]);
        assert_eq!(registry.get(long).unwrap().ttl, Some(1.0));
    }

    #[test]
    fn test_hostile_categories() {
        assert!(Category::Enemy.is_hostile());
        assert!(Category::SpecialEnemy.is_hostile());
        assert!(!Category::Coin.is_hostile());
        assert!(!Category::Border.is_hostile());
    }
}
