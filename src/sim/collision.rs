//! Contact detection and the category effect table
//!
//! Every pair of entities is tested with an axis-aligned rectangle overlap
//! check. Entity counts stay small, so the naive O(n²) sweep is enough.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Category, Entity, EntityId, Registry};
use super::geometry::Aabb;

/// What happens when two categories touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Remove the coin and score a point
    ConsumeAndScore,
    /// End the run
    EndGame,
    /// Solid contact: stops movement, raises no event
    Block,
    Ignore,
}

/// Effect for an unordered category pair
pub fn rule(a: Category, b: Category) -> Effect {
    use Category::*;

    // Order the pair so lookup never depends on which side came first
    let (a, b) = if a <= b { (a, b) } else { (b, a) };
    match (a, b) {
        (Player, Coin) => Effect::ConsumeAndScore,
        (Player, Enemy) | (Player, SpecialEnemy) => Effect::EndGame,
        (Player, Border) => Effect::Block,
        _ => Effect::Ignore,
    }
}

/// Two overlapping entities whose categories interact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Lower id of the pair
    pub a: EntityId,
    pub b: EntityId,
    pub effect: Effect,
}

impl Contact {
    /// The entity on the other side from `id`
    pub fn other(&self, id: EntityId) -> EntityId {
        if self.a == id { self.b } else { self.a }
    }
}

/// Find all overlapping pairs with a non-ignored effect, ordered by ids
pub fn find_contacts(registry: &Registry) -> Vec<Contact> {
    let entities: Vec<&Entity> = registry.iter().collect();
    let mut contacts = Vec::new();

    for (i, first) in entities.iter().enumerate() {
        for second in &entities[i + 1..] {
            let effect = rule(first.category, second.category);
            if effect == Effect::Ignore {
                continue;
            }
            if first.bounds().overlaps(&second.bounds()) {
                contacts.push(Contact {
                    a: first.id,
                    b: second.id,
                    effect,
                });
            }
        }
    }

    contacts
}

/// Keep an entity inside the world border
///
/// The entity's rectangle may not cross the border. Velocity pointing into
/// a wall it touches is zeroed (no bounce). Returns true if it was pushed back.
pub fn contain(entity: &mut Entity, world: &Aabb) -> bool {
    let inner = world.inset(entity.size * 0.5);
    let clamped = inner.clamp_point(entity.pos);
    if clamped == entity.pos {
        return false;
    }

    let pushed = clamped - entity.pos;
    if pushed.x != 0.0 && pushed.x.signum() != entity.vel.x.signum() {
        entity.vel.x = 0.0;
    }
    if pushed.y != 0.0 && pushed.y.signum() != entity.vel.y.signum() {
        entity.vel.y = 0.0;
    }
    entity.pos = clamped;
    // A move aimed outside the border stops at the wall
    if entity
        .tween
        .is_some_and(|tween| !inner.contains_point(tween.target))
    {
        entity.tween = None;
    }
    true
}

/// World border rectangle centered on the origin
pub fn world_bounds(size: Vec2) -> Aabb {
    Aabb::new(Vec2::ZERO, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::movement::{Easing, Tween};

    #[test]
    fn test_rule_table() {
        use Category::*;
        assert_eq!(rule(Player, Coin), Effect::ConsumeAndScore);
        assert_eq!(rule(Player, Enemy), Effect::EndGame);
        assert_eq!(rule(Player, SpecialEnemy), Effect::EndGame);
        assert_eq!(rule(Player, Border), Effect::Block);
        assert_eq!(rule(Coin, Enemy), Effect::Ignore);
        assert_eq!(rule(Coin, Coin), Effect::Ignore);
        assert_eq!(rule(SpecialEnemy, Enemy), Effect::Ignore);
        assert_eq!(rule(Player, Player), Effect::Ignore);
    }

    #[test]
    fn test_rule_is_symmetric() {
        for a in Category::ALL {
            for b in Category::ALL {
                assert_eq!(rule(a, b), rule(b, a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn test_find_contacts() {
        let mut registry = Registry::new();
        let size = Vec2::splat(80.0);
        let player = registry.spawn(Category::Player, Vec2::ZERO, size);
        let coin = registry.spawn(Category::Coin, Vec2::new(50.0, 0.0), size);
        let _far_coin = registry.spawn(Category::Coin, Vec2::new(500.0, 0.0), size);
        // Overlaps the first coin but coins and enemies ignore each other
        let enemy = registry.spawn(Category::Enemy, Vec2::new(60.0, 60.0), size);

        let contacts = find_contacts(&registry);
        assert_eq!(
            contacts,
            vec![
                Contact {
                    a: player,
                    b: coin,
                    effect: Effect::ConsumeAndScore
                },
                Contact {
                    a: player,
                    b: enemy,
                    effect: Effect::EndGame
                },
            ]
        );
        assert_eq!(contacts[0].other(player), coin);
        assert_eq!(contacts[0].other(coin), player);
    }

    #[test]
    fn test_contain_blocks_at_border() {
        let mut registry = Registry::new();
        let id = registry.spawn(Category::Player, Vec2::new(1990.0, 0.0), Vec2::splat(80.0));
        let player = registry.get_mut(id).unwrap();
        player.vel = Vec2::new(200.0, 50.0);

        let world = world_bounds(Vec2::splat(4000.0));
        assert!(contain(player, &world));
        assert_eq!(player.pos, Vec2::new(1960.0, 0.0));
        assert_eq!(player.vel, Vec2::new(0.0, 50.0));

        // Inside: untouched
        player.pos = Vec2::ZERO;
        assert!(!contain(player, &world));
    }

    #[test]
    fn test_contain_keeps_velocity_leaving_wall() {
        let mut registry = Registry::new();
        let id = registry.spawn(Category::Player, Vec2::new(-1980.0, 0.0), Vec2::splat(80.0));
        let player = registry.get_mut(id).unwrap();
        player.vel = Vec2::new(100.0, 0.0);
        assert!(contain(player, &world_bounds(Vec2::splat(4000.0))));
        assert_eq!(player.vel, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_contain_cancels_tween_past_border() {
        let mut registry = Registry::new();
        let id = registry.spawn(Category::Player, Vec2::new(0.0, 1990.0), Vec2::splat(80.0));
        let player = registry.get_mut(id).unwrap();
        player.tween = Some(Tween::new(
            Vec2::ZERO,
            Vec2::new(0.0, 3000.0),
            10.0,
            Easing::Linear,
        ));
        assert!(contain(player, &world_bounds(Vec2::splat(4000.0))));
        assert!(player.tween.is_none());
    }
}
