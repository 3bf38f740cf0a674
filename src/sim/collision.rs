//! Collision detection between projectiles, the ship, the beam and enemies
//!
//! Everything here is pure: functions look at a stable view of the entities
//! and report indices. The tick removes the hit entities afterwards, so an
//! enemy is never matched twice in one pass.

use super::entity::{Enemy, Projectile, Rect, Ship};

/// Strict AABB overlap: both extents must intersect; touching edges miss
#[inline]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Projectile/enemy pairs that collided this frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShotHits {
    /// (projectile index, enemy index), enemies in collection order
    pub pairs: Vec<(usize, usize)>,
}

/// Match projectiles against enemies.
///
/// Each enemy takes at most one projectile (the oldest overlapping one) and
/// each projectile hits at most one enemy.
pub fn projectile_hits(projectiles: &[Projectile], enemies: &[Enemy]) -> ShotHits {
    let mut spent = vec![false; projectiles.len()];
    let mut pairs = Vec::new();

    for (enemy_idx, enemy) in enemies.iter().enumerate() {
        let enemy_box = enemy.hitbox();
        let hit = projectiles
            .iter()
            .enumerate()
            .find(|(i, p)| !spent[*i] && overlaps(p.hitbox(), enemy_box));
        if let Some((proj_idx, _)) = hit {
            spent[proj_idx] = true;
            pairs.push((proj_idx, enemy_idx));
        }
    }

    ShotHits { pairs }
}

/// Enemies overlapping the ship, skipping ones already claimed this frame
pub fn ship_hits(ship: &Ship, enemies: &[Enemy], claimed: &[bool]) -> Vec<usize> {
    let ship_box = ship.hitbox();
    enemies
        .iter()
        .enumerate()
        .filter(|(i, e)| {
            !claimed.get(*i).copied().unwrap_or(false) && overlaps(ship_box, e.hitbox())
        })
        .map(|(i, _)| i)
        .collect()
}

/// Enemies intersecting the beam
pub fn beam_hits(beam: Rect, enemies: &[Enemy]) -> Vec<usize> {
    enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| overlaps(beam, e.hitbox()))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{ControlScheme, Playfield};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn enemy_at(id: u32, x: f32, y: f32) -> Enemy {
        Enemy::new(id, Vec2::new(x, y), &Tuning::default())
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(overlaps(a, Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Shared edge
        assert!(!overlaps(a, Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!overlaps(a, Rect::new(0.0, 10.0, 10.0, 10.0)));
        // Point on the boundary
        assert!(!overlaps(Rect::point(Vec2::new(0.0, 5.0)), a));
        assert!(overlaps(Rect::point(Vec2::new(1.0, 5.0)), a));
    }

    #[test]
    fn test_projectile_inside_enemy() {
        let projectiles = [Projectile::new(Vec2::new(100.0, 100.0))];
        let enemies = [enemy_at(1, 90.0, 90.0)];
        let hits = projectile_hits(&projectiles, &enemies);
        assert_eq!(hits.pairs, vec![(0, 0)]);
    }

    #[test]
    fn test_one_projectile_per_enemy() {
        let projectiles = [
            Projectile::new(Vec2::new(100.0, 100.0)),
            Projectile::new(Vec2::new(105.0, 100.0)),
        ];
        // Two enemies stacked over the same point
        let enemies = [enemy_at(1, 90.0, 90.0), enemy_at(2, 80.0, 80.0)];
        let hits = projectile_hits(&projectiles, &enemies);
        assert_eq!(hits.pairs, vec![(0, 0), (1, 1)]);

        let single = [Projectile::new(Vec2::new(100.0, 100.0))];
        let hits = projectile_hits(&single, &enemies);
        assert_eq!(hits.pairs, vec![(0, 0)]);
    }

    #[test]
    fn test_ship_hits_skip_claimed() {
        let tuning = Tuning::default();
        let ship = Ship::new(Playfield::new(800.0, 600.0), ControlScheme::Keyboard, &tuning);
        let enemies = [
            enemy_at(1, ship.pos.x + 10.0, ship.pos.y - 20.0),
            enemy_at(2, ship.pos.x - 30.0, ship.pos.y + 10.0),
            enemy_at(3, 0.0, 0.0),
        ];
        assert_eq!(ship_hits(&ship, &enemies, &[]), vec![0, 1]);
        assert_eq!(ship_hits(&ship, &enemies, &[true, false, false]), vec![1]);
    }

    #[test]
    fn test_beam_band() {
        let beam = Rect::new(395.0, 0.0, 10.0, 470.0);
        let enemies = [
            enemy_at(1, 380.0, 100.0), // straddles the beam
            enemy_at(2, 345.0, 100.0), // right edge exactly at beam left
            enemy_at(3, 405.0, 100.0), // left edge exactly at beam right
            enemy_at(4, 380.0, -50.0), // still above the top edge
            enemy_at(5, 380.0, 470.0), // at the ship's top edge
        ];
        assert_eq!(beam_hits(beam, &enemies), vec![0]);
    }
}
