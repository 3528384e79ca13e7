//! Collision detection and resolution
//!
//! Three phases run once per unpaused tick, in this order:
//! 1. player vs enemies (any overlap loses the run and stops here)
//! 2. enemies vs bullets (one bullet per enemy, first in insertion order)
//! 3. player vs power-ups (at most one pickup per tick)
//!
//! Removal is always mark-then-retain so nothing is deleted mid-scan.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::Timers;
use super::effects;
use super::state::{Bullet, Enemy, GameState, Player, PowerUp, PowerUpKind};
use crate::consts::BOOST_DURATION_MS;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_top_left(pos: Vec2, size: f32) -> Self {
        Self {
            min: pos,
            max: pos + Vec2::splat(size),
        }
    }

    pub fn from_center(center: Vec2, size: f32) -> Self {
        let half = Vec2::splat(size / 2.0);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap: boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Half-open containment `[min, max)`
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }
}

/// An enemy destroyed by a bullet this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kill {
    pub enemy_id: u32,
    pub bullet_id: u32,
    /// Enemy center at the moment of the hit
    pub at: Vec2,
}

/// What the collision pass did this tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Id of the enemy that touched the player (the run is lost)
    pub caught_by: Option<u32>,
    pub kills: Vec<Kill>,
    pub picked_up: Option<PowerUpKind>,
}

/// First enemy (in insertion order) whose box overlaps the player
pub fn player_vs_enemies(player: &Player, enemies: &[Enemy]) -> Option<u32> {
    let player_box = player.aabb();
    enemies
        .iter()
        .find(|enemy| enemy.aabb().overlaps(&player_box))
        .map(|enemy| enemy.id)
}

/// Pair each enemy with the first unconsumed bullet inside its box and
/// remove both sides of every pair.
pub fn enemies_vs_bullets(enemies: &mut Vec<Enemy>, bullets: &mut Vec<Bullet>) -> Vec<Kill> {
    let mut consumed = vec![false; bullets.len()];
    let mut kills = Vec::new();

    for enemy in enemies.iter() {
        let enemy_box = enemy.aabb();
        let hit = bullets
            .iter()
            .enumerate()
            .find(|(i, bullet)| !consumed[*i] && enemy_box.contains_point(bullet.pos));
        if let Some((i, bullet)) = hit {
            consumed[i] = true;
            kills.push(Kill {
                enemy_id: enemy.id,
                bullet_id: bullet.id,
                at: enemy.pos,
            });
        }
    }

    if !kills.is_empty() {
        enemies.retain(|e| !kills.iter().any(|k| k.enemy_id == e.id));
        let mut flags = consumed.into_iter();
        bullets.retain(|_| !flags.next().unwrap_or(false));
    }

    kills
}

/// Remove and return the earliest power-up overlapping the player
pub fn player_vs_powerups(player: &Player, powerups: &mut Vec<PowerUp>) -> Option<PowerUp> {
    let player_box = player.aabb();
    let index = powerups
        .iter()
        .position(|p| p.aabb().overlaps(&player_box))?;
    Some(powerups.remove(index))
}

/// Apply a power-up's effect to the player
pub fn apply_powerup(kind: PowerUpKind, player: &mut Player, timers: &Timers) {
    match kind {
        PowerUpKind::Speed => {
            // Re-pickup overwrites the expiry, it never stacks
            player.boost_active = true;
            player.boost_expires_at = timers.deadline(BOOST_DURATION_MS);
        }
    }
}

/// Switch the speed boost off once it has expired. Returns true when it did.
pub fn expire_boost(player: &mut Player, timers: &Timers) -> bool {
    if player.boost_active && timers.expired(player.boost_expires_at) {
        player.boost_active = false;
        return true;
    }
    false
}

/// Run all collision phases against the run state
pub fn resolve(state: &mut GameState, timers: &Timers) -> Resolution {
    if let Some(enemy_id) = player_vs_enemies(&state.player, &state.enemies) {
        return Resolution {
            caught_by: Some(enemy_id),
            ..Default::default()
        };
    }

    let kills = enemies_vs_bullets(&mut state.enemies, &mut state.bullets);
    for kill in &kills {
        log::debug!("Enemy {} destroyed by bullet {}", kill.enemy_id, kill.bullet_id);
        effects::explosion(&mut state.rng, kill.at, &mut state.particles);
        state.screen_shake.pulse();
    }

    let picked_up = player_vs_powerups(&state.player, &mut state.powerups).map(|powerup| {
        log::debug!("Picked up {:?} power-up {}", powerup.kind, powerup.id);
        apply_powerup(powerup.kind, &mut state.player, timers);
        powerup.kind
    });

    Resolution {
        caught_by: None,
        kills,
        picked_up,
    }
}
