//! Interval-based enemy and power-up generation
//!
//! Two independent timers, each remembering when its kind last spawned.

use glam::Vec2;
use rand::Rng;

use super::clock::{Millis, Timers};
use super::state::{GameState, PowerUpKind};
use crate::consts::*;

/// Field edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    /// Point just outside this edge. `t` in `[0, 1]` runs along the edge.
    pub fn spawn_point(self, t: f32) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(t * FIELD_WIDTH, -ENEMY_SPAWN_OFFSET),
            Edge::Bottom => Vec2::new(t * FIELD_WIDTH, FIELD_HEIGHT + ENEMY_SPAWN_OFFSET),
            Edge::Left => Vec2::new(-ENEMY_SPAWN_OFFSET, t * FIELD_HEIGHT),
            Edge::Right => Vec2::new(FIELD_WIDTH + ENEMY_SPAWN_OFFSET, t * FIELD_HEIGHT),
        }
    }
}

/// Spawns counted during one scheduler pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spawned {
    pub enemies: u32,
    pub powerups: u32,
}

/// Spawn timers for one run
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    last_enemy_spawn: Millis,
    last_powerup_spawn: Millis,
}

impl SpawnScheduler {
    /// Both timers start counting from `now`
    pub fn new(now: Millis) -> Self {
        Self {
            last_enemy_spawn: now,
            last_powerup_spawn: now,
        }
    }

    pub fn last_enemy_spawn(&self) -> Millis {
        self.last_enemy_spawn
    }

    pub fn last_powerup_spawn(&self) -> Millis {
        self.last_powerup_spawn
    }
}

/// Random point just outside a uniformly chosen edge
pub fn random_edge_point<R: Rng>(rng: &mut R) -> Vec2 {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    edge.spawn_point(rng.random_range(0.0..=1.0))
}

/// Random power-up position at least the spawn margin away from every edge
pub fn random_powerup_point<R: Rng>(rng: &mut R) -> Vec2 {
    Vec2::new(
        rng.random_range(POWERUP_SPAWN_MARGIN..=FIELD_WIDTH - POWERUP_SPAWN_MARGIN),
        rng.random_range(POWERUP_SPAWN_MARGIN..=FIELD_HEIGHT - POWERUP_SPAWN_MARGIN),
    )
}

/// Spawn whatever is due: a kind spawns once strictly more than its
/// interval has passed since its last spawn. At most one of each kind per pass.
pub fn run(state: &mut GameState, timers: &Timers) -> Spawned {
    let mut spawned = Spawned::default();

    if timers.exceeded(state.spawner.last_enemy_spawn, ENEMY_SPAWN_INTERVAL_MS) {
        let pos = random_edge_point(&mut state.rng);
        let id = state.spawn_enemy(pos);
        state.spawner.last_enemy_spawn = timers.now();
        spawned.enemies += 1;
        log::debug!("Spawned enemy {} at ({:.0}, {:.0})", id, pos.x, pos.y);
    }

    if timers.exceeded(state.spawner.last_powerup_spawn, POWERUP_SPAWN_INTERVAL_MS) {
        let pos = random_powerup_point(&mut state.rng);
        let kind = PowerUpKind::ENABLED[state.rng.random_range(0..PowerUpKind::ENABLED.len())];
        let id = state.spawn_powerup(pos, kind);
        state.spawner.last_powerup_spawn = timers.now();
        spawned.powerups += 1;
        log::debug!("Spawned {:?} power-up {} at ({:.0}, {:.0})", kind, id, pos.x, pos.y);
    }

    spawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_enemy_spawns_on_interval() {
        let mut state = GameState::new(5, 1000);

        assert_eq!(run(&mut state, &Timers::at(1600)).enemies, 0);
        assert_eq!(run(&mut state, &Timers::at(1601)).enemies, 1);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.spawner.last_enemy_spawn(), 1601);

        // Baseline moved to the spawn time
        assert_eq!(run(&mut state, &Timers::at(2201)).enemies, 0);
        assert_eq!(run(&mut state, &Timers::at(2202)).enemies, 1);
    }

    #[test]
    fn test_long_gap_spawns_once() {
        let mut state = GameState::new(5, 0);
        let spawned = run(&mut state, &Timers::at(10_000));
        assert_eq!(spawned, Spawned { enemies: 1, powerups: 1 });
    }

    #[test]
    fn test_powerup_spawns_every_seven_seconds() {
        let mut state = GameState::new(9, 0);
        assert_eq!(run(&mut state, &Timers::at(7000)).powerups, 0);
        assert_eq!(run(&mut state, &Timers::at(7001)).powerups, 1);
        assert_eq!(state.powerups[0].kind, PowerUpKind::Speed);
    }

    #[test]
    fn test_enemies_spawn_outside_field() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..500 {
            let p = random_edge_point(&mut rng);
            let outside_x = p.x <= -ENEMY_SPAWN_OFFSET || p.x >= FIELD_WIDTH + ENEMY_SPAWN_OFFSET;
            let outside_y = p.y <= -ENEMY_SPAWN_OFFSET || p.y >= FIELD_HEIGHT + ENEMY_SPAWN_OFFSET;
            assert!(outside_x || outside_y, "spawned inside at {p:?}");
        }
    }

    #[test]
    fn test_powerups_respect_margin() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..500 {
            let p = random_powerup_point(&mut rng);
            assert!((POWERUP_SPAWN_MARGIN..=FIELD_WIDTH - POWERUP_SPAWN_MARGIN).contains(&p.x));
            assert!((POWERUP_SPAWN_MARGIN..=FIELD_HEIGHT - POWERUP_SPAWN_MARGIN).contains(&p.y));
        }
    }

    #[test]
    fn test_every_edge_is_used() {
        let mut rng = Pcg32::seed_from_u64(1);
        let points: Vec<Vec2> = (0..200).map(|_| random_edge_point(&mut rng)).collect();
        assert!(points.iter().any(|p| p.y < 0.0));
        assert!(points.iter().any(|p| p.y > FIELD_HEIGHT));
        assert!(points.iter().any(|p| p.x < 0.0));
        assert!(points.iter().any(|p| p.x > FIELD_WIDTH));
    }
}
