//! Entity store and core simulation types
//!
//! A run owns exactly one player plus insertion-ordered collections of
//! enemies, bullets, particles and power-ups. Ids increase monotonically
//! so insertion order doubles as the tie-break order for collisions.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::Millis;
use super::collision::Aabb;
use super::effects::ScreenShake;
use super::spawn::SpawnScheduler;
use crate::consts::*;

/// The player's square
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    /// Last non-zero movement direction (unit length), zero until the first move
    pub heading: Vec2,
    pub boost_active: bool,
    pub boost_expires_at: Millis,
    /// Timestamp of the last successful dash
    pub last_dash: Option<Millis>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0),
            size: PLAYER_SIZE,
            heading: Vec2::ZERO,
            boost_active: false,
            boost_expires_at: 0,
            last_dash: None,
        }
    }
}

impl Player {
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_top_left(self.pos, self.size)
    }

    /// Current movement speed per tick
    pub fn speed(&self) -> f32 {
        if self.boost_active {
            PLAYER_BASE_SPEED * BOOST_MULTIPLIER
        } else {
            PLAYER_BASE_SPEED
        }
    }

    /// Keep the whole square inside the field
    pub fn clamp_to_field(&mut self) {
        self.pos = self.pos.clamp(
            Vec2::ZERO,
            Vec2::new(FIELD_WIDTH - self.size, FIELD_HEIGHT - self.size),
        );
    }
}

/// A homing enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    /// Center
    pub pos: Vec2,
}

impl Enemy {
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, ENEMY_SIZE)
    }
}

/// A projectile fired by the player
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// Color tag for particle rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    Muzzle,
    DashBurst,
    DashTrail,
    Explosion,
}

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Shrinks every tick; the particle dies at zero
    pub radius: f32,
    pub color: ParticleColor,
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.radius > 0.0
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Speed,
}

impl PowerUpKind {
    /// Types the spawner draws from
    pub const ENABLED: [PowerUpKind; 1] = [PowerUpKind::Speed];
}

/// A pickup waiting on the field
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: u32,
    /// Center
    pub pos: Vec2,
    pub kind: PowerUpKind,
}

impl PowerUp {
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, POWERUP_SIZE)
    }
}

/// Complete state of one run (deterministic for a given seed, inputs and clock readings)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Unpaused simulated time accumulated so far
    pub sim_time_ms: Millis,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub powerups: Vec<PowerUp>,
    pub screen_shake: ScreenShake,
    pub spawner: SpawnScheduler,
    /// Particles beyond this count are dropped, oldest first
    pub max_particles: usize,
    next_id: u32,
}

impl GameState {
    /// Create a fresh run. `now` is the gameplay clock reading at the start.
    pub fn new(seed: u64, now: Millis) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            sim_time_ms: 0,
            time_ticks: 0,
            player: Player::default(),
            enemies: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            powerups: Vec::new(),
            screen_shake: ScreenShake::default(),
            spawner: SpawnScheduler::new(now),
            max_particles: usize::MAX,
            next_id: 1,
        }
    }

    pub fn with_particle_cap(mut self, cap: usize) -> Self {
        self.max_particles = cap;
        self
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an enemy centered at `pos`
    pub fn spawn_enemy(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy { id, pos });
        id
    }

    /// Add a power-up centered at `pos`
    pub fn spawn_powerup(&mut self, pos: Vec2, kind: PowerUpKind) -> u32 {
        let id = self.next_entity_id();
        self.powerups.push(PowerUp { id, pos, kind });
        id
    }

    /// Add a bullet with the given velocity
    pub fn spawn_bullet(&mut self, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.bullets.push(Bullet {
            id,
            pos,
            vel,
            radius: BULLET_RADIUS,
        });
        id
    }

    /// Drop the oldest particles until the cap is respected
    pub fn trim_particles(&mut self) {
        let len = self.particles.len();
        if len > self.max_particles {
            self.particles.drain(..len - self.max_particles);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_starts_centered_and_idle() {
        let player = Player::default();
        assert_eq!(player.pos, Vec2::new(550.0, 400.0));
        assert_eq!(player.center(), Vec2::new(569.0, 419.0));
        assert_eq!(player.heading, Vec2::ZERO);
        assert!(player.last_dash.is_none());
    }

    #[test]
    fn test_clamp_keeps_square_inside() {
        let mut player = Player {
            pos: Vec2::new(-30.0, 900.0),
            ..Default::default()
        };
        player.clamp_to_field();
        assert_eq!(player.pos, Vec2::new(0.0, FIELD_HEIGHT - PLAYER_SIZE));
    }

    #[test]
    fn test_boost_speed() {
        let mut player = Player::default();
        assert_eq!(player.speed(), 5.0);
        player.boost_active = true;
        assert!((player.speed() - 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_ids_follow_insertion_order() {
        let mut state = GameState::new(1, 0);
        let a = state.spawn_enemy(Vec2::ZERO);
        let b = state.spawn_powerup(Vec2::ZERO, PowerUpKind::Speed);
        let c = state.spawn_bullet(Vec2::ZERO, Vec2::X);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_trim_particles_drops_oldest() {
        let mut state = GameState::new(1, 0).with_particle_cap(2);
        for i in 0..4 {
            state.particles.push(Particle {
                pos: Vec2::splat(i as f32),
                vel: Vec2::ZERO,
                radius: 1.0,
                color: ParticleColor::Muzzle,
            });
        }
        state.trim_particles();
        assert_eq!(state.particles.len(), 2);
        assert_eq!(state.particles[0].pos, Vec2::splat(2.0));
    }
}
