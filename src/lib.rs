//! Boopit - a 2D survival arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, abilities, collisions, spawning, game state)
//! - `platform`: Clock and input seams between the host and the simulation
//! - `renderer`: Pure projection of simulation snapshots into draw commands
//! - `settings`: Presentation preferences

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use crate::sim::clock::Millis;

    /// Play-field dimensions
    pub const FIELD_WIDTH: f32 = 1100.0;
    pub const FIELD_HEIGHT: f32 = 800.0;

    /// Frame cadence of the main loop
    pub const TARGET_FPS: u32 = 60;

    /// Player square (top-left anchored)
    pub const PLAYER_SIZE: f32 = 38.0;
    pub const PLAYER_BASE_SPEED: f32 = 5.0;
    /// Speed multiplier while a speed boost is active
    pub const BOOST_MULTIPLIER: f32 = 1.6;

    /// Enemy square (center anchored)
    pub const ENEMY_SIZE: f32 = 34.0;
    /// Pursuit step per tick
    pub const ENEMY_SPEED: f32 = 2.3;
    /// How far outside the field enemies appear
    pub const ENEMY_SPAWN_OFFSET: f32 = 40.0;

    pub const BULLET_SPEED: f32 = 11.0;
    pub const BULLET_RADIUS: f32 = 6.0;

    pub const POWERUP_SIZE: f32 = 30.0;
    /// Power-ups never spawn closer than this to a field edge
    pub const POWERUP_SPAWN_MARGIN: f32 = 60.0;

    pub const DASH_DISTANCE: f32 = 220.0;
    pub const DASH_COOLDOWN_MS: Millis = 1000;
    pub const BOOST_DURATION_MS: Millis = 5000;

    pub const ENEMY_SPAWN_INTERVAL_MS: Millis = 600;
    pub const POWERUP_SPAWN_INTERVAL_MS: Millis = 7000;

    /// Unpaused simulated time the player must survive to win
    pub const SURVIVAL_TIME_MS: Millis = 20_000;

    /// Particle radius lost per tick
    pub const PARTICLE_DECAY: f32 = 0.15;
    /// Screen shake magnitude set by dashes and kills
    pub const SCREEN_SHAKE_PULSE: u32 = 8;
}

/// Size of the play field as a vector
#[inline]
pub fn field_size() -> Vec2 {
    Vec2::new(consts::FIELD_WIDTH, consts::FIELD_HEIGHT)
}

/// Unit vector pointing from `from` toward `to`, or `None` when the points coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}

/// True when `pos` lies inside the field, edges included
#[inline]
pub fn in_field(pos: Vec2) -> bool {
    (0.0..=consts::FIELD_WIDTH).contains(&pos.x) && (0.0..=consts::FIELD_HEIGHT).contains(&pos.y)
}
