//! Particle burst recipes and screen shake
//!
//! Recipes are stateless: each appends one batch of particles to the
//! collection it is given.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Particle, ParticleColor};
use crate::consts::SCREEN_SHAKE_PULSE;

pub const MUZZLE_FLASH_COUNT: usize = 6;
pub const DASH_BURST_COUNT: usize = 40;
pub const DASH_TRAIL_COUNT: usize = 12;
pub const EXPLOSION_COUNT: usize = 18;

/// Spacing between trail particles along the dash direction
const DASH_TRAIL_SPACING: f32 = 10.0;

/// Small spray at the gun on every shot
pub fn muzzle_flash<R: Rng>(rng: &mut R, origin: Vec2, out: &mut Vec<Particle>) {
    out.extend((0..MUZZLE_FLASH_COUNT).map(|_| Particle {
        pos: origin,
        vel: Vec2::new(rng.random_range(-2.0..=2.0), rng.random_range(-2.0..=2.0)),
        radius: rng.random_range(3..=5) as f32,
        color: ParticleColor::Muzzle,
    }));
}

/// Full-circle burst where a dash lands
pub fn dash_burst<R: Rng>(rng: &mut R, origin: Vec2, out: &mut Vec<Particle>) {
    radial_burst(rng, origin, DASH_BURST_COUNT, 3.0..=8.0, 3..=6, ParticleColor::DashBurst, out);
}

/// Stationary streak behind the dash, shrinking with distance
pub fn dash_trail(origin: Vec2, direction: Vec2, out: &mut Vec<Particle>) {
    out.extend((0..DASH_TRAIL_COUNT).map(|i| {
        let step = i as f32;
        Particle {
            pos: origin - direction * step * DASH_TRAIL_SPACING,
            vel: Vec2::ZERO,
            radius: (10.0 - step * 0.8).max(1.0),
            color: ParticleColor::DashTrail,
        }
    }));
}

/// Debris where an enemy was destroyed
pub fn explosion<R: Rng>(rng: &mut R, origin: Vec2, out: &mut Vec<Particle>) {
    radial_burst(rng, origin, EXPLOSION_COUNT, 1.0..=4.0, 3..=7, ParticleColor::Explosion, out);
}

fn radial_burst<R: Rng>(
    rng: &mut R,
    origin: Vec2,
    count: usize,
    speed: std::ops::RangeInclusive<f32>,
    radius: std::ops::RangeInclusive<u32>,
    color: ParticleColor,
    out: &mut Vec<Particle>,
) {
    out.extend((0..count).map(|_| {
        let angle = rng.random_range(0.0..TAU);
        let magnitude = rng.random_range(speed.clone());
        Particle {
            pos: origin,
            vel: Vec2::from_angle(angle) * magnitude,
            radius: rng.random_range(radius.clone()) as f32,
            color,
        }
    }));
}

/// Screen shake magnitude. The renderer samples an offset in
/// `[-magnitude, magnitude]` per axis while it is nonzero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenShake(u32);

impl ScreenShake {
    /// Reset to the full pulse (dash or kill)
    pub fn pulse(&mut self) {
        self.0 = SCREEN_SHAKE_PULSE;
    }

    /// Lose one unit, stopping at zero
    pub fn decay(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    pub fn magnitude(&self) -> u32 {
        self.0
    }
}
