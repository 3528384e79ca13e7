//! Player translation, dash and fire abilities, enemy pursuit,
//! bullet flight and particle integration

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::Timers;
use super::effects;
use super::state::{Bullet, Enemy, GameState, Particle, Player};
use crate::consts::*;
use crate::{direction_to, in_field};

/// Movement keys currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    /// Raw (unnormalized) direction; opposite keys cancel
    pub fn axis(&self) -> Vec2 {
        let x = f32::from(u8::from(self.right)) - f32::from(u8::from(self.left));
        let y = f32::from(u8::from(self.down)) - f32::from(u8::from(self.up));
        Vec2::new(x, y)
    }

    /// Hold the keys whose axis roughly matches `direction`
    pub fn toward(direction: Vec2) -> Self {
        const DEADZONE: f32 = 0.38;
        Self {
            up: direction.y < -DEADZONE,
            down: direction.y > DEADZONE,
            left: direction.x < -DEADZONE,
            right: direction.x > DEADZONE,
        }
    }
}

/// Translate the player by the held direction and clamp to the field
pub fn move_player(player: &mut Player, held: HeldKeys) {
    if let Some(direction) = held.axis().try_normalize() {
        player.heading = direction;
        player.pos += direction * player.speed();
    }
    player.clamp_to_field();
}

/// Direction a dash would take right now, if any
pub fn dash_direction(player: &Player, pointer: Vec2) -> Option<Vec2> {
    if player.heading != Vec2::ZERO {
        Some(player.heading)
    } else {
        direction_to(player.center(), pointer)
    }
}

/// Attempt a dash. Returns true when it happened.
///
/// A dash with no usable direction is a no-op and does not consume the cooldown.
pub fn try_dash(state: &mut GameState, pointer: Vec2, timers: &Timers) -> bool {
    if !timers.ready_since(state.player.last_dash, DASH_COOLDOWN_MS) {
        return false;
    }
    let Some(direction) = dash_direction(&state.player, pointer) else {
        return false;
    };

    state.player.pos += direction * DASH_DISTANCE;
    state.player.clamp_to_field();
    state.player.last_dash = Some(timers.now());
    state.screen_shake.pulse();

    let center = state.player.center();
    effects::dash_burst(&mut state.rng, center, &mut state.particles);
    effects::dash_trail(center, direction, &mut state.particles);
    log::debug!("Dash to ({:.0}, {:.0})", state.player.pos.x, state.player.pos.y);
    true
}

/// Fire a bullet from the player's center toward the pointer.
///
/// Aiming at the player's own center fires nothing.
pub fn fire(state: &mut GameState, pointer: Vec2) -> bool {
    let origin = state.player.center();
    let Some(direction) = direction_to(origin, pointer) else {
        return false;
    };
    state.spawn_bullet(origin, direction * BULLET_SPEED);
    effects::muzzle_flash(&mut state.rng, origin, &mut state.particles);
    true
}

/// Step every enemy straight at the target's current position
pub fn pursue(enemies: &mut [Enemy], target: Vec2) {
    for enemy in enemies {
        if let Some(bearing) = direction_to(enemy.pos, target) {
            enemy.pos += bearing * ENEMY_SPEED;
        }
    }
}

/// Move bullets and drop the ones that left the field
pub fn advance_bullets(bullets: &mut Vec<Bullet>) {
    for bullet in bullets.iter_mut() {
        bullet.pos += bullet.vel;
    }
    bullets.retain(|b| in_field(b.pos));
}

/// Drift particles, shrink them and drop the dead ones
pub fn integrate_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.radius -= PARTICLE_DECAY;
    }
    particles.retain(Particle::is_alive);
}
