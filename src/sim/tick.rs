//! Per-tick simulation step
//!
//! Advances one run by a single tick given the input snapshot, the
//! gameplay clock reading and the frame's elapsed time.

use std::cmp::Ordering;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::{Millis, Timers};
use super::collision;
use super::movement::{self, HeldKeys};
use super::spawn;
use super::state::GameState;
use crate::consts::*;
use crate::{direction_to, field_size};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Movement keys currently held
    pub held: HeldKeys,
    /// Pointer position in field coordinates
    pub pointer: Vec2,
    /// Primary click this tick
    pub fire: bool,
    /// Dash pressed this tick
    pub dash: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start a run from the menu
    pub start: bool,
    /// Restart after a run ended
    pub retry: bool,
    /// Return to the menu (from pause or the end screen)
    pub menu: bool,
    /// Terminate the game
    pub quit: bool,
    /// Idle/demo mode - the autopilot plays
    pub idle_mode: bool,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Won,
    Lost,
}

impl RunOutcome {
    pub fn won(self) -> bool {
        self == RunOutcome::Won
    }
}

/// Ticks between autopilot shots
const AUTOPILOT_FIRE_INTERVAL: u64 = 8;
/// Enemies closer than this make the autopilot run away
const AUTOPILOT_FLEE_RADIUS: f32 = 260.0;
/// Enemies closer than this make the autopilot dash
const AUTOPILOT_DASH_RADIUS: f32 = 70.0;
/// Beyond this distance from the middle the autopilot drifts back
const AUTOPILOT_WALL_PULL: f32 = 300.0;

/// Advance the run by one unpaused tick.
///
/// Returns the outcome on the tick the run ends. A loss is checked before
/// the survival threshold, so both can never fire together.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    timers: Timers,
    dt_ms: Millis,
) -> Option<RunOutcome> {
    let steered;
    let input = if input.idle_mode {
        steered = autopilot(state, input, &timers);
        &steered
    } else {
        input
    };

    state.time_ticks += 1;
    state.sim_time_ms += dt_ms;

    // Abilities
    if input.dash {
        movement::try_dash(state, input.pointer, &timers);
    }
    if input.fire {
        movement::fire(state, input.pointer);
    }

    // Movement
    movement::move_player(&mut state.player, input.held);
    let target = state.player.center();
    movement::pursue(&mut state.enemies, target);
    movement::advance_bullets(&mut state.bullets);
    movement::integrate_particles(&mut state.particles);

    spawn::run(state, &timers);

    let resolution = collision::resolve(state, &timers);
    state.trim_particles();
    if let Some(enemy_id) = resolution.caught_by {
        log::info!(
            "Caught by enemy {} after {:.1}s",
            enemy_id,
            state.sim_time_ms as f32 / 1000.0
        );
        return Some(RunOutcome::Lost);
    }

    if collision::expire_boost(&mut state.player, &timers) {
        log::debug!("Speed boost expired");
    }

    if state.sim_time_ms >= SURVIVAL_TIME_MS {
        log::info!("Survived {} ticks", state.time_ticks);
        return Some(RunOutcome::Won);
    }

    None
}

/// Synthesize input for demo mode
fn autopilot(state: &GameState, input: &TickInput, timers: &Timers) -> TickInput {
    let mut input = input.clone();
    let center = state.player.center();

    let by_distance = |a: &Vec2, b: &Vec2| {
        a.distance_squared(center)
            .partial_cmp(&b.distance_squared(center))
            .unwrap_or(Ordering::Equal)
    };

    let nearest_enemy = state
        .enemies
        .iter()
        .map(|e| e.pos)
        .min_by(|a, b| by_distance(a, b));

    let mut steer = Vec2::ZERO;
    if let Some(enemy) = nearest_enemy {
        let distance = enemy.distance(center);
        input.pointer = enemy;
        input.fire = state.time_ticks.is_multiple_of(AUTOPILOT_FIRE_INTERVAL);

        if distance < AUTOPILOT_FLEE_RADIUS {
            steer = direction_to(enemy, center).unwrap_or(Vec2::X);
        }
        // Only dash along a known heading, never toward the enemy we are aiming at
        input.dash = distance < AUTOPILOT_DASH_RADIUS
            && state.player.heading != Vec2::ZERO
            && timers.ready_since(state.player.last_dash, DASH_COOLDOWN_MS);
    }

    if steer == Vec2::ZERO {
        let nearest_powerup = state
            .powerups
            .iter()
            .map(|p| p.pos)
            .min_by(|a, b| by_distance(a, b));
        if let Some(powerup) = nearest_powerup {
            steer = direction_to(center, powerup).unwrap_or(Vec2::ZERO);
        }
    }

    let to_middle = field_size() / 2.0 - center;
    if to_middle.length() > AUTOPILOT_WALL_PULL {
        steer += to_middle.normalize_or_zero() * 0.5;
    }

    input.held = HeldKeys::toward(steer.normalize_or_zero());
    input
}
