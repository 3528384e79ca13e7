//! Render-ready snapshot of the game
//!
//! Produced once per tick after the simulation step. Renderers only ever
//! see this immutable view, never the live state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::Timers;
use super::state::{GameState, ParticleColor, PowerUpKind};
use crate::consts::*;

/// High-level screen, used to pick overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Menu,
    Playing,
    Paused,
    End { won: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub center: Vec2,
    pub boost_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub pos: Vec2,
    pub size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BulletView {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub radius: f32,
    pub color: ParticleColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUpView {
    pub pos: Vec2,
    pub size: f32,
    pub kind: PowerUpKind,
}

/// Values shown on the heads-up display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    /// Whole seconds of survival still required
    pub time_left_secs: u32,
    pub dash_ready: bool,
    /// Seconds until the dash is ready again, zero when ready
    pub dash_cooldown_secs: f32,
    pub boost_active: bool,
}

impl Hud {
    pub fn from_state(state: &GameState, timers: &Timers) -> Self {
        let dash_ready = timers.ready_since(state.player.last_dash, DASH_COOLDOWN_MS);
        let dash_cooldown_ms = state
            .player
            .last_dash
            .map_or(0, |last| timers.remaining(last + DASH_COOLDOWN_MS));
        Self {
            time_left_secs: (SURVIVAL_TIME_MS.saturating_sub(state.sim_time_ms) / 1000) as u32,
            dash_ready,
            dash_cooldown_secs: dash_cooldown_ms as f32 / 1000.0,
            boost_active: state.player.boost_active,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub screen: Screen,
    pub player: Option<PlayerView>,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<BulletView>,
    pub particles: Vec<ParticleView>,
    pub powerups: Vec<PowerUpView>,
    pub screen_shake: u32,
    pub hud: Option<Hud>,
    /// Pointer position, for the aim indicator
    pub pointer: Vec2,
}

impl RenderSnapshot {
    /// A snapshot with no run attached (menu)
    pub fn empty(screen: Screen, pointer: Vec2) -> Self {
        Self {
            screen,
            player: None,
            enemies: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            powerups: Vec::new(),
            screen_shake: 0,
            hud: None,
            pointer,
        }
    }

    /// Project a run into a snapshot
    pub fn capture(
        screen: Screen,
        state: &GameState,
        timers: &Timers,
        pointer: Vec2,
        shake_enabled: bool,
    ) -> Self {
        let player = &state.player;
        Self {
            screen,
            player: Some(PlayerView {
                pos: player.pos,
                size: player.size,
                center: player.center(),
                boost_active: player.boost_active,
            }),
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    pos: e.pos,
                    size: ENEMY_SIZE,
                })
                .collect(),
            bullets: state
                .bullets
                .iter()
                .map(|b| BulletView {
                    pos: b.pos,
                    radius: b.radius,
                })
                .collect(),
            particles: state
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    radius: p.radius,
                    color: p.color,
                })
                .collect(),
            powerups: state
                .powerups
                .iter()
                .map(|p| PowerUpView {
                    pos: p.pos,
                    size: POWERUP_SIZE,
                    kind: p.kind,
                })
                .collect(),
            screen_shake: if shake_enabled {
                state.screen_shake.magnitude()
            } else {
                0
            },
            hud: Some(Hud::from_state(state, timers)),
            pointer,
        }
    }
}
