//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Timing only through an injected clock
//! - Seeded RNG only
//! - Stable iteration order (insertion order, by entity ID)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod effects;
pub mod game;
pub mod movement;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::{Clock, ManualClock, Millis, PausableClock, Timers};
pub use collision::{Aabb, Resolution};
pub use effects::ScreenShake;
pub use game::{Flow, Game, GamePhase};
pub use movement::HeldKeys;
pub use snapshot::{Hud, RenderSnapshot, Screen};
pub use state::{
    Bullet, Enemy, GameState, Particle, ParticleColor, Player, PowerUp, PowerUpKind,
};
pub use tick::{RunOutcome, TickInput, tick};
