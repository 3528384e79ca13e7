//! Snapshot to draw-command projection

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::draw::{DrawCommand, colors, with_alpha};
use super::starfield::{STAR_COUNT, Starfield};
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::settings::Settings;
use crate::sim::snapshot::{Hud, RenderSnapshot, Screen};
use crate::sim::state::ParticleColor;

/// Gun barrel length from the player center
const GUN_LENGTH: f32 = 40.0;
/// The short side of the gun triangle
const GUN_FLANK_LENGTH: f32 = 22.0;
const GUN_FLANK_ANGLE: f32 = 0.4;

const TITLE_ORB_RADIUS: f32 = 160.0;
/// Radians of title pulse per millisecond
const TITLE_PULSE_RATE: f32 = 0.005;

pub fn particle_color(color: ParticleColor) -> [f32; 4] {
    match color {
        ParticleColor::Muzzle => colors::MUZZLE,
        ParticleColor::DashBurst => colors::DASH_BURST,
        ParticleColor::DashTrail => colors::DASH_TRAIL,
        ParticleColor::Explosion => colors::EXPLOSION,
    }
}

/// Text for the dash indicator
pub fn dash_label(hud: &Hud) -> String {
    if hud.dash_ready {
        "DASH READY".to_string()
    } else {
        format!("DASH CD: {:.1}s", hud.dash_cooldown_secs)
    }
}

/// Turns snapshots into draw lists.
///
/// Owns the purely visual state: starfield positions, the title pulse and
/// the RNG used for star respawns and shake jitter. None of it feeds back
/// into the simulation.
#[derive(Debug)]
pub struct Renderer {
    starfield: Option<Starfield>,
    rng: Pcg32,
    title_pulse: f32,
    animate_title: bool,
}

impl Renderer {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let starfield = settings
            .starfield_enabled()
            .then(|| Starfield::new(&mut rng, STAR_COUNT));
        Self {
            starfield,
            rng,
            title_pulse: 0.0,
            animate_title: !settings.reduced_motion,
        }
    }

    pub fn starfield(&self) -> Option<&Starfield> {
        self.starfield.as_ref()
    }

    /// Build the draw list for one frame. `dt_ms` drives background motion.
    pub fn frame(&mut self, snapshot: &RenderSnapshot, dt_ms: f32) -> Vec<DrawCommand> {
        let mut out = vec![DrawCommand::Clear {
            color: colors::BACKGROUND,
        }];

        if let Some(starfield) = self.starfield.as_mut() {
            starfield.update(&mut self.rng, dt_ms);
            starfield.draw(&mut out);
        }

        match snapshot.screen {
            Screen::Menu => self.draw_menu(dt_ms, &mut out),
            Screen::Playing | Screen::Paused => {
                let shake = self.shake_offset(snapshot.screen_shake);
                draw_world(snapshot, shake, &mut out);
                if let Some(hud) = &snapshot.hud {
                    draw_hud(hud, &mut out);
                }
                if snapshot.screen == Screen::Paused {
                    draw_pause(&mut out);
                }
            }
            Screen::End { won } => draw_end(won, &mut out),
        }

        out
    }

    /// Random jitter in `[-magnitude, magnitude]` on both axes
    fn shake_offset(&mut self, magnitude: u32) -> Vec2 {
        if magnitude == 0 {
            return Vec2::ZERO;
        }
        let m = magnitude as i32;
        Vec2::new(
            self.rng.random_range(-m..=m) as f32,
            self.rng.random_range(-m..=m) as f32,
        )
    }

    fn draw_menu(&mut self, dt_ms: f32, out: &mut Vec<DrawCommand>) {
        let glow = if self.animate_title {
            self.title_pulse += dt_ms * TITLE_PULSE_RATE;
            (self.title_pulse.sin() + 1.0) / 2.0
        } else {
            0.5
        };
        let alpha = (120.0 * glow + 60.0) / 255.0;
        let title_pos = Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 3.0);
        out.push(DrawCommand::circle(
            title_pos,
            TITLE_ORB_RADIUS,
            with_alpha(colors::TITLE_ORB, alpha),
        ));
        out.push(DrawCommand::text(
            "BOOPIT",
            title_pos - Vec2::new(0.0, 15.0),
            colors::TITLE,
        ));

        let mid = Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0);
        out.push(DrawCommand::text(
            "Move: WASD    Aim: Mouse    Shoot: Left Click",
            mid + Vec2::new(0.0, 70.0),
            colors::HUD,
        ));
        out.push(DrawCommand::text(
            "Dash: Left Shift    Pause: ESC",
            mid + Vec2::new(0.0, 105.0),
            colors::HUD,
        ));
        out.push(DrawCommand::text(
            "Press SPACE to Begin",
            mid + Vec2::new(0.0, 180.0),
            colors::PROMPT,
        ));
        out.push(DrawCommand::text(
            "Press ESC to Quit",
            mid + Vec2::new(0.0, 220.0),
            colors::PROMPT_DIM,
        ));
    }
}

/// Entities, back to front: power-ups, bullets, enemies, particles, player
fn draw_world(snapshot: &RenderSnapshot, shake: Vec2, out: &mut Vec<DrawCommand>) {
    for p in &snapshot.powerups {
        out.push(DrawCommand::circle(
            p.pos + shake,
            p.size / 2.0,
            colors::POWER_SPEED,
        ));
    }

    for b in &snapshot.bullets {
        out.push(DrawCommand::circle(b.pos + shake, b.radius, colors::BULLET));
    }

    for e in &snapshot.enemies {
        out.push(DrawCommand::circle(e.pos + shake, e.size, colors::ENEMY_GLOW));
        out.push(DrawCommand::circle(
            e.pos + shake,
            e.size / 2.0,
            colors::ENEMY_CORE,
        ));
    }

    for p in &snapshot.particles {
        out.push(DrawCommand::circle(
            p.pos + shake,
            p.radius.max(1.0),
            particle_color(p.color),
        ));
    }

    if let Some(player) = &snapshot.player {
        let center = player.center + shake;
        out.push(DrawCommand::circle(
            center,
            player.size + 12.0,
            colors::PLAYER_GLOW,
        ));
        out.push(DrawCommand::circle(
            center,
            player.size / 2.0,
            colors::PLAYER_CORE,
        ));

        let aim = snapshot.pointer - player.center;
        let angle = aim.y.atan2(aim.x);
        out.push(DrawCommand::Triangle {
            points: [
                center,
                center + Vec2::from_angle(angle) * GUN_LENGTH,
                center + Vec2::from_angle(angle + GUN_FLANK_ANGLE) * GUN_FLANK_LENGTH,
            ],
            color: colors::BULLET,
        });
    }
}

fn draw_hud(hud: &Hud, out: &mut Vec<DrawCommand>) {
    out.push(DrawCommand::text(
        format!("Time Left: {}", hud.time_left_secs),
        Vec2::new(FIELD_WIDTH / 2.0, 40.0),
        colors::HUD,
    ));
    if hud.boost_active {
        out.push(DrawCommand::text(
            "SPEED BOOST ACTIVE",
            Vec2::new(FIELD_WIDTH / 2.0, 80.0),
            colors::POWER_SPEED,
        ));
    }
    out.push(DrawCommand::text(
        dash_label(hud),
        Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT - 40.0),
        colors::DASH_LABEL,
    ));
}

fn draw_pause(out: &mut Vec<DrawCommand>) {
    let mid = Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0);
    out.push(DrawCommand::Overlay {
        color: colors::PAUSE_SHADE,
    });
    out.push(DrawCommand::text(
        "PAUSED",
        mid - Vec2::new(0.0, 40.0),
        colors::PAUSE_TITLE,
    ));
    out.push(DrawCommand::text(
        "ESC: Resume    M: Main Menu    Q: Quit",
        mid + Vec2::new(0.0, 10.0),
        colors::PAUSE_OPTIONS,
    ));
}

fn draw_end(won: bool, out: &mut Vec<DrawCommand>) {
    let x = FIELD_WIDTH / 2.0;
    let mid_y = FIELD_HEIGHT / 2.0;
    out.push(DrawCommand::Overlay {
        color: colors::END_SHADE,
    });
    let (message, color) = if won {
        ("MISSION SUCCESS", colors::SUCCESS)
    } else {
        ("MISSION FAILED", colors::FAILURE)
    };
    out.push(DrawCommand::text(
        message,
        Vec2::new(x, FIELD_HEIGHT / 3.0),
        color,
    ));
    out.push(DrawCommand::text(
        "Press R to Retry",
        Vec2::new(x, mid_y),
        colors::END_RETRY,
    ));
    out.push(DrawCommand::text(
        "Press M for Main Menu",
        Vec2::new(x, mid_y + 40.0),
        colors::END_MENU,
    ));
    out.push(DrawCommand::text(
        "Press ESC to Quit",
        Vec2::new(x, mid_y + 80.0),
        colors::END_QUIT,
    ));
}
