//! Boopit - headless runner
//!
//! Plays the game with the autopilot at the controls, either on simulated
//! time (fast, reproducible) or paced against the wall clock.

use std::error::Error;
use std::path::PathBuf;

use boopit::{QualityPreset, Settings};
use boopit::platform::{FrameLimiter, InputCollector, Key, SystemClock};
use boopit::renderer::Renderer;
use boopit::sim::{Clock, Flow, Game, GamePhase, ManualClock, Millis};
use clap::Parser;

/// Looked up in the working directory when `--settings` is not given
const DEFAULT_SETTINGS_PATH: &str = "boopit.json";

/// Keeps the renderer's jitter stream apart from the simulation's
const RENDER_SEED_SALT: u64 = 0x5EED_0F_57A2;

/// Boopit: evade and destroy homing enemies until the clock runs out
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// RNG seed (overrides the settings file; random when neither sets one)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many frames
    #[arg(long, default_value_t = 18_000)]
    ticks: u64,

    /// Runs to play before quitting
    #[arg(long, default_value_t = 1)]
    runs: u32,

    /// Settings file (JSON)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Quality preset (low, medium, high), overriding the settings file
    #[arg(long, value_name = "PRESET", value_parser = parse_quality)]
    quality: Option<QualityPreset>,

    /// Pace frames against the wall clock instead of simulated time
    #[arg(long)]
    realtime: bool,

    /// Print every frame's snapshot as a JSON line on stdout
    #[arg(long)]
    dump: bool,
}

fn parse_quality(s: &str) -> Result<QualityPreset, String> {
    QualityPreset::parse(s).ok_or_else(|| format!("unknown quality preset `{s}`"))
}

#[derive(Debug, Default)]
struct Summary {
    won: u32,
    lost: u32,
    frames: u64,
}

impl Summary {
    fn runs(&self) -> u32 {
        self.won + self.lost
    }
}

/// Press and release within one frame
fn tap(input: &mut InputCollector, key: Key) {
    input.key_down(key);
    input.key_up(key);
}

/// Main loop: menu → runs → quit, rendering every frame.
///
/// `pace` waits for (or simulates) the next frame and returns its length in ms.
fn drive<C: Clock>(
    mut game: Game<C>,
    cli: &Cli,
    seed: u64,
    mut pace: impl FnMut(&Game<C>) -> f32,
) -> Result<Summary, serde_json::Error> {
    let mut renderer = Renderer::new(game.settings(), seed ^ RENDER_SEED_SALT);
    let mut input = InputCollector::new();
    input.idle_mode = true;
    let mut summary = Summary::default();

    while summary.frames < cli.ticks {
        let dt_ms = pace(&game);
        let phase = game.phase();
        match phase {
            GamePhase::Menu => tap(&mut input, Key::Space),
            GamePhase::End { .. } if summary.runs() < cli.runs => tap(&mut input, Key::R),
            GamePhase::End { .. } => tap(&mut input, Key::Escape),
            GamePhase::Playing { .. } => {}
        }

        let frame_input = input.take(phase);
        let snapshot = match game.update(&frame_input) {
            Flow::Quit => break,
            Flow::Continue(snapshot) => snapshot,
        };
        let commands = renderer.frame(&snapshot, dt_ms);
        log::trace!("frame {}: {} draw commands", summary.frames, commands.len());
        if cli.dump {
            println!("{}", serde_json::to_string(&snapshot)?);
        }
        summary.frames += 1;

        if let GamePhase::End { won } = game.phase() {
            if !matches!(phase, GamePhase::End { .. }) {
                if won {
                    summary.won += 1;
                } else {
                    summary.lost += 1;
                }
            }
        }
    }

    Ok(summary)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::load_or_default(DEFAULT_SETTINGS_PATH),
    };
    if let Some(preset) = cli.quality {
        settings.apply_preset(preset);
    }
    let seed = cli.seed.or(settings.seed).unwrap_or_else(rand::random);
    let fps = settings.target_fps.max(1);
    log::info!("Boopit starting (seed {seed}, {fps} fps)");

    let summary = if cli.realtime {
        let mut limiter = FrameLimiter::new(fps);
        let game = Game::new(SystemClock::new(), settings, seed);
        drive(game, &cli, seed, |_| limiter.wait().as_secs_f32() * 1000.0)?
    } else {
        let frame_ms = Millis::from(1000 / fps);
        let game = Game::new(ManualClock::new(0), settings, seed);
        drive(game, &cli, seed, |game| {
            game.clock().advance(frame_ms);
            frame_ms as f32
        })?
    };

    log::info!(
        "Played {} run(s) in {} frames: {} won, {} lost",
        summary.runs(),
        summary.frames,
        summary.won,
        summary.lost
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_flag() {
        let cli = Cli::try_parse_from(["boopit", "--quality", "Low"]).unwrap();
        assert_eq!(cli.quality, Some(QualityPreset::Low));

        let cli = Cli::try_parse_from(["boopit"]).unwrap();
        assert_eq!(cli.quality, None);
        assert_eq!(cli.runs, 1);

        assert!(Cli::try_parse_from(["boopit", "--quality", "ultra"]).is_err());
    }

    #[test]
    fn test_headless_session_plays_requested_runs() {
        let cli = Cli::try_parse_from(["boopit", "--runs", "2", "--quality", "low"]).unwrap();
        let mut settings = Settings::default();
        settings.apply_preset(QualityPreset::Low);
        let game = Game::new(ManualClock::new(0), settings, 3);
        let summary = drive(game, &cli, 3, |game| {
            game.clock().advance(16);
            16.0
        })
        .unwrap();
        assert_eq!(summary.runs(), 2);
        assert!(summary.frames < cli.ticks);
    }
}
