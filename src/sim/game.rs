//! Game state machine: Menu / Playing (+ Pause) / End
//!
//! `Game` owns the gameplay clock, the current run and the settings. The
//! host calls [`Game::update`] once per frame with that frame's input and
//! draws the returned snapshot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::{Clock, Millis, PausableClock, Timers};
use super::snapshot::{RenderSnapshot, Screen};
use super::state::GameState;
use super::tick::{TickInput, tick};
use crate::settings::Settings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, no run in progress
    Menu,
    /// A run is in progress
    Playing { paused: bool },
    /// Run ended
    End { won: bool },
}

impl GamePhase {
    pub fn screen(self) -> Screen {
        match self {
            GamePhase::Menu => Screen::Menu,
            GamePhase::Playing { paused: false } => Screen::Playing,
            GamePhase::Playing { paused: true } => Screen::Paused,
            GamePhase::End { won } => Screen::End { won },
        }
    }
}

/// What the host loop should do after a frame
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Continue(RenderSnapshot),
    Quit,
}

/// Spreads run seeds apart
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// The whole game: phase transitions around the per-run simulation
#[derive(Debug)]
pub struct Game<C> {
    clock: PausableClock<C>,
    settings: Settings,
    phase: GamePhase,
    run: Option<GameState>,
    base_seed: u64,
    runs_started: u64,
    /// Gameplay-clock reading of the previous frame
    last_frame: Option<Millis>,
}

impl<C: Clock> Game<C> {
    pub fn new(clock: C, settings: Settings, seed: u64) -> Self {
        Self {
            clock: PausableClock::new(clock),
            settings,
            phase: GamePhase::Menu,
            run: None,
            base_seed: seed,
            runs_started: 0,
            last_frame: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// The run in progress (also kept on the end screen)
    pub fn run(&self) -> Option<&GameState> {
        self.run.as_ref()
    }

    pub fn run_mut(&mut self) -> Option<&mut GameState> {
        self.run.as_mut()
    }

    /// The wall clock driving the game
    pub fn clock(&self) -> &C {
        self.clock.inner()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Process one frame of input.
    ///
    /// Input is always handled and a snapshot is always produced; the
    /// simulation itself only advances while playing and unpaused.
    pub fn update(&mut self, input: &TickInput) -> Flow {
        // Frozen while paused, so time spent paused never reaches the run
        let now = self.clock.now_ms();
        let dt = self.last_frame.map_or(0, |last| now.saturating_sub(last));
        self.last_frame = Some(now);

        if input.quit {
            log::info!("Quit requested from {:?}", self.phase);
            return Flow::Quit;
        }

        match self.phase {
            GamePhase::Menu => {
                if input.start {
                    self.start_run();
                }
            }
            GamePhase::Playing { paused: false } => {
                if input.pause {
                    self.set_paused(true);
                } else {
                    self.step(input, dt);
                }
            }
            GamePhase::Playing { paused: true } => {
                if input.pause {
                    self.set_paused(false);
                    self.step(input, dt);
                } else if input.menu {
                    self.abandon_run();
                }
            }
            GamePhase::End { .. } => {
                if input.retry {
                    self.start_run();
                } else if input.menu {
                    self.run = None;
                    self.phase = GamePhase::Menu;
                }
            }
        }

        let snapshot = self.snapshot(input.pointer);

        // Shake is a presentation value: it winds down on every playing frame
        if matches!(self.phase, GamePhase::Playing { .. }) {
            if let Some(run) = self.run.as_mut() {
                run.screen_shake.decay();
            }
        }

        Flow::Continue(snapshot)
    }

    /// Current render snapshot
    pub fn snapshot(&self, pointer: Vec2) -> RenderSnapshot {
        let screen = self.phase.screen();
        match (&self.run, self.phase) {
            (Some(run), GamePhase::Playing { .. } | GamePhase::End { .. }) => {
                let timers = Timers::read(&self.clock);
                RenderSnapshot::capture(
                    screen,
                    run,
                    &timers,
                    pointer,
                    self.settings.effective_screen_shake(),
                )
            }
            _ => RenderSnapshot::empty(screen, pointer),
        }
    }

    fn start_run(&mut self) {
        let seed = self
            .base_seed
            .wrapping_add(self.runs_started.wrapping_mul(SEED_STRIDE));
        self.runs_started += 1;
        // A run never starts paused
        self.clock.resume();
        let now = self.clock.now_ms();
        self.run = Some(GameState::new(seed, now).with_particle_cap(self.settings.max_particles()));
        self.phase = GamePhase::Playing { paused: false };
        log::info!("Run {} started with seed {}", self.runs_started, seed);
    }

    fn set_paused(&mut self, paused: bool) {
        if paused {
            self.clock.pause();
        } else {
            self.clock.resume();
        }
        self.phase = GamePhase::Playing { paused };
        log::info!("{}", if paused { "Paused" } else { "Resumed" });
    }

    fn abandon_run(&mut self) {
        self.clock.resume();
        self.run = None;
        self.phase = GamePhase::Menu;
        log::info!("Run abandoned, back to menu");
    }

    fn step(&mut self, input: &TickInput, dt: Millis) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        let timers = Timers::read(&self.clock);
        if let Some(outcome) = tick(run, input, timers, dt) {
            log::info!(
                "Run over: {} after {} ticks",
                if outcome.won() { "mission success" } else { "mission failed" },
                run.time_ticks
            );
            self.phase = GamePhase::End {
                won: outcome.won(),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::clock::ManualClock;

    const FRAME: Millis = 16;

    fn game() -> Game<ManualClock> {
        Game::new(ManualClock::new(10_000), Settings::default(), 7)
    }

    fn press(f: impl FnOnce(&mut TickInput)) -> TickInput {
        let mut input = TickInput::default();
        f(&mut input);
        input
    }

    fn frame(game: &mut Game<ManualClock>, input: &TickInput) -> Flow {
        game.clock().advance(FRAME);
        game.update(input)
    }

    #[test]
    fn test_menu_start_enters_playing() {
        let mut game = game();
        assert_eq!(game.phase(), GamePhase::Menu);
        frame(&mut game, &TickInput::default());
        assert_eq!(game.phase(), GamePhase::Menu);
        assert!(game.run().is_none());

        frame(&mut game, &press(|i| i.start = true));
        assert_eq!(game.phase(), GamePhase::Playing { paused: false });
        let run = game.run().unwrap();
        assert_eq!(run.time_ticks, 0);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut game = game();
        frame(&mut game, &press(|i| i.start = true));
        for _ in 0..50 {
            frame(&mut game, &TickInput::default());
        }
        frame(&mut game, &press(|i| i.pause = true));
        assert_eq!(game.phase(), GamePhase::Playing { paused: true });

        let before = game.run().unwrap().clone();
        for _ in 0..200 {
            let flow = frame(&mut game, &press(|i| i.dash = true));
            match flow {
                Flow::Continue(snapshot) => assert_eq!(snapshot.screen, Screen::Paused),
                Flow::Quit => panic!("unexpected quit"),
            }
        }
        let after = game.run().unwrap();
        assert_eq!(before.sim_time_ms, after.sim_time_ms);
        assert_eq!(before.time_ticks, after.time_ticks);
        assert_eq!(before.enemies.len(), after.enemies.len());
        assert_eq!(after.player.last_dash, None);
    }

    #[test]
    fn test_no_catch_up_spawn_after_pause() {
        let mut game = game();
        frame(&mut game, &press(|i| i.start = true));
        // 20 frames = 320ms of play, short of the first enemy spawn
        for _ in 0..20 {
            frame(&mut game, &TickInput::default());
        }
        assert!(game.run().unwrap().enemies.is_empty());

        frame(&mut game, &press(|i| i.pause = true));
        game.clock().advance(30_000);
        frame(&mut game, &press(|i| i.pause = true));
        assert_eq!(game.phase(), GamePhase::Playing { paused: false });
        assert!(game.run().unwrap().enemies.is_empty());
    }

    #[test]
    fn test_resume_does_not_count_paused_time() {
        let mut game = game();
        frame(&mut game, &press(|i| i.start = true));
        for _ in 0..20 {
            frame(&mut game, &TickInput::default());
        }
        let before = game.run().unwrap().sim_time_ms;
        assert_eq!(before, 20 * FRAME);

        frame(&mut game, &press(|i| i.pause = true));
        // The host stalls: no frames while the wall clock runs on
        game.clock().advance(30_000);
        frame(&mut game, &press(|i| i.pause = true));
        assert_eq!(game.phase(), GamePhase::Playing { paused: false });
        assert_eq!(game.run().unwrap().sim_time_ms, before);

        frame(&mut game, &TickInput::default());
        assert_eq!(game.run().unwrap().sim_time_ms, before + FRAME);
    }

    #[test]
    fn test_paused_menu_abandons_run() {
        let mut game = game();
        frame(&mut game, &press(|i| i.start = true));
        // Menu is ignored while unpaused
        frame(&mut game, &press(|i| i.menu = true));
        assert_eq!(game.phase(), GamePhase::Playing { paused: false });

        frame(&mut game, &press(|i| i.pause = true));
        frame(&mut game, &press(|i| i.menu = true));
        assert_eq!(game.phase(), GamePhase::Menu);
        assert!(game.run().is_none());
    }

    #[test]
    fn test_quit_from_every_phase() {
        let quit = press(|i| i.quit = true);

        let mut menu = game();
        assert_eq!(frame(&mut menu, &quit), Flow::Quit);

        let mut playing = game();
        frame(&mut playing, &press(|i| i.start = true));
        assert_eq!(frame(&mut playing, &quit), Flow::Quit);

        let mut paused = game();
        frame(&mut paused, &press(|i| i.start = true));
        frame(&mut paused, &press(|i| i.pause = true));
        assert_eq!(frame(&mut paused, &quit), Flow::Quit);
    }

    #[test]
    fn test_win_after_survival_time() {
        let mut game = game();
        frame(&mut game, &press(|i| i.start = true));

        let mut ticks = 0;
        while game.phase() == (GamePhase::Playing { paused: false }) {
            // Keep the arena empty so only the clock matters
            game.run_mut().unwrap().enemies.clear();
            frame(&mut game, &TickInput::default());
            ticks += 1;
            assert!(ticks < 2000, "never won");
        }
        assert_eq!(game.phase(), GamePhase::End { won: true });
        assert!(game.run().unwrap().sim_time_ms >= SURVIVAL_TIME_MS);
        assert_eq!(ticks, SURVIVAL_TIME_MS.div_ceil(FRAME));
    }

    #[test]
    fn test_loss_then_retry_and_menu() {
        let mut game = game();
        frame(&mut game, &press(|i| i.start = true));
        let first_seed = game.run().unwrap().seed;
        let center = game.run().unwrap().player.center();
        game.run_mut().unwrap().spawn_enemy(center);
        frame(&mut game, &TickInput::default());
        assert_eq!(game.phase(), GamePhase::End { won: false });

        frame(&mut game, &press(|i| i.retry = true));
        assert_eq!(game.phase(), GamePhase::Playing { paused: false });
        let run = game.run().unwrap();
        assert_ne!(run.seed, first_seed);
        assert!(run.enemies.is_empty());

        let center = run.player.center();
        game.run_mut().unwrap().spawn_enemy(center);
        frame(&mut game, &TickInput::default());
        frame(&mut game, &press(|i| i.menu = true));
        assert_eq!(game.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_shake_decays_while_paused() {
        let mut game = game();
        frame(&mut game, &press(|i| i.start = true));
        frame(&mut game, &press(|i| i.pause = true));
        game.run_mut().unwrap().screen_shake.pulse();
        let Flow::Continue(snapshot) = frame(&mut game, &TickInput::default()) else {
            panic!("unexpected quit");
        };
        assert_eq!(snapshot.screen_shake, SCREEN_SHAKE_PULSE);
        assert_eq!(
            game.run().unwrap().screen_shake.magnitude(),
            SCREEN_SHAKE_PULSE - 1
        );
    }
}
