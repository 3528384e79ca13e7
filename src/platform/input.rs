//! Raw key/pointer events into per-tick input
//!
//! The host forwards window events as they arrive; once per tick the
//! collector turns everything seen since the previous tick into a
//! [`TickInput`]. Bindings depend on the phase (Escape quits from the
//! menu but pauses during play).

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::game::GamePhase;
use crate::sim::movement::HeldKeys;
use crate::sim::tick::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Space,
    Escape,
    LeftShift,
    R,
    M,
    Q,
}

/// Pointer buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Accumulates events between ticks
#[derive(Debug, Default)]
pub struct InputCollector {
    held: HashSet<Key>,
    pressed: Vec<Key>,
    pointer: Vec2,
    clicked: bool,
    close_requested: bool,
    /// Hand control to the autopilot
    pub idle_mode: bool,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// A key went down. OS auto-repeat (down while already held) is ignored.
    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.pressed.push(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Pointer moved, in field coordinates
    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    pub fn pointer_pressed(&mut self, button: PointerButton) {
        if button == PointerButton::Primary {
            self.clicked = true;
        }
    }

    /// The window was closed
    pub fn close_requested(&mut self) {
        self.close_requested = true;
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Build this tick's input and clear the one-shot events
    pub fn take(&mut self, phase: GamePhase) -> TickInput {
        let mut input = TickInput {
            held: HeldKeys {
                up: self.is_held(Key::W),
                down: self.is_held(Key::S),
                left: self.is_held(Key::A),
                right: self.is_held(Key::D),
            },
            pointer: self.pointer,
            quit: std::mem::take(&mut self.close_requested),
            idle_mode: self.idle_mode,
            ..Default::default()
        };

        for key in self.pressed.drain(..) {
            match (phase, key) {
                (GamePhase::Menu, Key::Space) => input.start = true,
                (GamePhase::Menu, Key::Escape) => input.quit = true,
                (GamePhase::Playing { .. }, Key::Escape) => input.pause = !input.pause,
                (GamePhase::Playing { paused: false }, Key::LeftShift) => input.dash = true,
                (GamePhase::Playing { paused: true }, Key::M) => input.menu = true,
                (GamePhase::Playing { paused: true }, Key::Q) => input.quit = true,
                (GamePhase::End { .. }, Key::R) => input.retry = true,
                (GamePhase::End { .. }, Key::M) => input.menu = true,
                (GamePhase::End { .. }, Key::Escape) => input.quit = true,
                _ => {}
            }
        }

        let clicked = std::mem::take(&mut self.clicked);
        input.fire = clicked && phase == (GamePhase::Playing { paused: false });
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYING: GamePhase = GamePhase::Playing { paused: false };
    const PAUSED: GamePhase = GamePhase::Playing { paused: true };

    #[test]
    fn test_held_keys_persist_and_presses_do_not() {
        let mut collector = InputCollector::new();
        collector.key_down(Key::W);
        collector.key_down(Key::LeftShift);

        let first = collector.take(PLAYING);
        assert!(first.held.up);
        assert!(first.dash);

        let second = collector.take(PLAYING);
        assert!(second.held.up);
        assert!(!second.dash);

        collector.key_up(Key::W);
        assert!(!collector.take(PLAYING).held.up);
    }

    #[test]
    fn test_auto_repeat_ignored() {
        let mut collector = InputCollector::new();
        collector.key_down(Key::LeftShift);
        collector.take(PLAYING);
        collector.key_down(Key::LeftShift);
        assert!(!collector.take(PLAYING).dash);
    }

    #[test]
    fn test_escape_depends_on_phase() {
        let mut collector = InputCollector::new();
        collector.key_down(Key::Escape);
        assert!(collector.take(GamePhase::Menu).quit);

        collector.key_up(Key::Escape);
        collector.key_down(Key::Escape);
        let input = collector.take(PLAYING);
        assert!(input.pause && !input.quit);

        collector.key_up(Key::Escape);
        collector.key_down(Key::Escape);
        assert!(collector.take(GamePhase::End { won: true }).quit);
    }

    #[test]
    fn test_pause_menu_bindings() {
        let mut collector = InputCollector::new();
        collector.key_down(Key::M);
        assert!(!collector.take(PLAYING).menu);

        collector.key_up(Key::M);
        collector.key_down(Key::M);
        collector.key_down(Key::Q);
        let input = collector.take(PAUSED);
        assert!(input.menu && input.quit);
    }

    #[test]
    fn test_click_fires_only_while_playing() {
        let mut collector = InputCollector::new();
        collector.pointer_moved(Vec2::new(10.0, 20.0));
        collector.pointer_pressed(PointerButton::Primary);
        assert!(!collector.take(PAUSED).fire);

        collector.pointer_pressed(PointerButton::Secondary);
        assert!(!collector.take(PLAYING).fire);

        collector.pointer_pressed(PointerButton::Primary);
        let input = collector.take(PLAYING);
        assert!(input.fire);
        assert_eq!(input.pointer, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_window_close_quits_everywhere() {
        let mut collector = InputCollector::new();
        collector.close_requested();
        assert!(collector.take(PLAYING).quit);
        assert!(!collector.take(PLAYING).quit);
    }

    #[test]
    fn test_end_screen_bindings() {
        let mut collector = InputCollector::new();
        collector.key_down(Key::R);
        let input = collector.take(GamePhase::End { won: false });
        assert!(input.retry);
        assert!(!input.start);
    }
}
