//! Property tests for the simulation invariants

use boopit::consts::*;
use boopit::in_field;
use boopit::sim::collision::apply_powerup;
use boopit::sim::{GameState, HeldKeys, Player, PowerUpKind, RunOutcome, TickInput, Timers, tick};
use glam::Vec2;
use proptest::prelude::*;

fn tick_input() -> impl Strategy<Value = TickInput> {
    (
        any::<[bool; 4]>(),
        any::<bool>(),
        any::<bool>(),
        -50.0f32..FIELD_WIDTH + 50.0,
        -50.0f32..FIELD_HEIGHT + 50.0,
    )
        .prop_map(|([up, down, left, right], fire, dash, x, y)| TickInput {
            held: HeldKeys {
                up,
                down,
                left,
                right,
            },
            fire,
            dash,
            pointer: Vec2::new(x, y),
            ..Default::default()
        })
}

/// Frame lengths around 60 Hz, with the odd hitch
fn frame_ms() -> impl Strategy<Value = u64> {
    prop_oneof![9 => 15u64..=17, 1 => 0u64..=250]
}

proptest! {
    #[test]
    fn player_stays_in_field(
        seed in any::<u64>(),
        steps in prop::collection::vec((tick_input(), frame_ms()), 1..300),
    ) {
        let mut state = GameState::new(seed, 0);
        let mut now = 0;
        for (input, dt) in steps {
            now += dt;
            let outcome = tick(&mut state, &input, Timers::at(now), dt);
            let pos = state.player.pos;
            prop_assert!(pos.x >= 0.0 && pos.x <= FIELD_WIDTH - PLAYER_SIZE);
            prop_assert!(pos.y >= 0.0 && pos.y <= FIELD_HEIGHT - PLAYER_SIZE);
            if outcome.is_some() {
                break;
            }
        }
    }

    #[test]
    fn bullets_never_outside_field(
        seed in any::<u64>(),
        steps in prop::collection::vec((tick_input(), frame_ms()), 1..300),
    ) {
        let mut state = GameState::new(seed, 0);
        let mut now = 0;
        for (input, dt) in steps {
            now += dt;
            let outcome = tick(&mut state, &input, Timers::at(now), dt);
            prop_assert!(state.bullets.iter().all(|b| in_field(b.pos)));
            if outcome.is_some() {
                break;
            }
        }
    }

    #[test]
    fn dashes_respect_cooldown(
        seed in any::<u64>(),
        steps in prop::collection::vec((tick_input(), frame_ms()), 1..300),
    ) {
        let mut state = GameState::new(seed, 0);
        let mut now = 0;
        let mut dashes = Vec::new();
        for (input, dt) in steps {
            now += dt;
            let before = state.player.last_dash;
            let outcome = tick(&mut state, &input, Timers::at(now), dt);
            if state.player.last_dash != before {
                dashes.extend(state.player.last_dash);
            }
            if outcome.is_some() {
                break;
            }
        }
        for pair in dashes.windows(2) {
            prop_assert!(pair[1] - pair[0] >= DASH_COOLDOWN_MS);
        }
    }

    #[test]
    fn boost_pickup_overwrites_expiry(
        first in 0u64..100_000,
        gap in 0u64..10_000,
    ) {
        let mut player = Player::default();
        apply_powerup(PowerUpKind::Speed, &mut player, &Timers::at(first));
        prop_assert_eq!(player.boost_expires_at, first + BOOST_DURATION_MS);

        let second = first + gap;
        apply_powerup(PowerUpKind::Speed, &mut player, &Timers::at(second));
        prop_assert!(player.boost_active);
        prop_assert_eq!(player.boost_expires_at, second + BOOST_DURATION_MS);
    }

    #[test]
    fn win_exactly_at_survival_threshold(
        frames in prop::collection::vec(frame_ms(), 1..2000),
    ) {
        let mut state = GameState::new(1, 0);
        for dt in frames {
            state.enemies.clear();
            let outcome = tick(&mut state, &TickInput::default(), Timers::at(0), dt);
            if state.sim_time_ms >= SURVIVAL_TIME_MS {
                prop_assert_eq!(outcome, Some(RunOutcome::Won));
                break;
            }
            prop_assert_eq!(outcome, None);
        }
    }
}
