//! Monotonic time sources and cooldown/duration queries
//!
//! Every timing decision in the simulation goes through [`Timers`], a
//! per-tick reading of a [`Clock`]. Tests drive the simulation with a
//! [`ManualClock`]; the native runner uses the platform system clock.

use std::cell::Cell;

/// Milliseconds on a monotonic timeline
pub type Millis = u64;

/// A monotonically increasing millisecond source
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> Millis {
        (**self).now_ms()
    }
}

/// Hand-driven clock for tests and headless runs
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Move time forward. Time never goes backwards.
    pub fn advance(&self, ms: Millis) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    /// Jump to `ms`, ignored if it lies in the past
    pub fn set(&self, ms: Millis) {
        if ms > self.now.get() {
            self.now.set(ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}

/// Wraps a wall clock and hides the time spent paused.
///
/// While paused the reading is frozen; after resuming it continues from
/// where it stopped, so gameplay timestamps taken from it never see the
/// pause.
#[derive(Debug)]
pub struct PausableClock<C> {
    inner: C,
    paused_at: Option<Millis>,
    paused_total: Millis,
}

impl<C: Clock> PausableClock<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            paused_at: None,
            paused_total: 0,
        }
    }

    /// The underlying wall clock
    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn pause(&mut self) {
        if self.paused_at.is_none() {
            self.paused_at = Some(self.inner.now_ms());
        }
    }

    pub fn resume(&mut self) {
        if let Some(at) = self.paused_at.take() {
            self.paused_total += self.inner.now_ms().saturating_sub(at);
        }
    }
}

impl<C: Clock> Clock for PausableClock<C> {
    fn now_ms(&self) -> Millis {
        let wall = self.paused_at.unwrap_or_else(|| self.inner.now_ms());
        wall.saturating_sub(self.paused_total)
    }
}

/// Cooldown and duration queries against a single clock reading.
///
/// Taken once per tick so every system in that tick agrees on "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timers {
    now: Millis,
}

impl Timers {
    pub fn at(now: Millis) -> Self {
        Self { now }
    }

    pub fn read(clock: &impl Clock) -> Self {
        Self::at(clock.now_ms())
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    /// Time passed since `since`, zero if `since` is in the future
    pub fn elapsed(&self, since: Millis) -> Millis {
        self.now.saturating_sub(since)
    }

    /// True once `cooldown` has passed since `last_trigger`
    pub fn ready(&self, last_trigger: Millis, cooldown: Millis) -> bool {
        self.elapsed(last_trigger) >= cooldown
    }

    /// True once strictly more than `interval` has passed since `last_trigger`
    pub fn exceeded(&self, last_trigger: Millis, interval: Millis) -> bool {
        self.elapsed(last_trigger) > interval
    }

    /// Like [`Timers::ready`], treating "never triggered" as ready
    pub fn ready_since(&self, last_trigger: Option<Millis>, cooldown: Millis) -> bool {
        last_trigger.is_none_or(|t| self.ready(t, cooldown))
    }

    /// Time left until `expiry`, clamped at zero
    pub fn remaining(&self, expiry: Millis) -> Millis {
        expiry.saturating_sub(self.now)
    }

    /// Absolute timestamp `duration` from now
    pub fn deadline(&self, duration: Millis) -> Millis {
        self.now.saturating_add(duration)
    }

    /// True strictly after `expiry`
    pub fn expired(&self, expiry: Millis) -> bool {
        self.now > expiry
    }
}
