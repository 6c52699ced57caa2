//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter; `SimClock` maps it to
//! simulated seconds:
//!
//!   elapsed_secs = tick * tick_duration_secs
//!
//! Keeping the integer tick canonical means the scenario timeout is an
//! exact tick comparison rather than an accumulated float.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts tick counts to simulated seconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Simulated seconds per tick (the simulator's fixed step).
    pub tick_duration_secs: f32,
    /// The current tick — advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_duration_secs: f32) -> Self {
        Self {
            tick_duration_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick + 1;
    }

    /// Elapsed simulated seconds at the current tick.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.secs_at(self.current_tick)
    }

    /// Simulated seconds at an arbitrary tick.
    #[inline]
    pub fn secs_at(&self, tick: Tick) -> f64 {
        tick.0 as f64 * self.tick_duration_secs as f64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2} s)", self.current_tick, self.elapsed_secs())
    }
}

fn ticks_spanning(secs: f64, tick_duration_secs: f32) -> u64 {
    if secs <= 0.0 || tick_duration_secs <= 0.0 {
        return 0;
    }
    // Tolerance keeps 2.0 / 0.05 at 40 rather than 41.
    (secs / tick_duration_secs as f64 - 1e-9).ceil() as u64
}

// ── ScenarioConfig ────────────────────────────────────────────────────────────

/// Run parameters shared by every scenario.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioConfig {
    /// Simulated seconds per tick.  Default: 0.05 (20 Hz).
    pub tick_duration_secs: f32,

    /// Simulated seconds after which the scenario ends with `Timeout`.
    pub timeout_secs: f32,

    /// Master RNG seed.  The same seed always produces identical parameters.
    pub seed: u64,

    /// Jitter scenario parameters from `seed` when building catalog scenarios.
    pub randomize: bool,

    /// Emit an actor snapshot every N ticks.  1 = every tick.
    pub snapshot_interval_ticks: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            tick_duration_secs:      0.05,
            timeout_secs:            60.0,
            seed:                    0,
            randomize:               false,
            snapshot_interval_ticks: 1,
        }
    }
}

impl ScenarioConfig {
    /// Number of ticks after which the run times out.
    #[inline]
    pub fn timeout_ticks(&self) -> u64 {
        ticks_spanning(self.timeout_secs as f64, self.tick_duration_secs)
    }

    /// Construct a `SimClock` for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_secs)
    }

    /// Reject configurations the tick loop cannot run.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.tick_duration_secs > 0.0) {
            return Err(CoreError::Config(format!(
                "tick_duration_secs must be positive, got {}",
                self.tick_duration_secs
            )));
        }
        if !(self.timeout_secs > 0.0) {
            return Err(CoreError::Config(format!(
                "timeout_secs must be positive, got {}",
                self.timeout_secs
            )));
        }
        if self.snapshot_interval_ticks == 0 {
            return Err(CoreError::Config("snapshot_interval_ticks must be at least 1".into()));
        }
        Ok(())
    }
}
