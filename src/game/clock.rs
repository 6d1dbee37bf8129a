//! Phase timing
//!
//! All timing is driven by millisecond timestamps handed in by the caller.
//! Nothing in here reads the wall clock; `SystemClock` exists for drivers.

use std::time::Instant;

/// Monotonic millisecond clock source
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin, non-decreasing
    fn now_ms(&self) -> u64;
}

/// Real clock anchored at construction time
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Hand-advanced clock for tests and replays
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: u64,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self { now: start_ms }
    }

    pub fn set(&mut self, now_ms: u64) {
        self.now = now_ms;
    }

    pub fn advance(&mut self, delta_ms: u64) {
        self.now += delta_ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now
    }
}

/// Timestamps for the current phase and the previous tick
#[derive(Debug, Clone, Default)]
pub struct RoundClock {
    /// When the current phase was entered
    phase_start_ms: u64,
    /// Length of the current phase (`None` = untimed, e.g. IDLE)
    phase_duration_ms: Option<u64>,
    /// Latest timestamp seen by `tick`
    last_tick_ms: Option<u64>,
}

impl RoundClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a timed phase at `now`
    pub fn start_timed(&mut self, now_ms: u64, duration_ms: u64) {
        self.phase_start_ms = now_ms;
        self.phase_duration_ms = Some(duration_ms);
    }

    /// Start a phase that only ends on an external event
    pub fn start_untimed(&mut self, now_ms: u64) {
        self.phase_start_ms = now_ms;
        self.phase_duration_ms = None;
    }

    /// Milliseconds spent in the current phase (0 if the clock went backwards)
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.phase_start_ms)
    }

    /// Milliseconds left in the current timed phase
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        match self.phase_duration_ms {
            Some(duration) => duration.saturating_sub(self.elapsed_ms(now_ms)),
            None => 0,
        }
    }

    /// Absolute end of the current timed phase
    pub fn deadline_ms(&self) -> Option<u64> {
        self.phase_duration_ms
            .map(|duration| self.phase_start_ms.saturating_add(duration))
    }

    /// Whether a timed phase has run its full length
    pub fn is_expired(&self, now_ms: u64) -> bool {
        match self.phase_duration_ms {
            Some(duration) => self.elapsed_ms(now_ms) >= duration,
            None => false,
        }
    }

    /// Record a tick and return seconds since the previous one
    ///
    /// The first tick, and any tick whose timestamp is earlier than the
    /// latest seen, yields zero. A regressed timestamp does not rewind the
    /// reference point.
    pub fn tick(&mut self, now_ms: u64) -> f64 {
        let delta_ms = match self.last_tick_ms {
            Some(last) if now_ms > last => now_ms - last,
            Some(_) => {
                log::trace!("clock did not advance (now={now_ms}), treating tick as zero-length");
                0
            }
            None => 0,
        };
        self.last_tick_ms = Some(self.last_tick_ms.map_or(now_ms, |last| last.max(now_ms)));
        delta_ms as f64 / 1000.0
    }

    /// Seconds of movement time between the previous tick and `now`,
    /// cut off at the current phase deadline. Records the tick.
    pub fn tick_within_phase(&mut self, now_ms: u64) -> f64 {
        let prev = self.last_tick_ms;
        let elapsed = self.tick(now_ms);
        let (Some(prev), Some(deadline)) = (prev, self.deadline_ms()) else {
            return elapsed;
        };
        let start = prev.max(self.phase_start_ms);
        let end = now_ms.min(deadline);
        if end <= start {
            0.0
        } else {
            (end - start) as f64 / 1000.0
        }
    }
}
