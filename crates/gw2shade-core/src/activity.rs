//! Player activity detection from the link tick counter.
//!
//! The game bumps `uiTick` on every internal state refresh, which is
//! the only liveness signal the link exposes. Loading screens and
//! cutscenes suspend it for tens of seconds (up to ~56s observed), so
//! the timeout must clear that with margin; the default is 5 minutes.

/// Tracks whether the tick counter has advanced within a trailing
/// window of poll cycles.
pub struct ActivityTracker {
    last_tick: u32,
    last_change_cycle: i64,
    current_cycle: i64,
    timeout_cycles: i64,
}

impl ActivityTracker {
    /// `timeout_cycles` is the number of consecutive unchanged polls
    /// after which the player counts as inactive.
    pub fn new(timeout_cycles: u32) -> Self {
        Self {
            last_tick: 0,
            // Report inactive until the first real tick change.
            last_change_cycle: -i64::from(timeout_cycles),
            current_cycle: 0,
            timeout_cycles: i64::from(timeout_cycles),
        }
    }

    /// Record one observation of the tick counter and report whether
    /// it has changed within the timeout window.
    pub fn observe(&mut self, tick: u32) -> bool {
        self.current_cycle += 1;
        if tick != self.last_tick {
            self.last_change_cycle = self.current_cycle;
        }
        self.last_tick = tick;
        self.current_cycle - self.last_change_cycle < self.timeout_cycles
    }
}
