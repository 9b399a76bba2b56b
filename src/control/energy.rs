//! Interval-sampled energy accumulator.
//!
//! Energy is not integrated continuously.  When a power sample arrives at
//! least one interval after the previous accumulation, the instantaneous
//! power is credited for exactly one interval.  Samples in between are
//! ignored, and missed intervals are not back-filled.

/// Default accumulation interval.
pub const DEFAULT_INTERVAL_MS: u64 = 30_000;

const MS_PER_HOUR: f64 = 3_600_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyAccumulator {
    total_wh: f64,
    last_update_ms: u64,
    interval_ms: u64,
}

impl EnergyAccumulator {
    /// Starts at zero with the interval timer anchored at `now_ms`.
    pub fn new(interval_ms: u64, now_ms: u64) -> Self {
        Self {
            total_wh: 0.0,
            last_update_ms: now_ms,
            interval_ms,
        }
    }

    /// Credit `power_w` for one interval if the interval has elapsed.
    ///
    /// Returns `true` when the total changed.  Negative or NaN power
    /// counts as zero, so the total never decreases.  A clock that appears
    /// to run backwards is treated as "not yet elapsed".
    pub fn accumulate(&mut self, power_w: f32, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_update_ms) < self.interval_ms {
            return false;
        }
        let power = f64::from(power_w).max(0.0);
        self.total_wh += power * self.interval_hours();
        self.last_update_ms = now_ms;
        true
    }

    pub fn total_wh(&self) -> f64 {
        self.total_wh
    }

    pub fn last_update_ms(&self) -> u64 {
        self.last_update_ms
    }

    fn interval_hours(&self) -> f64 {
        self.interval_ms as f64 / MS_PER_HOUR
    }
}
