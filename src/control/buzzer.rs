//! Buzzer drive policy.
//!
//! Two behaviours exist on deployed boards and both are kept:
//!
//! - [`BuzzerPolicy::Mirror`]: the buzzer follows the latest verdict.
//!   Alert drives it on, anything else drives it off.
//! - [`BuzzerPolicy::Pulse`]: an alert sounds the buzzer for a fixed time
//!   and then forces it off.  Non-alert verdicts leave it alone.
//!
//! The pulse is a deadline checked on every tick, not a blocking delay.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuzzerPolicy {
    Mirror,
    Pulse { duration_ms: u32 },
}

#[derive(Debug)]
pub struct BuzzerController {
    policy: BuzzerPolicy,
    pulse_deadline_ms: Option<u64>,
}

impl BuzzerController {
    pub fn new(policy: BuzzerPolicy) -> Self {
        Self {
            policy,
            pulse_deadline_ms: None,
        }
    }

    pub fn policy(&self) -> BuzzerPolicy {
        self.policy
    }

    pub fn is_pulsing(&self) -> bool {
        self.pulse_deadline_ms.is_some()
    }

    /// Output level to apply for a verdict, or `None` to leave it.
    pub fn on_decision(&mut self, alert: bool, now_ms: u64) -> Option<bool> {
        match self.policy {
            BuzzerPolicy::Mirror => Some(alert),
            BuzzerPolicy::Pulse { duration_ms } => {
                if !alert || self.is_pulsing() {
                    return None;
                }
                self.pulse_deadline_ms = Some(now_ms.saturating_add(u64::from(duration_ms)));
                Some(true)
            }
        }
    }

    /// Returns `Some(false)` once, when a running pulse reaches its deadline.
    pub fn on_tick(&mut self, now_ms: u64) -> Option<bool> {
        match self.pulse_deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.pulse_deadline_ms = None;
                Some(false)
            }
            _ => None,
        }
    }
}
