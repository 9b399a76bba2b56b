//! Electrical polarity of a digital line.
//!
//! Every relay, buzzer and digital sensor declares which level means
//! "active".  Call sites work in logical on/off terms and the line's
//! polarity does the translation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    /// HIGH = active.
    ActiveHigh,
    /// LOW = active (relay boards, open-collector sensor outputs).
    ActiveLow,
}

impl Polarity {
    /// Electrical level (`true` = HIGH) that encodes the logical state.
    pub const fn level(self, active: bool) -> bool {
        match self {
            Self::ActiveHigh => active,
            Self::ActiveLow => !active,
        }
    }

    /// Logical state encoded by an electrical level.
    pub const fn is_active(self, level_high: bool) -> bool {
        match self {
            Self::ActiveHigh => level_high,
            Self::ActiveLow => !level_high,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_low_inverts() {
        assert!(!Polarity::ActiveLow.level(true));
        assert!(Polarity::ActiveLow.level(false));
        assert!(Polarity::ActiveLow.is_active(false));
    }

    #[test]
    fn level_and_is_active_agree() {
        for p in [Polarity::ActiveHigh, Polarity::ActiveLow] {
            for on in [true, false] {
                assert_eq!(p.is_active(p.level(on)), on);
            }
        }
    }
}
