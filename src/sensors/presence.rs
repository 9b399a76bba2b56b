//! IR obstacle (presence) sensor.

use crate::drivers::polarity::Polarity;
use crate::sensors::SensorSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Detected,
    Clear,
}

impl Presence {
    /// `None` unless the sample is a digital level.
    pub fn from_sample(sample: &SensorSample, polarity: Polarity) -> Option<Self> {
        let level = sample.level()?;
        Some(if polarity.is_active(level) { Self::Detected } else { Self::Clear })
    }

    pub fn is_detected(self) -> bool {
        self == Self::Detected
    }
}
