//! Sensor subsystem: sample types and per-sensor conversions.
//!
//! Adapters produce a [`SensorSample`] for an [`InputChannel`]; the services
//! convert it immediately (power in watts, presence) and drop it.  Samples
//! are never retained.

pub mod current;
pub mod presence;

/// Logical inputs a node can sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputChannel {
    /// ACS712 analog output.
    Current,
    /// IR obstacle sensor digital output.
    Presence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    /// Raw ADC code.
    Analog(u16),
    /// Electrical level, `true` = HIGH.
    Digital(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorSample {
    pub reading: Reading,
    /// Uptime at which the reading was taken.
    pub taken_at_ms: u64,
}

impl SensorSample {
    pub fn analog(code: u16, taken_at_ms: u64) -> Self {
        Self { reading: Reading::Analog(code), taken_at_ms }
    }

    pub fn digital(high: bool, taken_at_ms: u64) -> Self {
        Self { reading: Reading::Digital(high), taken_at_ms }
    }

    /// Raw ADC code; `None` for a digital reading.
    pub fn code(&self) -> Option<u16> {
        match self.reading {
            Reading::Analog(code) => Some(code),
            Reading::Digital(_) => None,
        }
    }

    /// Electrical level; `None` for an analog reading.
    pub fn level(&self) -> Option<bool> {
        match self.reading {
            Reading::Digital(high) => Some(high),
            Reading::Analog(_) => None,
        }
    }
}
