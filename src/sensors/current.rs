//! ACS712 Hall-effect current sensor.
//!
//! The sensor idles at half the supply (Vref/2) and swings by
//! `sensitivity` volts per amp in either direction.  Power is estimated
//! from the current magnitude and a fixed nominal line voltage; there is
//! no voltage sensing and no RMS over a mains cycle.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// ADC reference voltage.
    pub vref_v: f32,
    /// Number of ADC codes (4096 for 12-bit).
    pub adc_max: u16,
    /// Volts per amp.  0.1 for the ±20 A part.
    pub sensitivity_v_per_a: f32,
    /// Nominal mains voltage used for the power estimate.
    pub line_voltage_v: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            vref_v: 3.3,
            adc_max: 4096,
            sensitivity_v_per_a: 0.1,
            line_voltage_v: 230.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerReading {
    pub raw: u16,
    pub voltage_v: f32,
    pub current_a: f32,
    pub power_w: f32,
}

pub struct CurrentSensor {
    cal: Calibration,
}

impl CurrentSensor {
    pub fn new(cal: Calibration) -> Self {
        Self { cal }
    }

    /// Convert a raw code.  Codes past `adc_max` are clamped to full scale.
    pub fn convert(&self, raw: u16) -> PowerReading {
        let code = raw.min(self.cal.adc_max.saturating_sub(1));
        let voltage_v = f32::from(code) * (self.cal.vref_v / f32::from(self.cal.adc_max));
        let current_a = (voltage_v - self.cal.vref_v / 2.0).abs() / self.cal.sensitivity_v_per_a;
        let power_w = current_a * self.cal.line_voltage_v;
        PowerReading { raw, voltage_v, current_a, power_w }
    }

    pub fn power_w(&self, raw: u16) -> f32 {
        self.convert(raw).power_w
    }
}

impl Default for CurrentSensor {
    fn default() -> Self {
        Self::new(Calibration::default())
    }
}
