//! Default GPIO / peripheral assignments for the ESP32 DevKit boards.
//!
//! These are the wiring defaults that [`NodeConfig::default()`](crate::config::NodeConfig)
//! copies into the runtime configuration.  Drivers never read this module
//! directly; they receive pin numbers through the config.

// ---------------------------------------------------------------------------
// Relay station: relay board (active LOW inputs)
// ---------------------------------------------------------------------------

/// Relay channel 1 input.  LOW energises the coil.
pub const RELAY1_GPIO: i32 = 18;
/// Relay channel 2 input.  LOW energises the coil.
pub const RELAY2_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Relay station: sensors
// ---------------------------------------------------------------------------

/// ACS712-20A analog output.  GPIO34 is input-only, ADC1 channel 6.
pub const CURRENT_ADC_GPIO: i32 = 34;
pub const CURRENT_ADC_CHANNEL: u32 = 6;

/// IR obstacle sensor digital output.  Pulled LOW while an object is present.
pub const PRESENCE_GPIO: i32 = 14;

// ---------------------------------------------------------------------------
// Relay station: I²C LCD1602 (PCF8574 backpack)
// ---------------------------------------------------------------------------

pub const LCD_SDA_GPIO: i32 = 22;
pub const LCD_SCL_GPIO: i32 = 23;
/// PCF8574 with A0–A2 jumpers open.
pub const LCD_I2C_ADDR: u8 = 0x27;
pub const LCD_I2C_BAUD_HZ: u32 = 100_000;

// ---------------------------------------------------------------------------
// Drowsiness alarm: piezo buzzer (active HIGH)
// ---------------------------------------------------------------------------

/// Buzzer on the status-mirroring board.
pub const BUZZER_GPIO: i32 = 13;
/// Buzzer on the pulse board.
pub const PULSE_BUZZER_GPIO: i32 = 14;
