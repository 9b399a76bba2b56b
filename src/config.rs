//! Node configuration.
//!
//! All tunable parameters for both node kinds.  Defaults match the
//! deployed boards; WiFi credentials and the alarm endpoint come from the
//! build environment, and a JSON document supplied at build time may
//! override any field.
//!
//! | Build variable              | Effect                                  |
//! |-----------------------------|-----------------------------------------|
//! | `FIELDNODE_WIFI_SSID`       | default `wifi.ssid`                     |
//! | `FIELDNODE_WIFI_PASSWORD`   | default `wifi.password`                 |
//! | `FIELDNODE_ALARM_ENDPOINT`  | default `alarm.endpoint`                |
//! | `FIELDNODE_CONFIG_JSON`     | partial [`NodeConfig`] overriding above |

use serde::{Deserialize, Serialize};

use crate::control::buzzer::BuzzerPolicy;
use crate::control::energy;
use crate::drivers::hw_init::{ADC1_CHANNELS, MAX_GPIO};
use crate::drivers::polarity::Polarity;
use crate::drivers::watchdog;
use crate::error::ConfigError;
use crate::pins;
use crate::sensors::current::Calibration;

/// GPIO34–39 on the ESP32 are input-only.
const FIRST_INPUT_ONLY_GPIO: i32 = 34;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub wifi: WifiConfig,
    pub station: StationConfig,
    pub alarm: AlarmConfig,
    /// Task watchdog timeout for the main loop.
    pub watchdog_timeout_ms: u32,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            wifi: WifiConfig::default(),
            station: StationConfig::default(),
            alarm: AlarmConfig::default(),
            watchdog_timeout_ms: watchdog::DEFAULT_TIMEOUT_MS,
        }
    }
}

// ---------------------------------------------------------------------------
// WiFi
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WifiConfig {
    pub ssid: heapless::String<32>,
    pub password: heapless::String<64>,
    /// Give up on one association attempt after this long.
    pub connect_timeout_ms: u32,
}

impl Default for WifiConfig {
    fn default() -> Self {
        Self {
            ssid: env_string(option_env!("FIELDNODE_WIFI_SSID")),
            password: env_string(option_env!("FIELDNODE_WIFI_PASSWORD")),
            connect_timeout_ms: 15_000,
        }
    }
}

// ---------------------------------------------------------------------------
// Relay station
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    // --- Relays ---
    pub relay1_gpio: i32,
    pub relay2_gpio: i32,
    /// Relay board inputs energise the coil on LOW.
    pub relay_polarity: Polarity,

    // --- Current sensor ---
    pub current_adc_gpio: i32,
    pub current_adc_channel: u32,
    pub current: Calibration,
    /// Minimum spacing between energy accumulations.
    pub energy_interval_ms: u64,

    // --- Presence sensor ---
    pub presence_gpio: i32,
    pub presence_polarity: Polarity,

    // --- LCD ---
    pub lcd_sda_gpio: i32,
    pub lcd_scl_gpio: i32,
    pub lcd_i2c_addr: u8,
    pub lcd_i2c_baud_hz: u32,

    // --- Web UI ---
    pub http_port: u16,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            relay1_gpio: pins::RELAY1_GPIO,
            relay2_gpio: pins::RELAY2_GPIO,
            relay_polarity: Polarity::ActiveLow,

            current_adc_gpio: pins::CURRENT_ADC_GPIO,
            current_adc_channel: pins::CURRENT_ADC_CHANNEL,
            current: Calibration::default(),
            energy_interval_ms: energy::DEFAULT_INTERVAL_MS,

            presence_gpio: pins::PRESENCE_GPIO,
            presence_polarity: Polarity::ActiveLow,

            lcd_sda_gpio: pins::LCD_SDA_GPIO,
            lcd_scl_gpio: pins::LCD_SCL_GPIO,
            lcd_i2c_addr: pins::LCD_I2C_ADDR,
            lcd_i2c_baud_hz: pins::LCD_I2C_BAUD_HZ,

            http_port: 80,
        }
    }
}

impl StationConfig {
    /// Range-check before any pin is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (pin, name) in [(self.relay1_gpio, "relay1_gpio"), (self.relay2_gpio, "relay2_gpio")] {
            check_output_pin(pin, name)?;
        }
        check_pin(self.current_adc_gpio, "current_adc_gpio")?;
        check_pin(self.presence_gpio, "presence_gpio")?;
        check_output_pin(self.lcd_sda_gpio, "lcd_sda_gpio")?;
        check_output_pin(self.lcd_scl_gpio, "lcd_scl_gpio")?;

        let used = [
            self.relay1_gpio,
            self.relay2_gpio,
            self.current_adc_gpio,
            self.presence_gpio,
            self.lcd_sda_gpio,
            self.lcd_scl_gpio,
        ];
        for (i, pin) in used.iter().enumerate() {
            if used[i + 1..].contains(pin) {
                return Err(ConfigError::ValidationFailed("station pins must be distinct"));
            }
        }

        if self.current_adc_channel as usize >= ADC1_CHANNELS {
            return Err(ConfigError::ValidationFailed("current_adc_channel must be 0-7"));
        }
        if !positive(self.current.vref_v) {
            return Err(ConfigError::ValidationFailed("current.vref_v must be > 0"));
        }
        if self.current.adc_max == 0 {
            return Err(ConfigError::ValidationFailed("current.adc_max must be > 0"));
        }
        if !positive(self.current.sensitivity_v_per_a) {
            return Err(ConfigError::ValidationFailed("current.sensitivity_v_per_a must be > 0"));
        }
        if !positive(self.current.line_voltage_v) {
            return Err(ConfigError::ValidationFailed("current.line_voltage_v must be > 0"));
        }
        if self.energy_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("energy_interval_ms must be > 0"));
        }
        if !(0x08..=0x77).contains(&self.lcd_i2c_addr) {
            return Err(ConfigError::ValidationFailed("lcd_i2c_addr must be a 7-bit address"));
        }
        if self.lcd_i2c_baud_hz == 0 || self.lcd_i2c_baud_hz > 400_000 {
            return Err(ConfigError::ValidationFailed("lcd_i2c_baud_hz must be 1-400000"));
        }
        if self.http_port == 0 {
            return Err(ConfigError::ValidationFailed("http_port must be > 0"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Drowsiness alarm
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlarmConfig {
    pub buzzer_gpio: i32,
    pub buzzer_polarity: Polarity,
    /// Full URL of the verdict endpoint.
    pub endpoint: heapless::String<128>,
    pub poll_interval_ms: u64,
    pub policy: BuzzerPolicy,
    /// Main loop sleep between ticks.
    pub tick_ms: u32,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self::mirror()
    }
}

impl AlarmConfig {
    /// Status-mirroring board: buzzer follows the verdict, polled every 2 s.
    pub fn mirror() -> Self {
        Self {
            buzzer_gpio: pins::BUZZER_GPIO,
            buzzer_polarity: Polarity::ActiveHigh,
            endpoint: env_string(option_env!("FIELDNODE_ALARM_ENDPOINT")),
            poll_interval_ms: 2000,
            policy: BuzzerPolicy::Mirror,
            tick_ms: 50,
        }
    }

    /// Trigger board: 2 s pulse per alert, polled every 500 ms.
    pub fn pulse() -> Self {
        Self {
            buzzer_gpio: pins::PULSE_BUZZER_GPIO,
            poll_interval_ms: 500,
            policy: BuzzerPolicy::Pulse { duration_ms: 2000 },
            ..Self::mirror()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_output_pin(self.buzzer_gpio, "buzzer_gpio")?;
        if self.endpoint.is_empty() {
            return Err(ConfigError::ValidationFailed("alarm.endpoint must be set"));
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ConfigError::ValidationFailed("alarm.endpoint must be an http(s) URL"));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("poll_interval_ms must be > 0"));
        }
        if let BuzzerPolicy::Pulse { duration_ms: 0 } = self.policy {
            return Err(ConfigError::ValidationFailed("pulse duration_ms must be > 0"));
        }
        if self.tick_ms == 0 || u64::from(self.tick_ms) > self.poll_interval_ms {
            return Err(ConfigError::ValidationFailed("tick_ms must be 1..=poll_interval_ms"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl NodeConfig {
    /// Defaults, overridden by `FIELDNODE_CONFIG_JSON` when it was set at
    /// build time.  Validation is left to the caller, which knows which
    /// node kind it is running.
    pub fn load() -> Result<Self, ConfigError> {
        match option_env!("FIELDNODE_CONFIG_JSON") {
            Some(json) if !json.trim().is_empty() => Self::from_json(json),
            _ => Ok(Self::default()),
        }
    }

    /// Parse a (possibly partial) JSON document over the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| {
            log::error!("config override rejected: {}", e);
            ConfigError::Malformed
        })
    }
}

fn env_string<const N: usize>(value: Option<&str>) -> heapless::String<N> {
    value
        .and_then(|v| heapless::String::try_from(v).ok())
        .unwrap_or_default()
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

fn check_pin(pin: i32, name: &'static str) -> Result<(), ConfigError> {
    if (0..=MAX_GPIO).contains(&pin) {
        Ok(())
    } else {
        Err(ConfigError::ValidationFailed(name))
    }
}

fn check_output_pin(pin: i32, name: &'static str) -> Result<(), ConfigError> {
    check_pin(pin, name)?;
    if pin >= FIRST_INPUT_ONLY_GPIO {
        return Err(ConfigError::ValidationFailed(name));
    }
    Ok(())
}
