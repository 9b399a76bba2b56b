//! Hardware adapters: bridge real peripherals to the domain port traits.
//!
//! [`StationHardware`] owns the relay outputs, the current and presence
//! inputs and the LCD.  [`AlarmHardware`] owns the buzzer.  These are the
//! only types in the system that touch pins; on non-espidf targets the
//! underlying `hw_init` calls use the simulated pin state.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{info, warn};

use crate::app::ports::{ActuatorPort, DisplayPort, SensorPort};
use crate::app::state::Actuator;
use crate::app::status::DisplayText;
use crate::config::{AlarmConfig, StationConfig};
use crate::drivers::hw_init;
use crate::drivers::lcd::Lcd1602;
use crate::drivers::output::{OutputBank, SwitchedOutput};
use crate::error::DisplayError;
use crate::sensors::{InputChannel, SensorSample};

// ───────────────────────────────────────────────────────────────
// Relay station
// ───────────────────────────────────────────────────────────────

pub struct StationHardware<I2C, D> {
    outputs: OutputBank,
    current_adc_gpio: i32,
    current_adc_channel: u32,
    presence_gpio: i32,
    lcd: Lcd1602<I2C, D>,
    lcd_ready: bool,
}

impl<I2C: I2c, D: DelayNs> StationHardware<I2C, D> {
    pub fn new(config: &StationConfig, lcd: Lcd1602<I2C, D>) -> Self {
        let mut outputs = OutputBank::new();
        outputs.add(Actuator::Relay1, SwitchedOutput::new(config.relay1_gpio, config.relay_polarity));
        outputs.add(Actuator::Relay2, SwitchedOutput::new(config.relay2_gpio, config.relay_polarity));
        Self {
            outputs,
            current_adc_gpio: config.current_adc_gpio,
            current_adc_channel: config.current_adc_channel,
            presence_gpio: config.presence_gpio,
            lcd,
            lcd_ready: false,
        }
    }

    /// Configure pins (relays idle off) and bring up the LCD.
    ///
    /// Pin errors are fatal.  A missing LCD is not: the station runs
    /// headless and every later `show` reports [`DisplayError::NotReady`].
    pub fn init(&mut self) -> crate::error::Result<()> {
        hw_init::init_outputs(&self.outputs.idle_levels())?;
        hw_init::init_inputs(&[self.presence_gpio, self.current_adc_gpio])?;
        hw_init::init_adc(&[self.current_adc_channel])?;

        match self.lcd.init() {
            Ok(()) => self.lcd_ready = true,
            Err(_) => warn!("LCD at 0x{:02x} not responding, running headless", self.lcd.address()),
        }
        info!("StationHardware ready (lcd={})", self.lcd_ready);
        Ok(())
    }

    pub fn lcd_ready(&self) -> bool {
        self.lcd_ready
    }

    fn write_display(&mut self, text: &DisplayText) -> Result<(), I2C::Error> {
        self.lcd.clear()?;
        for (row, line) in text.lines.iter().enumerate() {
            self.lcd.print_at(row as u8, 0, line)?;
        }
        Ok(())
    }
}

impl<I2C: I2c, D: DelayNs> SensorPort for StationHardware<I2C, D> {
    fn sample(&mut self, channel: InputChannel, now_ms: u64) -> SensorSample {
        match channel {
            InputChannel::Current => SensorSample::analog(hw_init::adc1_read(self.current_adc_channel), now_ms),
            InputChannel::Presence => SensorSample::digital(hw_init::gpio_read(self.presence_gpio), now_ms),
        }
    }
}

impl<I2C: I2c, D: DelayNs> ActuatorPort for StationHardware<I2C, D> {
    fn set_actuator(&mut self, actuator: Actuator, on: bool) {
        self.outputs.set(actuator, on);
    }

    fn all_off(&mut self) {
        self.outputs.all_off();
    }
}

impl<I2C: I2c, D: DelayNs> DisplayPort for StationHardware<I2C, D> {
    fn show(&mut self, text: &DisplayText) -> Result<(), DisplayError> {
        if !self.lcd_ready {
            return Err(DisplayError::NotReady);
        }
        self.write_display(text).map_err(|_| DisplayError::Bus)
    }
}

// ───────────────────────────────────────────────────────────────
// Drowsiness alarm
// ───────────────────────────────────────────────────────────────

pub struct AlarmHardware {
    outputs: OutputBank,
}

impl AlarmHardware {
    pub fn new(config: &AlarmConfig) -> Self {
        let mut outputs = OutputBank::new();
        outputs.add(Actuator::Buzzer, SwitchedOutput::new(config.buzzer_gpio, config.buzzer_polarity));
        Self { outputs }
    }

    /// Configure the buzzer pin, silent.
    pub fn init(&mut self) -> crate::error::Result<()> {
        hw_init::init_outputs(&self.outputs.idle_levels())?;
        Ok(())
    }

    pub fn buzzer_on(&self) -> bool {
        self.outputs.is_active(Actuator::Buzzer)
    }
}

impl ActuatorPort for AlarmHardware {
    fn set_actuator(&mut self, actuator: Actuator, on: bool) {
        self.outputs.set(actuator, on);
    }

    fn all_off(&mut self) {
        self.outputs.all_off();
    }
}
