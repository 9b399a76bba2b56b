//! Switched digital outputs (relays, buzzer).
//!
//! A [`SwitchedOutput`] is a dumb actuator: it translates a logical state
//! through its [`Polarity`] and writes the level.  No debouncing and no
//! interlocks; the last write wins.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real GPIO via hw_init helpers.
//! On host/test: hw_init records the level in its simulated bitmask.

use log::warn;

use crate::app::state::Actuator;
use crate::drivers::hw_init;
use crate::drivers::polarity::Polarity;

pub struct SwitchedOutput {
    gpio: i32,
    polarity: Polarity,
    active: bool,
}

impl SwitchedOutput {
    /// Wraps an already-configured output pin.  Logical state starts off;
    /// call [`set`](Self::set) to drive the line.
    pub fn new(gpio: i32, polarity: Polarity) -> Self {
        Self {
            gpio,
            polarity,
            active: false,
        }
    }

    pub fn set(&mut self, active: bool) {
        hw_init::gpio_write(self.gpio, self.polarity.level(active));
        self.active = active;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// `(pin, level)` pair for `hw_init::init_outputs` with the line off.
    pub fn idle_level(&self) -> (i32, bool) {
        (self.gpio, self.polarity.level(false))
    }
}

const MAX_OUTPUTS: usize = 4;

/// Named outputs owned by one hardware adapter.
pub struct OutputBank {
    outputs: heapless::Vec<(Actuator, SwitchedOutput), MAX_OUTPUTS>,
}

impl OutputBank {
    pub fn new() -> Self {
        Self {
            outputs: heapless::Vec::new(),
        }
    }

    /// Register an output.  Returns `false` if the bank is full or the
    /// actuator is already registered.
    pub fn add(&mut self, actuator: Actuator, output: SwitchedOutput) -> bool {
        if self.outputs.iter().any(|(a, _)| *a == actuator) {
            return false;
        }
        self.outputs.push((actuator, output)).is_ok()
    }

    pub fn set(&mut self, actuator: Actuator, active: bool) {
        match self.outputs.iter_mut().find(|(a, _)| *a == actuator) {
            Some((_, out)) => out.set(active),
            None => warn!("output {:?} not fitted on this node", actuator),
        }
    }

    pub fn is_active(&self, actuator: Actuator) -> bool {
        self.outputs
            .iter()
            .find(|(a, _)| *a == actuator)
            .is_some_and(|(_, out)| out.is_active())
    }

    /// Drive every output off.
    pub fn all_off(&mut self) {
        for (_, out) in &mut self.outputs {
            out.set(false);
        }
    }

    /// Idle levels of every output, for boot-time pin configuration.
    pub fn idle_levels(&self) -> heapless::Vec<(i32, bool), MAX_OUTPUTS> {
        self.outputs.iter().map(|(_, out)| out.idle_level()).collect()
    }
}

impl Default for OutputBank {
    fn default() -> Self {
        Self::new()
    }
}
