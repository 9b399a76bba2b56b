//! Actuator and display drivers, hardware initialisation, and pin helpers.

pub mod hw_init;
pub mod lcd;
pub mod output;
pub mod polarity;
pub mod watchdog;
