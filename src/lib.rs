//! FieldNode firmware library.
//!
//! Shared core of the relay-station and drowsiness-alarm nodes.  Exposes
//! the pure-logic modules for integration testing; all ESP-IDF-specific
//! code is guarded by `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod http;
pub mod pins;
pub mod sensors;
