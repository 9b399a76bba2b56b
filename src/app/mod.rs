//! Application core: pure domain logic, zero I/O.
//!
//! Two services share one shape: sample inputs, derive a decision, drive
//! outputs, report state.  [`station::StationService`] serves the relay
//! board's web UI; [`alarm::AlarmService`] polls the remote detector.
//! All interaction with hardware happens through the port traits in
//! [`ports`].

pub mod alarm;
pub mod commands;
pub mod events;
pub mod ports;
pub mod state;
pub mod station;
pub mod status;
