//! Control logic: energy accounting, remote verdict decoding, buzzer policy.
//!
//! Everything here is pure: no I/O, no clocks.  Callers pass the current
//! uptime in and apply the returned output levels themselves.

pub mod buzzer;
pub mod decision;
pub mod energy;
