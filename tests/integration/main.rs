//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises one node's control loop
//! against mock adapters.  All tests run on the host (x86_64) with no
//! real hardware required.

mod alarm_tests;
mod mock_hw;
mod station_tests;
