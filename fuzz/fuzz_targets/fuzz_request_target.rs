//! Fuzz target: request-target parsing on the relay station.
//!
//! Drives arbitrary URIs through `Route::parse` and the relay command
//! validator, asserting that only well-formed relay requests are ever
//! accepted.
//!
//! cargo fuzz run fuzz_request_target

#![no_main]

use fieldnode::app::commands::RelayCommand;
use fieldnode::http::Route;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(uri) = core::str::from_utf8(data) else {
        return;
    };

    if let Route::Relay { relay, state } = Route::parse(uri) {
        if let Ok(cmd) = RelayCommand::parse(relay, state) {
            assert!(matches!(relay, Some("relay1" | "relay2")));
            assert!(matches!(state, Some("ON" | "OFF")));
            assert_eq!(cmd.state.is_on(), state == Some("ON"));
        }
    }
});
