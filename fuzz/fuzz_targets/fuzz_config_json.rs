//! Fuzz target: `NodeConfig::from_json` + `validate`
//!
//! The config override is compiled in, but a malformed document must be
//! rejected with an error, never a panic.  Anything that validates must
//! also survive a serialise/parse cycle unchanged.
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use fieldnode::config::NodeConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = core::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = NodeConfig::from_json(json) else {
        return;
    };

    if config.station.validate().is_ok() && config.alarm.validate().is_ok() {
        let text = serde_json::to_string(&config).expect("valid config serialises");
        let again = NodeConfig::from_json(&text).expect("serialised config parses");
        assert_eq!(again, config);
    }
});
