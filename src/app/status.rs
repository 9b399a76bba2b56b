//! Status rendering for the LCD and the web UI.

use crate::drivers::lcd::{COLUMNS, ROWS};
use crate::sensors::presence::Presence;

use super::state::{ActuatorState, RelayId};

pub const BOOT_BANNER: &str = "Initializing...";

/// Full content of the 16x2 display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayText {
    pub lines: [heapless::String<COLUMNS>; ROWS],
}

impl DisplayText {
    /// Build from two lines.  Text past the last column is cut off.
    pub fn new(top: &str, bottom: &str) -> Self {
        Self { lines: [fit(top), fit(bottom)] }
    }

    pub fn banner() -> Self {
        Self::new(BOOT_BANNER, "")
    }
}

fn fit(text: &str) -> heapless::String<COLUMNS> {
    let mut line = heapless::String::new();
    for ch in text.chars() {
        if line.push(ch).is_err() {
            break;
        }
    }
    line
}

/// `R1: ON  R2: OFF` / `Energy: 12.3 Wh`
pub fn report(state: &ActuatorState, energy_wh: f64) -> DisplayText {
    let top = format!(
        "R1: {:<3} R2: {}",
        state.relay(RelayId::Relay1).as_str(),
        state.relay(RelayId::Relay2).as_str()
    );
    let bottom = format!("Energy: {:.1} Wh", energy_wh);
    DisplayText::new(&top, &bottom)
}

/// Body of `GET /power`.
pub fn power_text(power_w: f32, energy_wh: f64) -> String {
    format!("Power: {:.2} W<br>Energy: {:.2} Wh", power_w, energy_wh)
}

/// Body of `GET /object`.
pub fn presence_text(presence: Presence) -> &'static str {
    match presence {
        Presence::Detected => "Object detected",
        Presence::Clear => "No object detected",
    }
}

/// Body of a successful `GET /relay`.
pub fn relay_text(relay: RelayId, on: bool) -> String {
    format!("Relay {} turned {}", relay.number(), if on { "ON" } else { "OFF" })
}
