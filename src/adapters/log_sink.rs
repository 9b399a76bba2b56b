//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the ESP-IDF
//! logger (UART in production).  One line per event, pipe-separated, with
//! a fixed tag first so the serial console stays greppable.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(kind) => info!("START | {:?}", kind),
            AppEvent::RelaySwitched { relay, state } => {
                info!("RELAY | relay {} turned {}", relay.number(), state.as_str());
            }
            AppEvent::RequestRejected(e) => warn!("RELAY | rejected: {}", e),
            AppEvent::PowerSampled { power_w, energy_wh } => {
                info!("POWER | {:.2} W | {:.2} Wh", power_w, energy_wh);
            }
            AppEvent::EnergyAccumulated { total_wh } => info!("ENERGY | total={:.2} Wh", total_wh),
            AppEvent::PresenceSampled(p) => info!("OBJECT | {:?}", p),
            AppEvent::DecisionReceived(d) => info!("FETCH | verdict={}", d.as_str()),
            AppEvent::UnknownDecision => warn!("FETCH | unrecognised verdict, no alert"),
            AppEvent::FetchFailed(e) => warn!("FETCH | failed: {}", e),
            AppEvent::BuzzerChanged { on } => info!("BUZZER | {}", if *on { "ON" } else { "OFF" }),
            AppEvent::LinkDown => warn!("LINK | WiFi disconnected"),
            AppEvent::DisplayFailed(e) => warn!("LCD | {}", e),
        }
    }
}
