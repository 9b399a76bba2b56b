//! Relay station service.
//!
//! [`StationService`] owns the relay state and the energy accumulator.
//! Every entry point corresponds to one web request; the dispatcher calls
//! them one at a time.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │     StationService      │
//! ActuatorPort ◀──│ relays · energy · LCD   │──▶ DisplayPort
//!                 └────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::StationConfig;
use crate::control::energy::EnergyAccumulator;
use crate::drivers::polarity::Polarity;
use crate::error::RequestError;
use crate::sensors::current::CurrentSensor;
use crate::sensors::presence::Presence;
use crate::sensors::InputChannel;

use super::commands::RelayCommand;
use super::events::{AppEvent, NodeKind};
use super::ports::{ActuatorPort, DisplayPort, EventSink, SensorPort};
use super::state::ActuatorState;
use super::status::{self, DisplayText};

/// Result of one power sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerStatus {
    pub power_w: f32,
    pub energy_wh: f64,
}

pub struct StationService {
    current: CurrentSensor,
    presence_polarity: Polarity,
    energy: EnergyAccumulator,
    outputs: ActuatorState,
}

impl StationService {
    /// The energy interval timer starts at `now_ms`.
    pub fn new(config: &StationConfig, now_ms: u64) -> Self {
        Self {
            current: CurrentSensor::new(config.current),
            presence_polarity: config.presence_polarity,
            energy: EnergyAccumulator::new(config.energy_interval_ms, now_ms),
            outputs: ActuatorState::default(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Relays off and the boot banner on the LCD.
    pub fn start(&mut self, hw: &mut (impl ActuatorPort + DisplayPort), sink: &mut impl EventSink) {
        hw.all_off();
        self.outputs = ActuatorState::default();
        if let Err(e) = hw.show(&DisplayText::banner()) {
            sink.emit(&AppEvent::DisplayFailed(e));
        }
        sink.emit(&AppEvent::Started(NodeKind::RelayStation));
        info!("StationService started, relays off");
    }

    // ── Requests ──────────────────────────────────────────────

    /// Validate and apply a relay request.  The LCD is refreshed whether or
    /// not the request was valid.
    pub fn handle_relay_request(
        &mut self,
        relay: Option<&str>,
        state: Option<&str>,
        hw: &mut (impl ActuatorPort + DisplayPort),
        sink: &mut impl EventSink,
    ) -> Result<RelayCommand, RequestError> {
        let result = RelayCommand::parse(relay, state);
        match result {
            Ok(cmd) => self.apply_relay(cmd, hw, sink),
            Err(e) => {
                warn!("relay request rejected: {}", e);
                sink.emit(&AppEvent::RequestRejected(e));
            }
        }
        self.refresh_display(hw, sink);
        result
    }

    /// Sample the current sensor, credit energy if an interval elapsed, and
    /// refresh the LCD.
    pub fn sample_power(
        &mut self,
        now_ms: u64,
        hw: &mut (impl SensorPort + DisplayPort),
        sink: &mut impl EventSink,
    ) -> PowerStatus {
        let sample = hw.sample(InputChannel::Current, now_ms);
        let power_w = match sample.code() {
            Some(code) => self.current.power_w(code),
            None => {
                warn!("current channel returned {:?}, counting 0 W", sample.reading);
                0.0
            }
        };
        if self.energy.accumulate(power_w, sample.taken_at_ms) {
            sink.emit(&AppEvent::EnergyAccumulated { total_wh: self.energy.total_wh() });
        }
        let status = PowerStatus { power_w, energy_wh: self.energy.total_wh() };
        sink.emit(&AppEvent::PowerSampled { power_w, energy_wh: status.energy_wh });
        self.refresh_display(hw, sink);
        status
    }

    pub fn sample_presence(
        &mut self,
        now_ms: u64,
        hw: &mut impl SensorPort,
        sink: &mut impl EventSink,
    ) -> Presence {
        let sample = hw.sample(InputChannel::Presence, now_ms);
        let presence = Presence::from_sample(&sample, self.presence_polarity).unwrap_or_else(|| {
            warn!("presence channel returned {:?}, reporting clear", sample.reading);
            Presence::Clear
        });
        sink.emit(&AppEvent::PresenceSampled(presence));
        presence
    }

    /// Push the relay/energy summary to the LCD.  A bus failure is reported
    /// and otherwise ignored.
    pub fn refresh_display(&self, hw: &mut impl DisplayPort, sink: &mut impl EventSink) {
        let text = status::report(&self.outputs, self.energy.total_wh());
        if let Err(e) = hw.show(&text) {
            sink.emit(&AppEvent::DisplayFailed(e));
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn actuator_state(&self) -> ActuatorState {
        self.outputs
    }

    pub fn energy(&self) -> &EnergyAccumulator {
        &self.energy
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply_relay(&mut self, cmd: RelayCommand, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        let actuator = cmd.relay.actuator();
        hw.set_actuator(actuator, cmd.state.is_on());
        self.outputs.set(actuator, cmd.state.is_on());
        sink.emit(&AppEvent::RelaySwitched { relay: cmd.relay, state: cmd.state });
    }
}
