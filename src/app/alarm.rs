//! Drowsiness alarm service.
//!
//! Polls the remote detector on a fixed interval and drives the buzzer
//! according to the configured [`BuzzerPolicy`].  The caller supplies the
//! uptime and the link state on every tick; the service never sleeps.
//!
//! Per tick:
//! 1. A running pulse that reached its deadline is ended (buzzer off) and
//!    the poll timer restarts, so the next poll is a full interval away.
//! 2. While a pulse runs, nothing else happens.
//! 3. If a poll is due: skip it when the link is down, otherwise fetch,
//!    decode and apply.  Fetch failures leave the buzzer as it was.

use log::{info, warn};

use crate::config::AlarmConfig;
use crate::control::buzzer::{BuzzerController, BuzzerPolicy};
use crate::control::decision::RemoteDecision;
use crate::error::FetchError;

use super::events::{AppEvent, NodeKind};
use super::ports::{ActuatorPort, EventSink, HttpClientPort};
use super::state::Actuator;

/// One blocking GET of the verdict endpoint.
///
/// `Ok(None)` means the endpoint answered 200 with a body that is not a
/// known verdict.  Callers treat it as "no alert".
pub fn fetch_decision(
    client: &mut impl HttpClientPort,
    endpoint: &str,
) -> Result<Option<RemoteDecision>, FetchError> {
    let reply = client.get(endpoint)?;
    if reply.status != 200 {
        return Err(FetchError::Status(reply.status));
    }
    let Some(text) = reply.text() else {
        warn!(
            "undecodable verdict body ({} bytes{})",
            reply.body_bytes().len(),
            if reply.overflowed() { ", truncated" } else { "" }
        );
        return Ok(None);
    };
    match RemoteDecision::decode(text) {
        Ok(decision) => Ok(Some(decision)),
        Err(e) => {
            warn!("{}: {:?}", e, text);
            Ok(None)
        }
    }
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No poll due.
    Idle,
    /// A pulse is sounding; polls suspended.
    Pulsing,
    /// A pulse just ended.
    PulseEnded,
    /// A poll was due but the link is down.
    LinkDown,
    /// The endpoint answered; `None` for an unrecognised body.
    Polled(Option<RemoteDecision>),
    FetchFailed(FetchError),
}

pub struct AlarmService {
    endpoint: heapless::String<128>,
    poll_interval_ms: u64,
    buzzer: BuzzerController,
    buzzer_on: bool,
    last_poll_ms: Option<u64>,
    last_decision: Option<RemoteDecision>,
}

impl AlarmService {
    pub fn new(config: &AlarmConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            poll_interval_ms: config.poll_interval_ms,
            buzzer: BuzzerController::new(config.policy),
            buzzer_on: false,
            last_poll_ms: None,
            last_decision: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.all_off();
        self.buzzer_on = false;
        sink.emit(&AppEvent::Started(NodeKind::DrowsinessAlarm));
        info!(
            "AlarmService started ({:?}, every {} ms) -> {}",
            self.buzzer.policy(),
            self.poll_interval_ms,
            self.endpoint
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    pub fn tick(
        &mut self,
        now_ms: u64,
        link_up: bool,
        client: &mut impl HttpClientPort,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> TickOutcome {
        if let Some(level) = self.buzzer.on_tick(now_ms) {
            self.drive(level, hw, sink);
            self.last_poll_ms = Some(now_ms);
            return TickOutcome::PulseEnded;
        }
        if self.buzzer.is_pulsing() {
            return TickOutcome::Pulsing;
        }
        if !self.poll_due(now_ms) {
            return TickOutcome::Idle;
        }
        self.last_poll_ms = Some(now_ms);

        if !link_up {
            warn!("WiFi disconnected, skipping poll");
            sink.emit(&AppEvent::LinkDown);
            return TickOutcome::LinkDown;
        }

        match fetch_decision(client, &self.endpoint) {
            Ok(decision) => {
                self.last_decision = decision;
                let alert = match decision {
                    Some(d) => {
                        sink.emit(&AppEvent::DecisionReceived(d));
                        d.is_alert()
                    }
                    None => {
                        sink.emit(&AppEvent::UnknownDecision);
                        false
                    }
                };
                if let Some(level) = self.buzzer.on_decision(alert, now_ms) {
                    self.drive(level, hw, sink);
                }
                TickOutcome::Polled(decision)
            }
            Err(e) => {
                sink.emit(&AppEvent::FetchFailed(e));
                TickOutcome::FetchFailed(e)
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn buzzer_on(&self) -> bool {
        self.buzzer_on
    }

    pub fn last_decision(&self) -> Option<RemoteDecision> {
        self.last_decision
    }

    pub fn policy(&self) -> BuzzerPolicy {
        self.buzzer.policy()
    }

    // ── Internal ──────────────────────────────────────────────

    fn poll_due(&self, now_ms: u64) -> bool {
        match self.last_poll_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.poll_interval_ms,
        }
    }

    fn drive(&mut self, on: bool, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.set_actuator(Actuator::Buzzer, on);
        if on != self.buzzer_on {
            self.buzzer_on = on;
            sink.emit(&AppEvent::BuzzerChanged { on });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::{HttpReply, HTTP_BODY_MAX};
    use crate::error::TransportError;

    struct Canned(Result<(u16, &'static [u8]), TransportError>);

    impl Canned {
        fn ok(status: u16, body: &'static [u8]) -> Self {
            Self(Ok((status, body)))
        }
    }

    impl HttpClientPort for Canned {
        fn get(&mut self, _url: &str) -> Result<HttpReply, TransportError> {
            let (status, body) = self.0?;
            Ok(HttpReply::new(status, body))
        }
    }

    #[test]
    fn fetch_maps_status_and_body() {
        assert_eq!(fetch_decision(&mut Canned::ok(200, b"yawn"), "u"), Ok(Some(RemoteDecision::Yawn)));
        assert_eq!(fetch_decision(&mut Canned::ok(200, b"maybe"), "u"), Ok(None));
        assert_eq!(fetch_decision(&mut Canned::ok(503, b"drowsy"), "u"), Err(FetchError::Status(503)));
        assert_eq!(
            fetch_decision(&mut Canned(Err(TransportError::Connect)), "u"),
            Err(FetchError::Transport(TransportError::Connect))
        );
    }

    #[test]
    fn invalid_utf8_after_a_verdict_is_unknown() {
        assert_eq!(fetch_decision(&mut Canned::ok(200, b"1\xFF\xFE"), "u"), Ok(None));
        assert_eq!(fetch_decision(&mut Canned::ok(200, b"drowsy\xC3"), "u"), Ok(None));
    }

    #[test]
    fn over_long_body_is_unknown() {
        const FULL: &[u8; 64] = b"drowsy                                                          ";
        const LONG: &[u8; 65] = b"drowsy                                                           ";
        assert_eq!(FULL.len(), HTTP_BODY_MAX);
        assert_eq!(fetch_decision(&mut Canned::ok(200, FULL), "u"), Ok(Some(RemoteDecision::Drowsy)));
        assert_eq!(fetch_decision(&mut Canned::ok(200, LONG), "u"), Ok(None));
    }
}
