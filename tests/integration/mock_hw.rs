//! Mock adapters for integration tests.
//!
//! Records every actuator and display call so tests can assert on the full
//! command history without touching real GPIO or I²C.

use std::collections::VecDeque;

use fieldnode::app::events::AppEvent;
use fieldnode::app::ports::{
    ActuatorPort, DisplayPort, EventSink, HttpClientPort, HttpReply, SensorPort, HTTP_BODY_MAX,
};
use fieldnode::app::state::Actuator;
use fieldnode::app::status::DisplayText;
use fieldnode::error::{DisplayError, TransportError};
use fieldnode::sensors::{InputChannel, SensorSample};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Set { actuator: Actuator, on: bool },
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
    pub screens: Vec<DisplayText>,
    /// Raw ADC code returned for the current channel.
    pub current_code: u16,
    /// Electrical level of the presence input.
    pub presence_high: bool,
    pub lcd_broken: bool,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            screens: Vec::new(),
            current_code: 2048,
            presence_high: true,
            lcd_broken: false,
        }
    }

    /// Logical state of an actuator after replaying the call history.
    pub fn is_on(&self, actuator: Actuator) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match *c {
                ActuatorCall::Set { actuator: a, on } if a == actuator => Some(on),
                ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn set_calls(&self, actuator: Actuator) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ActuatorCall::Set { actuator: a, .. } if *a == actuator))
            .count()
    }

    pub fn last_screen(&self) -> Option<(&str, &str)> {
        self.screens.last().map(|t| (t.lines[0].as_str(), t.lines[1].as_str()))
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn sample(&mut self, channel: InputChannel, now_ms: u64) -> SensorSample {
        match channel {
            InputChannel::Current => SensorSample::analog(self.current_code, now_ms),
            InputChannel::Presence => SensorSample::digital(self.presence_high, now_ms),
        }
    }
}

impl ActuatorPort for MockHardware {
    fn set_actuator(&mut self, actuator: Actuator, on: bool) {
        self.calls.push(ActuatorCall::Set { actuator, on });
    }

    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
    }
}

impl DisplayPort for MockHardware {
    fn show(&mut self, text: &DisplayText) -> Result<(), DisplayError> {
        if self.lcd_broken {
            return Err(DisplayError::Bus);
        }
        self.screens.push(text.clone());
        Ok(())
    }
}

// ── MockHttpClient ────────────────────────────────────────────

/// Replays scripted replies in order.  An exhausted script behaves like an
/// unreachable server.
#[derive(Default)]
pub struct MockHttpClient {
    pub script: VecDeque<Result<(u16, Vec<u8>), TransportError>>,
    pub requests: Vec<String>,
}

#[allow(dead_code)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, status: u16, body: &str) -> Self {
        self.reply_bytes(status, body.as_bytes())
    }

    /// Raw body, for payloads that are not valid text.
    pub fn reply_bytes(mut self, status: u16, body: &[u8]) -> Self {
        self.script.push_back(Ok((status, body.to_vec())));
        self
    }

    pub fn fail(mut self, error: TransportError) -> Self {
        self.script.push_back(Err(error));
        self
    }
}

impl HttpClientPort for MockHttpClient {
    fn get(&mut self, url: &str) -> Result<HttpReply, TransportError> {
        self.requests.push(url.to_owned());
        let (status, body) = self.script.pop_front().unwrap_or(Err(TransportError::Connect))?;
        // Same cut as the ESP adapter: at most one byte past the limit.
        let kept = body.len().min(HTTP_BODY_MAX + 1);
        Ok(HttpReply::new(status, &body[..kept]))
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, event: &AppEvent) -> bool {
        self.events.contains(event)
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
