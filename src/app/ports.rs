//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ StationService / AlarmService (domain)
//! ```
//!
//! Driven adapters (sensors, outputs, display, HTTP client, event sinks)
//! implement these traits.  The services consume them via generics, so
//! the domain core never touches hardware or sockets directly.

use crate::error::{DisplayError, TransportError};
use crate::sensors::{InputChannel, SensorSample};

use super::state::Actuator;
use super::status::DisplayText;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port.  There is no error path: an unplugged sensor reads as
/// whatever the floating input settles to.
pub trait SensorPort {
    fn sample(&mut self, channel: InputChannel, now_ms: u64) -> SensorSample;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port.  Implementations translate the logical state through
/// the line's polarity and apply it synchronously.
pub trait ActuatorPort {
    fn set_actuator(&mut self, actuator: Actuator, on: bool);

    /// Drive every fitted output off.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Display port
// ───────────────────────────────────────────────────────────────

pub trait DisplayPort {
    /// Replace the whole display content.
    fn show(&mut self, text: &DisplayText) -> Result<(), DisplayError>;
}

// ───────────────────────────────────────────────────────────────
// HTTP client port
// ───────────────────────────────────────────────────────────────

/// Longest response body the alarm accepts.  Verdicts are a few bytes;
/// a longer body is never decoded.
pub const HTTP_BODY_MAX: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    body: heapless::Vec<u8, HTTP_BODY_MAX>,
    overflowed: bool,
}

impl HttpReply {
    /// Keep the first [`HTTP_BODY_MAX`] bytes of `body`.  Pass one byte more
    /// than that to mark the body as too long.
    pub fn new(status: u16, body: &[u8]) -> Self {
        let kept = &body[..body.len().min(HTTP_BODY_MAX)];
        Self {
            status,
            body: heapless::Vec::from_slice(kept).unwrap_or_default(),
            overflowed: body.len() > HTTP_BODY_MAX,
        }
    }

    /// The whole body as text.  `None` when it was longer than
    /// [`HTTP_BODY_MAX`] or is not valid UTF-8; no prefix is salvaged.
    pub fn text(&self) -> Option<&str> {
        if self.overflowed {
            return None;
        }
        core::str::from_utf8(&self.body).ok()
    }

    /// Bytes kept, for logging.
    pub fn body_bytes(&self) -> &[u8] {
        &self.body
    }

    pub fn overflowed(&self) -> bool {
        self.overflowed
    }
}

/// Blocking GET over a fresh connection per call.
pub trait HttpClientPort {
    fn get(&mut self, url: &str) -> Result<HttpReply, TransportError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
