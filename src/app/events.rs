//! Outbound application events.
//!
//! The services emit these through the [`EventSink`](super::ports::EventSink)
//! port.  Adapters on the other side decide what to do with them; on the
//! device they become serial log lines.

use crate::control::decision::RemoteDecision;
use crate::error::{DisplayError, FetchError, RequestError};
use crate::sensors::presence::Presence;

use super::state::{RelayId, RelayState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    RelayStation,
    DrowsinessAlarm,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A service finished boot-time output initialisation.
    Started(NodeKind),

    /// A relay command was applied.
    RelaySwitched { relay: RelayId, state: RelayState },

    /// A relay request failed validation; nothing changed.
    RequestRejected(RequestError),

    /// Instantaneous power was sampled.
    PowerSampled { power_w: f32, energy_wh: f64 },

    /// An accumulation interval elapsed and energy was credited.
    EnergyAccumulated { total_wh: f64 },

    PresenceSampled(Presence),

    /// The remote endpoint answered with a known verdict.
    DecisionReceived(RemoteDecision),

    /// The remote endpoint answered 200 with an unrecognised body.
    UnknownDecision,

    /// The remote verdict could not be fetched; outputs left unchanged.
    FetchFailed(FetchError),

    BuzzerChanged { on: bool },

    /// A poll was due but the network link is down.
    LinkDown,

    /// The status display could not be refreshed.
    DisplayFailed(DisplayError),
}
