//! Unified error types for the FieldNode firmware.
//!
//! Every subsystem error is a small `Copy` enum that converts into the
//! top-level [`Error`].  None of these are fatal once the node is running:
//! the control loop logs them and carries on with the next cycle.

use core::fmt;

pub use crate::adapters::wifi::ConnectivityError;
pub use crate::drivers::hw_init::HwInitError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The remote decision could not be fetched.
    Fetch(FetchError),
    /// An inbound HTTP request carried invalid arguments.
    Request(RequestError),
    /// The status display rejected a write.
    Display(DisplayError),
    /// Peripheral initialisation failed.
    Init(HwInitError),
    /// Configuration is invalid.
    Config(ConfigError),
    /// WiFi credentials or driver rejected.
    Connectivity(ConnectivityError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(e) => write!(f, "fetch: {e}"),
            Self::Request(e) => write!(f, "request: {e}"),
            Self::Display(e) => write!(f, "display: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Connectivity(e) => write!(f, "wifi: {e}"),
        }
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Remote fetch errors
// ---------------------------------------------------------------------------

/// Connection-level failure talking to the remote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// Connection could not be opened (DNS, refused, timeout).
    Connect,
    /// Request could not be written or submitted.
    Request,
    /// Response body could not be read.
    Read,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect => write!(f, "connection failed"),
            Self::Request => write!(f, "request failed"),
            Self::Read => write!(f, "response read failed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchError {
    Transport(TransportError),
    /// The endpoint answered with something other than 200.
    Status(u16),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Status(code) => write!(f, "HTTP status {code}"),
        }
    }
}

impl From<TransportError> for FetchError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

impl From<FetchError> for Error {
    fn from(e: FetchError) -> Self {
        Self::Fetch(e)
    }
}

// ---------------------------------------------------------------------------
// Request validation errors
// ---------------------------------------------------------------------------

/// A relay request named something the station does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestError {
    /// `relay` argument missing or not one of `relay1` / `relay2`.
    UnknownRelay,
    /// `state` argument missing or not `ON` / `OFF` for a known relay.
    InvalidState(crate::app::state::RelayId),
}

impl RequestError {
    /// Literal body sent back with the 400 response.
    pub fn message(self) -> &'static str {
        use crate::app::state::RelayId;
        match self {
            Self::UnknownRelay => "Invalid relay",
            Self::InvalidState(RelayId::Relay1) => "Invalid request for relay 1",
            Self::InvalidState(RelayId::Relay2) => "Invalid request for relay 2",
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl From<RequestError> for Error {
    fn from(e: RequestError) -> Self {
        Self::Request(e)
    }
}

// ---------------------------------------------------------------------------
// Display errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// I²C write to the LCD backpack failed.
    Bus,
    /// Display was never initialised.
    NotReady,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => write!(f, "I2C bus error"),
            Self::NotReady => write!(f, "display not initialised"),
        }
    }
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Self::Display(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// A config field failed range validation.  The `&'static str` names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ValidationFailed(&'static str),
    /// The JSON override could not be parsed.
    Malformed,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(field) => write!(f, "validation failed: {field}"),
            Self::Malformed => write!(f, "malformed JSON override"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ConnectivityError> for Error {
    fn from(e: ConnectivityError) -> Self {
        Self::Connectivity(e)
    }
}

impl core::error::Error for Error {}
impl core::error::Error for ConfigError {}
impl core::error::Error for FetchError {}
impl core::error::Error for TransportError {}
impl core::error::Error for RequestError {}
impl core::error::Error for DisplayError {}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
