//! Inbound commands to the application services.
//!
//! Commands arrive as loosely typed request arguments (query-string values
//! from the web UI) and are validated here, at the boundary, before any
//! service state is touched.

use crate::error::RequestError;

use super::state::{RelayId, RelayState};

/// Switch one relay to an explicit target state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayCommand {
    pub relay: RelayId,
    pub state: RelayState,
}

impl RelayCommand {
    /// Validate `relay` / `state` arguments.
    ///
    /// The relay is checked first so a bad state on a known relay names
    /// that relay in the error.
    pub fn parse(relay: Option<&str>, state: Option<&str>) -> Result<Self, RequestError> {
        let relay = relay
            .and_then(RelayId::parse)
            .ok_or(RequestError::UnknownRelay)?;
        let state = state
            .and_then(RelayState::parse)
            .ok_or(RequestError::InvalidState(relay))?;
        Ok(Self { relay, state })
    }
}
