//! Actuator identities and the logical on/off state the services own.

/// Every controllable output across both node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actuator {
    Relay1,
    Relay2,
    Buzzer,
}

/// The relays addressable from the web UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayId {
    Relay1,
    Relay2,
}

impl RelayId {
    /// Query-string name: `relay1` / `relay2`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "relay1" => Some(Self::Relay1),
            "relay2" => Some(Self::Relay2),
            _ => None,
        }
    }

    /// 1-based channel number as printed on the board.
    pub fn number(self) -> u8 {
        match self {
            Self::Relay1 => 1,
            Self::Relay2 => 2,
        }
    }

    pub fn actuator(self) -> Actuator {
        match self {
            Self::Relay1 => Actuator::Relay1,
            Self::Relay2 => Actuator::Relay2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    On,
    Off,
}

impl RelayState {
    /// Query-string value: exactly `ON` or `OFF`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ON" => Some(Self::On),
            "OFF" => Some(Self::Off),
            _ => None,
        }
    }

    pub fn is_on(self) -> bool {
        self == Self::On
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }
}

impl From<bool> for RelayState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

/// Logical state of every output, all off at boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActuatorState {
    pub relay1: bool,
    pub relay2: bool,
    pub buzzer: bool,
}

impl ActuatorState {
    pub fn get(&self, actuator: Actuator) -> bool {
        match actuator {
            Actuator::Relay1 => self.relay1,
            Actuator::Relay2 => self.relay2,
            Actuator::Buzzer => self.buzzer,
        }
    }

    pub fn set(&mut self, actuator: Actuator, on: bool) {
        match actuator {
            Actuator::Relay1 => self.relay1 = on,
            Actuator::Relay2 => self.relay2 = on,
            Actuator::Buzzer => self.buzzer = on,
        }
    }

    pub fn relay(&self, relay: RelayId) -> RelayState {
        self.get(relay.actuator()).into()
    }
}
