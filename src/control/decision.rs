//! Decoding of the remote detector's textual verdict.

use core::fmt;

/// Verdict returned by the remote endpoint.
///
/// Two vocabularies exist in the field: the status endpoint answers
/// `normal` / `drowsy` / `yawn` / `both`, the trigger endpoint answers
/// `1` / `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteDecision {
    Normal,
    Drowsy,
    Yawn,
    Both,
    Triggered,
    Clear,
}

/// Body did not match any known verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownDecision;

impl fmt::Display for UnknownDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognised decision body")
    }
}

impl RemoteDecision {
    /// Exact match after trimming surrounding whitespace.  Case-sensitive.
    pub fn decode(body: &str) -> Result<Self, UnknownDecision> {
        match body.trim() {
            "normal" => Ok(Self::Normal),
            "drowsy" => Ok(Self::Drowsy),
            "yawn" => Ok(Self::Yawn),
            "both" => Ok(Self::Both),
            "1" => Ok(Self::Triggered),
            "0" => Ok(Self::Clear),
            _ => Err(UnknownDecision),
        }
    }

    pub fn is_alert(self) -> bool {
        matches!(self, Self::Drowsy | Self::Yawn | Self::Both | Self::Triggered)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Drowsy => "drowsy",
            Self::Yawn => "yawn",
            Self::Both => "both",
            Self::Triggered => "1",
            Self::Clear => "0",
        }
    }
}
