//! Group role classification for specializations

use std::fmt;

use serde::Serialize;

/// Group role of a specialization.
///
/// `Unknown` covers role tokens the API does not classify (or may add
/// later); callers must treat it as unclassified, never as damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Tank,
    Healer,
    Dps,
    Unknown,
}

impl Role {
    /// Map a raw API role token (`TANK`, `HEALER`, `DAMAGE`) to a role.
    /// Anything else maps to `Unknown`.
    pub fn from_api_token(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "tank" => Self::Tank,
            "healer" => Self::Healer,
            "damage" => Self::Dps,
            _ => Self::Unknown,
        }
    }

    /// Lowercase string representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tank => "tank",
            Self::Healer => "healer",
            Self::Dps => "dps",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
