//! Battle.net deployment regions.
//!
//! The region selects both the OAuth host (`{region}.battle.net`) and the
//! API host (`{region}.api.blizzard.com`), and forms the suffix of every
//! namespace value (`profile-us`, `static-eu`, ...). Character data never
//! crosses regions, so a client is bound to one region for its lifetime
//! via [`ApiConfig`](crate::ApiConfig).

use std::fmt;

/// A Battle.net API region.
///
/// China is served from separate partner infrastructure with its own
/// hostnames and credentials, so it is not representable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Americas (also covers Oceania realms)
    US,
    /// Europe
    EU,
    /// Korea
    KR,
    /// Taiwan
    TW,
}

impl Region {
    /// Every region the profile API is served from.
    pub fn all() -> &'static [Region] {
        &[Region::US, Region::EU, Region::KR, Region::TW]
    }

    /// The lowercase subdomain used in hostnames and namespace values.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::US => "us",
            Region::EU => "eu",
            Region::KR => "kr",
            Region::TW => "tw",
        }
    }

    /// Parse a region code, ignoring case. Returns `None` for anything
    /// that is not one of the four served regions.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "us" => Some(Region::US),
            "eu" => Some(Region::EU),
            "kr" => Some(Region::KR),
            "tw" => Some(Region::TW),
            _ => None,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Region {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::parse(s).ok_or_else(|| crate::Error::InvalidRegion(s.to_string()))
    }
}
