//! Region tags the remote catalog appends to display names.

use serde::{Deserialize, Serialize};

/// The region tags recognized in ` (TAG)` display-name suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionTag {
    China,
    Europe,
    Japan,
    Usa,
    World,
}

impl RegionTag {
    pub const ALL: [RegionTag; 5] = [
        RegionTag::China,
        RegionTag::Europe,
        RegionTag::Japan,
        RegionTag::Usa,
        RegionTag::World,
    ];

    /// Returns the three-letter code used in name suffixes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::China => "CHN",
            Self::Europe => "EUR",
            Self::Japan => "JPN",
            Self::Usa => "USA",
            Self::World => "WLD",
        }
    }

    /// Parse a three-letter code. Case-sensitive, matching the catalog.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "CHN" => Some(Self::China),
            "EUR" => Some(Self::Europe),
            "JPN" => Some(Self::Japan),
            "USA" => Some(Self::Usa),
            "WLD" => Some(Self::World),
            _ => None,
        }
    }
}

impl std::fmt::Display for RegionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Split a trailing ` (TAG)` region suffix off a display name.
///
/// Only an exact match of one of the known tags at the very end of the name
/// counts; any other parenthetical, or a tag elsewhere in the name, is left
/// alone.
pub fn strip_region_suffix(name: &str) -> (&str, Option<RegionTag>) {
    if let Some(open) = name.rfind(" (") {
        let inner = name[open..].strip_prefix(" (").and_then(|r| r.strip_suffix(')'));
        if let Some(tag) = inner.and_then(RegionTag::from_code) {
            return (&name[..open], Some(tag));
        }
    }
    (name, None)
}
