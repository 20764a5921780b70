use alloc::format;
use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Name of a relic granted straight to the player.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelicId(String);

impl RelicId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RelicId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Outcome hidden under a zone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Prize {
    None,
    Money(Money),
    Multiplier(f32),
    Relic(RelicId),
}

impl Prize {
    pub const fn kind(&self) -> PrizeKind {
        match self {
            Self::None => PrizeKind::None,
            Self::Money(_) => PrizeKind::Money,
            Self::Multiplier(_) => PrizeKind::Multiplier,
            Self::Relic(_) => PrizeKind::Relic,
        }
    }

    /// Text printed over the zone once it is visible.
    pub fn label(&self) -> Option<String> {
        match self {
            Self::Money(amount) => Some(format!("£{amount}")),
            Self::Multiplier(factor) => Some(format!("x{factor:.1}")),
            Self::None | Self::Relic(_) => None,
        }
    }
}

impl Default for Prize {
    fn default() -> Self {
        Self::None
    }
}

/// Discriminant of [`Prize`], used as the key of the draw weights.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrizeKind {
    None,
    Money,
    Multiplier,
    Relic,
}
