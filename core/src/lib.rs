#![no_std]

extern crate alloc;

use alloc::string::String;
use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use account::*;
pub use auto::*;
pub use buffer::*;
pub use card::*;
pub use catalog::*;
pub use detect::*;
pub use error::*;
pub use generator::*;
pub use mask::*;
pub use payout::*;
pub use prize::*;
pub use types::*;
pub use zone::*;

mod account;
mod auto;
mod buffer;
mod card;
mod catalog;
mod detect;
mod error;
mod generator;
mod mask;
mod payout;
mod prize;
mod types;
mod zone;

/// Share of a zone's foil that must be gone before it opens.
pub const REVEAL_THRESHOLD: f32 = 0.97;

/// Scratch tool radius in screen pixels.
pub const BASE_SCRATCH_RADIUS: f32 = 8.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Rendering scale of the card; the scratch tool shrinks by the same factor.
    pub scale: f32,
    pub base_radius: f32,
    pub reveal_threshold: f32,
    pub payout: PayoutModel,
    pub auto_scratch: AutoScratchConfig,
}

impl CardConfig {
    pub fn scratch_radius(&self) -> f32 {
        effective_radius(self.base_radius, self.scale)
    }
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            base_radius: BASE_SCRATCH_RADIUS,
            reveal_threshold: REVEAL_THRESHOLD,
            payout: PayoutModel::default(),
            auto_scratch: AutoScratchConfig::default(),
        }
    }
}

/// Text drawn on top of a revealed zone, positioned in unscaled card space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrizeLabel {
    pub text: String,
    pub position: (f32, f32),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScratchOutcome {
    NoChange,
    Scratched,
    ZoneRevealed,
    Completed,
}

impl ScratchOutcome {
    pub const fn has_update(self) -> bool {
        use ScratchOutcome::*;
        match self {
            NoChange => false,
            Scratched => true,
            ZoneRevealed => true,
            Completed => true,
        }
    }
}

impl BitOr for ScratchOutcome {
    type Output = ScratchOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use ScratchOutcome::*;
        match (self, rhs) {
            (Completed, _) => Completed,
            (_, Completed) => Completed,
            (ZoneRevealed, _) => ZoneRevealed,
            (_, ZoneRevealed) => ZoneRevealed,
            (Scratched, _) => Scratched,
            (_, Scratched) => Scratched,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_merge_by_priority() {
        use ScratchOutcome::*;

        assert_eq!(NoChange | Scratched, Scratched);
        assert_eq!(ZoneRevealed | Scratched, ZoneRevealed);
        assert_eq!(Scratched | Completed, Completed);
        assert_eq!(NoChange | NoChange, NoChange);
        assert!(!NoChange.has_update());
    }

    #[test]
    fn config_fills_missing_fields_with_defaults() {
        let config: CardConfig =
            serde_json::from_str(r#"{"scale": 2.0, "payout": {"tiered": [0, 5, 10]}}"#).unwrap();

        assert_eq!(config.scale, 2.0);
        assert_eq!(config.scratch_radius(), 4.0);
        assert_eq!(config.reveal_threshold, REVEAL_THRESHOLD);
        assert_eq!(config.payout, PayoutModel::Tiered(PayoutTable::new([0, 5, 10])));
    }
}
