use serde::{Deserialize, Serialize};

use crate::*;

/// Live state of one scratch zone on a card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    shape: ZoneShape,
    cleared_pixels: PixelCount,
    revealed: bool,
    applied: bool,
    prize: Prize,
}

impl Zone {
    pub fn new(shape: ZoneShape, prize: Prize) -> Self {
        Self {
            shape,
            cleared_pixels: 0,
            revealed: false,
            applied: false,
            prize,
        }
    }

    pub fn shape(&self) -> ZoneShape {
        self.shape
    }

    pub fn rect(&self) -> ZoneRect {
        self.shape.rect
    }

    pub fn total_pixels(&self) -> PixelCount {
        self.shape.total_pixels
    }

    pub fn cleared_pixels(&self) -> PixelCount {
        self.cleared_pixels
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_applied(&self) -> bool {
        self.applied
    }

    pub fn prize(&self) -> &Prize {
        &self.prize
    }

    /// Fraction of the zone's foil that is gone. Zones without foil count as clear.
    pub fn clearance_ratio(&self) -> f32 {
        if self.shape.total_pixels == 0 {
            return 1.0;
        }
        self.cleared_pixels as f32 / self.shape.total_pixels as f32
    }

    pub fn meets_threshold(&self, threshold: f32) -> bool {
        self.clearance_ratio() >= threshold
    }

    pub(crate) fn set_cleared_pixels(&mut self, cleared: PixelCount) {
        // never report more than the zone owns, and never go backwards
        let cleared = cleared.min(self.shape.total_pixels);
        self.cleared_pixels = self.cleared_pixels.max(cleared);
    }

    /// Returns `false` when the zone was already revealed.
    pub(crate) fn mark_revealed(&mut self) -> bool {
        if self.revealed {
            return false;
        }
        self.revealed = true;
        self.cleared_pixels = self.shape.total_pixels;
        true
    }

    /// Hands out the prize the first time it is called after reveal.
    pub(crate) fn take_prize(&mut self) -> Option<&Prize> {
        if !self.revealed || self.applied {
            return None;
        }
        self.applied = true;
        Some(&self.prize)
    }

    pub(crate) fn reset(&mut self) {
        self.cleared_pixels = 0;
        self.revealed = false;
        self.applied = false;
    }

    pub(crate) fn set_prize(&mut self, prize: Prize) {
        self.prize = prize;
    }
}
