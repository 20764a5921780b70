use serde::{Deserialize, Serialize};

use crate::*;

/// Outcome of a single erase stroke.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EraseOutcome {
    NoChange,
    Cleared(PixelCount),
}

impl EraseOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Cleared(_) => true,
        }
    }
}

/// Radius in buffer pixels for a tool of `base_radius` screen pixels on a card drawn at `scale`.
pub fn effective_radius(base_radius: f32, scale: f32) -> f32 {
    if scale > 0.0 {
        (base_radius / scale).max(1.0)
    } else {
        base_radius.max(1.0)
    }
}

/// Square of buffer pixels a stroke can reach, or `None` when it misses the buffer entirely.
pub fn stroke_bounds(
    (center_x, center_y): (f32, f32),
    radius: f32,
    (width, height): Coord2,
) -> Option<ZoneRect> {
    let (center_x, center_y) = (center_x as i32, center_y as i32);
    let reach = radius.max(0.0) as i32;

    let min_x = center_x.saturating_sub(reach).max(0);
    let max_x = center_x.saturating_add(reach).min(i32::from(width) - 1);
    let min_y = center_y.saturating_sub(reach).max(0);
    let max_y = center_y.saturating_add(reach).min(i32::from(height) - 1);
    if min_x > max_x || min_y > max_y {
        return None;
    }

    // clamped to the buffer above
    Some(ZoneRect::from_corners(
        (min_x as Coord, min_y as Coord),
        (max_x as Coord, max_y as Coord),
    ))
}

/// Live foil of one card next to the overlay it started from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScratchMask {
    overlay: OpacityBuffer,
    live: OpacityBuffer,
    foil_pixels: PixelCount,
    cleared_pixels: PixelCount,
}

impl ScratchMask {
    pub fn new(overlay: OpacityBuffer) -> Self {
        let foil_pixels = overlay.opaque_count();
        Self {
            live: overlay.clone(),
            overlay,
            foil_pixels,
            cleared_pixels: 0,
        }
    }

    pub fn overlay(&self) -> &OpacityBuffer {
        &self.overlay
    }

    pub fn live(&self) -> &OpacityBuffer {
        &self.live
    }

    pub fn size(&self) -> Coord2 {
        self.live.size()
    }

    /// Clears every opaque pixel within `radius` of `center`, clipped to the buffer.
    pub fn erase_at(&mut self, center: (f32, f32), radius: f32) -> EraseOutcome {
        let Some(bounds) = stroke_bounds(center, radius, self.size()) else {
            return EraseOutcome::NoChange;
        };
        let (center_x, center_y) = (i64::from(center.0 as i32), i64::from(center.1 as i32));
        let radius_sq = f64::from(radius) * f64::from(radius);

        let mut cleared = 0;
        for (x, y) in bounds.iter_coords() {
            let dx = i64::from(x) - center_x;
            let dy = i64::from(y) - center_y;
            if (dx * dx + dy * dy) as f64 <= radius_sq && self.live.clear((x, y)) {
                cleared += 1;
            }
        }

        self.record_cleared(cleared)
    }

    /// Clears whatever foil is left inside `rect`.
    pub fn force_clear(&mut self, rect: &ZoneRect) -> EraseOutcome {
        let cleared = self.live.clear_rect(rect);
        self.record_cleared(cleared)
    }

    pub fn clear_all(&mut self) -> EraseOutcome {
        let cleared = self.live.opaque_count();
        self.live.clear_all();
        self.record_cleared(cleared)
    }

    /// Recounts the originally-opaque pixels of `zone` that are now transparent.
    pub fn recount(&self, zone: &mut Zone) {
        let cleared = zone
            .rect()
            .iter_coords()
            .filter(|&coords| {
                self.overlay.in_bounds(coords)
                    && self.overlay.is_opaque(coords)
                    && !self.live.is_opaque(coords)
            })
            .count() as PixelCount;
        zone.set_cleared_pixels(cleared);
    }

    pub fn reset(&mut self) {
        self.live = self.overlay.clone();
        self.cleared_pixels = 0;
    }

    pub fn foil_pixels(&self) -> PixelCount {
        self.foil_pixels
    }

    pub fn cleared_pixels(&self) -> PixelCount {
        self.cleared_pixels
    }

    /// Share of the original foil that has been scratched away, in percent.
    pub fn completion_percent(&self) -> f32 {
        if self.foil_pixels == 0 {
            return 100.0;
        }
        self.cleared_pixels as f32 / self.foil_pixels as f32 * 100.0
    }

    fn record_cleared(&mut self, cleared: PixelCount) -> EraseOutcome {
        if cleared == 0 {
            return EraseOutcome::NoChange;
        }
        self.cleared_pixels = (self.cleared_pixels + cleared).min(self.foil_pixels);
        EraseOutcome::Cleared(cleared)
    }
}
