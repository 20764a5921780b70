use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Immutable geometry of one detected zone.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneShape {
    pub rect: ZoneRect,
    /// Opaque pixels inside `rect` on the pristine overlay.
    pub total_pixels: PixelCount,
}

/// Partitions the foil of `overlay` into 4-connected zones.
///
/// Seeds are taken in buffer index order (`x` outer, `y` inner), so the same
/// overlay always yields the same zones in the same order. A zone's total
/// counts every opaque pixel in its bounding box, including stray pixels that
/// the flood fill never reached.
pub fn detect_zones(overlay: &OpacityBuffer) -> Vec<ZoneShape> {
    let (width, height) = overlay.size();
    let mut visited: Array2<bool> = Array2::default((width, height).to_nd_index());
    let mut zones = Vec::new();

    for x in 0..width {
        for y in 0..height {
            let seed = (x, y);
            if visited[seed.to_nd_index()] || !overlay.is_opaque(seed) {
                continue;
            }

            let rect = flood_fill(overlay, seed, &mut visited);
            let total_pixels = overlay.opaque_count_in(&rect);
            zones.push(ZoneShape { rect, total_pixels });
        }
    }

    if zones.is_empty() {
        log::warn!("Overlay of {width}x{height} has no foil, card has no zones");
    } else {
        log::debug!("Detected {} zones on {width}x{height} overlay", zones.len());
    }

    zones
}

/// Marks the component containing `seed` as visited and returns its bounding box.
fn flood_fill(overlay: &OpacityBuffer, seed: Coord2, visited: &mut Array2<bool>) -> ZoneRect {
    let (mut min_x, mut min_y) = seed;
    let (mut max_x, mut max_y) = seed;

    let size = overlay.size();
    visited[seed.to_nd_index()] = true;
    let mut to_visit = VecDeque::from([seed]);

    while let Some(coords) = to_visit.pop_front() {
        for next in orthogonal_neighbors(coords, size) {
            if visited[next.to_nd_index()] || !overlay.is_opaque(next) {
                continue;
            }

            visited[next.to_nd_index()] = true;
            to_visit.push_back(next);

            min_x = min_x.min(next.0);
            max_x = max_x.max(next.0);
            min_y = min_y.min(next.1);
            max_y = max_y.max(next.1);
        }
    }

    ZoneRect::from_corners((min_x, min_y), (max_x, max_y))
}
