use alloc::vec::Vec;
use core::ops::Index;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::*;

/// Alpha value written into scratched pixels.
pub const TRANSPARENT: u8 = 0;

/// Alpha value used for foil when building a buffer from a boolean mask.
pub const OPAQUE: u8 = u8::MAX;

/// Per-pixel coverage of a card's foil layer, indexed `(x, y)`.
///
/// Any non-zero alpha counts as unscratched foil.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpacityBuffer {
    alpha: Array2<u8>,
}

impl OpacityBuffer {
    /// Takes row-major alpha bytes, the layout image decoders hand out.
    pub fn from_alpha(width: Coord, height: Coord, data: &[u8]) -> Result<Self> {
        let expected = area(width, height) as usize;
        if width == 0 || height == 0 || data.len() != expected {
            return Err(CardError::InvalidBufferShape);
        }

        let stride = usize::from(width);
        let alpha = Array2::from_shape_fn((width, height).to_nd_index(), |(x, y)| {
            data[y * stride + x]
        });
        Ok(Self { alpha })
    }

    pub fn from_mask(mask: &Array2<bool>) -> Result<Self> {
        let (x_len, y_len) = mask.dim();
        if x_len == 0 || y_len == 0 || x_len > Coord::MAX.into() || y_len > Coord::MAX.into() {
            return Err(CardError::InvalidBufferShape);
        }

        Ok(Self {
            alpha: mask.mapv(|opaque| if opaque { OPAQUE } else { TRANSPARENT }),
        })
    }

    pub fn filled(size: Coord2, alpha: u8) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(CardError::InvalidBufferShape);
        }

        Ok(Self {
            alpha: Array2::from_elem(size.to_nd_index(), alpha),
        })
    }

    pub fn size(&self) -> Coord2 {
        let (x_len, y_len) = self.alpha.dim();
        // constructors reject anything that would not fit
        (x_len as Coord, y_len as Coord)
    }

    pub fn total_pixels(&self) -> PixelCount {
        let (width, height) = self.size();
        area(width, height)
    }

    pub fn alpha_at(&self, coords: Coord2) -> u8 {
        self.alpha[coords.to_nd_index()]
    }

    pub fn is_opaque(&self, coords: Coord2) -> bool {
        self.alpha_at(coords) != TRANSPARENT
    }

    pub fn in_bounds(&self, (x, y): Coord2) -> bool {
        let (width, height) = self.size();
        x < width && y < height
    }

    /// Clears a single pixel, returning whether it was opaque before.
    pub fn clear(&mut self, coords: Coord2) -> bool {
        let pixel = &mut self.alpha[coords.to_nd_index()];
        if *pixel == TRANSPARENT {
            false
        } else {
            *pixel = TRANSPARENT;
            true
        }
    }

    /// Clears every pixel of `rect` that lies in bounds, returning how many changed.
    pub fn clear_rect(&mut self, rect: &ZoneRect) -> PixelCount {
        let mut cleared = 0;
        for coords in rect.iter_coords() {
            if self.in_bounds(coords) && self.clear(coords) {
                cleared += 1;
            }
        }
        cleared
    }

    pub fn clear_all(&mut self) {
        self.alpha.fill(TRANSPARENT);
    }

    pub fn opaque_count(&self) -> PixelCount {
        self.alpha
            .iter()
            .filter(|&&alpha| alpha != TRANSPARENT)
            .count() as PixelCount
    }

    pub fn opaque_count_in(&self, rect: &ZoneRect) -> PixelCount {
        rect.iter_coords()
            .filter(|&coords| self.in_bounds(coords) && self.is_opaque(coords))
            .count() as PixelCount
    }

    /// Read-only view of the alpha plane for compositing.
    pub fn alpha(&self) -> ArrayView2<'_, u8> {
        self.alpha.view()
    }

    /// Row-major alpha bytes, the inverse of [`OpacityBuffer::from_alpha`].
    pub fn to_alpha_bytes(&self) -> Vec<u8> {
        let (width, height) = self.size();
        let mut bytes = Vec::with_capacity(self.total_pixels() as usize);
        for y in 0..height {
            for x in 0..width {
                bytes.push(self.alpha_at((x, y)));
            }
        }
        bytes
    }
}

impl Index<Coord2> for OpacityBuffer {
    type Output = u8;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.alpha[coords.to_nd_index()]
    }
}
