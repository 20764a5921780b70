use serde::{Deserialize, Serialize};

/// Single coordinate axis used for buffer width, height, and pixel positions.
pub type Coord = u16;

/// Count type used for pixel totals.
pub type PixelCount = u32;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Whole currency units credited to a player.
pub type Money = u32;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn area(a: Coord, b: Coord) -> PixelCount {
    let a = a as PixelCount;
    let b = b as PixelCount;
    a.saturating_mul(b)
}

/// Axis-aligned rectangle in buffer coordinates, inclusive of `left`/`top`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneRect {
    pub left: Coord,
    pub top: Coord,
    pub width: Coord,
    pub height: Coord,
}

impl ZoneRect {
    pub const fn new(left: Coord, top: Coord, width: Coord, height: Coord) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Builds the rectangle spanning two inclusive corners.
    pub const fn from_corners((min_x, min_y): Coord2, (max_x, max_y): Coord2) -> Self {
        Self::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
    }

    pub const fn area(&self) -> PixelCount {
        area(self.width, self.height)
    }

    pub const fn contains(&self, (x, y): Coord2) -> bool {
        x >= self.left
            && y >= self.top
            && (x - self.left) < self.width
            && (y - self.top) < self.height
    }

    pub fn intersects(&self, other: &ZoneRect) -> bool {
        let spans = |a_start: Coord, a_len: Coord, b_start: Coord, b_len: Coord| {
            u32::from(a_start) < u32::from(b_start) + u32::from(b_len)
                && u32::from(b_start) < u32::from(a_start) + u32::from(a_len)
        };
        spans(self.left, self.width, other.left, other.width)
            && spans(self.top, self.height, other.top, other.height)
    }

    /// Center point in unscaled buffer space.
    pub fn center(&self) -> (f32, f32) {
        (
            f32::from(self.left) + f32::from(self.width) / 2.0,
            f32::from(self.top) + f32::from(self.height) / 2.0,
        )
    }

    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (left, top) = (self.left, self.top);
        let (right, bottom) = (left + self.width, top + self.height);
        (left..right).flat_map(move |x| (top..bottom).map(move |y| (x, y)))
    }
}

/// 4-connected neighbours of `coords` that lie inside a buffer of `size`.
pub fn orthogonal_neighbors(coords: Coord2, size: Coord2) -> impl Iterator<Item = Coord2> {
    let (x, y) = coords;
    let (width, height) = size;
    [
        x.checked_add(1).map(|x| (x, y)),
        x.checked_sub(1).map(|x| (x, y)),
        y.checked_add(1).map(|y| (x, y)),
        y.checked_sub(1).map(|y| (x, y)),
    ]
    .into_iter()
    .flatten()
    .filter(move |&(x, y)| x < width && y < height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn orthogonal_neighbors_are_clipped_at_corners() {
        let corner: Vec<_> = orthogonal_neighbors((0, 0), (3, 3)).collect();
        let middle: Vec<_> = orthogonal_neighbors((1, 1), (3, 3)).collect();
        let edge: Vec<_> = orthogonal_neighbors((2, 1), (3, 3)).collect();

        assert_eq!(corner, [(1, 0), (0, 1)]);
        assert_eq!(middle, [(2, 1), (0, 1), (1, 2), (1, 0)]);
        assert_eq!(edge, [(1, 1), (2, 2), (2, 0)]);
    }

    #[test]
    fn rect_from_corners_is_inclusive() {
        let rect = ZoneRect::from_corners((2, 3), (4, 3));

        assert_eq!(rect, ZoneRect::new(2, 3, 3, 1));
        assert_eq!(rect.area(), 3);
        assert!(rect.contains((4, 3)));
        assert!(!rect.contains((5, 3)));
        assert_eq!(rect.iter_coords().count(), 3);
        assert_eq!(rect.center(), (3.5, 3.5));
    }

    #[test]
    fn rect_intersection_excludes_shared_edges() {
        let rect = ZoneRect::new(2, 2, 3, 3);

        assert!(rect.intersects(&ZoneRect::new(4, 4, 1, 1)));
        assert!(rect.intersects(&ZoneRect::new(0, 0, 10, 10)));
        assert!(!rect.intersects(&ZoneRect::new(5, 2, 2, 2)));
        assert!(!rect.intersects(&ZoneRect::new(2, 0, 3, 2)));
    }
}
