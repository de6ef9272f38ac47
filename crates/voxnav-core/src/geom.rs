//! Geometry primitives: [`Pos`] and [`Bounds`].
//!
//! Coordinates are voxel-grid integers with `y` pointing up. A position names
//! the cell an agent's feet occupy; the head is one cell above.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Pos
// ---------------------------------------------------------------------------

/// An integer voxel position. `y` grows upwards.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// The four horizontal directions, in north, south, east, west order.
pub const CARDINALS: [Pos; 4] = [
    Pos::new(0, 0, -1),
    Pos::new(0, 0, 1),
    Pos::new(1, 0, 0),
    Pos::new(-1, 0, 0),
];

impl Pos {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Unit offset pointing up.
    pub const UP: Self = Self { x: 0, y: 1, z: 0 };

    /// Unit offset pointing down.
    pub const DOWN: Self = Self { x: 0, y: -1, z: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Return a position shifted by (dx, dy, dz).
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// The position `n` cells above.
    #[inline]
    pub const fn up(self, n: i32) -> Self {
        self.offset(0, n, 0)
    }

    /// The position `n` cells below.
    #[inline]
    pub const fn down(self, n: i32) -> Self {
        self.offset(0, -n, 0)
    }

    /// Column chunk coordinates `(x >> 4, z >> 4)` containing this position.
    #[inline]
    pub const fn chunk(self) -> (i32, i32) {
        (self.x >> 4, self.z >> 4)
    }

    /// The four horizontal neighbours, in [`CARDINALS`] order.
    #[inline]
    pub fn neighbors_4(self) -> [Pos; 4] {
        CARDINALS.map(|d| self + d)
    }

    /// Squared euclidean distance to `other`.
    #[inline]
    pub fn distance_sq(self, other: Pos) -> i64 {
        let d = self - other;
        let (x, y, z) = (d.x as i64, d.y as i64, d.z as i64);
        x * x + y * y + z * z
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y
            .cmp(&other.y)
            .then(self.z.cmp(&other.z))
            .then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for Pos {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Pos {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// A half-open box \[min, max). `min` is inclusive, `max` is exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Pos,
    pub max: Pos,
}

impl Bounds {
    /// Create a new box from two corners, canonicalized so that
    /// `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(a: Pos, b: Pos) -> Self {
        Self {
            min: Pos::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Pos::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Box of the given size with its minimum corner at the origin.
    #[inline]
    pub fn sized(width: i32, height: i32, depth: i32) -> Self {
        Self::new(Pos::ZERO, Pos::new(width, height, depth))
    }

    /// Size as a `Pos` (width along x, height along y, depth along z).
    #[inline]
    pub fn size(self) -> Pos {
        self.max - self.min
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let s = self.size();
        (s.x as usize) * (s.y as usize) * (s.z as usize)
    }

    /// Whether the box has zero or negative volume.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y || self.min.z >= self.max.z
    }

    /// Whether `p` is inside the half-open box.
    #[inline]
    pub fn contains(self, p: Pos) -> bool {
        p.x >= self.min.x
            && p.x < self.max.x
            && p.y >= self.min.y
            && p.y < self.max.y
            && p.z >= self.min.z
            && p.z < self.max.z
    }

    /// Intersection of two boxes. Non-overlapping boxes give the empty default box.
    #[inline]
    pub fn intersect(self, other: Bounds) -> Self {
        let r = Self {
            min: Pos::new(
                self.min.x.max(other.min.x),
                self.min.y.max(other.min.y),
                self.min.z.max(other.min.z),
            ),
            max: Pos::new(
                self.max.x.min(other.max.x),
                self.max.y.min(other.max.y),
                self.max.z.min(other.max.z),
            ),
        };
        if r.is_empty() { Self::default() } else { r }
    }

    /// Iterator over every position, x fastest, then z, then y.
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Pos;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

/// Iterator over the positions in a [`Bounds`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    cur: Pos,
}

impl Iterator for BoundsIter {
    type Item = Pos;

    fn next(&mut self) -> Option<Pos> {
        if self.bounds.is_empty() || self.cur.y >= self.bounds.max.y {
            return None;
        }
        let p = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.bounds.max.x {
            self.cur.x = self.bounds.min.x;
            self.cur.z += 1;
            if self.cur.z >= self.bounds.max.z {
                self.cur.z = self.bounds.min.z;
                self.cur.y += 1;
            }
        }
        Some(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn pos_arithmetic() {
        let a = Pos::new(1, 2, 3);
        let b = Pos::new(4, 5, 6);
        assert_eq!(a + b, Pos::new(5, 7, 9));
        assert_eq!(b - a, Pos::new(3, 3, 3));
        assert_eq!(a.up(2), Pos::new(1, 4, 3));
        assert_eq!(a.down(1), Pos::new(1, 1, 3));
    }

    #[test]
    fn chunk_rounds_towards_negative_infinity() {
        assert_eq!(Pos::new(0, 64, 15).chunk(), (0, 0));
        assert_eq!(Pos::new(16, 0, 31).chunk(), (1, 1));
        assert_eq!(Pos::new(-1, 0, -17).chunk(), (-1, -2));
    }

    #[test]
    fn cardinal_neighbors_are_distinct_and_horizontal() {
        let p = Pos::new(5, 5, 5);
        let n = p.neighbors_4();
        let set: HashSet<_> = n.iter().copied().collect();
        assert_eq!(set.len(), 4);
        for q in n {
            assert_eq!(q.y, p.y);
            assert_eq!((q - p).x.abs() + (q - p).z.abs(), 1);
        }
    }

    #[test]
    fn distance_sq() {
        assert_eq!(Pos::ZERO.distance_sq(Pos::new(1, 2, 2)), 9);
    }

    #[test]
    fn bounds_basics() {
        let b = Bounds::sized(3, 2, 4);
        assert_eq!(b.len(), 24);
        assert!(b.contains(Pos::new(2, 1, 3)));
        assert!(!b.contains(Pos::new(3, 0, 0)));
        assert!(!b.contains(Pos::new(0, -1, 0)));
    }

    #[test]
    fn bounds_canonicalize() {
        let b = Bounds::new(Pos::new(3, 2, 1), Pos::ZERO);
        assert_eq!(b.min, Pos::ZERO);
        assert_eq!(b.max, Pos::new(3, 2, 1));
    }

    #[test]
    fn bounds_iter_visits_every_cell_once() {
        let b = Bounds::new(Pos::new(-1, 0, 2), Pos::new(1, 2, 4));
        let pts: Vec<_> = b.iter().collect();
        assert_eq!(pts.len(), b.len());
        let set: HashSet<_> = pts.iter().copied().collect();
        assert_eq!(set.len(), pts.len());
        assert!(pts.iter().all(|&p| b.contains(p)));
        assert_eq!(pts[0], b.min);
    }

    #[test]
    fn bounds_intersect() {
        let a = Bounds::sized(4, 4, 4);
        let b = Bounds::new(Pos::new(2, 2, 2), Pos::new(6, 6, 6));
        assert_eq!(a.intersect(b), Bounds::new(Pos::new(2, 2, 2), Pos::new(4, 4, 4)));
        let far = Bounds::new(Pos::new(9, 9, 9), Pos::new(10, 10, 10));
        assert!(a.intersect(far).is_empty());
        assert_eq!(a.intersect(far), Bounds::default());
    }

    #[test]
    fn empty_bounds_iter() {
        assert_eq!(Bounds::sized(0, 3, 3).iter().count(), 0);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn pos_round_trip() {
        let p = Pos::new(-3, 70, 12);
        let json = serde_json::to_string(&p).unwrap();
        let back: Pos = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
