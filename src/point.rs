#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use std::ops::{Add, Sub};

/// An integer `(x, y)` pair. Used both for on-grid cells and for the extended
/// off-grid margin a [`crate::Snake`] may occupy.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0, y: 0 };
    pub const NORTH: Self = Self { x: 0, y: 1 };
    pub const SOUTH: Self = Self { x: 0, y: -1 };
    pub const EAST: Self = Self { x: 1, y: 0 };
    pub const WEST: Self = Self { x: -1, y: 0 };

    /// The four orthogonal unit directions, in a fixed, deterministic order.
    pub const UNITS: [Self; 4] = [Self::NORTH, Self::EAST, Self::SOUTH, Self::WEST];

    #[inline]
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[inline]
    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Manhattan (taxicab) distance to `other`.
    #[inline]
    #[must_use]
    pub fn manhattan_distance(&self, other: Point) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// `true` if `self` and `other` are orthogonally adjacent, i.e. their
    /// Manhattan distance is exactly 1.
    #[inline]
    #[must_use]
    pub fn is_adjacent_to(&self, other: Point) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (i32, i32) {
    #[inline]
    fn from(point: Point) -> Self {
        (point.x, point.y)
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        let a = Point::new(1, 1);
        let b = Point::new(4, 5);
        assert_eq!(a.manhattan_distance(b), 7);
        assert_eq!(a.manhattan_distance(a), 0);
    }

    #[test]
    fn test_is_adjacent_to() {
        let p = Point::new(2, 2);
        assert!(p.is_adjacent_to(p + Point::NORTH));
        assert!(p.is_adjacent_to(p + Point::SOUTH));
        assert!(p.is_adjacent_to(p + Point::EAST));
        assert!(p.is_adjacent_to(p + Point::WEST));
        assert!(!p.is_adjacent_to(p));
        assert!(!p.is_adjacent_to(Point::new(3, 3)));
    }

    #[test]
    fn test_units_are_unit_vectors() {
        for u in Point::UNITS {
            assert_eq!(u.x.abs() + u.y.abs(), 1);
        }
    }
}
