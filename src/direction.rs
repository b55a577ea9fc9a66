#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::Point;

/// One of the four orthogonal unit directions a snake's head may move in.
/// Unlike the teacher's `Direction`, this crate has no diagonal variants:
/// the snake advances by exactly one Manhattan unit per move (spec.md §3).
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The unit vector for this direction.
    #[inline]
    #[must_use]
    pub fn unit(&self) -> Point {
        match self {
            Direction::North => Point::NORTH,
            Direction::East => Point::EAST,
            Direction::South => Point::SOUTH,
            Direction::West => Point::WEST,
        }
    }

    /// The direction from `from` to `to`, if they are orthogonally adjacent.
    #[inline]
    #[must_use]
    pub fn between(from: Point, to: Point) -> Option<Direction> {
        let delta = to - from;
        match (delta.x(), delta.y()) {
            (0, 1) => Some(Direction::North),
            (1, 0) => Some(Direction::East),
            (0, -1) => Some(Direction::South),
            (-1, 0) => Some(Direction::West),
            _ => None,
        }
    }
}
