#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::{Point, SolverError, SolverResult};

/// Coordinates are packed with a `+2` offset (spec.md §3), so the
/// representable range is `[-2, 253]` in a single `i16`. This mirrors the
/// teacher's `NodePath`, which packs small integers into a flat primitive
/// buffer with an explicit encode/decode boundary instead of a `Vec` of
/// structs — here a `Vec<i16>` instead of a single `u64`, because `N` is a
/// run-time parameter rather than a fixed tree depth.
const COORD_OFFSET: i32 = 2;
const COORD_MIN: i32 = -2;
const COORD_MAX: i32 = 253;

#[inline]
fn encode_coord(v: i32) -> SolverResult<i16> {
    if !(COORD_MIN..=COORD_MAX).contains(&v) {
        return Err(SolverError::Invariant {
            reason: format!("coordinate {v} is outside the representable range [-2, 253]"),
        });
    }
    Ok((v + COORD_OFFSET) as i16)
}

#[inline]
fn decode_coord(v: i16) -> i32 {
    v as i32 - COORD_OFFSET
}

/// An ordered sequence of `N` body cells, head at index 0, tail at index
/// `N - 1`. Consecutive cells are orthogonally adjacent; `N` never changes
/// across a run (spec.md §3).
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snake {
    /// Packed `[x0, y0, x1, y1, ...]`, head first.
    cells: Vec<i16>,
}

impl Snake {
    /// Build a snake from body cells, head first, validating the adjacency
    /// invariant of spec.md §3.
    ///
    /// # Errors
    ///
    /// [`SolverError::Invariant`] if `cells` is empty, any two consecutive
    /// cells are not orthogonally adjacent, or a coordinate is outside the
    /// representable range.
    pub fn new(cells: &[Point]) -> SolverResult<Self> {
        if cells.is_empty() {
            return Err(SolverError::Invariant {
                reason: "a snake must have at least one body cell".into(),
            });
        }
        for pair in cells.windows(2) {
            if !pair[0].is_adjacent_to(pair[1]) {
                return Err(SolverError::Invariant {
                    reason: format!(
                        "body cells {:?} and {:?} are not orthogonally adjacent",
                        pair[0], pair[1]
                    ),
                });
            }
        }
        let mut packed = Vec::with_capacity(cells.len() * 2);
        for p in cells {
            packed.push(encode_coord(p.x())?);
            packed.push(encode_coord(p.y())?);
        }
        Ok(Self { cells: packed })
    }

    /// A degenerate pose with all `n` segments stacked at `point` (spec.md
    /// §4.2's `fromSinglePoint`).
    #[must_use]
    pub fn from_single_point(point: Point, n: usize) -> SolverResult<Self> {
        Self::new(&vec![point; n.max(1)])
    }

    /// The canonical "just outside the grid" start pose: a horizontal snake
    /// of length `n` resting at `y = -1`, head at `(n - 1, -1)` (spec.md
    /// §4.2's `createHorizontal`).
    #[must_use]
    pub fn create_horizontal(n: usize) -> SolverResult<Self> {
        let n = n.max(1);
        let cells: Vec<Point> = (0..n).map(|i| Point::new((n - 1 - i) as i32, -1)).collect();
        Self::new(&cells)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len() / 2
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get the body cell at `index` (0 = head).
    #[inline]
    #[must_use]
    pub fn segment(&self, index: usize) -> Point {
        Point::new(
            decode_coord(self.cells[index * 2]),
            decode_coord(self.cells[index * 2 + 1]),
        )
    }

    #[inline]
    #[must_use]
    pub fn head(&self) -> Point {
        self.segment(0)
    }

    #[inline]
    #[must_use]
    pub fn tail(&self) -> Point {
        self.segment(self.len() - 1)
    }

    /// All body cells, head first.
    #[must_use]
    pub fn cells(&self) -> Vec<Point> {
        (0..self.len()).map(|i| self.segment(i)).collect()
    }

    /// `true` if any two segments of this snake share a cell.
    #[must_use]
    pub fn has_self_collision(&self) -> bool {
        let cells = self.cells();
        for i in 0..cells.len() {
            for j in (i + 1)..cells.len() {
                if cells[i] == cells[j] {
                    return true;
                }
            }
        }
        false
    }

    /// Advance the head by one unit vector `(dx, dy)`, dropping the tail —
    /// classic snake movement. The new head is prepended; the resulting
    /// snake has the same length as `self`.
    ///
    /// # Errors
    ///
    /// [`SolverError::Invariant`] if `|dx| + |dy| != 1`, or the new head
    /// falls outside the representable coordinate range.
    pub fn advance(&self, dx: i32, dy: i32) -> SolverResult<Self> {
        if dx.abs() + dy.abs() != 1 {
            return Err(SolverError::Invariant {
                reason: format!("advance vector ({dx}, {dy}) is not a unit step"),
            });
        }
        let new_head = self.head() + Point::new(dx, dy);
        let mut cells = Vec::with_capacity(self.len());
        cells.push(new_head);
        cells.extend(self.cells().into_iter().take(self.len() - 1));
        Self::new(&cells)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_create_horizontal() {
        let s = Snake::create_horizontal(4).unwrap();
        assert_eq!(s.len(), 4);
        assert_eq!(s.head(), Point::new(3, -1));
        assert_eq!(s.tail(), Point::new(0, -1));
    }

    #[test]
    fn test_from_single_point() {
        let s = Snake::from_single_point(Point::new(2, 2), 3).unwrap();
        assert_eq!(s.len(), 3);
        assert!(s.cells().iter().all(|&c| c == Point::new(2, 2)));
    }

    #[test]
    fn test_advance_preserves_length_and_adjacency() {
        let s = Snake::create_horizontal(4).unwrap();
        let s2 = s.advance(0, 1).unwrap();
        assert_eq!(s2.len(), s.len());
        assert_eq!(s2.head(), Point::new(3, 0));
        // tail dropped, body 0..n-1 of old snake shifted to 1..n of new
        for i in 0..s.len() - 1 {
            assert_eq!(s2.segment(i + 1), s.segment(i));
        }
    }

    #[test]
    fn test_advance_rejects_non_unit_vector() {
        let s = Snake::create_horizontal(2).unwrap();
        assert!(s.advance(1, 1).is_err());
        assert!(s.advance(0, 0).is_err());
    }

    #[test]
    fn test_new_rejects_non_adjacent_cells() {
        let cells = vec![Point::new(0, 0), Point::new(5, 5)];
        assert!(Snake::new(&cells).is_err());
    }

    #[test]
    fn test_has_self_collision() {
        let s = Snake::new(&[Point::new(0, 0), Point::new(1, 0), Point::new(0, 0)]).unwrap();
        assert!(s.has_self_collision());
        let s2 = Snake::create_horizontal(3).unwrap();
        assert!(!s2.has_self_collision());
    }

    #[test]
    fn test_degenerate_single_segment_snake_advances() {
        let s = Snake::from_single_point(Point::new(0, -1), 1).unwrap();
        let s2 = s.advance(1, 0).unwrap();
        assert_eq!(s2.head(), Point::new(1, -1));
        assert_eq!(s2.len(), 1);
    }

    #[test]
    fn test_out_of_range_coordinate_rejected() {
        let cells = vec![Point::new(-2, -1), Point::new(-3, -1)];
        assert!(Snake::new(&cells).is_err());
    }
}
