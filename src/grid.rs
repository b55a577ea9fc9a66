#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::{Color, Point, SolverError, SolverResult};

/// A fixed-size 2-D grid of [`Color`] values, stored one byte per cell in a
/// compact flat buffer. Pure data and queries, no policy — mirrors the
/// teacher's `Region`/`PNode` split between "what shape is this" and "what
/// do we do with it".
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<u8>,
}

impl Grid {
    /// Create a new, all-[`Color::EMPTY`] grid of the given dimensions.
    #[inline]
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self {
            width,
            height,
            cells: vec![0u8; (width * height) as usize],
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// `true` iff `0 <= x < width && 0 <= y < height` (spec.md §4.1).
    #[inline]
    #[must_use]
    pub fn is_inside(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// `true` iff `(x, y)` lies within the box extended by `m` cells on every
    /// side of this grid (spec.md §4.1).
    #[inline]
    #[must_use]
    pub fn is_inside_large(&self, m: i32, x: i32, y: i32) -> bool {
        x >= -m && x < self.width + m && y >= -m && y < self.height + m
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Read the color at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`SolverError::Bounds`] if `(x, y)` is outside the grid.
    /// [`SolverError::Corruption`] if the stored byte is not a valid color.
    pub fn color_at(&self, x: i32, y: i32) -> SolverResult<Color> {
        if !self.is_inside(x, y) {
            return Err(SolverError::Bounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let value = self.cells[self.index(x, y)];
        if value > Color::MAX {
            return Err(SolverError::Corruption { value });
        }
        Ok(Color::new_unchecked(value))
    }

    /// Read the color at `point`. See [`Grid::color_at`].
    #[inline]
    pub fn color_at_point(&self, point: Point) -> SolverResult<Color> {
        self.color_at(point.x(), point.y())
    }

    /// Write `color` at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`SolverError::Bounds`] if `(x, y)` is outside the grid.
    pub fn set_color_at(&mut self, x: i32, y: i32, color: Color) -> SolverResult<()> {
        if !self.is_inside(x, y) {
            return Err(SolverError::Bounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let idx = self.index(x, y);
        self.cells[idx] = color.value();
        Ok(())
    }

    /// Write `color` at `point`. See [`Grid::set_color_at`].
    #[inline]
    pub fn set_color_at_point(&mut self, point: Point, color: Color) -> SolverResult<()> {
        self.set_color_at(point.x(), point.y(), color)
    }

    /// `true` if every cell in the grid is [`Color::EMPTY`].
    #[inline]
    #[must_use]
    pub fn is_all_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }

    /// The maximum color value currently present in the grid, or `None` if
    /// the grid is all empty.
    #[must_use]
    pub fn max_color(&self) -> Option<Color> {
        self.cells.iter().copied().max().filter(|&c| c > 0).map(Color::new_unchecked)
    }

    /// Iterate every on-grid point in reading order (x outer, y inner), as
    /// required by the deterministic tunnel-enumeration order of spec.md
    /// §4.5 and §5.
    pub fn points_reading_order(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.width).flat_map(move |x| (0..self.height).map(move |y| Point::new(x, y)))
    }

    /// The first on-grid point (in reading order) whose color is exactly
    /// `color`, or `None` if no such cell remains. Used both by Phase B's
    /// loop condition and to name the cell in an [`SolverError::Unreachable`].
    #[must_use]
    pub fn first_cell_with_color(&self, color: Color) -> Option<Point> {
        self.points_reading_order()
            .find(|&p| self.color_at_point(p).map(|c| c == color).unwrap_or(false))
    }
}
