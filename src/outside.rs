use crate::{Grid, Point};
use std::collections::VecDeque;

/// The margin, in cells, by which a [`crate::Snake`] may extend past the
/// grid's edges (spec.md §3: coordinates range over `[-2, W+1] x [-2, H+1]`).
pub const MARGIN: i32 = 2;

/// The set of points "safe to traverse": anywhere off-grid within the
/// extended box, or any on-grid [`crate::Color::EMPTY`] cell reachable from
/// off-grid through other empty cells (spec.md §3, §4.3).
///
/// Grounded on the flood-fill shape used by `coreyja-battlesnake-rs`'s
/// `flood_fill/spread_from_head.rs` and `TerminalGravity-battlesnake-rst`'s
/// `flood_fill.rs` in the example pack: a `VecDeque` frontier seeded from a
/// starting set, visiting 4-connected neighbors that pass a predicate. Here
/// the seed is the extended box's outer border rather than a single head,
/// and the predicate is "off-grid, or on-grid and empty".
#[derive(Debug, Clone)]
pub struct Outside {
    min_x: i32,
    min_y: i32,
    width: i32,
    height: i32,
    marked: Vec<bool>,
}

impl Outside {
    /// Rebuild the outside region for the current state of `grid`. This is
    /// `O(W * H)` and must be called again whenever the grid is mutated
    /// (spec.md §4.3's lifecycle note).
    #[must_use]
    pub fn compute(grid: &Grid) -> Self {
        let min_x = -MARGIN;
        let min_y = -MARGIN;
        let width = grid.width() + 2 * MARGIN;
        let height = grid.height() + 2 * MARGIN;
        let mut marked = vec![false; (width * height) as usize];

        let index = |x: i32, y: i32| -> usize {
            ((y - min_y) * width + (x - min_x)) as usize
        };

        let passable = |x: i32, y: i32| -> bool {
            if !grid.is_inside(x, y) {
                true
            } else {
                grid.color_at(x, y).map(|c| c.is_empty()).unwrap_or(false)
            }
        };

        let mut queue = VecDeque::new();
        for x in min_x..min_x + width {
            for &y in &[min_y, min_y + height - 1] {
                let idx = index(x, y);
                if !marked[idx] && passable(x, y) {
                    marked[idx] = true;
                    queue.push_back(Point::new(x, y));
                }
            }
        }
        for y in min_y..min_y + height {
            for &x in &[min_x, min_x + width - 1] {
                let idx = index(x, y);
                if !marked[idx] && passable(x, y) {
                    marked[idx] = true;
                    queue.push_back(Point::new(x, y));
                }
            }
        }

        while let Some(p) = queue.pop_front() {
            for unit in Point::UNITS {
                let n = p + unit;
                if n.x() < min_x || n.x() >= min_x + width || n.y() < min_y || n.y() >= min_y + height
                {
                    continue;
                }
                let idx = index(n.x(), n.y());
                if marked[idx] {
                    continue;
                }
                if passable(n.x(), n.y()) {
                    marked[idx] = true;
                    queue.push_back(n);
                }
            }
        }

        Self {
            min_x,
            min_y,
            width,
            height,
            marked,
        }
    }

    /// `true` iff `p` is safe to traverse: off-grid, or on-grid empty and
    /// connected to the border through empty cells. Answers in O(1).
    #[must_use]
    pub fn is_outside(&self, p: Point) -> bool {
        if p.x() < self.min_x
            || p.x() >= self.min_x + self.width
            || p.y() < self.min_y
            || p.y() >= self.min_y + self.height
        {
            // Beyond even the extended box: treat as not navigable rather
            // than silently safe.
            return false;
        }
        let idx = ((p.y() - self.min_y) * self.width + (p.x() - self.min_x)) as usize;
        self.marked[idx]
    }
}
