use crate::Point;

/// Run-time parameters for a solve, separated from the grid data itself so
/// callers can reuse one [`crate::Grid`] across several configurations
/// (spec.md §5). Grounded on the plain, derive-`Default` config structs the
/// teacher uses at its crate boundary rather than a builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Number of body segments the snake keeps, `N >= 1` (spec.md §3).
    pub snake_length: usize,
    /// Where the snake starts and must return to close the loop. `None`
    /// means the caller wants [`crate::Snake::create_horizontal`] at
    /// `snake_length`.
    pub initial_pose: Option<crate::Snake>,
}

impl SolverConfig {
    #[must_use]
    pub fn new(snake_length: usize) -> Self {
        Self {
            snake_length: snake_length.max(1),
            initial_pose: None,
        }
    }

    #[must_use]
    pub fn with_initial_pose(mut self, pose: crate::Snake) -> Self {
        self.initial_pose = Some(pose);
        self
    }

    /// Resolve the actual starting pose for a solve: the explicit
    /// `initial_pose` if set, otherwise the canonical horizontal start.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::SolverError::Invariant`] from
    /// [`crate::Snake::create_horizontal`] if `snake_length` is unusable.
    pub fn resolve_initial_pose(&self) -> crate::SolverResult<crate::Snake> {
        match &self.initial_pose {
            Some(pose) => Ok(pose.clone()),
            None => crate::Snake::create_horizontal(self.snake_length),
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        // spec default: N = 4 (spec.md §6's configuration surface).
        Self::new(4)
    }
}

/// A request to solve one grid: the grid's dimensions plus the sparse list
/// of colored cells, independent of any particular `Grid` storage choice
/// (spec.md §2's input contract).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSpec {
    pub width: i32,
    pub height: i32,
    pub colored_cells: Vec<(Point, crate::Color)>,
}

impl GridSpec {
    #[must_use]
    pub fn to_grid(&self) -> crate::SolverResult<crate::Grid> {
        let mut grid = crate::Grid::new(self.width, self.height);
        for &(point, color) in &self.colored_cells {
            grid.set_color_at_point(point, color)?;
        }
        Ok(grid)
    }
}
