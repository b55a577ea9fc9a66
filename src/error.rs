use crate::{Point, Route};
use thiserror::Error;

/// The failure taxonomy for this crate. See the module-level documentation
/// for the propagation policy: [`SolverError::Bounds`], [`SolverError::Corruption`]
/// and [`SolverError::Invariant`] indicate a bug in the caller or in this crate
/// and should terminate the run; the rest are ordinary control flow a caller
/// may recover from.
#[derive(Debug, Error)]
pub enum SolverError {
    /// A grid read or write fell outside `[0, width) x [0, height)`.
    #[error("point ({x}, {y}) is out of bounds for a {width}x{height} grid")]
    Bounds { x: i32, y: i32, width: i32, height: i32 },

    /// A grid cell held a byte value outside `0..=9`.
    #[error("grid cell holds corrupt color value {value}")]
    Corruption { value: u8 },

    /// A [`crate::Snake`] was constructed violating the adjacency or range
    /// invariants of its body cells.
    #[error("invalid snake pose: {reason}")]
    Invariant { reason: String },

    /// The pathfinder exhausted its frontier without reaching the goal.
    #[error("no path found to the requested goal")]
    NotFound,

    /// Phase B could not reach a remaining colored cell.
    #[error("cell at {point:?} is unreachable")]
    Unreachable { point: Point },

    /// The final return path to the initial pose does not exist.
    #[error("no return path to the initial pose exists")]
    NoReturn { route: Route },

    /// The caller's cancellation signal was observed.
    #[error("solve was cancelled")]
    Cancelled { route: Route },
}

pub type SolverResult<T> = Result<T, SolverError>;
