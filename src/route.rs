#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::Snake;

/// The full sequence of snake poses produced by a solve: every intermediate
/// pose visited while clearing colored cells, in the order the snake would
/// actually move through them (spec.md §6). Consecutive poses always differ
/// by exactly one head move, mirroring [`Snake::advance`].
///
/// Grounded on the teacher's `NodePath`: an ordered, append-only sequence of
/// poses that a caller can walk or hand to a renderer, kept as its own type
/// rather than a bare `Vec<Snake>` so the "no consecutive duplicate head"
/// invariant has one place to live.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Route {
    poses: Vec<Snake>,
}

impl Route {
    /// An empty route, typically seeded with the initial pose via
    /// [`Route::push`] or [`Route::extend`].
    #[must_use]
    pub fn new() -> Self {
        Self { poses: Vec::new() }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    #[must_use]
    pub fn poses(&self) -> &[Snake] {
        &self.poses
    }

    #[must_use]
    pub fn last(&self) -> Option<&Snake> {
        self.poses.last()
    }

    pub fn push(&mut self, pose: Snake) {
        self.poses.push(pose);
    }

    /// Append a run of intermediate poses produced by one pathfinder call,
    /// such as [`crate::pathfinder::find_path_to_point`]'s result. The first
    /// pose in `poses` is expected to equal this route's current last pose
    /// (the search's own starting state) and is dropped to avoid a
    /// duplicate entry.
    pub fn extend(&mut self, poses: Vec<Snake>) {
        let mut iter = poses.into_iter();
        if self.poses.is_empty() {
            if let Some(first) = iter.next() {
                self.poses.push(first);
            }
        } else {
            iter.next();
        }
        self.poses.extend(iter);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snake> {
        self.poses.iter()
    }
}
