use crate::{Color, Grid, Outside, Point, Snake, SolverError, SolverResult};
use fxhash::FxHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::BuildHasherDefault;
use tracing::trace;

// Grounded on the teacher's `pathfind_a_star_grid` in `pathfinding.rs`:
// BinaryHeap open list plus an IndexMap closed/parent map keyed by search
// state, with the same reversed-comparison min-heap trick. Diverges from it
// in two load-bearing ways required by spec.md §4.4: nodes are full snake
// poses rather than grid cells (so self-collision is an obstacle, and two
// poses sharing a head position are genuinely different states), and the
// closed set is populated at *expansion* time rather than generation time
// (spec.md §9 "Closed-list-at-generation vs at-expansion").

type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// What the search is trying to reach.
enum Goal<'a> {
    Point(Point),
    Pose(&'a Snake),
    /// Any pose whose head is [`Outside`] — used by tunnel-exit search,
    /// where any safe cell will do (spec.md §4.5, step 1).
    AnyOutside,
    /// Any pose whose head sits on a cell of exactly this color — used by
    /// Phase B's nearest-same-color search (spec.md §4.6, Phase B step 1).
    AnyColor(Color),
    /// Head at a fixed point, where that final point may be entered even
    /// if its color exceeds `max_color` — tunnel entry search travels
    /// through empty cells only but must still land on the colored
    /// starting cell itself (spec.md §4.5, step 1).
    PointViaEmpty(Point),
}

impl Goal<'_> {
    /// A single point to drive the Manhattan-distance heuristic, or `None`
    /// when the goal has no fixed location (in which case the heuristic is
    /// simply 0, which is trivially admissible).
    fn heuristic_point(&self) -> Option<Point> {
        match self {
            Goal::Point(p) | Goal::PointViaEmpty(p) => Some(*p),
            Goal::Pose(s) => Some(s.head()),
            Goal::AnyOutside | Goal::AnyColor(_) => None,
        }
    }

    fn heuristic(&self, head: Point) -> u32 {
        self.heuristic_point()
            .map(|p| head.manhattan_distance(p))
            .unwrap_or(0)
    }

    fn is_reached(&self, snake: &Snake, grid: &Grid, outside: &Outside) -> bool {
        match self {
            Goal::Point(p) | Goal::PointViaEmpty(p) => snake.head() == *p,
            Goal::Pose(s) => snake == *s,
            Goal::AnyOutside => outside.is_outside(snake.head()),
            Goal::AnyColor(c) => {
                let head = snake.head();
                grid.is_inside(head.x(), head.y())
                    && grid.color_at(head.x(), head.y()).map(|g| g == *c).unwrap_or(false)
            }
        }
    }

    /// `true` if `head` is allowed to be entered purely because it is the
    /// destination itself, bypassing the usual `max_color` obstacle check
    /// (but never the extended-box bound, which the caller checks first).
    /// Phase B's nearest-same-color search and tunnel entry search both
    /// need to step onto a colored destination cell that their traversal
    /// bound would otherwise forbid (spec.md §4.5 step 1, §4.6 Phase B
    /// step 1).
    fn allows_entry_as_destination(&self, grid: &Grid, head: Point) -> bool {
        match self {
            Goal::PointViaEmpty(p) => head == *p,
            Goal::AnyColor(c) => grid
                .color_at(head.x(), head.y())
                .map(|g| g == *c)
                .unwrap_or(false),
            Goal::Point(_) | Goal::Pose(_) | Goal::AnyOutside => false,
        }
    }
}

struct Holder {
    f: u32,
    h: u32,
    seq: u64,
    index: u32,
}

impl PartialEq for Holder {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.h == other.h && self.seq == other.seq
    }
}

impl Eq for Holder {}

impl PartialOrd for Holder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Holder {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap on f, then prefer lower h (deeper nodes), then FIFO —
        // all three comparisons reversed, since `BinaryHeap` pops the
        // maximum (spec.md §4.4's tie-breaking rule).
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Returns `true` if the head of a successor snake may legally occupy
/// `head`, given the obstacle rules of spec.md §4.4: it must lie in the
/// extended box, and if on-grid its color must be `<= max_color` or the
/// cell must be [`Outside`].
fn head_is_navigable(grid: &Grid, outside: &Outside, max_color: i32, head: Point) -> bool {
    if !grid.is_inside_large(crate::outside::MARGIN, head.x(), head.y()) {
        return false;
    }
    if grid.is_inside(head.x(), head.y()) {
        let color_ok = grid
            .color_at(head.x(), head.y())
            .map(|c| c.value() as i32 <= max_color)
            .unwrap_or(false);
        color_ok || outside.is_outside(head)
    } else {
        true
    }
}

fn search(
    start: &Snake,
    goal: Goal,
    max_color: i32,
    grid: &Grid,
    outside: &Outside,
    forbid: Option<Point>,
) -> SolverResult<Vec<Snake>> {
    let mut parents: FxIndexMap<Snake, (Option<u32>, u32)> = FxIndexMap::default();
    let mut closed: std::collections::HashSet<u32> = std::collections::HashSet::new();

    parents.insert(start.clone(), (None, 0));

    let mut open = BinaryHeap::new();
    let mut seq = 0u64;
    let mut expansions = 0u64;
    let start_h = goal.heuristic(start.head());
    open.push(Holder {
        f: start_h,
        h: start_h,
        seq,
        index: 0,
    });
    seq += 1;

    while let Some(Holder { index, .. }) = open.pop() {
        if closed.contains(&index) {
            continue;
        }
        let (snake, &(_, g)) = parents
            .get_index(index as usize)
            .expect("heap index always refers to a live parents entry");
        let snake = snake.clone();
        let g = g;

        closed.insert(index);
        expansions += 1;

        if goal.is_reached(&snake, grid, outside) {
            trace!(expansions, path_len = g, "pathfinder reached goal");
            return Ok(reconstruct(&parents, index));
        }

        for unit in Point::UNITS {
            let new_head = snake.head() + unit;
            if Some(new_head) == forbid {
                continue;
            }
            if !head_is_navigable(grid, outside, max_color, new_head)
                && !goal.allows_entry_as_destination(grid, new_head)
            {
                continue;
            }
            let delta = new_head - snake.head();
            let Ok(successor) = snake.advance(delta.x(), delta.y()) else {
                continue;
            };
            if successor.has_self_collision() {
                continue;
            }

            let new_g = g + 1;
            let h = goal.heuristic(successor.head());
            let f = new_g + h;

            let successor_index = match parents.entry(successor) {
                Vacant(e) => {
                    let idx = e.index() as u32;
                    e.insert((Some(index), new_g));
                    idx
                }
                Occupied(mut e) => {
                    if closed.contains(&(e.index() as u32)) {
                        continue;
                    }
                    if e.get().1 <= new_g {
                        continue;
                    }
                    let idx = e.index() as u32;
                    e.insert((Some(index), new_g));
                    idx
                }
            };

            open.push(Holder {
                f,
                h,
                seq,
                index: successor_index,
            });
            seq += 1;
        }
    }

    trace!(expansions, "pathfinder exhausted frontier without reaching goal");
    Err(SolverError::NotFound)
}

fn reconstruct(parents: &FxIndexMap<Snake, (Option<u32>, u32)>, mut index: u32) -> Vec<Snake> {
    let mut path = Vec::new();
    loop {
        let (snake, &(parent, _)) = parents.get_index(index as usize).unwrap();
        path.push(snake.clone());
        match parent {
            Some(p) => index = p,
            None => break,
        }
    }
    path.reverse();
    path
}

/// Find the shortest sequence of unit head moves driving `start` until its
/// head reaches `goal`, subject to `max_color` (spec.md §4.4's
/// `findPathToPoint`). Returns the full list of intermediate snakes from
/// `start` (inclusive) to the goal pose (inclusive).
pub fn find_path_to_point(
    start: &Snake,
    goal: Point,
    max_color: i32,
    grid: &Grid,
    outside: &Outside,
) -> SolverResult<Vec<Snake>> {
    search(start, Goal::Point(goal), max_color, grid, outside, None)
}

/// Find the shortest sequence of unit head moves driving `start` through
/// empty cells only until its head lands on `target`, which may itself be
/// colored (spec.md §4.5, step 1's tunnel entry path — it must not cross
/// any colored cell other than the one it's entering). Internal to tunnel
/// validation, not part of the two public entry points spec.md §4.4 names.
pub(crate) fn find_entry_path(start: &Snake, target: Point, grid: &Grid, outside: &Outside) -> SolverResult<Vec<Snake>> {
    search(start, Goal::PointViaEmpty(target), 0, grid, outside, None)
}

/// Find the shortest sequence of unit head moves driving `start` until its
/// head reaches any [`Outside`] cell, forbidding re-entry to `forbidden`
/// along the way. Used by tunnel validation (spec.md §4.5, step 1) to
/// search for an escape path that doesn't loop back through its own entry
/// cell. Internal to tunnel validation, not part of the two public entry
/// points spec.md §4.4 names.
pub(crate) fn find_escape_path(
    start: &Snake,
    max_color: i32,
    grid: &Grid,
    outside: &Outside,
    forbidden: Point,
) -> SolverResult<Vec<Snake>> {
    search(start, Goal::AnyOutside, max_color, grid, outside, Some(forbidden))
}

/// Find the shortest sequence of unit head moves driving `start` until its
/// head reaches the nearest cell of exactly `target_color`, subject to
/// `max_color` (spec.md §4.6, Phase B step 1 uses `max_color = 0`). Internal
/// to Phase B, not part of the two public entry points spec.md §4.4 names.
pub(crate) fn find_path_to_color(
    start: &Snake,
    target_color: Color,
    max_color: i32,
    grid: &Grid,
    outside: &Outside,
) -> SolverResult<Vec<Snake>> {
    search(start, Goal::AnyColor(target_color), max_color, grid, outside, None)
}

/// Find the shortest sequence of unit head moves driving `start` until the
/// full pose equals `target`, subject to `max_color` (spec.md §4.4's
/// `findPathToPose`). Used for the loop-closing return path.
pub fn find_path_to_pose(
    start: &Snake,
    target: &Snake,
    max_color: i32,
    grid: &Grid,
    outside: &Outside,
) -> SolverResult<Vec<Snake>> {
    search(start, Goal::Pose(target), max_color, grid, outside, None)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_optimality_on_empty_grid() {
        // Property 7: with only empty cells and only the goal constraint,
        // find_path_to_point returns a path of length equal to the
        // Manhattan distance, when no obstacles force a detour.
        let grid = Grid::new(10, 10);
        let outside = Outside::compute(&grid);
        let start = Snake::from_single_point(Point::new(-1, -1), 1).unwrap();
        let goal = Point::new(3, 3);
        let path = find_path_to_point(&start, goal, 0, &grid, &outside).unwrap();
        assert_eq!(path.first().unwrap(), &start);
        assert_eq!(path.last().unwrap().head(), goal);
        assert_eq!(path.len() as u32 - 1, start.head().manhattan_distance(goal));
    }

    #[test]
    fn test_adjacency_along_path() {
        let grid = Grid::new(6, 6);
        let outside = Outside::compute(&grid);
        let start = Snake::create_horizontal(3).unwrap();
        let path = find_path_to_point(&start, Point::new(2, 2), 0, &grid, &outside).unwrap();
        for pair in path.windows(2) {
            assert!(pair[0].head().is_adjacent_to(pair[1].head()));
            for i in 0..pair[0].len() - 1 {
                assert_eq!(pair[1].segment(i + 1), pair[0].segment(i));
            }
        }
    }

    #[test]
    fn test_no_path_returns_not_found() {
        let mut grid = Grid::new(3, 3);
        for x in 0..3 {
            for y in 0..3 {
                if (x, y) != (1, 1) {
                    grid.set_color_at(x, y, crate::Color::new(9)).unwrap();
                }
            }
        }
        let outside = Outside::compute(&grid);
        let start = Snake::from_single_point(Point::new(1, 1), 1).unwrap();
        // (1,1) is a colored-wall-enclosed empty cell, unreachable from the
        // head's current position under max_color=0.
        let result = find_path_to_point(&start, Point::new(0, 0), 0, &grid, &outside);
        assert!(matches!(result, Err(SolverError::NotFound)));
    }

    #[test]
    fn test_find_escape_path_reaches_outside() {
        let grid = Grid::new(6, 6);
        let outside = Outside::compute(&grid);
        let start = Snake::from_single_point(Point::new(3, 3), 1).unwrap();
        let path = find_escape_path(&start, 0, &grid, &outside, Point::new(3, 3)).unwrap();
        assert!(outside.is_outside(path.last().unwrap().head()));
    }

    #[test]
    fn test_find_path_to_color() {
        let mut grid = Grid::new(5, 5);
        grid.set_color_at(4, 4, Color::new(2)).unwrap();
        let outside = Outside::compute(&grid);
        let start = Snake::from_single_point(Point::new(0, 0), 1).unwrap();
        let path = find_path_to_color(&start, Color::new(2), 0, &grid, &outside).unwrap();
        assert_eq!(path.last().unwrap().head(), Point::new(4, 4));
    }

    #[test]
    fn test_self_collision_forbidden_along_path() {
        let grid = Grid::new(6, 6);
        let outside = Outside::compute(&grid);
        let start = Snake::create_horizontal(4).unwrap();
        let path = find_path_to_point(&start, Point::new(0, 2), 0, &grid, &outside).unwrap();
        for snake in &path {
            assert!(!snake.has_self_collision());
        }
    }

    #[test]
    fn test_find_path_to_pose() {
        let grid = Grid::new(6, 6);
        let outside = Outside::compute(&grid);
        let start = Snake::create_horizontal(4).unwrap();
        let target = start.advance(0, 1).unwrap().advance(0, -1).unwrap();
        let path = find_path_to_pose(&start, &target, 0, &grid, &outside).unwrap();
        assert_eq!(path.first().unwrap(), &start);
        assert_eq!(path.last().unwrap(), &target);
    }
}
