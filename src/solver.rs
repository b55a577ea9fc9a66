use crate::{pathfinder, tunnel, Color, Grid, Outside, Route, SolverConfig, SolverError, SolverResult};
use tracing::{debug, info};

/// A caller-supplied cancellation check (spec.md §5). `()` implements it as
/// "never cancelled" for callers with no cancellation needs.
pub trait CancellationToken {
    fn is_cancelled(&self) -> bool;
}

impl CancellationToken for () {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Solve `grid` from its current state with `config`, never checking for
/// cancellation (spec.md §5).
pub fn solve(grid: &mut Grid, config: &SolverConfig) -> SolverResult<Route> {
    solve_cancellable(grid, config, &())
}

/// Solve `grid` in place: drive the snake through every colored cell and
/// back to its starting pose, observing `cancel` at the top of each
/// Phase A/B iteration (spec.md §4.6, §5).
///
/// # Errors
///
/// [`SolverError::Unreachable`] if Phase B cannot reach a remaining cell of
/// the current color; [`SolverError::NoReturn`] if no path exists from the
/// final pose back to the initial one; [`SolverError::Cancelled`] if
/// `cancel` reports cancellation, in both cases with the partial route
/// attached (spec.md §7).
pub fn solve_cancellable(
    grid: &mut Grid,
    config: &SolverConfig,
    cancel: &dyn CancellationToken,
) -> SolverResult<Route> {
    let initial = config.resolve_initial_pose()?;
    let mut route = Route::new();
    route.push(initial.clone());

    let mut outside = Outside::compute(grid);

    let cmax = grid.max_color().map(|c| c.value()).unwrap_or(0);
    info!(cmax, "solve starting");

    for level in (1..=cmax).rev() {
        let target_color = Color::new(level);

        run_phase_a(grid, &mut outside, &mut route, target_color, cancel)?;
        run_phase_b(grid, &mut outside, &mut route, target_color, cancel)?;
    }

    let current = route.last().expect("route always has at least the initial pose").clone();
    let closing = pathfinder::find_path_to_pose(&current, &initial, 0, grid, &outside)
        .map_err(|_| SolverError::NoReturn { route: route.clone() })?;
    route.extend(closing);

    info!(poses = route.len(), "solve finished");
    Ok(route)
}

/// Residual clearing at `target_color`: repeatedly pick the best tunnel
/// that covers at least one residual cell and apply it, mutating `grid`
/// and appending to `route` as it goes (spec.md §4.6, Phase A).
fn run_phase_a(
    grid: &mut Grid,
    outside: &mut Outside,
    route: &mut Route,
    target_color: Color,
    cancel: &dyn CancellationToken,
) -> SolverResult<()> {
    loop {
        if cancel.is_cancelled() {
            return Err(SolverError::Cancelled { route: route.clone() });
        }
        let current = route.last().expect("route is never empty").clone();
        let Some(candidate) = tunnel::find_best_tunnel(&current, target_color, grid, outside) else {
            break;
        };
        if candidate.n_less == 0 {
            break;
        }

        debug!(
            level = target_color.value(),
            consumed = candidate.consumed_len(),
            n_less = candidate.n_less,
            priority = candidate.priority(),
            "phase A applying tunnel"
        );
        apply_tunnel(&candidate, grid)?;
        route.extend(candidate.entry);
        route.extend(candidate.consume);
        route.extend(candidate.exit);
        *outside = Outside::compute(grid);
    }
    Ok(())
}

/// Clean consumption at `target_color`: repeatedly BFS to the nearest cell
/// of exactly `target_color` over empty cells and eat it (spec.md §4.6,
/// Phase B).
fn run_phase_b(
    grid: &mut Grid,
    outside: &mut Outside,
    route: &mut Route,
    target_color: Color,
    cancel: &dyn CancellationToken,
) -> SolverResult<()> {
    while let Some(remaining) = grid.first_cell_with_color(target_color) {
        if cancel.is_cancelled() {
            return Err(SolverError::Cancelled { route: route.clone() });
        }
        let current = route.last().expect("route is never empty").clone();
        let path = pathfinder::find_path_to_color(&current, target_color, 0, grid, outside)
            .map_err(|_| SolverError::Unreachable { point: remaining })?;
        let landed = path.last().expect("a found path always has a last pose").head();

        debug!(level = target_color.value(), cell = ?landed, "phase B eating cell");
        grid.set_color_at_point(landed, Color::EMPTY)?;
        route.extend(path);
        *outside = Outside::compute(grid);
    }
    Ok(())
}

/// Mutate `grid` per a tunnel's consume sequence: every pose visited while
/// consuming has its cell set to [`Color::EMPTY`] (spec.md §4.6, Phase A
/// step 3). The entry and exit legs never touch the grid.
fn apply_tunnel(tunnel: &tunnel::Tunnel, grid: &mut Grid) -> SolverResult<()> {
    for pose in &tunnel.consume {
        grid.set_color_at_point(pose.head(), Color::EMPTY)?;
    }
    Ok(())
}
