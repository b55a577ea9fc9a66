use crate::{pathfinder, Color, Grid, Outside, Point, Snake};

/// A validated entry→consume→exit sequence at a target color `C` (spec.md
/// §4.5). `consume` is the run of poses from the entry cell through the
/// last colored cell reached; `exit` continues from there back to an
/// [`Outside`] pose. The two overlap at their shared boundary pose, the
/// same convention [`crate::Route::extend`] uses for joining path segments.
#[derive(Debug, Clone)]
pub struct Tunnel {
    pub entry: Vec<Snake>,
    pub consume: Vec<Snake>,
    pub exit: Vec<Snake>,
    /// Number of cells in `consume` with color exactly `C`.
    pub n_color: u32,
    /// Number of cells in `consume` with color in `1..C`.
    pub n_less: u32,
    /// `Σ (C - color_i)` over the residual (`1..C`) cells consumed.
    pub delta: u32,
}

impl Tunnel {
    /// `(Δ + 1) / (nColor + 1)` — higher is better (spec.md §4.5).
    #[must_use]
    pub fn priority(&self) -> f64 {
        (self.delta as f64 + 1.0) / (self.n_color as f64 + 1.0)
    }

    /// Number of cells actually consumed (color > 0). Used as the
    /// tie-breaker: "longer tunnel wins".
    #[must_use]
    pub fn consumed_len(&self) -> u32 {
        self.n_color + self.n_less
    }
}

/// Validate a candidate tunnel that starts by entering cell `s` (spec.md
/// §4.5's four-step algorithm). Returns `None` if any leg of the path
/// doesn't exist, or if no colored cell ends up consumed — both are
/// "tunnel not viable", not a hard error (spec.md §7's propagation policy).
fn validate(
    start: &Snake,
    s: Point,
    target_color: Color,
    grid: &Grid,
    outside: &Outside,
) -> Option<Tunnel> {
    let max_color = target_color.value() as i32;

    let entry = pathfinder::find_entry_path(start, s, grid, outside).ok()?;
    let entered = entry.last()?.clone();

    let escape = pathfinder::find_escape_path(&entered, max_color, grid, outside, s).ok()?;

    let last_colored_idx = escape
        .iter()
        .enumerate()
        .filter(|(_, pose)| {
            let h = pose.head();
            grid.is_inside(h.x(), h.y())
                && grid.color_at(h.x(), h.y()).map(|c| c.is_colored()).unwrap_or(false)
        })
        .map(|(i, _)| i)
        .last()?;

    let consume = escape[..=last_colored_idx].to_vec();
    let exit = escape[last_colored_idx..].to_vec();

    let mut n_color = 0u32;
    let mut n_less = 0u32;
    let mut delta = 0u32;
    for pose in &consume {
        let h = pose.head();
        if !grid.is_inside(h.x(), h.y()) {
            continue;
        }
        let Ok(color) = grid.color_at(h.x(), h.y()) else {
            continue;
        };
        if color.value() == target_color.value() {
            n_color += 1;
        } else if color.is_colored() {
            n_less += 1;
            delta += target_color.value() as u32 - color.value() as u32;
        }
    }

    Some(Tunnel {
        entry,
        consume,
        exit,
        n_color,
        n_less,
        delta,
    })
}

/// Enumerate every on-grid cell with color in `1..=target_color` in reading
/// order, validate a tunnel starting there, and return the highest-priority
/// one (ties broken by longer consumed length, per spec.md §4.5's
/// selection rule). Returns `None` if no candidate validates.
#[must_use]
pub fn find_best_tunnel(
    start: &Snake,
    target_color: Color,
    grid: &Grid,
    outside: &Outside,
) -> Option<Tunnel> {
    let mut best: Option<Tunnel> = None;

    for p in grid.points_reading_order() {
        let color = grid.color_at_point(p).ok()?;
        if color.is_empty() || color.value() > target_color.value() {
            continue;
        }
        let Some(candidate) = validate(start, p, target_color, grid, outside) else {
            continue;
        };
        let better = match &best {
            None => true,
            Some(current) => {
                let cp = candidate.priority();
                let bp = current.priority();
                cp > bp || (cp == bp && candidate.consumed_len() > current.consumed_len())
            }
        };
        if better {
            best = Some(candidate);
        }
    }

    best
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_row_of_mixed_colors_favors_whole_tunnel() {
        // S4: a 5-cell row of colors [2,1,1,1,2] at level C=2, walled off
        // above and below so the only way out is end-to-end. A snake of
        // length >= 3 can't reverse out the way it came (its own trailing
        // body blocks the U-turn), so the escape search is forced all the
        // way across — exercising the same mechanic a real snake body
        // relies on to make a one-cell-wide tunnel meaningful at all.
        let mut grid = Grid::new(5, 3);
        for x in 0..5 {
            grid.set_color_at(x, 0, Color::new(9)).unwrap();
            grid.set_color_at(x, 2, Color::new(9)).unwrap();
        }
        for (x, c) in [(0, 2), (1, 1), (2, 1), (3, 1), (4, 2)] {
            grid.set_color_at(x, 1, Color::new(c)).unwrap();
        }
        let outside = Outside::compute(&grid);
        let start = Snake::create_horizontal(4).unwrap();
        let tunnel = find_best_tunnel(&start, Color::new(2), &grid, &outside).unwrap();
        assert_eq!(tunnel.consumed_len(), 5);
        assert_eq!(tunnel.n_color, 2);
        assert_eq!(tunnel.n_less, 3);
        assert_eq!(tunnel.delta, 3);
        assert_eq!(tunnel.consume.first().unwrap().head(), Point::new(0, 1));
        assert_eq!(tunnel.consume.last().unwrap().head(), Point::new(4, 1));
    }

    #[test]
    fn test_no_colored_cells_yields_no_tunnel() {
        let grid = Grid::new(3, 3);
        let outside = Outside::compute(&grid);
        let start = Snake::from_single_point(Point::new(-1, -1), 1).unwrap();
        assert!(find_best_tunnel(&start, Color::new(1), &grid, &outside).is_none());
    }

    #[test]
    fn test_single_cell_tunnel_entry_and_exit_present() {
        let mut grid = Grid::new(3, 3);
        grid.set_color_at(1, 1, Color::new(1)).unwrap();
        let outside = Outside::compute(&grid);
        let start = Snake::create_horizontal(2).unwrap();
        let tunnel = find_best_tunnel(&start, Color::new(1), &grid, &outside).unwrap();
        assert_eq!(tunnel.consumed_len(), 1);
        assert!(!tunnel.entry.is_empty());
        assert!(!tunnel.exit.is_empty());
        assert_eq!(tunnel.entry.last().unwrap().head(), Point::new(1, 1));
    }
}
