use crate::Route;
use std::fmt::Write as _;

/// Render a [`Route`] as a single SVG `<path>` element's `d` attribute,
/// tracing the head's center-of-cell position at `cell_size` pixels per
/// grid unit. This is the narrow hand-off point to the renderer described
/// in spec.md §6 — no styling, animation timing, or document wrapper, just
/// the geometry the core guarantees (consecutive unit moves, closed loop).
#[must_use]
pub fn write_route_path(route: &Route, cell_size: f32) -> String {
    let mut d = String::new();
    for (i, pose) in route.iter().enumerate() {
        let head = pose.head();
        let x = (head.x() as f32 + 0.5) * cell_size;
        let y = (head.y() as f32 + 0.5) * cell_size;
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{cmd}{x:.2},{y:.2} ");
    }
    d.truncate(d.trim_end().len());
    d
}
