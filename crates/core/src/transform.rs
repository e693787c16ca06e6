//! Gravity alignment
//!
//! All falling and matching logic is written for tiles falling toward
//! increasing `y`. [`align`] reindexes a grid so any gravity direction looks
//! like that case; every direction is an involution, so applying `align` again
//! with the same direction maps the result back to screen orientation.
//!
//! | FallFrom | Aligned cell `(lane, depth)` reads screen cell |
//! |----------|------------------------------------------------|
//! | Top      | `(lane, depth)` |
//! | Bottom   | `(lane, n - 1 - depth)` (columns reversed) |
//! | Left     | `(depth, lane)` (transpose) |
//! | Right    | `(n - 1 - depth, n - 1 - lane)` (transpose, then both axes reversed) |

use crate::grid::Grid;
use crate::types::FallFrom;

/// Reindex `grid` so that tiles falling from `fall_from` fall toward increasing `y`
pub fn align<T: Clone>(grid: &Grid<T>, fall_from: FallFrom) -> Grid<T> {
    let n = grid.size();
    Grid::from_fn(n, |x, y| {
        let (sx, sy) = source_cell(x, y, n, fall_from);
        grid.get(sx, sy)
            .cloned()
            .unwrap_or_else(|| unreachable!("alignment maps ({x}, {y}) outside a {n}x{n} grid"))
    })
}

/// Swap rows and columns
pub fn transpose<T: Clone>(grid: &Grid<T>) -> Grid<T> {
    align(grid, FallFrom::Left)
}

#[inline]
fn source_cell(x: usize, y: usize, n: usize, fall_from: FallFrom) -> (usize, usize) {
    match fall_from {
        FallFrom::Top => (x, y),
        FallFrom::Bottom => (x, n - 1 - y),
        FallFrom::Left => (y, x),
        FallFrom::Right => (n - 1 - y, n - 1 - x),
    }
}

/// Map an aligned `(lane, depth)` position to screen `(x, y)`
///
/// Signed so that `depth = -1`, the reservoir slot just outside the board,
/// lands beyond the edge tiles fall from.
///
/// # Examples
///
/// ```
/// use tilefall_core::transform::from_aligned;
/// use tilefall_core::types::FallFrom;
///
/// assert_eq!(from_aligned((1, -1), FallFrom::Top, 4), (1, -1));
/// assert_eq!(from_aligned((1, -1), FallFrom::Bottom, 4), (1, 4));
/// assert_eq!(from_aligned((1, -1), FallFrom::Left, 4), (-1, 1));
/// assert_eq!(from_aligned((1, -1), FallFrom::Right, 4), (4, 2));
/// ```
pub fn from_aligned(aligned: (isize, isize), fall_from: FallFrom, n: usize) -> (isize, isize) {
    let last = n as isize - 1;
    let (lane, depth) = aligned;
    match fall_from {
        FallFrom::Top => (lane, depth),
        FallFrom::Bottom => (lane, last - depth),
        FallFrom::Left => (depth, lane),
        FallFrom::Right => (last - depth, last - lane),
    }
}

/// Map a screen `(x, y)` position to aligned `(lane, depth)`
///
/// Inverse of [`from_aligned`]; each per-direction map is its own inverse.
pub fn to_aligned(screen: (isize, isize), fall_from: FallFrom, n: usize) -> (isize, isize) {
    from_aligned(screen, fall_from, n)
}
