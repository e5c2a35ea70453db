// Tail reachability check used to avoid walking into dead ends

use crate::board::Grid;
use crate::pathfinder::find_path;
use crate::types::Coord;

/// True if a path from `from` to `tail` exists on the current grid.
///
/// The grid is not advanced: this asks whether the cell our tail occupies
/// right now is still reachable after stepping onto `from`.
pub fn can_reach_tail(grid: &Grid, from: Coord, tail: Coord) -> bool {
    !find_path(grid, from, tail).is_empty()
}
