// A* shortest-path search over the 4-connected board
//
// Unit edge cost, Manhattan distance heuristic. The heuristic is consistent,
// so a cell is final the first time it is popped and the returned path is
// shortest in cell count.
//
// Tie-break: among frontier entries with equal f = g + h, the one pushed
// first is expanded first. Neighbors are pushed in Up, Down, Left, Right
// order, so equal-length paths prefer the earliest direction in that order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::board::Grid;
use crate::types::Coord;

#[derive(Copy, Clone, Eq, PartialEq)]
struct Node {
    estimate: i32,
    seq: u64,
    cell: usize,
}

// BinaryHeap is a max-heap: flip both keys so the lowest estimate,
// then the earliest push, comes out first.
impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Finds a shortest path from `start` to `goal`, both endpoints included.
///
/// Returns `[start]` when `start == goal` and an empty vector when the goal
/// is unreachable, blocked, or off the board. The start cell itself may be
/// blocked (it is usually our own head).
pub fn find_path(grid: &Grid, start: Coord, goal: Coord) -> Vec<Coord> {
    let (start_idx, goal_idx) = match (grid.index(&start), grid.index(&goal)) {
        (Some(s), Some(g)) => (s, g),
        _ => return vec![],
    };

    if start_idx == goal_idx {
        return vec![start];
    }

    if grid.is_blocked(&goal) {
        return vec![];
    }

    let cells = grid.cell_count();
    let mut cost = vec![i32::MAX; cells];
    let mut came_from: Vec<Option<usize>> = vec![None; cells];
    let mut closed = vec![false; cells];
    let mut frontier = BinaryHeap::new();
    let mut seq = 0u64;

    cost[start_idx] = 0;
    frontier.push(Node {
        estimate: start.manhattan(&goal),
        seq,
        cell: start_idx,
    });

    while let Some(Node { cell, .. }) = frontier.pop() {
        if closed[cell] {
            continue;
        }
        closed[cell] = true;

        if cell == goal_idx {
            return reconstruct(grid, &came_from, goal_idx);
        }

        let current = grid.coord_at(cell);
        let tentative = cost[cell] + 1;

        for neighbor in grid.walkable_neighbors(current) {
            let n = match grid.index(&neighbor) {
                Some(n) => n,
                None => continue,
            };
            if closed[n] || tentative >= cost[n] {
                continue;
            }

            cost[n] = tentative;
            came_from[n] = Some(cell);
            seq += 1;
            frontier.push(Node {
                estimate: tentative + neighbor.manhattan(&goal),
                seq,
                cell: n,
            });
        }
    }

    vec![]
}

/// The cell a path moves into first, if the path takes any step at all
pub fn first_step(path: &[Coord]) -> Option<Coord> {
    path.get(1).copied()
}

fn reconstruct(grid: &Grid, came_from: &[Option<usize>], goal: usize) -> Vec<Coord> {
    let mut path = vec![grid.coord_at(goal)];
    let mut current = goal;
    while let Some(prev) = came_from[current] {
        path.push(grid.coord_at(prev));
        current = prev;
    }
    path.reverse();
    path
}
