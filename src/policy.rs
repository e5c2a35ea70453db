// Move policy: tail-chasing default, guarded food chasing, then a random
// safe move and finally a fixed last-resort direction.
//
// The whole decision is a pure function of the snapshot and the injected RNG.

use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::Snapshot;
use crate::food::select_target_food;
use crate::pathfinder::{find_path, first_step};
use crate::safety::can_reach_tail;
use crate::types::{Coord, Direction};

/// Emitted when no neighbor of the head is safe. Accepts a likely collision.
pub const LAST_RESORT_DIRECTION: Direction = Direction::Right;

/// Which branch of the policy produced the move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    Food,
    Tail,
    Random,
    LastResort,
}

impl DecisionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionReason::Food => "food",
            DecisionReason::Tail => "tail",
            DecisionReason::Random => "random",
            DecisionReason::LastResort => "last_resort",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub direction: Direction,
    pub reason: DecisionReason,
    /// Food cell the policy arbitrated for, even if chasing it was vetoed
    pub target_food: Option<Coord>,
}

/// Chooses this turn's move
pub fn decide_move<R: Rng + ?Sized>(snapshot: &Snapshot, rng: &mut R) -> Decision {
    let grid = &snapshot.grid;
    let head = snapshot.head();
    let tail = snapshot.tail();

    let path_to_tail = find_path(grid, head, tail);
    let tail_direction = first_step(&path_to_tail).and_then(|step| Direction::between(&head, &step));

    let mut target_food = None;
    let mut food_direction = None;
    if !snapshot.food.is_empty() {
        target_food =
            select_target_food(&snapshot.our_body, &snapshot.opponent_bodies, &snapshot.food);

        if let Some(target) = target_food {
            let path_to_food = find_path(grid, head, target);
            match first_step(&path_to_food) {
                Some(step) if can_reach_tail(grid, step, tail) => {
                    food_direction = Direction::between(&head, &step);
                }
                Some(_) => debug!("Food at {} vetoed: tail unreachable afterwards", target),
                None => debug!("Food at {} unreachable", target),
            }
        }
    }

    if let Some(direction) = food_direction {
        return Decision {
            direction,
            reason: DecisionReason::Food,
            target_food,
        };
    }

    if let Some(direction) = tail_direction {
        return Decision {
            direction,
            reason: DecisionReason::Tail,
            target_food,
        };
    }

    let safe = safe_moves(snapshot);
    match safe.choose(rng) {
        Some(&direction) => {
            debug!("No path-derived move, picking randomly among {:?}", safe);
            Decision {
                direction,
                reason: DecisionReason::Random,
                target_food,
            }
        }
        None => {
            debug!("Boxed in at {}, falling back to {}", head, LAST_RESORT_DIRECTION);
            Decision {
                direction: LAST_RESORT_DIRECTION,
                reason: DecisionReason::LastResort,
                target_food,
            }
        }
    }
}

/// Directions whose target cell is on the board and not a blocking body segment
pub fn safe_moves(snapshot: &Snapshot) -> Vec<Direction> {
    let head = snapshot.head();
    let (width, height) = (snapshot.grid.width(), snapshot.grid.height());

    Direction::all()
        .iter()
        .copied()
        .filter(|dir| {
            let next = dir.apply(&head);
            next.in_bounds(width, height) && !snapshot.all_bodies.contains(&next)
        })
        .collect()
}
