// Board model: turns a per-turn snapshot into a typed obstacle grid
//
// Every snake's tail is left walkable because it moves away on the next step.
// All other body segments, our own included, are blocked.

use crate::error::SnapshotError;
use crate::types::{Battlesnake, Board, Coord, Direction};

/// Largest board accepted, in cells. Official boards are at most 25x25.
pub const MAX_BOARD_CELLS: usize = 1 << 16;

/// Walkable/blocked map of the board, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    blocked: Vec<bool>,
}

impl Grid {
    /// Creates an obstacle-free grid. Dimensions must be positive.
    pub fn new(width: i32, height: i32) -> Self {
        let cells = (width.max(0) as usize) * (height.max(0) as usize);
        Grid {
            width,
            height,
            blocked: vec![false; cells],
        }
    }

    /// Creates a grid with the given cells blocked. Cells outside the board are ignored.
    pub fn with_obstacles<I>(width: i32, height: i32, obstacles: I) -> Self
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut grid = Grid::new(width, height);
        for cell in obstacles {
            if let Some(idx) = grid.index(&cell) {
                grid.blocked[idx] = true;
            }
        }
        grid
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.blocked.len()
    }

    pub fn contains(&self, coord: &Coord) -> bool {
        coord.in_bounds(self.width, self.height)
    }

    /// Row-major index of an in-bounds cell
    pub fn index(&self, coord: &Coord) -> Option<usize> {
        if self.contains(coord) {
            Some(coord.y as usize * self.width as usize + coord.x as usize)
        } else {
            None
        }
    }

    /// Inverse of `index`
    pub fn coord_at(&self, idx: usize) -> Coord {
        let width = self.width as usize;
        Coord::new((idx % width) as i32, (idx / width) as i32)
    }

    /// Out-of-bounds cells count as blocked
    pub fn is_blocked(&self, coord: &Coord) -> bool {
        match self.index(coord) {
            Some(idx) => self.blocked[idx],
            None => true,
        }
    }

    pub fn is_walkable(&self, coord: &Coord) -> bool {
        !self.is_blocked(coord)
    }

    /// Walkable 4-connected neighbors, in `Direction::all()` order
    pub fn walkable_neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        Direction::all()
            .into_iter()
            .map(move |dir| dir.apply(&coord))
            .filter(move |next| self.is_walkable(next))
    }
}

/// Everything the move policy needs for one turn
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub grid: Grid,
    pub our_id: String,
    /// Our body, head first
    pub our_body: Vec<Coord>,
    /// Bodies of every other snake, head first, in board order
    pub opponent_bodies: Vec<Vec<Coord>>,
    /// Every blocked body segment on the board, ours included
    pub all_bodies: Vec<Coord>,
    pub food: Vec<Coord>,
}

impl Snapshot {
    /// Validates the raw board and builds the grid.
    ///
    /// Opponents are the snakes whose id differs in value from `you.id`; an
    /// entry in `board.snakes` with our id is skipped and `you.body` is used instead.
    pub fn from_state(board: &Board, you: &Battlesnake) -> Result<Self, SnapshotError> {
        let cells = if board.width > 0 && board.height > 0 {
            (board.width as usize).checked_mul(board.height as usize)
        } else {
            None
        };
        if !matches!(cells, Some(n) if n <= MAX_BOARD_CELLS) {
            return Err(SnapshotError::InvalidDimensions {
                width: board.width,
                height: board.height,
                max_cells: MAX_BOARD_CELLS,
            });
        }

        validate_body(you, board.width, board.height)?;

        let opponents: Vec<&Battlesnake> =
            board.snakes.iter().filter(|s| s.id != you.id).collect();
        for snake in &opponents {
            validate_body(snake, board.width, board.height)?;
        }

        if let Some(coord) = board
            .food
            .iter()
            .find(|f| !f.in_bounds(board.width, board.height))
        {
            return Err(SnapshotError::FoodOutOfBounds { coord: *coord });
        }

        let our_body = you.body.clone();
        let opponent_bodies: Vec<Vec<Coord>> =
            opponents.iter().map(|s| s.body.clone()).collect();

        let all_bodies: Vec<Coord> = std::iter::once(&our_body)
            .chain(opponent_bodies.iter())
            .flat_map(|body| blocking_segments(body).iter().copied())
            .collect();

        let grid = Grid::with_obstacles(board.width, board.height, all_bodies.iter().copied());

        Ok(Snapshot {
            grid,
            our_id: you.id.clone(),
            our_body,
            opponent_bodies,
            all_bodies,
            food: board.food.clone(),
        })
    }

    pub fn head(&self) -> Coord {
        self.our_body[0]
    }

    pub fn tail(&self) -> Coord {
        self.our_body[self.our_body.len() - 1]
    }
}

/// Body segments that block movement: all but the tail
pub fn blocking_segments(body: &[Coord]) -> &[Coord] {
    &body[..body.len().saturating_sub(1)]
}

fn validate_body(snake: &Battlesnake, width: i32, height: i32) -> Result<(), SnapshotError> {
    if snake.body.is_empty() {
        return Err(SnapshotError::EmptyBody {
            snake_id: snake.id.clone(),
        });
    }

    match snake.body.iter().find(|c| !c.in_bounds(width, height)) {
        Some(coord) => Err(SnapshotError::BodyOutOfBounds {
            snake_id: snake.id.clone(),
            coord: *coord,
        }),
        None => Ok(()),
    }
}
