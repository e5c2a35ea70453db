// Battlesnake endpoint logic
//
// Holds only static configuration and the decision log handle; every /move is
// computed from the request snapshot alone, so concurrent games share nothing.

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use std::time::Instant;

use crate::board::Snapshot;
use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::error::{MoveError, SnapshotError};
use crate::policy::{decide_move, Decision};
use crate::types::{Battlesnake, Board, Game, GameEvent};

pub struct Bot {
    config: Config,
    logger: DebugLogger,
}

impl Bot {
    /// Creates a bot without decision logging
    pub fn new(config: Config) -> Self {
        Bot {
            config,
            logger: DebugLogger::disabled(),
        }
    }

    pub fn with_logger(config: Config, logger: DebugLogger) -> Self {
        Bot { config, logger }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": appearance.apiversion,
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
        })
    }

    /// Start-of-game handshake, answers with our display color
    /// Corresponds to POST /start endpoint
    pub fn start(&self, event: &GameEvent) -> Value {
        info!("GAME START {}", event.game_id());

        let appearance = &self.config.appearance;
        json!({
            "color": appearance.color,
            "headType": appearance.head,
            "tailType": appearance.tail,
        })
    }

    /// Liveness check
    /// Corresponds to POST /ping endpoint
    pub fn ping(&self) -> Value {
        json!({})
    }

    /// Called when a game ends; the engine ignores the response
    /// Corresponds to POST /end endpoint
    pub fn end(&self, event: &GameEvent) -> Value {
        info!("GAME OVER {}", event.game_id());
        json!({})
    }

    /// Computes the next move
    /// Corresponds to POST /move endpoint
    ///
    /// The search runs on tokio's blocking pool. A malformed snapshot is
    /// returned as an error rather than answered with a guessed move.
    pub async fn get_move(
        &self,
        game: &Game,
        turn: &i32,
        board: &Board,
        you: &Battlesnake,
    ) -> Result<Value, MoveError> {
        let start_time = Instant::now();
        let turn = *turn;
        let seed = self.config.policy.rng_seed;

        let task_board = board.clone();
        let task_you = you.clone();
        let decision = tokio::task::spawn_blocking(move || {
            Bot::compute_move(&task_board, &task_you, turn, seed)
        })
        .await
        .map_err(|e| MoveError::Worker(e.to_string()))?
        .map_err(|e| {
            warn!("Turn {}: rejecting snapshot: {}", turn, e);
            MoveError::from(e)
        })?;

        info!(
            "Turn {}: Chose {} ({}, time: {}ms)",
            turn,
            decision.direction,
            decision.reason.as_str(),
            start_time.elapsed().as_millis()
        );

        self.logger
            .log_move(&game.id, turn, board.clone(), you.clone(), &decision);

        Ok(json!({ "move": decision.direction.as_str() }))
    }

    /// Synchronous decision for one snapshot
    pub fn compute_move(
        board: &Board,
        you: &Battlesnake,
        turn: i32,
        seed: Option<u64>,
    ) -> Result<Decision, SnapshotError> {
        let snapshot = Snapshot::from_state(board, you)?;
        let mut rng = Self::rng_for_turn(seed, turn);
        Ok(decide_move(&snapshot, &mut rng))
    }

    /// Seeded with `seed + turn` when a seed is configured, from the OS otherwise
    pub fn rng_for_turn(seed: Option<u64>, turn: i32) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(turn as u64)),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coord;

    fn lone_snake_board(body: Vec<Coord>) -> (Board, Battlesnake) {
        let you = Battlesnake {
            id: "me".to_string(),
            name: "me".to_string(),
            health: 100,
            body,
            shout: None,
        };
        let board = Board {
            width: 5,
            height: 5,
            food: vec![],
            snakes: vec![you.clone()],
            hazards: vec![],
        };
        (board, you)
    }

    #[test]
    fn test_start_returns_configured_color() {
        let bot = Bot::new(Config::default_hardcoded());
        let response = bot.start(&GameEvent::default());
        assert_eq!(response["color"], "#ff00ff");
    }

    #[test]
    fn test_ping_and_end_are_empty_objects() {
        let bot = Bot::new(Config::default_hardcoded());
        assert_eq!(bot.ping(), json!({}));
        assert_eq!(bot.end(&GameEvent::default()), json!({}));
    }

    #[test]
    fn test_seeded_compute_move_is_deterministic() {
        let (board, you) = lone_snake_board(vec![Coord::new(2, 2)]);
        let a = Bot::compute_move(&board, &you, 3, Some(10)).unwrap();
        let b = Bot::compute_move(&board, &you, 3, Some(10)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_compute_move_rejects_malformed_snapshot() {
        let (board, you) = lone_snake_board(vec![Coord::new(9, 9)]);
        assert!(Bot::compute_move(&board, &you, 0, None).is_err());
    }

    #[tokio::test]
    async fn test_get_move_returns_move_token() {
        let bot = Bot::new(Config::default_hardcoded());
        let (board, you) = lone_snake_board(vec![Coord::new(2, 2)]);
        let response = bot
            .get_move(&Game::default(), &0, &board, &you)
            .await
            .unwrap();
        let token = response["move"].as_str().unwrap();
        assert!(["up", "down", "left", "right"].contains(&token));
    }

    #[tokio::test]
    async fn test_get_move_surfaces_snapshot_error() {
        let bot = Bot::new(Config::default_hardcoded());
        let (board, you) = lone_snake_board(vec![Coord::new(-1, 0)]);
        let result = bot.get_move(&Game::default(), &0, &board, &you).await;
        assert!(matches!(result, Err(MoveError::Snapshot(_))));
    }
}
