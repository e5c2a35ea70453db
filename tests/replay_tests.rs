// Replay integration tests
//
// Writes decisions through the debug logger, reads them back with the replay
// engine and checks that deterministic turns reproduce.

use std::path::PathBuf;

use tailchaser_snake::bot::Bot;
use tailchaser_snake::debug_logger::{DebugLogger, LogEntry};
use tailchaser_snake::replay::ReplayEngine;
use tailchaser_snake::types::{Battlesnake, Board, Coord, Direction};

fn temp_log(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{}_{}.jsonl", name, std::process::id()))
}

fn board_with_head(head: (i32, i32), food: &[(i32, i32)]) -> (Board, Battlesnake) {
    let you = Battlesnake {
        id: "me".to_string(),
        name: "me".to_string(),
        health: 100,
        body: vec![Coord { x: head.0, y: head.1 }, Coord { x: head.0, y: head.1 + 1 }],
        shout: None,
    };
    let rival = Battlesnake {
        id: "rival".to_string(),
        name: "rival".to_string(),
        health: 100,
        body: vec![Coord { x: 6, y: 6 }, Coord { x: 6, y: 5 }],
        shout: None,
    };
    let board = Board {
        width: 7,
        height: 7,
        food: food.iter().map(|&(x, y)| Coord { x, y }).collect(),
        snakes: vec![you.clone(), rival],
        hazards: vec![],
    };
    (board, you)
}

async fn write_log(path: &PathBuf, turns: &[(i32, (i32, i32), Vec<(i32, i32)>)]) {
    let logger = DebugLogger::new(true, &path.to_string_lossy()).await;

    for (number, head, food) in turns {
        let (board, you) = board_with_head(*head, food);
        let decision = Bot::compute_move(&board, &you, *number, Some(11)).unwrap();
        let entry = LogEntry {
            game_id: "replay-game".to_string(),
            turn: *number,
            chosen_move: decision.direction,
            reason: decision.reason,
            board,
            you,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        DebugLogger::write_entry(logger.handle(), entry).await;
    }
}

#[tokio::test]
async fn test_logged_game_replays_without_mismatches() {
    let path = temp_log("replay_roundtrip");
    write_log(
        &path,
        &[
            (1, (2, 3), vec![(2, 1)]),
            (2, (2, 2), vec![(2, 1)]),
            (3, (3, 3), vec![]),
        ],
    )
    .await;

    let engine = ReplayEngine::new(11, false);
    let entries = engine.load_log_file(&path).unwrap();
    assert_eq!(entries.len(), 3);

    let results = engine.replay_all(&entries);
    let stats = engine.generate_stats(&results);
    assert_eq!(stats.total_turns, 3);
    assert_eq!(stats.mismatches, 0);

    assert!(engine
        .validate_expected_moves(&entries, &[(1, vec![Direction::Up])])
        .is_ok());

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_specific_turns_can_be_replayed() {
    let path = temp_log("replay_turns");
    write_log(&path, &[(5, (1, 1), vec![(1, 0)]), (6, (1, 0), vec![])]).await;

    let engine = ReplayEngine::new(11, true);
    let entries = engine.load_log_file(&path).unwrap();
    let results = engine.replay_turns(&entries, &[6]).unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].turn, 6);
    assert!(results[0].matches);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_missing_log_file_is_an_error() {
    let engine = ReplayEngine::new(0, false);
    assert!(engine.load_log_file("does/not/exist.jsonl").is_err());
}

#[test]
fn test_garbage_line_reports_line_number() {
    let path = temp_log("replay_garbage");
    std::fs::write(&path, "\nnot json\n").unwrap();

    let engine = ReplayEngine::new(0, false);
    let err = engine.load_log_file(&path).unwrap_err();
    assert!(err.contains("line 2"), "unexpected error: {}", err);

    let _ = std::fs::remove_file(&path);
}
