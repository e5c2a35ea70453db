// Decision log: fire-and-forget async JSONL writer
//
// Each /move decision is appended as one line so games can be replayed later
// without blocking the request/response cycle.

use log::error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::policy::{Decision, DecisionReason};
use crate::types::{Battlesnake, Board, Direction};

/// One line of the decision log
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    #[serde(default)]
    pub game_id: String,
    pub turn: i32,
    pub chosen_move: Direction,
    pub reason: DecisionReason,
    pub board: Board,
    pub you: Battlesnake,
    pub timestamp: String,
}

/// Shared logger state; clones write to the same file
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger.
    /// If enabled, the log file is created (truncating an existing one).
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Decision logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs a move decision without waiting for the write.
    /// Must be called from within a tokio runtime.
    pub fn log_move(
        &self,
        game_id: &str,
        turn: i32,
        board: Board,
        you: Battlesnake,
        decision: &Decision,
    ) {
        if !self.enabled {
            return;
        }

        let entry = LogEntry {
            game_id: game_id.to_string(),
            turn,
            chosen_move: decision.direction,
            reason: decision.reason,
            board,
            you,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        let file_handle = self.file.clone();

        tokio::spawn(async move {
            Self::write_entry(file_handle, entry).await;
        });
    }

    /// Appends an entry and waits for the write to finish
    pub async fn write_entry(file_handle: Arc<Mutex<Option<File>>>, entry: LogEntry) {
        let mut file_guard = file_handle.lock().await;

        if let Some(file) = file_guard.as_mut() {
            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush debug log: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }

    /// Handle to the underlying file, for awaiting writes directly
    pub fn handle(&self) -> Arc<Mutex<Option<File>>> {
        self.file.clone()
    }
}
