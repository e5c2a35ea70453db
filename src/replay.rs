// Replay module for re-running logged decisions
//
// This module provides functionality to:
// 1. Parse JSONL decision logs
// 2. Re-run the move policy on each logged snapshot
// 3. Compare logged vs replayed moves and report differences

use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::bot::Bot;
use crate::debug_logger::LogEntry;
use crate::policy::DecisionReason;
use crate::types::Direction;

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i32,
    pub original_move: Direction,
    pub original_reason: DecisionReason,
    pub replayed_move: Direction,
    pub replayed_reason: DecisionReason,
    pub matches: bool,
    pub computation_time_us: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default, PartialEq)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub random_turns: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing decision logs
pub struct ReplayEngine {
    seed: u64,
    verbose: bool,
}

impl ReplayEngine {
    /// `seed` drives the random fallback for every replayed turn
    pub fn new(seed: u64, verbose: bool) -> Self {
        ReplayEngine { seed, verbose }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays a single log entry and compares the result.
    ///
    /// A turn decided by the random fallback matches whenever the replay also
    /// lands in the random fallback, since the logged RNG state is not recorded.
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, String> {
        let start_time = Instant::now();
        let decision = Bot::compute_move(&entry.board, &entry.you, entry.turn, Some(self.seed))
            .map_err(|e| format!("Turn {}: {}", entry.turn, e))?;
        let computation_time_us = start_time.elapsed().as_micros();

        let matches = if entry.reason == DecisionReason::Random {
            decision.reason == DecisionReason::Random
        } else {
            decision.direction == entry.chosen_move && decision.reason == entry.reason
        };

        let result = ReplayResult {
            turn: entry.turn,
            original_move: entry.chosen_move,
            original_reason: entry.reason,
            replayed_move: decision.direction,
            replayed_reason: decision.reason,
            matches,
            computation_time_us,
        };

        if self.verbose {
            if matches {
                info!(
                    "Turn {}: MATCH - {} ({})",
                    entry.turn,
                    decision.direction,
                    decision.reason.as_str()
                );
            } else {
                warn!(
                    "Turn {}: MISMATCH - Original: {} ({}), Replayed: {} ({})",
                    entry.turn,
                    entry.chosen_move,
                    entry.reason.as_str(),
                    decision.direction,
                    decision.reason.as_str()
                );
            }
        }

        Ok(result)
    }

    /// Replays all entries, skipping the ones that fail
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        let mut results = Vec::new();

        for entry in entries {
            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => warn!("Failed to replay turn {}: {}", entry.turn, e),
            }
        }

        results
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[LogEntry],
        turn_numbers: &[i32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;

            results.push(self.replay_entry(entry)?);
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let random_turns = results
            .iter()
            .filter(|r| r.original_reason == DecisionReason::Random)
            .count();
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches: total_turns - matches,
            random_turns,
            match_rate,
        }
    }

    /// Prints a report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("Random turns:   {}", stats.random_turns);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_us as f64)
                .sum::<f64>()
                / results.len() as f64;
            println!("Average Computation Time:   {:.1}us\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Turn {}: {} ({}) → {} ({})",
                    result.turn,
                    result.original_move,
                    result.original_reason.as_str(),
                    result.replayed_move,
                    result.replayed_reason.as_str()
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(i32, Vec<Direction>)], // (turn, acceptable_moves)
    ) -> Result<(), String> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| format!("Turn {} not found in log", turn))?;

            if !acceptable.contains(&entry.chosen_move) {
                return Err(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    entry.chosen_move
                ));
            }
        }

        Ok(())
    }
}
