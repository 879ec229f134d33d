use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Action, ActionError, LaserEventKind, LaserTrace, MatchOutcome};

/// Number of entries a [`GameLog`] keeps before dropping the oldest.
pub const GAME_LOG_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Action,
    Laser,
    Win,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
}

/// Bounded, human-readable history of a match.
///
/// Every entry is also emitted as a `tracing` event.
#[derive(Debug, Clone, Default)]
pub struct GameLog {
    entries: VecDeque<LogEntry>,
}

impl GameLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            LogLevel::Action | LogLevel::Laser => tracing::debug!(?level, "{message}"),
            LogLevel::Info | LogLevel::Win | LogLevel::Error => {
                tracing::info!(?level, "{message}");
            }
        }
        if self.entries.len() == GAME_LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            timestamp: Utc::now(),
            level,
            message,
        });
    }

    pub fn log_action(&mut self, action: &Action) {
        self.log(LogLevel::Action, action.to_string());
    }

    /// One entry per piece the beam interacted with.
    pub fn log_laser(&mut self, trace: &LaserTrace) {
        for event in &trace.events {
            let verb = match event.kind {
                LaserEventKind::Destroy => "destroyed",
                LaserEventKind::Reflect => "reflected by",
                LaserEventKind::Block => "blocked by",
                LaserEventKind::Start | LaserEventKind::Path | LaserEventKind::Exit => continue,
            };
            if let Some(piece) = event.piece {
                self.log(
                    LogLevel::Laser,
                    format!("laser {verb} {} at ({}, {})", piece.kind(), event.x, event.y),
                );
            }
        }
        if trace.capped {
            self.log(LogLevel::Laser, "laser stopped after iteration limit");
        }
    }

    pub fn log_game_over(&mut self, outcome: MatchOutcome) {
        let message = match outcome {
            MatchOutcome::Winner(player) => format!("game over: {player} wins"),
            MatchOutcome::Draw => "game over: draw".to_owned(),
        };
        self.log(LogLevel::Win, message);
    }

    pub fn log_error(&mut self, error: &ActionError) {
        self.log(LogLevel::Error, error.to_string());
    }

    pub fn entries(&self) -> impl ExactSizeIterator<Item = &LogEntry> + '_ {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Direction, PieceKind, Player, Position, laser_simulator};

    #[test]
    fn test_log_is_bounded() {
        let mut log = GameLog::new();
        for i in 0..GAME_LOG_CAPACITY + 5 {
            log.log(LogLevel::Info, format!("entry {i}"));
        }
        assert_eq!(log.entries().len(), GAME_LOG_CAPACITY);
        assert_eq!(log.entries().next().unwrap().message, "entry 5");
    }

    #[test]
    fn test_log_laser_lists_interactions() {
        let mut board = Board::new();
        for (kind, owner, (x, y), facing) in [
            (PieceKind::Emitter, Player::One, (0, 3), Direction::East),
            (PieceKind::Mirror, Player::One, (3, 3), Direction::East),
            (PieceKind::Shield, Player::Two, (3, 0), Direction::South),
        ] {
            board
                .add_piece(kind, owner, Position::new(x, y), facing)
                .unwrap();
        }
        let trace = laser_simulator::simulate(&board, Player::One);

        let mut log = GameLog::new();
        log.log_laser(&trace);
        let messages = log.entries().map(|e| e.message.as_str()).collect::<Vec<_>>();
        assert_eq!(
            messages,
            [
                "laser reflected by mirror at (3, 3)",
                "laser blocked by shield at (3, 0)",
            ]
        );
        assert!(log.entries().all(|e| e.level == LogLevel::Laser));
    }

    #[test]
    fn test_log_game_over() {
        let mut log = GameLog::new();
        log.log_game_over(MatchOutcome::Winner(Player::Two));
        log.log_game_over(MatchOutcome::Draw);
        log.log_error(&ActionError::GameOver);
        let entries = log.entries().collect::<Vec<_>>();
        assert_eq!(entries[0].message, "game over: player 2 wins");
        assert_eq!(entries[0].level, LogLevel::Win);
        assert_eq!(entries[1].message, "game over: draw");
        assert_eq!(entries[2].level, LogLevel::Error);

        let json = serde_json::to_value(entries[2]).unwrap();
        assert_eq!(json["level"], "error");
    }
}
