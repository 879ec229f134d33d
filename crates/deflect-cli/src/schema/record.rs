use chrono::{DateTime, Utc};
use deflect_ai::action_evaluator::MaterialWeights;
use deflect_engine::{HistoryEntry, MatchOutcome, SetupSeed, Snapshot};
use serde::{Deserialize, Serialize};

/// Opening position produced by the `setup` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialSetup {
    pub seed: SetupSeed,
    pub snapshot: Snapshot,
}

/// Recorded self-play match with enough metadata to replay it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Timestamp when recording was created (ISO 8601 format)
    pub recorded_at: DateTime<Utc>,
    /// Seed of the opening layout
    pub seed: SetupSeed,
    /// Scoring weights used by both AI players
    pub weights: MaterialWeights,
    /// `None` if the turn limit was reached before the match ended
    pub outcome: Option<MatchOutcome>,
    /// Accepted actions in the order they were played
    pub turns: Vec<HistoryEntry>,
    /// Snapshot after the last action
    pub final_snapshot: Snapshot,
}
