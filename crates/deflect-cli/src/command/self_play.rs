use std::{path::PathBuf, time::Duration};

use chrono::Utc;
use deflect_ai::{
    action_evaluator::{MaterialActionEvaluator, MaterialWeights},
    turn_evaluator::{DEFAULT_TIME_BUDGET, TurnEvaluator},
};
use deflect_engine::{GameEngine, SetupSeed};
use rand::Rng as _;

use crate::{
    schema::record::MatchRecord,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SelfPlayArg {
    /// Setup seed as 32 hex digits (random if omitted)
    #[arg(long)]
    seed: Option<SetupSeed>,
    /// JSON file with AI scoring weights (defaults if omitted)
    #[arg(long)]
    weights: Option<PathBuf>,
    /// Thinking time per move in milliseconds [default: 230]
    #[arg(long)]
    time_budget_ms: Option<u64>,
    /// Maximum number of turns to play (until the match ends if omitted)
    #[arg(long)]
    max_turns: Option<usize>,
    /// Output file path for the match record
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SelfPlayArg) -> anyhow::Result<()> {
    let SelfPlayArg {
        seed,
        weights,
        time_budget_ms,
        max_turns,
        output,
    } = arg;

    let weights = match weights {
        Some(path) => util::read_weights_file(path)?,
        None => MaterialWeights::default(),
    };
    let seed = seed.unwrap_or_else(|| rand::rng().random());

    let evaluator = TurnEvaluator::new(Box::new(MaterialActionEvaluator::new(weights)))
        .with_time_budget(time_budget_ms.map_or(DEFAULT_TIME_BUDGET, Duration::from_millis));
    let mut engine = GameEngine::with_seed(seed);

    eprintln!("Playing match with seed {seed}...");
    let turn_limit = max_turns.unwrap_or(usize::MAX);
    let status = evaluator.play_match(&mut engine, turn_limit, &mut rand::rng())?;
    let turns = engine.history().len();
    match status.outcome() {
        Some(outcome) => eprintln!("Match finished after {turns} turns: {outcome}"),
        None => eprintln!("Turn limit reached after {turns} turns"),
    }

    let record = MatchRecord {
        recorded_at: Utc::now(),
        seed,
        weights,
        outcome: status.outcome(),
        turns: engine.history().to_vec(),
        final_snapshot: engine.snapshot(),
    };
    Output::save_json(&record, output.clone())?;
    Ok(())
}
