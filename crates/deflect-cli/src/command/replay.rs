use std::path::PathBuf;

use anyhow::Context;
use deflect_engine::GameEngine;

use crate::{schema::record::MatchRecord, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReplayArg {
    /// Path to the match record file (JSON format)
    record_file: PathBuf,
    /// Print the board after every turn
    #[arg(long)]
    verbose: bool,
}

pub(crate) fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let ReplayArg {
        record_file,
        verbose,
    } = arg;

    eprintln!("Loading match record from {}", record_file.display());
    let record: MatchRecord = util::read_json_file("match record", record_file)?;
    eprintln!("Loaded {} turns", record.turns.len());

    let engine = replay_record(&record, |engine| {
        if *verbose {
            println!("turn {}:", engine.snapshot().turn_count);
            println!("{}", engine.state().board());
        }
    })?;

    match engine.status().outcome() {
        Some(outcome) => println!("{outcome}"),
        None => println!("unfinished"),
    }
    eprintln!("Replay matches the recorded final position");
    Ok(())
}

/// Plays the recorded actions on a fresh engine built from the record's seed.
///
/// Fails if an action is rejected or the final snapshot differs from the
/// recorded one.
fn replay_record<F>(record: &MatchRecord, mut on_turn: F) -> anyhow::Result<GameEngine>
where
    F: FnMut(&GameEngine),
{
    let mut engine = GameEngine::with_seed(record.seed);
    for entry in &record.turns {
        let turn = engine.state().turns().turn_count();
        anyhow::ensure!(
            turn == entry.turn,
            "Recorded turn {} found at turn {turn}",
            entry.turn
        );
        engine
            .execute_action(&entry.action)
            .with_context(|| format!("Turn {turn}: recorded action rejected: {}", entry.action))?;
        on_turn(&engine);
    }
    anyhow::ensure!(
        engine.snapshot() == record.final_snapshot,
        "Final position differs from the record"
    );
    Ok(engine)
}
