use std::path::PathBuf;

use deflect_engine::{GameEngine, SetupSeed};
use rand::Rng as _;

use crate::{schema::record::InitialSetup, util::Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SetupArg {
    /// Setup seed as 32 hex digits (random if omitted)
    #[arg(long)]
    seed: Option<SetupSeed>,
    /// Print the board as text instead of JSON
    #[arg(long)]
    text: bool,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SetupArg) -> anyhow::Result<()> {
    let SetupArg { seed, text, output } = arg;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let engine = GameEngine::with_seed(seed);
    tracing::info!(%seed, "initial position generated");

    if *text {
        let mut output = Output::from_output_path(output.clone())?;
        output.write_text(&format!("seed: {seed}\n{}", engine.state().board()))?;
    } else {
        let setup = InitialSetup {
            seed,
            snapshot: engine.snapshot(),
        };
        Output::save_json(&setup, output.clone())?;
    }
    Ok(())
}
