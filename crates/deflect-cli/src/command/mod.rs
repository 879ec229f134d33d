use clap::{Parser, Subcommand};

use self::{replay::ReplayArg, self_play::SelfPlayArg, setup::SetupArg};

mod replay;
mod self_play;
mod setup;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Print the opening position for a seed
    Setup(#[clap(flatten)] SetupArg),
    /// Let the AI play both sides and record the match
    SelfPlay(#[clap(flatten)] SelfPlayArg),
    /// Re-apply a recorded match and check its final position
    Replay(#[clap(flatten)] ReplayArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Setup(arg) => setup::run(&arg)?,
        Mode::SelfPlay(arg) => self_play::run(&arg)?,
        Mode::Replay(arg) => replay::run(&arg)?,
    }
    Ok(())
}
