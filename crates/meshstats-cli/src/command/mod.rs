use clap::{Parser, Subcommand};

use self::{compute::ComputeArg, fields::FieldsArg};

mod compute;
mod fields;
mod table;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// List the fields and regions shared by a set of models
    Fields(#[clap(flatten)] FieldsArg),
    /// Compute region statistics and export them
    Compute(#[clap(flatten)] ComputeArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Fields(arg) => fields::run(&arg)?,
        Mode::Compute(arg) => compute::run(&arg)?,
    }
    Ok(())
}
