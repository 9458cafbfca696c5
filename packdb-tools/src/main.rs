//! A set of tools for packdb.

mod bench;
mod stress;

mod error;
pub(crate) use error::{Error, Result};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Bench(bench::Args),
    Stress(stress::Args),
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    match args.cmd {
        Commands::Bench(args) => bench::run(args)?,
        Commands::Stress(args) => stress::run(args)?,
    }
    Ok(())
}
