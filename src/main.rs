pub mod commands;
use anyhow::Error;
use clap::{Args, Parser, Subcommand};
use commands::{clean, patch, prepare, versions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the engine versions embedded in a shared library
    Versions(VersionsArgs),
    /// Patch a resource pak archive in place
    Patch(PatchArgs),
    /// Copy the shipped resources and patch the copy
    Prepare,
    /// Remove the scratch resources directory
    Clean,
}

#[derive(Args)]
struct VersionsArgs {
    library: PathBuf,
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct PatchArgs {
    pak: PathBuf,
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Versions(args) => versions(&args.library, args.json),
        Commands::Patch(args) => patch(&args.pak),
        Commands::Prepare => prepare(),
        Commands::Clean => clean(),
    }
}
