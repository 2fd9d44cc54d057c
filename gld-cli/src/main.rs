//! GLD CLI - Command line tool for Great Lakes water level panels.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "gld-cli",
    version,
    about = "Great Lakes water level dashboard toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: gld_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    gld_cmd::run(cli.command)
}
