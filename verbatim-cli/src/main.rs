use clap::Parser;
use verbatim_cli::{Cli, CliResult};

fn main() -> CliResult<()> {
    Cli::parse().execute()
}
