//! List command implementation

use anyhow::Result;
use clap::Subcommand;
use verbatim_engine::PrepareFormat;

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List prepare output formats and side channel encodings
    Formats,
}

impl ListCommands {
    /// Print the requested listing to stdout
    pub fn execute(&self) -> Result<()> {
        match self {
            ListCommands::Formats => {
                println!("Prepare formats:");
                for format in PrepareFormat::ALL {
                    println!("  {:<10} {}", format.as_str(), format.description());
                }
                println!();
                println!("Side channel encodings:");
                println!("  typed      JSON object of phrases per type, DNT_<TYPE>_<N>");
                println!("  flat       space separated |+|-joined phrases, DNT_<N>");
            }
        }
        Ok(())
    }
}
