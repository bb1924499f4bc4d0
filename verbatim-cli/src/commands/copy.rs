//! Copy command implementation

use super::GlobalArgs;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use verbatim_engine::CopyProcessor;

/// Arguments for the copy command
///
/// Input lines are plain text. Tokens the copy rules select are prefixed
/// with the copy symbol; everything else is passed through.
#[derive(Debug, Args)]
pub struct CopyArgs {
    /// Prefix of marked tokens (default from config: @@)
    #[arg(long, value_name = "SYMBOL")]
    pub symbol: Option<String>,

    /// Copy rule version, 0 to 5 (default from config: 5)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u8).range(0..=5))]
    pub rule_version: Option<u8>,

    /// Dictionary of words to copy, one per line
    #[arg(short = 'D', long, value_name = "FILE")]
    pub dict: Option<PathBuf>,

    /// Words exempted from the dictionary rule, one per line
    #[arg(short = 'N', long, value_name = "FILE")]
    pub antidict: Option<PathBuf>,

    /// Never mark punctuation-only tokens
    #[arg(long)]
    pub exclude_punct: bool,
}

impl CopyArgs {
    /// Execute the copy command
    pub fn execute(&self, global: &GlobalArgs) -> Result<()> {
        let mut config = global.load_config()?;
        let copy = &mut config.copy;
        if let Some(symbol) = &self.symbol {
            copy.symbol = symbol.clone();
        }
        if let Some(version) = self.rule_version {
            copy.rule_version = version;
        }
        if self.dict.is_some() {
            copy.dictionary = self.dict.clone();
        }
        if self.antidict.is_some() {
            copy.antidictionary = self.antidict.clone();
        }
        copy.exclude_punct |= self.exclude_punct;

        let processor = CopyProcessor::new(copy.heuristics()?, copy.symbol.as_str());
        let engine = global.engine_config(&config);
        global.run_processor(&config, engine, &processor)?;
        Ok(())
    }
}
