//! Align command implementation

use super::GlobalArgs;
use anyhow::Result;
use clap::Args;
use verbatim_engine::{AlignProcessor, UnmatchedRuns};

/// Arguments for the align command
#[derive(Debug, Args)]
pub struct AlignArgs {
    /// Fail on source DNT runs that match no phrase instead of leaving them uncut
    #[arg(long)]
    pub strict: bool,
}

impl AlignArgs {
    /// Execute the align command
    pub fn execute(&self, global: &GlobalArgs) -> Result<()> {
        let config = global.load_config()?;
        let mut engine = global.engine_config(&config);
        if self.strict {
            engine.unmatched_policy = UnmatchedRuns::Strict;
        }
        let processor = AlignProcessor::new(&engine);
        global.run_processor(&config, engine, &processor)?;
        Ok(())
    }
}
