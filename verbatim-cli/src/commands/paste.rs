//! Paste command implementation

use super::GlobalArgs;
use anyhow::Result;
use clap::Args;
use verbatim_engine::PasteProcessor;

/// Arguments for the paste command
#[derive(Debug, Args)]
pub struct PasteArgs {
    /// Replace unresolvable placeholders with nothing and count them
    #[arg(long)]
    pub ignore_errors: bool,
}

impl PasteArgs {
    /// Execute the paste command
    pub fn execute(&self, global: &GlobalArgs) -> Result<()> {
        let config = global.load_config()?;
        let mut engine = global.engine_config(&config);
        engine.ignore_errors |= self.ignore_errors;
        let processor = PasteProcessor::new(&engine);
        global.run_processor(&config, engine, &processor)?;
        Ok(())
    }
}
