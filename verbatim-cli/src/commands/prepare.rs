//! Prepare command implementation

use super::GlobalArgs;
use anyhow::Result;
use clap::Args;
use verbatim_engine::{PrepareFormat, PrepareProcessor};

/// Arguments for the prepare command
#[derive(Debug, Args)]
pub struct PrepareArgs {
    /// Output format (see `verbatim list formats`)
    #[arg(short, long, default_value = "src-tags")]
    pub format: PrepareFormat,

    /// Swap the columns in input
    #[arg(short, long)]
    pub swap: bool,
}

impl PrepareArgs {
    /// Execute the prepare command
    pub fn execute(&self, global: &GlobalArgs) -> Result<()> {
        let config = global.load_config()?;
        let engine = global.engine_config(&config);
        let processor = PrepareProcessor::new(&engine, self.format, self.swap);
        let summary = global.run_processor(&config, engine, &processor)?;
        log::info!("Wrote {} records, format={}", summary.records, self.format);
        Ok(())
    }
}
