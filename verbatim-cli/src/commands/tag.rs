//! Tag command implementation

use super::GlobalArgs;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use verbatim_core::VocabularyModel;
use verbatim_engine::TagProcessor;

/// Arguments for the tag command
#[derive(Debug, Args)]
pub struct TagArgs {
    /// Path to the stored model file
    pub model: PathBuf,
}

impl TagArgs {
    /// Execute the tag command
    pub fn execute(&self, global: &GlobalArgs) -> Result<()> {
        let config = global.load_config()?;
        let engine = global.engine_config(&config);
        let model = VocabularyModel::load(&self.model)
            .with_context(|| format!("Failed to load model: {}", self.model.display()))?;
        let processor = TagProcessor::from_model(model);
        global.run_processor(&config, engine, &processor)?;
        Ok(())
    }
}
