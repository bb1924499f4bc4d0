//! Train command implementation

use super::GlobalArgs;
use crate::error::CliError;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use verbatim_core::labeling::DEFAULT_CONTEXT;
use verbatim_core::{Featurizer, LabelerTrainer, VocabularyTrainer};
use verbatim_engine::{read_labeled, RunSummary};

/// Arguments for the train command
#[derive(Debug, Args)]
pub struct TrainArgs {
    /// Path to store the model file
    pub model: PathBuf,

    /// Context in sequence
    #[arg(long, default_value_t = DEFAULT_CONTEXT)]
    pub context: usize,

    /// Probability that a training record is memorized
    #[arg(long, default_value_t = 1.0)]
    pub sample_rate: f64,

    /// Random seed for record sampling
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

impl TrainArgs {
    /// Execute the train command
    pub fn execute(&self, global: &GlobalArgs) -> Result<()> {
        let config = global.load_config()?;
        let engine = global.engine_config(&config);
        let featurizer = Featurizer::new(self.context);

        let lines = global.read_lines()?;
        let mut summary = RunSummary::default();
        let data = read_labeled(&lines, &featurizer, engine.malformed_policy, &mut summary)
            .context("Failed to read training data")?;
        if data.is_empty() {
            return Err(CliError::ProcessingError("no labeled records in input".to_string()).into());
        }
        let (features, labels): (Vec<_>, Vec<_>) = data.into_iter().unzip();

        let trainer = VocabularyTrainer {
            outside: engine.outside_tag.clone(),
            label: engine.dnt_label.clone(),
            ..VocabularyTrainer::default()
        }
        .sample_rate(self.sample_rate)
        .seed(self.seed)
        .context(self.context);
        let model = trainer.train(&features, &labels)?;
        model
            .save(&self.model)
            .with_context(|| format!("Failed to write model: {}", self.model.display()))?;

        let (positive, negative) = model.vocabulary_size();
        log::info!(
            "Saved model to {} ({positive} DNT words, {negative} outside words)",
            self.model.display()
        );
        summary.log_warnings();
        global.report(&config, "train", &summary);
        Ok(())
    }
}
