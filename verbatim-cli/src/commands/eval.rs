//! Eval command implementation

use super::GlobalArgs;
use crate::error::CliError;
use crate::output::open_output;
use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use verbatim_core::{evaluate, Evaluation, LabelScore, MacroAverage, VocabularyModel};
use verbatim_engine::{read_labeled, RunSummary};

/// Arguments for the eval command
#[derive(Debug, Args)]
pub struct EvalArgs {
    /// Path to the stored model file
    pub model: PathBuf,

    /// Write the scores as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct EvalReport<'a> {
    scores: &'a [LabelScore],
    average: Option<MacroAverage>,
}

impl EvalArgs {
    /// Execute the eval command
    pub fn execute(&self, global: &GlobalArgs) -> Result<()> {
        let config = global.load_config()?;
        let engine = global.engine_config(&config);
        let model = VocabularyModel::load(&self.model)
            .with_context(|| format!("Failed to load model: {}", self.model.display()))?;

        let lines = global.read_lines()?;
        let mut summary = RunSummary::default();
        let data = read_labeled(&lines, &model.featurizer(), engine.malformed_policy, &mut summary)
            .context("Failed to read test data")?;
        if data.is_empty() {
            return Err(CliError::ProcessingError("no labeled records in input".to_string()).into());
        }
        let evaluation = evaluate(&model, &data)?;

        let mut writer = open_output(global.output.as_deref())?;
        writer.write_lines([self.render(&evaluation)?])?;
        writer.finish()?;

        summary.log_warnings();
        global.report(&config, "eval", &summary);
        Ok(())
    }

    fn render(&self, evaluation: &Evaluation) -> Result<String> {
        if self.json {
            let report = EvalReport {
                scores: &evaluation.scores,
                average: evaluation.macro_average(),
            };
            return Ok(serde_json::to_string_pretty(&report)?);
        }
        Ok(evaluation.to_string().trim_end().to_string())
    }
}
