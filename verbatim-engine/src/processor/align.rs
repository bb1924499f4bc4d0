//! Bitext phrase alignment

use super::RecordProcessor;
use crate::config::EngineConfig;
use crate::record::{join_columns, Record};
use crate::summary::RunSummary;
use verbatim_core::GreedyAligner;

/// Replaces shared phrases on both sides of `SRC\tTGT` with `DNT_<N>`.
///
/// Output is `SRC_CUT\tTGT_CUT\tPHRASES` with the flat side channel, since
/// aligned phrases carry no category.
#[derive(Debug, Clone, Copy)]
pub struct AlignProcessor {
    aligner: GreedyAligner,
}

impl AlignProcessor {
    /// Aligner policy comes from `unmatched_policy`
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            aligner: GreedyAligner::new(config.unmatched_policy.into()),
        }
    }
}

impl RecordProcessor for AlignProcessor {
    fn name(&self) -> &'static str {
        "align"
    }

    fn columns(&self) -> &'static [usize] {
        &[2]
    }

    fn process(
        &self,
        record: &Record<'_>,
        summary: &mut RunSummary,
    ) -> verbatim_core::Result<Vec<String>> {
        let alignment = self.aligner.align(&record.tokens(0), &record.tokens(1))?;
        summary.unmatched_runs += alignment.unmatched_runs;
        let phrases = alignment.side_channel().encode()?;
        Ok(vec![join_columns([
            alignment.source.join(" "),
            alignment.target.join(" "),
            phrases,
        ])])
    }
}
