//! Copy marking of monolingual text

use super::RecordProcessor;
use crate::record::Record;
use crate::summary::RunSummary;
use verbatim_core::CopyHeuristics;

/// Prefixes tokens the copy heuristics select with a copy symbol
#[derive(Debug, Clone)]
pub struct CopyProcessor {
    heuristics: CopyHeuristics,
    symbol: String,
}

impl CopyProcessor {
    /// Mark with `symbol` (`@@` by convention)
    pub fn new(heuristics: CopyHeuristics, symbol: impl Into<String>) -> Self {
        Self {
            heuristics,
            symbol: symbol.into(),
        }
    }
}

impl RecordProcessor for CopyProcessor {
    fn name(&self) -> &'static str {
        "copy"
    }

    fn columns(&self) -> &'static [usize] {
        &[1]
    }

    fn process(
        &self,
        record: &Record<'_>,
        _summary: &mut RunSummary,
    ) -> verbatim_core::Result<Vec<String>> {
        let marked = self.heuristics.mark(&record.tokens(0), &self.symbol);
        if marked.whole_line {
            log::debug!("line {}: most tokens marked, marking all", record.line());
        }
        Ok(vec![marked.tokens.join(" ")])
    }
}
