//! Per-record operations
//!
//! A [`RecordProcessor`] turns one parsed input line into zero or more output
//! lines and bumps the counters of the worker's [`RunSummary`]. Processors
//! hold only read-only state, so one instance serves every worker.

mod align;
mod copy;
mod cut;
mod entity;
mod paste;
mod prepare;
mod tag;

pub use align::AlignProcessor;
pub use copy::CopyProcessor;
pub use cut::CutProcessor;
pub use entity::{EntityCutProcessor, TaggedSide};
pub use paste::PasteProcessor;
pub use prepare::{PrepareFormat, PrepareProcessor};
pub use tag::TagProcessor;

use crate::config::MalformedPolicy;
use crate::error::{EngineError, Result};
use crate::record::Record;
use crate::summary::RunSummary;

/// One record-level operation
pub trait RecordProcessor: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Accepted column counts
    fn columns(&self) -> &'static [usize];

    /// Process one record
    fn process(
        &self,
        record: &Record<'_>,
        summary: &mut RunSummary,
    ) -> verbatim_core::Result<Vec<String>>;
}

/// Parse and process one line, applying the malformed-record policy.
///
/// Only column-count failures are subject to the policy; domain errors are
/// always returned, tagged with the line number.
pub fn process_line(
    processor: &dyn RecordProcessor,
    line: usize,
    text: &str,
    policy: MalformedPolicy,
    summary: &mut RunSummary,
) -> Result<Vec<String>> {
    let record = match Record::parse(line, text, processor.columns()) {
        Ok(record) => record,
        Err(err) if err.is_malformed() && policy == MalformedPolicy::Skip => {
            log::debug!("{}: {err}, skipped", processor.name());
            summary.malformed_skipped += 1;
            return Ok(Vec::new());
        }
        Err(err) => return Err(err),
    };
    let out = processor
        .process(&record, summary)
        .map_err(|e| EngineError::at_line(line, e))?;
    summary.records += 1;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl RecordProcessor for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn columns(&self) -> &'static [usize] {
            &[2]
        }

        fn process(
            &self,
            record: &Record<'_>,
            _summary: &mut RunSummary,
        ) -> verbatim_core::Result<Vec<String>> {
            Ok(vec![record.field(1).to_string()])
        }
    }

    #[test]
    fn test_process_line_counts_records() {
        let mut summary = RunSummary::default();
        let out = process_line(&Echo, 1, "a\tb", MalformedPolicy::Abort, &mut summary).unwrap();
        assert_eq!(out, vec!["b"]);
        assert_eq!(summary.records, 1);
    }

    #[test]
    fn test_malformed_skip_and_abort() {
        let mut summary = RunSummary::default();
        let out = process_line(&Echo, 2, "a", MalformedPolicy::Skip, &mut summary).unwrap();
        assert!(out.is_empty());
        assert_eq!(summary.malformed_skipped, 1);
        assert_eq!(summary.records, 0);

        let err = process_line(&Echo, 2, "a", MalformedPolicy::Abort, &mut summary).unwrap_err();
        assert!(err.is_malformed());
    }
}
