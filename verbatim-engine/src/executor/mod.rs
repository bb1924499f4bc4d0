//! Execution strategies for record processing

use crate::config::MalformedPolicy;
use crate::error::Result;
use crate::processor::{process_line, RecordProcessor};
use crate::summary::RunSummary;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
pub mod parallel;
pub mod sequential;

#[cfg(feature = "parallel")]
pub use parallel::ParallelExecutor;
pub use sequential::SequentialExecutor;

/// Execution mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Single-threaded sequential processing
    Sequential,
    /// Multi-threaded parallel processing
    Parallel,
    /// Pick by line count
    #[default]
    Adaptive,
}

/// Output lines of a batch and the counters collected on the way
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutput {
    /// Output lines in input order
    pub lines: Vec<String>,
    /// Counters merged over all workers
    pub summary: RunSummary,
}

impl BatchOutput {
    /// Append another batch that follows this one in input order
    pub fn append(&mut self, other: BatchOutput) {
        self.lines.extend(other.lines);
        self.summary.merge(&other.summary);
    }
}

/// Trait for execution strategies
pub trait Executor: Send + Sync {
    /// Run `processor` over `lines`, preserving input order
    fn execute(
        &self,
        processor: &dyn RecordProcessor,
        lines: &[String],
        policy: MalformedPolicy,
    ) -> Result<BatchOutput>;

    /// Get the execution mode
    fn mode(&self) -> ExecutionMode;
}

/// Process a contiguous slice of lines whose first line has number `first_line`
pub(crate) fn run_lines(
    processor: &dyn RecordProcessor,
    lines: &[String],
    first_line: usize,
    policy: MalformedPolicy,
) -> Result<BatchOutput> {
    let mut output = BatchOutput::default();
    for (offset, text) in lines.iter().enumerate() {
        let out = process_line(processor, first_line + offset, text, policy, &mut output.summary)?;
        output.lines.extend(out);
    }
    Ok(output)
}

/// Automatically select execution mode based on line count
pub fn auto_select(lines: usize, threshold: usize) -> ExecutionMode {
    if lines < threshold {
        ExecutionMode::Sequential
    } else {
        #[cfg(feature = "parallel")]
        return ExecutionMode::Parallel;

        #[cfg(not(feature = "parallel"))]
        ExecutionMode::Sequential
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_select() {
        assert_eq!(auto_select(10, 10_000), ExecutionMode::Sequential);
        #[cfg(feature = "parallel")]
        assert_eq!(auto_select(10_000, 10_000), ExecutionMode::Parallel);
    }

    #[test]
    fn test_append_keeps_order_and_merges() {
        let mut a = BatchOutput {
            lines: vec!["1".to_string()],
            summary: RunSummary {
                records: 1,
                ..Default::default()
            },
        };
        a.append(BatchOutput {
            lines: vec!["2".to_string(), "3".to_string()],
            summary: RunSummary {
                records: 2,
                restore_errors: 1,
                ..Default::default()
            },
        });
        assert_eq!(a.lines, vec!["1", "2", "3"]);
        assert_eq!(a.summary.records, 3);
        assert_eq!(a.summary.restore_errors, 1);
    }
}
