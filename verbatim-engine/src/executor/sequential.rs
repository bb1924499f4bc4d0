//! Sequential execution strategy

use crate::{
    config::MalformedPolicy,
    error::Result,
    executor::{run_lines, BatchOutput, ExecutionMode, Executor},
    processor::RecordProcessor,
};

/// Sequential single-threaded executor
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn execute(
        &self,
        processor: &dyn RecordProcessor,
        lines: &[String],
        policy: MalformedPolicy,
    ) -> Result<BatchOutput> {
        run_lines(processor, lines, 1, policy)
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Sequential
    }
}
