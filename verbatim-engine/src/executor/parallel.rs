//! Parallel execution strategy
//!
//! Lines are split into contiguous chunks. Each chunk is processed by one
//! rayon task with its own [`RunSummary`](crate::RunSummary); chunk outputs are
//! concatenated in input order and the summaries merged afterwards.

use crate::{
    config::MalformedPolicy,
    error::{EngineError, Result},
    executor::{run_lines, BatchOutput, ExecutionMode, Executor},
    processor::RecordProcessor,
};
use rayon::prelude::*;

/// Chunks handed to each thread, to smooth out uneven line lengths
const CHUNKS_PER_THREAD: usize = 4;

/// Parallel multi-threaded executor
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelExecutor {
    threads: Option<usize>,
}

impl ParallelExecutor {
    /// Create a parallel executor. `None` uses one thread per logical CPU.
    pub fn new(threads: Option<usize>) -> Self {
        Self { threads }
    }

    /// Number of worker threads
    pub fn threads(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }

    fn chunk_size(&self, lines: usize) -> usize {
        lines.div_ceil(self.threads() * CHUNKS_PER_THREAD).max(1)
    }
}

impl Executor for ParallelExecutor {
    fn execute(
        &self,
        processor: &dyn RecordProcessor,
        lines: &[String],
        policy: MalformedPolicy,
    ) -> Result<BatchOutput> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads())
            .build()
            .map_err(|e| EngineError::Parallel(e.to_string()))?;

        let chunk_size = self.chunk_size(lines.len());
        log::debug!(
            "{}: {} lines in chunks of {chunk_size} on {} threads",
            processor.name(),
            lines.len(),
            self.threads()
        );

        let batches = pool.install(|| {
            lines
                .par_chunks(chunk_size)
                .enumerate()
                .map(|(index, chunk)| run_lines(processor, chunk, index * chunk_size + 1, policy))
                .collect::<Result<Vec<_>>>()
        })?;

        let mut output = BatchOutput::default();
        for batch in batches {
            output.append(batch);
        }
        Ok(output)
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel
    }
}
