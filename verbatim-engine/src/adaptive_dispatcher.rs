//! Adaptive execution dispatcher
//!
//! Selects the execution mode from the configuration and the input size,
//! runs the processor and reports the run's recoverable errors.

use crate::{
    config::EngineConfig,
    error::Result,
    executor::{auto_select, BatchOutput, ExecutionMode, Executor, SequentialExecutor},
    processor::RecordProcessor,
};

#[cfg(feature = "parallel")]
use crate::executor::ParallelExecutor;

/// Adaptive execution dispatcher
#[derive(Debug, Clone)]
pub struct AdaptiveDispatcher {
    sequential_executor: SequentialExecutor,
    #[cfg(feature = "parallel")]
    parallel_executor: ParallelExecutor,
    config: EngineConfig,
}

impl AdaptiveDispatcher {
    /// Create a dispatcher, validating the configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            sequential_executor: SequentialExecutor,
            #[cfg(feature = "parallel")]
            parallel_executor: ParallelExecutor::new(config.threads),
            config,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Mode that [`run`](Self::run) would use for `lines` input lines
    pub fn select_mode(&self, lines: usize) -> ExecutionMode {
        match self.config.execution_mode {
            ExecutionMode::Adaptive => auto_select(lines, self.config.parallel_threshold),
            mode => mode,
        }
    }

    /// Run `processor` over `lines` with the configured mode.
    ///
    /// Non-zero error counters are logged at warn level before returning.
    pub fn run(&self, processor: &dyn RecordProcessor, lines: &[String]) -> Result<BatchOutput> {
        let mode = self.select_mode(lines.len());
        log::info!("{}: {} lines, {mode:?} execution", processor.name(), lines.len());
        let output = self.run_with_mode(processor, lines, mode)?;
        output.summary.log_warnings();
        Ok(output)
    }

    /// Run `processor` with an explicit mode
    pub fn run_with_mode(
        &self,
        processor: &dyn RecordProcessor,
        lines: &[String],
        mode: ExecutionMode,
    ) -> Result<BatchOutput> {
        let policy = self.config.malformed_policy;
        match mode {
            ExecutionMode::Sequential => self.sequential_executor.execute(processor, lines, policy),
            ExecutionMode::Adaptive => {
                let selected = auto_select(lines.len(), self.config.parallel_threshold);
                self.run_with_mode(processor, lines, selected)
            }
            #[cfg(feature = "parallel")]
            ExecutionMode::Parallel => self.parallel_executor.execute(processor, lines, policy),
            #[cfg(not(feature = "parallel"))]
            ExecutionMode::Parallel => self.sequential_executor.execute(processor, lines, policy),
        }
    }
}
