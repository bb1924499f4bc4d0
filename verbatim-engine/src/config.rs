//! Configuration types for the engine

use crate::error::{EngineError, Result};
use crate::ExecutionMode;
use serde::{Deserialize, Serialize};
use verbatim_core::{
    Encoding, UnmatchedPolicy, DEFAULT_FALLBACK_TAG, DEFAULT_MAX_PHRASES, DNT_LABEL, OUTSIDE,
};

/// What to do with a line that does not split into the expected columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Count the line and continue
    Skip,
    /// Fail the run
    #[default]
    Abort,
}

/// Side channel encoding produced by cut operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideChannelFormat {
    /// `{"TYPE": ["phrase", ...]}`, placeholders `DNT_<TYPE>_<N>`
    #[default]
    Typed,
    /// `New|+|York Paris`, placeholders `DNT_<N>`
    Flat,
}

impl From<SideChannelFormat> for Encoding {
    fn from(format: SideChannelFormat) -> Self {
        match format {
            SideChannelFormat::Typed => Encoding::Typed,
            SideChannelFormat::Flat => Encoding::Flat,
        }
    }
}

/// Serializable mirror of [`UnmatchedPolicy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmatchedRuns {
    /// Fail the record
    Strict,
    /// Leave uncut and count
    #[default]
    Lenient,
}

impl From<UnmatchedRuns> for UnmatchedPolicy {
    fn from(runs: UnmatchedRuns) -> Self {
        match runs {
            UnmatchedRuns::Strict => UnmatchedPolicy::Strict,
            UnmatchedRuns::Lenient => UnmatchedPolicy::Lenient,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Tag of non-DNT tokens
    pub outside_tag: String,
    /// Label of DNT spans in IOB output
    pub dnt_label: String,
    /// Tag for common tokens the recognizer left outside
    pub fallback_tag: String,
    /// Side channel encoding for cut output
    pub side_channel: SideChannelFormat,
    /// Cap on distinct phrases per scope and record
    pub max_phrases: usize,
    /// Replace unresolvable placeholders with "" instead of failing
    pub ignore_errors: bool,
    /// Aligner behavior for unmatched source runs
    pub unmatched_policy: UnmatchedRuns,
    /// Handling of lines with the wrong column count
    pub malformed_policy: MalformedPolicy,
    /// Execution mode selector
    pub execution_mode: ExecutionMode,
    /// Minimum line count for parallel processing in adaptive mode
    pub parallel_threshold: usize,
    /// Number of threads for parallel execution (None = auto)
    pub threads: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            outside_tag: OUTSIDE.to_string(),
            dnt_label: DNT_LABEL.to_string(),
            fallback_tag: DEFAULT_FALLBACK_TAG.to_string(),
            side_channel: SideChannelFormat::default(),
            max_phrases: DEFAULT_MAX_PHRASES,
            ignore_errors: false,
            unmatched_policy: UnmatchedRuns::default(),
            malformed_policy: MalformedPolicy::default(),
            execution_mode: ExecutionMode::Adaptive,
            parallel_threshold: 10_000,
            threads: None,
        }
    }
}

impl EngineConfig {
    /// Start a builder from the defaults
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Skip malformed lines and unresolvable placeholders
    pub fn lenient() -> Self {
        Self {
            ignore_errors: true,
            malformed_policy: MalformedPolicy::Skip,
            ..Self::default()
        }
    }

    /// Check invariants between fields
    pub fn validate(&self) -> Result<()> {
        if self.outside_tag.trim().is_empty() {
            return Err(EngineError::Config("outside tag must not be empty".to_string()));
        }
        if self.dnt_label.trim().is_empty() {
            return Err(EngineError::Config("DNT label must not be empty".to_string()));
        }
        if self.fallback_tag == self.outside_tag {
            return Err(EngineError::Config(format!(
                "fallback tag must differ from the outside tag {:?}",
                self.outside_tag
            )));
        }
        if self.max_phrases == 0 {
            return Err(EngineError::Config("max_phrases must be at least 1".to_string()));
        }
        if self.threads == Some(0) {
            return Err(EngineError::Config("thread count must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Fluent builder for [`EngineConfig`]
#[derive(Debug, Clone, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Set the outside tag
    pub fn outside_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.outside_tag = tag.into();
        self
    }

    /// Set the DNT span label
    pub fn dnt_label(mut self, label: impl Into<String>) -> Self {
        self.config.dnt_label = label.into();
        self
    }

    /// Set the projection fallback tag
    pub fn fallback_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.fallback_tag = tag.into();
        self
    }

    /// Set the side channel encoding
    pub fn side_channel(mut self, format: SideChannelFormat) -> Self {
        self.config.side_channel = format;
        self
    }

    /// Set the per-record phrase cap
    pub fn max_phrases(mut self, max: usize) -> Self {
        self.config.max_phrases = max;
        self
    }

    /// Tolerate unresolvable placeholders
    pub fn ignore_errors(mut self, ignore: bool) -> Self {
        self.config.ignore_errors = ignore;
        self
    }

    /// Set the unmatched-run policy
    pub fn unmatched_policy(mut self, policy: UnmatchedRuns) -> Self {
        self.config.unmatched_policy = policy;
        self
    }

    /// Set the malformed-record policy
    pub fn malformed_policy(mut self, policy: MalformedPolicy) -> Self {
        self.config.malformed_policy = policy;
        self
    }

    /// Set the execution mode
    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.config.execution_mode = mode;
        self
    }

    /// Set the adaptive parallel threshold in lines
    pub fn parallel_threshold(mut self, lines: usize) -> Self {
        self.config.parallel_threshold = lines;
        self
    }

    /// Set the thread count
    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.config.threads = threads;
        self
    }

    /// Validate and return the configuration
    pub fn build(self) -> Result<EngineConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
