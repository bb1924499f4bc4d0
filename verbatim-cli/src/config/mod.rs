//! Configuration module
//!
//! An optional TOML file given with `--config`. Every section and key may be
//! omitted; command-line flags override file values.

use crate::error::CliError;
use crate::input::FileReader;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use verbatim_core::tagging::copy::{DEFAULT_COPY_SYMBOL, LATEST_COPY_VERSION};
use verbatim_core::{
    CopyHeuristics, RegexTagger, DEFAULT_FALLBACK_TAG, DEFAULT_MAX_PHRASES, DNT_LABEL, OUTSIDE,
};
use verbatim_engine::{
    EngineConfig, ExecutionMode, MalformedPolicy, SideChannelFormat, UnmatchedRuns,
};

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Processing configuration
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,

    /// Entity tagging configuration
    #[serde(default)]
    pub tagging: TaggingConfig,

    /// Copy marking configuration
    #[serde(default)]
    pub copy: CopyConfig,
}

/// Processing-related configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Tag of non-DNT tokens
    pub outside_tag: String,

    /// Span label in IOB output
    pub dnt_label: String,

    /// Tag for common tokens the recognizer left outside
    pub fallback_tag: String,

    /// Side channel encoding of cut output
    pub side_channel: SideChannelFormat,

    /// Cap on distinct phrases per record and type
    pub max_phrases: usize,

    /// Replace unresolvable placeholders with nothing instead of failing
    pub ignore_errors: bool,

    /// Aligner handling of unmatched source runs
    pub unmatched: UnmatchedRuns,

    /// Handling of lines with the wrong column count
    pub malformed: MalformedPolicy,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            outside_tag: OUTSIDE.to_string(),
            dnt_label: DNT_LABEL.to_string(),
            fallback_tag: DEFAULT_FALLBACK_TAG.to_string(),
            side_channel: SideChannelFormat::default(),
            max_phrases: DEFAULT_MAX_PHRASES,
            ignore_errors: false,
            unmatched: UnmatchedRuns::default(),
            malformed: MalformedPolicy::default(),
        }
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Print the end-of-run summary to stderr
    pub summary: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { summary: true }
    }
}

/// Performance-related configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Execution mode
    pub mode: ExecutionMode,

    /// Line count at which adaptive mode goes parallel
    pub parallel_threshold: usize,

    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::Adaptive,
            parallel_threshold: 10_000,
            worker_threads: 0,
        }
    }
}

/// Entity tagging configuration
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TaggingConfig {
    /// Ordered regex table; the built-in table when empty
    pub patterns: Vec<PatternConfig>,
}

/// One `(TYPE, regex)` entry, first match wins
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PatternConfig {
    /// Entity type used in placeholders
    pub kind: String,
    /// Regular expression a whole token must match
    pub regex: String,
}

/// Copy marking configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct CopyConfig {
    /// Prefix of marked tokens
    pub symbol: String,

    /// Copy rule version
    pub rule_version: u8,

    /// Never mark punctuation-only tokens
    pub exclude_punct: bool,

    /// Word list, one per line, copied from version 2 on
    pub dictionary: Option<PathBuf>,

    /// Word list exempted from the dictionary rule
    pub antidictionary: Option<PathBuf>,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_COPY_SYMBOL.to_string(),
            rule_version: LATEST_COPY_VERSION,
            exclude_punct: false,
            dictionary: None,
            antidictionary: None,
        }
    }
}

impl CopyConfig {
    /// Build the heuristics, reading the word lists
    pub fn heuristics(&self) -> Result<CopyHeuristics> {
        let mut heuristics =
            CopyHeuristics::new(self.rule_version).with_exclude_punct(self.exclude_punct);
        if let Some(path) = &self.dictionary {
            heuristics = heuristics.with_dictionary(FileReader::read_lines(path)?);
        }
        if let Some(path) = &self.antidictionary {
            heuristics = heuristics.with_antidictionary(FileReader::read_lines(path)?);
        }
        Ok(heuristics)
    }
}

impl CliConfig {
    /// Read a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse TOML text
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    /// Load `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Engine configuration from the file values
    pub fn engine_config(&self) -> EngineConfig {
        let p = &self.processing;
        EngineConfig {
            outside_tag: p.outside_tag.clone(),
            dnt_label: p.dnt_label.clone(),
            fallback_tag: p.fallback_tag.clone(),
            side_channel: p.side_channel,
            max_phrases: p.max_phrases,
            ignore_errors: p.ignore_errors,
            unmatched_policy: p.unmatched,
            malformed_policy: p.malformed,
            execution_mode: self.performance.mode,
            parallel_threshold: self.performance.parallel_threshold,
            threads: match self.performance.worker_threads {
                0 => None,
                n => Some(n),
            },
        }
    }

    /// Regex tagger from `[tagging]`, the built-in table when none is given
    pub fn regex_tagger(&self) -> Result<RegexTagger> {
        if self.tagging.patterns.is_empty() {
            return Ok(RegexTagger::default());
        }
        RegexTagger::new(
            self.tagging
                .patterns
                .iter()
                .map(|p| (p.kind.as_str(), p.regex.as_str())),
        )
        .map_err(|e| CliError::ConfigError(e.to_string()).into())
    }
}
