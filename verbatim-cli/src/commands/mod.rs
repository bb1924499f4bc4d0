//! CLI command implementations

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::read_input;
use crate::output::open_output;
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use verbatim_engine::{
    AdaptiveDispatcher, EngineConfig, ExecutionMode, MalformedPolicy, RecordProcessor, RunSummary,
};

pub mod align;
pub mod copy;
pub mod cut;
pub mod eval;
pub mod list;
pub mod ner_cut;
pub mod paste;
pub mod prepare;
pub mod tag;
pub mod train;

/// Do-Not-Translate tagging, cutting and pasting for MT corpora
#[derive(Debug, Parser)]
#[command(name = "verbatim", bin_name = "verbatim", version, about, long_about = None)]
pub struct Cli {
    /// Options shared by every command
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Initialize logging and run the selected command
    pub fn execute(&self) -> Result<()> {
        self.global.init_logging();
        log::debug!("Arguments: {:?}", self);

        match &self.command {
            Commands::Prepare(args) => args.execute(&self.global),
            Commands::Cut(args) => args.execute(&self.global),
            Commands::Align(args) => args.execute(&self.global),
            Commands::Paste(args) => args.execute(&self.global),
            Commands::Copy(args) => args.execute(&self.global),
            Commands::NerCut(args) => args.execute(&self.global),
            Commands::Train(args) => args.execute(&self.global),
            Commands::Tag(args) => args.execute(&self.global),
            Commands::Eval(args) => args.execute(&self.global),
            Commands::List { subcommand } => subcommand.execute(),
        }
    }
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Tag the source side of SRC<TAB>TGT bitext with DNT spans
    Prepare(prepare::PrepareArgs),

    /// Replace tagged phrases with placeholders
    Cut(cut::CutArgs),

    /// Replace phrases shared by source and target with placeholders
    Align(align::AlignArgs),

    /// Restore placeholders from the side channel
    Paste(paste::PasteArgs),

    /// Mark words to copy into the translation with rule-based heuristics
    Copy(copy::CopyArgs),

    /// Cut entity-tagged phrases out of bitext
    NerCut(ner_cut::NerCutArgs),

    /// Train a DNT labeling model from WORDS<TAB>TAGS lines
    Train(train::TrainArgs),

    /// Tag DNT words with a trained model
    Tag(tag::TagArgs),

    /// Evaluate a trained model against WORDS<TAB>TAGS lines
    Eval(eval::EvalArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: list::ListCommands,
    },
}

/// Options accepted by every command
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Input files or patterns (supports glob); stdin when absent
    #[arg(short, long, value_name = "FILE/PATTERN", global = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub output: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", global = true, env = "VERBATIM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress progress, logging and the summary
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Number of worker threads (default: one per CPU)
    #[arg(long, value_name = "N", global = true, env = "VERBATIM_THREADS")]
    pub threads: Option<usize>,

    /// Force parallel processing even for small inputs
    #[arg(long, global = true, conflicts_with = "sequential")]
    pub parallel: bool,

    /// Force single-threaded processing
    #[arg(long, global = true)]
    pub sequential: bool,

    /// Skip and count lines with the wrong number of columns
    #[arg(long, global = true)]
    pub skip_malformed: bool,
}

impl GlobalArgs {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .init();
        }
    }

    /// Configuration file contents, defaults without `--config`
    pub fn load_config(&self) -> Result<CliConfig> {
        CliConfig::load_or_default(self.config.as_deref())
    }

    /// Engine configuration from the file with command-line overrides applied
    pub fn engine_config(&self, config: &CliConfig) -> EngineConfig {
        let mut engine = config.engine_config();
        if self.threads.is_some() {
            engine.threads = self.threads;
        }
        if self.parallel {
            engine.execution_mode = ExecutionMode::Parallel;
        }
        if self.sequential {
            engine.execution_mode = ExecutionMode::Sequential;
        }
        if self.skip_malformed {
            engine.malformed_policy = MalformedPolicy::Skip;
        }
        engine
    }

    /// All input lines
    pub fn read_lines(&self) -> Result<Vec<String>> {
        let mut progress = ProgressReporter::new(self.quiet);
        read_input(&self.input, &mut progress)
    }

    /// Print the end-of-run summary on stderr unless silenced
    pub fn report(&self, config: &CliConfig, name: &str, summary: &RunSummary) {
        if !self.quiet && config.output.summary {
            eprintln!("{name}: {summary}");
        }
    }

    /// Read input, run `processor` over every line and write the output
    pub fn run_processor(
        &self,
        config: &CliConfig,
        engine: EngineConfig,
        processor: &dyn RecordProcessor,
    ) -> Result<RunSummary> {
        let dispatcher =
            AdaptiveDispatcher::new(engine).map_err(|e| CliError::ConfigError(e.to_string()))?;
        let lines = self.read_lines()?;
        let output = dispatcher
            .run(processor, &lines)
            .with_context(|| format!("{} failed", processor.name()))?;

        let mut writer = open_output(self.output.as_deref())?;
        writer.write_lines(&output.lines)?;
        writer.finish()?;

        self.report(config, processor.name(), &output.summary);
        Ok(output.summary)
    }
}
