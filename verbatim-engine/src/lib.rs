//! Record orchestration for DNT processing
//!
//! This crate reads the tab-separated line protocol, runs one
//! [`RecordProcessor`] per operation over every line and collects the
//! recoverable errors of a run in a [`RunSummary`]. Lines can be processed
//! sequentially or, with the `parallel` feature, on a rayon thread pool.
//!
//! ```
//! use verbatim_engine::{AdaptiveDispatcher, CutProcessor, EngineConfig};
//!
//! let config = EngineConfig::default();
//! let processor = CutProcessor::new(&config);
//! let dispatcher = AdaptiveDispatcher::new(config).unwrap();
//! let lines = vec!["Donate to the Red Cross now\tO O O ORG ORG O".to_string()];
//! let output = dispatcher.run(&processor, &lines).unwrap();
//! assert_eq!(output.lines[0], "Donate to the DNT_ORG_1 now\t{\"ORG\":[\"Red Cross\"]}");
//! assert_eq!(output.summary.records, 1);
//! ```

#![warn(missing_docs)]

pub mod adaptive_dispatcher;
pub mod config;
pub mod dataset;
pub mod error;
pub mod executor;
pub mod input;
pub mod processor;
pub mod record;
pub mod summary;

pub use adaptive_dispatcher::AdaptiveDispatcher;
pub use config::{EngineConfig, EngineConfigBuilder, MalformedPolicy, SideChannelFormat, UnmatchedRuns};
pub use dataset::{read_labeled, LabeledData};
pub use error::{EngineError, Result};
pub use executor::{auto_select, BatchOutput, ExecutionMode, Executor};
pub use input::Input;
pub use processor::{
    process_line, AlignProcessor, CopyProcessor, CutProcessor, EntityCutProcessor, PasteProcessor,
    PrepareFormat, PrepareProcessor, RecordProcessor, TagProcessor, TaggedSide,
};
pub use record::Record;
pub use summary::RunSummary;
