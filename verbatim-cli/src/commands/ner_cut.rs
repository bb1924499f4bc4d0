//! Entity-categorized cut command implementation

use super::GlobalArgs;
use anyhow::Result;
use clap::Args;
use std::sync::Arc;
use verbatim_engine::{EntityCutProcessor, TaggedSide};

/// Arguments for the ner-cut command
///
/// The entity recognizer is the regex tagger, with the table from the
/// `[tagging]` config section or the built-in one.
#[derive(Debug, Args)]
pub struct NerCutArgs {
    /// Tag the source side instead of the target side
    #[arg(short, long)]
    pub swap: bool,

    /// Tag for shared tokens the recognizer left outside
    #[arg(long, value_name = "TAG")]
    pub fallback_tag: Option<String>,

    /// Cap on distinct phrases per record and type
    #[arg(long, value_name = "N")]
    pub max_phrases: Option<usize>,

    /// Type shared tokens the recognizer left outside with the copy rules
    /// (`[copy]` config section) before falling back to the fallback tag
    #[arg(long)]
    pub copy_fallback: bool,
}

impl NerCutArgs {
    /// Execute the ner-cut command
    pub fn execute(&self, global: &GlobalArgs) -> Result<()> {
        let config = global.load_config()?;
        let mut engine = global.engine_config(&config);
        if let Some(tag) = &self.fallback_tag {
            engine.fallback_tag = tag.clone();
        }
        if let Some(max) = self.max_phrases {
            engine.max_phrases = max;
        }

        let recognizer = Arc::new(config.regex_tagger()?);
        let side = if self.swap {
            TaggedSide::Source
        } else {
            TaggedSide::Target
        };
        let mut processor = EntityCutProcessor::new(&engine, recognizer).with_side(side);
        if self.copy_fallback {
            processor = processor.with_fallback_tagger(Arc::new(config.copy.heuristics()?));
        }
        global.run_processor(&config, engine, &processor)?;
        Ok(())
    }
}
