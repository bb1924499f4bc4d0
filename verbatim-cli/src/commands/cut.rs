//! Cut command implementation

use super::GlobalArgs;
use anyhow::Result;
use clap::{Args, ValueEnum};
use verbatim_engine::{CutProcessor, SideChannelFormat};

/// Arguments for the cut command
///
/// Input lines are `WORDS<TAB>TAGS`, or `SRC<TAB>TGT<TAB>SRC_TAGS` to also
/// cut the target by token identity.
#[derive(Debug, Args)]
pub struct CutArgs {
    /// Side channel encoding (default from config: typed)
    #[arg(long, value_enum)]
    pub side_channel: Option<SideChannelArg>,

    /// Cap on distinct phrases per record and type
    #[arg(long, value_name = "N")]
    pub max_phrases: Option<usize>,

    /// Cut only tokens tagged exactly TAG, one phrase per token (e.g. `N` for gold labels)
    #[arg(long, value_name = "TAG")]
    pub dnt_tag: Option<String>,
}

/// Side channel encodings
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SideChannelArg {
    /// JSON object of phrases per type, `DNT_<TYPE>_<N>` placeholders
    Typed,
    /// Space separated `|+|`-joined phrases, `DNT_<N>` placeholders
    Flat,
}

impl From<SideChannelArg> for SideChannelFormat {
    fn from(arg: SideChannelArg) -> Self {
        match arg {
            SideChannelArg::Typed => SideChannelFormat::Typed,
            SideChannelArg::Flat => SideChannelFormat::Flat,
        }
    }
}

impl CutArgs {
    /// Execute the cut command
    pub fn execute(&self, global: &GlobalArgs) -> Result<()> {
        let config = global.load_config()?;
        let mut engine = global.engine_config(&config);
        if let Some(format) = self.side_channel {
            engine.side_channel = format.into();
        }
        if let Some(max) = self.max_phrases {
            engine.max_phrases = max;
        }

        let mut processor = CutProcessor::new(&engine);
        if let Some(tag) = &self.dnt_tag {
            processor = processor.with_dnt_tag(tag.as_str());
        }
        global.run_processor(&config, engine, &processor)?;
        Ok(())
    }
}
