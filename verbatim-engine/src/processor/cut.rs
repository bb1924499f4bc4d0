//! Placeholder substitution from tagged input

use super::RecordProcessor;
use crate::config::EngineConfig;
use crate::record::{join_columns, Record};
use crate::summary::RunSummary;
use verbatim_core::Templater;

/// Cuts tagged phrases out of `TOKENS\tTAGS` or `SRC\tTGT\tSRC_TAGS` lines.
///
/// Two-column input yields `CUT\tSIDE_CHANNEL`. Three-column input also
/// substitutes the placeholders into the target column by token identity and
/// yields `SRC_CUT\tTGT_CUT\tSIDE_CHANNEL`.
#[derive(Debug, Clone)]
pub struct CutProcessor {
    templater: Templater,
    outside: String,
    label: String,
    dnt_tag: Option<String>,
}

impl CutProcessor {
    /// Templater settings come from the side channel format, outside tag and phrase cap
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            templater: Templater::new(config.side_channel.into(), config.outside_tag.as_str())
                .with_max_phrases(config.max_phrases),
            outside: config.outside_tag.clone(),
            label: config.dnt_label.clone(),
            dnt_tag: None,
        }
    }

    /// Treat only `tag` as DNT, every token as its own phrase.
    ///
    /// This reads single-letter label sequences such as the `T N P` gold
    /// labels, where `N` marks words to copy.
    pub fn with_dnt_tag(mut self, tag: impl Into<String>) -> Self {
        self.dnt_tag = Some(tag.into());
        self
    }

    fn normalize_tags(&self, tags: Vec<&str>) -> Vec<String> {
        match &self.dnt_tag {
            None => tags.into_iter().map(str::to_string).collect(),
            Some(dnt) => tags
                .into_iter()
                .map(|t| {
                    if t == dnt {
                        format!("B-{}", self.label)
                    } else {
                        self.outside.clone()
                    }
                })
                .collect(),
        }
    }
}

impl RecordProcessor for CutProcessor {
    fn name(&self) -> &'static str {
        "cut"
    }

    fn columns(&self) -> &'static [usize] {
        &[2, 3]
    }

    fn process(
        &self,
        record: &Record<'_>,
        summary: &mut RunSummary,
    ) -> verbatim_core::Result<Vec<String>> {
        let tag_column = record.len() - 1;
        let source = record.tokens(0);
        let tags = self.normalize_tags(record.tokens(tag_column));

        let cut = self.templater.cut(&source, &tags)?;
        summary.phrases_over_limit += cut.over_limit;
        let side_channel = cut.side_channel.encode()?;

        let line = if record.len() == 3 {
            let target = cut.project_onto(&record.tokens(1));
            join_columns([cut.tokens.join(" "), target.join(" "), side_channel])
        } else {
            join_columns([cut.tokens.join(" "), side_channel])
        };
        Ok(vec![line])
    }
}
