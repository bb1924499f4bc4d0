//! Training data preparation from a parallel corpus

use super::RecordProcessor;
use crate::config::EngineConfig;
use crate::record::{join_columns, Record};
use crate::summary::RunSummary;
use std::fmt;
use std::str::FromStr;
use verbatim_core::{gold_labels, SpanTagger};

/// Output layout of [`PrepareProcessor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrepareFormat {
    /// `SRC\tIOB_TAGS`
    #[default]
    SrcTags,
    /// `IOB_TAGS`
    Tags,
    /// One `TOKEN\tTAG` line per token, blank line after each sentence
    Conll,
    /// `SRC\tLABELS` with T(ranslate), N(ot translate), P(unctuation)
    Gold,
}

impl PrepareFormat {
    /// Every format, in listing order
    pub const ALL: [PrepareFormat; 4] = [
        PrepareFormat::SrcTags,
        PrepareFormat::Tags,
        PrepareFormat::Conll,
        PrepareFormat::Gold,
    ];

    /// Name accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            PrepareFormat::SrcTags => "src-tags",
            PrepareFormat::Tags => "tags",
            PrepareFormat::Conll => "conll",
            PrepareFormat::Gold => "gold",
        }
    }

    /// One-line description
    pub fn description(&self) -> &'static str {
        match self {
            PrepareFormat::SrcTags => "source tokens and IOB tags, tab separated",
            PrepareFormat::Tags => "IOB tags only",
            PrepareFormat::Conll => "one token and tag per line, sentences separated by blank lines",
            PrepareFormat::Gold => "source tokens and T/N/P gold labels, tab separated",
        }
    }
}

impl fmt::Display for PrepareFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrepareFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrepareFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unknown format requested: {s}"))
    }
}

/// Tags the source side of `SRC\tTGT` bitext with DNT spans
#[derive(Debug, Clone)]
pub struct PrepareProcessor {
    format: PrepareFormat,
    swap: bool,
    tagger: SpanTagger,
}

impl PrepareProcessor {
    /// With `swap`, the second column is treated as the source
    pub fn new(config: &EngineConfig, format: PrepareFormat, swap: bool) -> Self {
        Self {
            format,
            swap,
            tagger: SpanTagger::new(config.dnt_label.as_str()),
        }
    }
}

impl RecordProcessor for PrepareProcessor {
    fn name(&self) -> &'static str {
        "prepare"
    }

    fn columns(&self) -> &'static [usize] {
        &[2]
    }

    fn process(
        &self,
        record: &Record<'_>,
        _summary: &mut RunSummary,
    ) -> verbatim_core::Result<Vec<String>> {
        let (src, tgt) = if self.swap {
            (record.tokens(1), record.tokens(0))
        } else {
            (record.tokens(0), record.tokens(1))
        };

        let tags = || self.tagger.tag_pair(&src, &tgt);
        Ok(match self.format {
            PrepareFormat::SrcTags => vec![join_columns([src.join(" "), tags()?.join(" ")])],
            PrepareFormat::Tags => vec![tags()?.join(" ")],
            PrepareFormat::Conll => {
                let tags = tags()?;
                src.iter()
                    .zip(&tags)
                    .map(|(tok, tag)| join_columns([*tok, tag.as_str()]))
                    .chain(std::iter::once(String::new()))
                    .collect()
            }
            PrepareFormat::Gold => {
                let labels: Vec<&str> = gold_labels(&src, &tgt).iter().map(|l| l.as_str()).collect();
                vec![join_columns([src.join(" "), labels.join(" ")])]
            }
        })
    }
}
