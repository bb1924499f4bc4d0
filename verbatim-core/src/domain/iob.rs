//! Begin/Inside/Outside span tagging
//!
//! Converts per-token DNT flags into an IOB tag sequence with a fixed
//! transition table:
//!
//! | prev \ flag | true  | false |
//! |-------------|-------|-------|
//! | Start / O   | B-X   | O     |
//! | B-X         | I-X   | O     |
//! | I-X         | I-X   | O     |

use super::error::{CoreError, Result};
use super::tokens::CommonTokenSet;

/// Tag of tokens outside any span
pub const OUTSIDE: &str = "O";

/// Default span label
pub const DNT_LABEL: &str = "DNT";

/// State of the span tagger after emitting a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanState {
    /// Nothing emitted yet
    Start,
    /// Last tag was outside
    Outside,
    /// Last tag opened a span
    Begin,
    /// Last tag continued a span
    Inside,
}

impl SpanState {
    /// Transition on the next token's flag
    pub fn next(self, flag: bool) -> SpanState {
        match (self, flag) {
            (_, false) => SpanState::Outside,
            (SpanState::Start | SpanState::Outside, true) => SpanState::Begin,
            (SpanState::Begin | SpanState::Inside, true) => SpanState::Inside,
        }
    }

    /// Render the tag emitted on entering this state
    pub fn render(self, label: &str) -> String {
        match self {
            SpanState::Start | SpanState::Outside => OUTSIDE.to_string(),
            SpanState::Begin => format!("B-{label}"),
            SpanState::Inside => format!("I-{label}"),
        }
    }
}

/// Position of a tag within the IOB scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker<'a> {
    /// Outside tag
    Outside,
    /// `B-<label>`
    Begin(&'a str),
    /// `I-<label>`
    Inside(&'a str),
    /// A category tag without an IOB marker (e.g. `ORG`)
    Plain(&'a str),
}

impl<'a> Marker<'a> {
    /// Classify `tag` against the configured outside tag.
    /// A bare `B-` or `I-` carries the default [`DNT_LABEL`].
    pub fn parse(tag: &'a str, outside: &str) -> Self {
        let label = |l: &'a str| if l.is_empty() { DNT_LABEL } else { l };
        if tag == outside {
            Marker::Outside
        } else if let Some(l) = tag.strip_prefix("B-") {
            Marker::Begin(label(l))
        } else if let Some(l) = tag.strip_prefix("I-") {
            Marker::Inside(label(l))
        } else {
            Marker::Plain(tag)
        }
    }

    /// Category the tag belongs to, None when outside
    pub fn category(&self) -> Option<&'a str> {
        match *self {
            Marker::Outside => None,
            Marker::Begin(label) | Marker::Inside(label) | Marker::Plain(label) => Some(label),
        }
    }
}

/// Flags-to-IOB converter
#[derive(Debug, Clone)]
pub struct SpanTagger {
    label: String,
}

impl Default for SpanTagger {
    fn default() -> Self {
        Self::new(DNT_LABEL)
    }
}

impl SpanTagger {
    /// Create a tagger emitting `B-<label>` / `I-<label>`
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Span label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Tag a flag sequence. Output length always equals input length.
    pub fn tag_flags(&self, flags: &[bool]) -> Result<Vec<String>> {
        let mut state = SpanState::Start;
        let tags: Vec<String> = flags
            .iter()
            .map(|&flag| {
                state = state.next(flag);
                state.render(&self.label)
            })
            .collect();
        check_lengths(flags.len(), tags.len())?;
        Ok(tags)
    }

    /// Tag the source side of a sentence pair with the common-token heuristic
    pub fn tag_pair<S: AsRef<str>, T: AsRef<str>>(
        &self,
        source: &[S],
        target: &[T],
    ) -> Result<Vec<String>> {
        let flags = CommonTokenSet::build(source, target).flags(source);
        let tags = self.tag_flags(&flags)?;
        check_lengths(source.len(), tags.len())?;
        Ok(tags)
    }
}

/// Enforce the token/tag length invariant
pub fn check_lengths(tokens: usize, tags: usize) -> Result<()> {
    if tokens != tags {
        return Err(CoreError::LengthMismatch { tokens, tags });
    }
    Ok(())
}
