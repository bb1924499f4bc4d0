//! Grouping of contiguous DNT tokens into phrases
//!
//! Two grouping rules are supported:
//! - [`Grouping::Boundary`]: untyped. A phrase opens on an explicit `B-`
//!   marker, or on any DNT tag that follows an outside tag (an `I-` after
//!   `O` is tolerated and opens a phrase). Every other DNT tag extends the
//!   open phrase.
//! - [`Grouping::TagEquality`]: typed. A phrase opens whenever the tag's
//!   category differs from the previous token's category. `B-X` always opens,
//!   `I-X` continues only a preceding `X` run.

use super::error::Result;
use super::iob::{check_lengths, Marker, OUTSIDE};

/// Contiguous run of DNT tokens `[start, end)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Category of the run, None for untyped grouping
    pub kind: Option<String>,
    /// First token index
    pub start: usize,
    /// One past the last token index
    pub end: usize,
}

impl Span {
    /// Number of tokens covered
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Spans are never empty once produced by a grouper
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Tokens of the span joined with single spaces
    pub fn text<S: AsRef<str>>(&self, tokens: &[S]) -> String {
        tokens[self.start..self.end]
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Grouping rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// Boundary-marker based, untyped
    Boundary,
    /// Tag-equality based, one phrase list per category
    TagEquality,
}

/// Splits a tagged sequence into ordered phrase spans
#[derive(Debug, Clone)]
pub struct PhraseGrouper {
    grouping: Grouping,
    outside: String,
}

impl PhraseGrouper {
    /// Create a grouper treating `outside` as the non-DNT tag
    pub fn new(grouping: Grouping, outside: impl Into<String>) -> Self {
        Self {
            grouping,
            outside: outside.into(),
        }
    }

    /// Grouping rule in use
    pub fn grouping(&self) -> Grouping {
        self.grouping
    }

    /// Outside tag in use
    pub fn outside(&self) -> &str {
        &self.outside
    }

    /// Group `tags` into spans in left-to-right order
    pub fn group<T: AsRef<str>>(&self, tags: &[T]) -> Vec<Span> {
        let mut spans: Vec<Span> = Vec::new();
        let mut open = false;
        let mut prev_category: Option<&str> = None;

        for (i, tag) in tags.iter().enumerate() {
            let marker = Marker::parse(tag.as_ref(), &self.outside);
            let category = marker.category();

            let starts = match (self.grouping, marker) {
                (_, Marker::Outside) => {
                    open = false;
                    prev_category = None;
                    continue;
                }
                (_, Marker::Begin(_)) => true,
                (Grouping::Boundary, _) => !open,
                (Grouping::TagEquality, _) => !open || prev_category != category,
            };

            if starts {
                spans.push(Span {
                    kind: match self.grouping {
                        Grouping::Boundary => None,
                        Grouping::TagEquality => category.map(str::to_string),
                    },
                    start: i,
                    end: i + 1,
                });
            } else if let Some(span) = spans.last_mut() {
                span.end = i + 1;
            }
            open = true;
            prev_category = category;
        }
        spans
    }

    /// Group after checking the token/tag length invariant
    pub fn group_record<S: AsRef<str>, T: AsRef<str>>(
        &self,
        tokens: &[S],
        tags: &[T],
    ) -> Result<Vec<Span>> {
        check_lengths(tokens.len(), tags.len())?;
        Ok(self.group(tags))
    }
}

impl Default for PhraseGrouper {
    fn default() -> Self {
        Self::new(Grouping::TagEquality, OUTSIDE)
    }
}
