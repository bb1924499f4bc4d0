//! Entity tagging, copy marking and cross-lingual tag projection

pub mod copy;
pub mod patterns;

pub use copy::{CopyHeuristics, CopyMarked, CopyMatch, CopyRule};
pub use patterns::{RegexTagger, DEFAULT_PATTERNS};

use crate::domain::error::Result;
use crate::domain::project::TagProjector;
use crate::domain::traits::EntityRecognizer;

/// Tags of both sides of a sentence pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedTags {
    /// Tags assigned by the recognizer
    pub from_tags: Vec<String>,
    /// Tags projected onto the other side
    pub to_tags: Vec<String>,
}

/// Tag `from` with `recognizer` and project the result onto `to`.
///
/// `from` is rejoined with single spaces before tagging; a recognizer that
/// retokenizes differently produces a length mismatch.
pub fn tag_and_project<S, T>(
    recognizer: &dyn EntityRecognizer,
    from: &[S],
    to: &[T],
    projector: &TagProjector<'_>,
) -> Result<ProjectedTags>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let text = from.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");
    let (_, from_tags) = recognizer.tag(&text, projector.outside());
    let to_tags = projector.project(from, &from_tags, to)?;
    Ok(ProjectedTags { from_tags, to_tags })
}
