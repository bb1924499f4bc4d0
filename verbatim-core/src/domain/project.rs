//! Tag projection from a tagged sequence onto an untagged one
//!
//! Tokens are matched by lowercase form only. When a token appears several
//! times in the tagged sequence with different tags, the last occurrence
//! wins, so projection is order dependent.

use super::error::Result;
use super::iob::{check_lengths, OUTSIDE};
use super::tokens::{is_punct_only, normalize};
use super::traits::TokenTagger;
use std::collections::HashMap;

/// Default tag for common tokens the first tagger left outside
pub const DEFAULT_FALLBACK_TAG: &str = "MISC";

/// Projects tags across a sentence pair
pub struct TagProjector<'a> {
    outside: String,
    fallback_tag: String,
    fallback_tagger: Option<&'a dyn TokenTagger>,
}

impl std::fmt::Debug for TagProjector<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagProjector")
            .field("outside", &self.outside)
            .field("fallback_tag", &self.fallback_tag)
            .field("fallback_tagger", &self.fallback_tagger.is_some())
            .finish()
    }
}

impl Default for TagProjector<'_> {
    fn default() -> Self {
        Self::new(OUTSIDE, DEFAULT_FALLBACK_TAG)
    }
}

impl<'a> TagProjector<'a> {
    /// Create a projector without a secondary tagger
    pub fn new(outside: impl Into<String>, fallback_tag: impl Into<String>) -> Self {
        Self {
            outside: outside.into(),
            fallback_tag: fallback_tag.into(),
            fallback_tagger: None,
        }
    }

    /// Delegate outside-tagged common tokens to `tagger`
    pub fn with_fallback_tagger(mut self, tagger: &'a dyn TokenTagger) -> Self {
        self.fallback_tagger = Some(tagger);
        self
    }

    /// Outside tag in use
    pub fn outside(&self) -> &str {
        &self.outside
    }

    /// Tag `to` using the tags of `from`. Output length equals `to.len()`.
    pub fn project<S, T, U>(&self, from: &[S], from_tags: &[T], to: &[U]) -> Result<Vec<String>>
    where
        S: AsRef<str>,
        T: AsRef<str>,
        U: AsRef<str>,
    {
        check_lengths(from.len(), from_tags.len())?;
        let lookup: HashMap<String, &str> = from
            .iter()
            .zip(from_tags)
            .map(|(tok, tag)| (normalize(tok.as_ref()), tag.as_ref()))
            .collect();

        Ok(to
            .iter()
            .map(|tok| {
                let tok = tok.as_ref();
                match lookup.get(&normalize(tok)) {
                    None => self.outside.clone(),
                    Some(&tag) if tag == self.outside && !is_punct_only(tok) => {
                        match self.fallback_tagger {
                            Some(tagger) => tagger.tag_token(tok, &self.fallback_tag),
                            None => self.fallback_tag.clone(),
                        }
                    }
                    Some(&tag) => tag.to_string(),
                }
            })
            .collect())
    }
}
