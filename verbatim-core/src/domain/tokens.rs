//! Token normalization and the bag-of-tokens DNT heuristic
//!
//! All DNT decisions compare lowercase token forms. Tokens made only of
//! punctuation (Unicode general category `P*`) never take part in the
//! common-token intersection.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

static PUNCT_ONLY: OnceLock<Regex> = OnceLock::new();

fn punct_only() -> &'static Regex {
    PUNCT_ONLY.get_or_init(|| Regex::new(r"\A\p{P}*\z").expect("punctuation pattern is valid"))
}

/// Lowercase form used for every case-insensitive comparison
pub fn normalize(token: &str) -> String {
    token.to_lowercase()
}

/// True when every character of `token` is Unicode punctuation.
///
/// The empty token is vacuously punctuation-only.
pub fn is_punct_only(token: &str) -> bool {
    punct_only().is_match(token)
}

/// Case-insensitive intersection of two token sequences, punctuation excluded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonTokenSet {
    tokens: HashSet<String>,
}

impl CommonTokenSet {
    /// Build the intersection of `source` and `target`
    pub fn build<S: AsRef<str>, T: AsRef<str>>(source: &[S], target: &[T]) -> Self {
        let target_set = content_tokens(target);
        let tokens = content_tokens(source)
            .into_iter()
            .filter(|tok| target_set.contains(tok))
            .collect();
        Self { tokens }
    }

    /// Whether the lowercase form of `token` is shared by both sides
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(&normalize(token))
    }

    /// Per-token DNT flags for `tokens`
    pub fn flags<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<bool> {
        tokens.iter().map(|tok| self.contains(tok.as_ref())).collect()
    }

    /// Number of shared tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the two sides share nothing
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over the shared lowercase tokens
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

fn content_tokens<S: AsRef<str>>(tokens: &[S]) -> HashSet<String> {
    tokens
        .iter()
        .map(|tok| tok.as_ref())
        .filter(|tok| !is_punct_only(tok))
        .map(normalize)
        .collect()
}

/// DNT flag of each source token: its lowercase form occurs anywhere in `target`
pub fn dnt_flags<S: AsRef<str>, T: AsRef<str>>(source: &[S], target: &[T]) -> Vec<bool> {
    CommonTokenSet::build(source, target).flags(source)
}

/// Three-way reference label of a source token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoldLabel {
    /// Translate
    Translate,
    /// Do not translate, copy verbatim
    DoNotTranslate,
    /// Punctuation-only token
    Punctuation,
}

impl GoldLabel {
    /// Single-letter code used in label files
    pub fn as_str(&self) -> &'static str {
        match self {
            GoldLabel::Translate => "T",
            GoldLabel::DoNotTranslate => "N",
            GoldLabel::Punctuation => "P",
        }
    }
}

impl std::fmt::Display for GoldLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label every source token as punctuation, copied, or translated
pub fn gold_labels<S: AsRef<str>, T: AsRef<str>>(source: &[S], target: &[T]) -> Vec<GoldLabel> {
    let target_set = content_tokens(target);
    source
        .iter()
        .map(|tok| {
            let tok = tok.as_ref();
            if is_punct_only(tok) {
                GoldLabel::Punctuation
            } else if target_set.contains(&normalize(tok)) {
                GoldLabel::DoNotTranslate
            } else {
                GoldLabel::Translate
            }
        })
        .collect()
}
