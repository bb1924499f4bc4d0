//! Placeholder token grammar: `DNT_<N>` or `DNT_<TYPE>_<N>`

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Prefix shared by every placeholder token
pub const PLACEHOLDER_PREFIX: &str = "DNT";

static GRAMMAR: OnceLock<Regex> = OnceLock::new();

fn grammar() -> &'static Regex {
    GRAMMAR.get_or_init(|| {
        Regex::new(r"\ADNT_(?:(.+)_)?([0-9]+)\z").expect("placeholder grammar is valid")
    })
}

/// Synthetic token standing in for a cut phrase
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placeholder {
    /// Phrase category, None for the flat scope
    pub kind: Option<String>,
    /// 1-based index into the phrase list of the scope
    pub index: usize,
}

impl Placeholder {
    /// `DNT_<index>`
    pub fn untyped(index: usize) -> Self {
        Self { kind: None, index }
    }

    /// `DNT_<kind>_<index>`
    pub fn typed(kind: impl Into<String>, index: usize) -> Self {
        Self {
            kind: Some(kind.into()),
            index,
        }
    }

    /// Parse a whole token. Returns None when the token is ordinary text.
    ///
    /// The type is matched greedily, so `DNT_WORK_OF_ART_2` has type
    /// `WORK_OF_ART`. Indices too large for `usize` saturate and are
    /// therefore always out of range.
    pub fn parse(token: &str) -> Option<Self> {
        let caps = grammar().captures(token)?;
        let index = caps[2].parse().unwrap_or(usize::MAX);
        Some(Self {
            kind: caps.get(1).map(|m| m.as_str().to_string()),
            index,
        })
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Some(kind) => write!(f, "{PLACEHOLDER_PREFIX}_{kind}_{}", self.index),
            None => write!(f, "{PLACEHOLDER_PREFIX}_{}", self.index),
        }
    }
}
