//! Regex-based token tagger for numbers, handles, hashtags and URLs

use crate::domain::error::{CoreError, Result};
use crate::domain::traits::{EntityRecognizer, TokenTagger};
use regex::Regex;

/// Built-in `(TYPE, pattern)` table. Order matters: the first match wins.
pub const DEFAULT_PATTERNS: &[(&str, &str)] = &[
    ("NUMBER", r"^[+-]?\d+(\.\d+)?$"),
    ("HANDLE", r"^[a-zA-Z0-9._\-]+@(([a-z0-9A-Z]+\.)+[a-z]{2,})$"),
    ("HASH", r"^#.+"),
    ("HANDLE", r"^@[^ @/]{3,}$"),
    ("NUM_GROUP", r"^[0-9]+([\\/.\-][0-9]+){2,}$"),
    (
        "URL",
        r#"^(?i)\b((?:[a-z][\w-]+:(?:/{1,3}|[a-z0-9%])|www\d{0,3}[.]|[a-z0-9.\-]+[.][a-z]{2,4}/)(?:[^\s()<>]+|\(([^\s()<>]+|(\([^\s()<>]+\)))*\))+(?:\(([^\s()<>]+|(\([^\s()<>]+\)))*\)|[^\s`!()\[\]{};:'".,<>?«»“”‘’]))$"#,
    ),
];

/// Tags whitespace tokens by the first matching pattern
#[derive(Debug, Clone)]
pub struct RegexTagger {
    patterns: Vec<(String, Regex)>,
}

impl RegexTagger {
    /// Compile an ordered pattern table. Types are uppercased.
    pub fn new<I, K, P>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, P)>,
        K: AsRef<str>,
        P: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|(kind, pattern)| {
                let (kind, pattern) = (kind.as_ref(), pattern.as_ref());
                Regex::new(pattern)
                    .map(|re| (kind.to_uppercase(), re))
                    .map_err(|e| CoreError::InvalidPattern(format!("{kind}: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        if patterns.is_empty() {
            return Err(CoreError::InvalidPattern("pattern table is empty".to_string()));
        }
        Ok(Self { patterns })
    }

    /// Pattern types in application order
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|(kind, _)| kind.as_str())
    }

    /// Type of the first pattern matching `token`
    pub fn classify(&self, token: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|(_, re)| re.is_match(token))
            .map(|(kind, _)| kind.as_str())
    }
}

impl Default for RegexTagger {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERNS.iter().copied()).expect("built-in patterns are valid")
    }
}

impl TokenTagger for RegexTagger {
    fn tag_token(&self, token: &str, default: &str) -> String {
        self.classify(token).unwrap_or(default).to_string()
    }
}

impl EntityRecognizer for RegexTagger {
    fn tag(&self, text: &str, outside: &str) -> (Vec<String>, Vec<String>) {
        let tokens: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        let tags = tokens.iter().map(|tok| self.tag_token(tok, outside)).collect();
        (tokens, tags)
    }
}
