//! Rule-based copy marking
//!
//! Decides token by token whether a word should be copied into the
//! translation as is, without looking at the target side. Rules are grouped
//! in numbered versions; a version enables every rule introduced at or
//! before it:
//!
//! | version | rules added |
//! |---------|-------------|
//! | always  | `@` and `#` prefixes, `http`, `rt` |
//! | 1       | punctuation or symbol characters, digits |
//! | 2       | dictionary minus anti-dictionary |
//! | 3       | non-Latin letters, laughter, name prefixes |
//! | 4       | mark the whole line when most tokens are marked |
//! | 5       | organization prefixes |

use crate::domain::tokens::{is_punct_only, normalize};
use crate::domain::traits::TokenTagger;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

/// Newest rule version
pub const LATEST_COPY_VERSION: u8 = 5;

/// Prefix put in front of marked tokens by default
pub const DEFAULT_COPY_SYMBOL: &str = "@@";

/// Organization acronyms matched as case-sensitive prefixes (version 5)
pub const DEFAULT_ORG_PREFIXES: &[&str] = &["ABO", "TPLF", "WBO", "OPDO", "QBO", "FXG", "FDG", "OMN"];

/// Names matched as case-insensitive prefixes (version 3)
pub const DEFAULT_NAME_PREFIXES: &[&str] = &["ethiopia"];

/// Share of marked tokens above which the whole line is marked (version 4)
pub const WHOLE_LINE_RATIO: f64 = 0.75;

static PUNCT_OR_SYMBOL: OnceLock<Regex> = OnceLock::new();
static DIGIT: OnceLock<Regex> = OnceLock::new();
static NON_LATIN: OnceLock<Regex> = OnceLock::new();
static LAUGHTER: OnceLock<Regex> = OnceLock::new();
static RETWEET: OnceLock<Regex> = OnceLock::new();

fn punct_or_symbol() -> &'static Regex {
    PUNCT_OR_SYMBOL.get_or_init(|| Regex::new(r"[[\p{P}\p{S}]--']").expect("punctuation pattern is valid"))
}

fn digit() -> &'static Regex {
    DIGIT.get_or_init(|| Regex::new(r"\p{Nd}").expect("digit pattern is valid"))
}

fn non_latin() -> &'static Regex {
    NON_LATIN.get_or_init(|| Regex::new(r"[\p{L}--[A-Za-z]]").expect("letter pattern is valid"))
}

fn laughter() -> &'static Regex {
    LAUGHTER.get_or_init(|| Regex::new(r"(?i)\Ah[ha]+y?\z").expect("laughter pattern is valid"))
}

fn retweet() -> &'static Regex {
    RETWEET.get_or_init(|| Regex::new(r"(?i)\Art\z").expect("retweet pattern is valid"))
}

/// The rule that marked a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopyRule {
    /// Starts with a known organization acronym
    Organization,
    /// `@mention`
    Handle,
    /// `#hashtag`
    Hashtag,
    /// Contains `http`
    Url,
    /// The retweet marker `rt`
    Retweet,
    /// Starts with a known name
    Name,
    /// Contains a punctuation or symbol character other than `'`
    Punctuation,
    /// Contains a digit
    Digit,
    /// In the dictionary and not in the anti-dictionary
    Dictionary,
    /// Contains a letter outside `A-Za-z`
    NonLatin,
    /// `haha`, `hahay` and the like
    Laughter,
}

impl CopyRule {
    /// Tag used when the heuristics act as a token tagger
    pub fn as_str(&self) -> &'static str {
        match self {
            CopyRule::Organization => "ORG",
            CopyRule::Handle => "HANDLE",
            CopyRule::Hashtag => "HASH",
            CopyRule::Url => "URL",
            CopyRule::Retweet => "RT",
            CopyRule::Name => "NAME",
            CopyRule::Punctuation => "PUNCT",
            CopyRule::Digit => "DIGIT",
            CopyRule::Dictionary => "DICT",
            CopyRule::NonLatin => "NONLATIN",
            CopyRule::Laughter => "LAUGH",
        }
    }
}

impl fmt::Display for CopyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A marked token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyMatch<'a> {
    /// Rule that fired first
    pub rule: CopyRule,
    /// Text to copy. An organization match keeps only the acronym.
    pub text: &'a str,
}

/// One line after marking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyMarked {
    /// Tokens, marked ones prefixed with the copy symbol
    pub tokens: Vec<String>,
    /// Number of marked tokens
    pub marked: usize,
    /// True when the whole-line rule fired
    pub whole_line: bool,
}

/// Versioned copy rules with their vocabulary sets
#[derive(Debug, Clone)]
pub struct CopyHeuristics {
    version: u8,
    dictionary: HashSet<String>,
    antidictionary: HashSet<String>,
    org_prefixes: Vec<String>,
    name_prefixes: Vec<String>,
    exclude_punct: bool,
}

impl Default for CopyHeuristics {
    fn default() -> Self {
        Self::new(LATEST_COPY_VERSION)
    }
}

impl CopyHeuristics {
    /// Rules up to `version`, empty vocabularies, default prefix lists.
    /// Versions above the latest behave like the latest.
    pub fn new(version: u8) -> Self {
        Self {
            version,
            dictionary: HashSet::new(),
            antidictionary: HashSet::new(),
            org_prefixes: DEFAULT_ORG_PREFIXES.iter().map(|p| p.to_string()).collect(),
            name_prefixes: DEFAULT_NAME_PREFIXES.iter().map(|p| normalize(p)).collect(),
            exclude_punct: false,
        }
    }

    /// Words to copy (version 2). Entries are trimmed and lowercased.
    pub fn with_dictionary<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.dictionary = vocabulary(words);
        self
    }

    /// Words never copied by the dictionary rule
    pub fn with_antidictionary<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.antidictionary = vocabulary(words);
        self
    }

    /// Never mark tokens made only of punctuation
    pub fn with_exclude_punct(mut self, exclude: bool) -> Self {
        self.exclude_punct = exclude;
        self
    }

    /// Rule version in use
    pub fn version(&self) -> u8 {
        self.version
    }

    /// First rule marking `token`, in rule order
    pub fn classify<'a>(&self, token: &'a str) -> Option<CopyMatch<'a>> {
        if self.exclude_punct && is_punct_only(token) {
            return None;
        }
        let v = self.version;
        if v >= 5 {
            if let Some(org) = self.org_prefixes.iter().find(|p| token.starts_with(p.as_str())) {
                return Some(CopyMatch {
                    rule: CopyRule::Organization,
                    text: &token[..org.len()],
                });
            }
        }
        let lower = normalize(token);
        let rule = if token.starts_with('@') {
            Some(CopyRule::Handle)
        } else if token.starts_with('#') {
            Some(CopyRule::Hashtag)
        } else if token.contains("http") {
            Some(CopyRule::Url)
        } else if retweet().is_match(token) {
            Some(CopyRule::Retweet)
        } else if v >= 3 && self.name_prefixes.iter().any(|p| lower.starts_with(p.as_str())) {
            Some(CopyRule::Name)
        } else if v >= 1 && punct_or_symbol().is_match(token) {
            Some(CopyRule::Punctuation)
        } else if v >= 1 && digit().is_match(token) {
            Some(CopyRule::Digit)
        } else if v >= 2 && self.dictionary.contains(&lower) && !self.antidictionary.contains(&lower) {
            Some(CopyRule::Dictionary)
        } else if v >= 3 && non_latin().is_match(token) {
            Some(CopyRule::NonLatin)
        } else if v >= 3 && laughter().is_match(token) {
            Some(CopyRule::Laughter)
        } else {
            None
        };
        rule.map(|rule| CopyMatch { rule, text: token })
    }

    /// Prefix every marked token of a line with `symbol`
    pub fn mark<S: AsRef<str>>(&self, tokens: &[S], symbol: &str) -> CopyMarked {
        let mut marked = 0;
        let mut out: Vec<String> = tokens
            .iter()
            .map(|tok| match self.classify(tok.as_ref()) {
                Some(m) => {
                    marked += 1;
                    format!("{symbol}{}", m.text)
                }
                None => tok.as_ref().to_string(),
            })
            .collect();

        let whole_line = self.version >= 4
            && !tokens.is_empty()
            && marked as f64 / tokens.len() as f64 > WHOLE_LINE_RATIO;
        if whole_line {
            out = tokens.iter().map(|tok| format!("{symbol}{}", tok.as_ref())).collect();
            marked = tokens.len();
        }
        CopyMarked {
            tokens: out,
            marked,
            whole_line,
        }
    }
}

impl TokenTagger for CopyHeuristics {
    fn tag_token(&self, token: &str, default: &str) -> String {
        self.classify(token)
            .map_or(default, |m| m.rule.as_str())
            .to_string()
    }
}

fn vocabulary<I, S>(words: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|w| normalize(w.as_ref().trim()))
        .filter(|w| !w.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(heuristics: &CopyHeuristics, token: &str) -> Option<CopyRule> {
        heuristics.classify(token).map(|m| m.rule)
    }

    #[test]
    fn test_rules_at_latest_version() {
        let h = CopyHeuristics::default();
        let cases = [
            ("@alice", Some(CopyRule::Handle)),
            ("#news", Some(CopyRule::Hashtag)),
            ("https://x.org", Some(CopyRule::Url)),
            ("RT", Some(CopyRule::Retweet)),
            ("Ethiopian", Some(CopyRule::Name)),
            ("U.S.", Some(CopyRule::Punctuation)),
            ("$", Some(CopyRule::Punctuation)),
            ("don't", None),
            ("42nd", Some(CopyRule::Digit)),
            ("Addis", None),
            ("አዲስ", Some(CopyRule::NonLatin)),
            ("café", Some(CopyRule::NonLatin)),
            ("hahaha", Some(CopyRule::Laughter)),
            ("Hahay", Some(CopyRule::Laughter)),
            ("hey", None),
            ("TPLF", Some(CopyRule::Organization)),
            ("art", None),
        ];
        for (token, expected) in cases {
            assert_eq!(rule(&h, token), expected, "token {token}");
        }
    }

    #[test]
    fn test_version_gates() {
        let v0 = CopyHeuristics::new(0);
        assert_eq!(rule(&v0, "@alice"), Some(CopyRule::Handle));
        assert_eq!(rule(&v0, "rt"), Some(CopyRule::Retweet));
        assert_eq!(rule(&v0, "42"), None);
        assert_eq!(rule(&v0, "U.S."), None);

        let v2 = CopyHeuristics::new(2);
        assert_eq!(rule(&v2, "42"), Some(CopyRule::Digit));
        assert_eq!(rule(&v2, "hahaha"), None);
        assert_eq!(rule(&v2, "Ethiopia"), None);

        assert_eq!(rule(&CopyHeuristics::new(4), "TPLFs"), None);
    }

    #[test]
    fn test_organization_prefix_keeps_acronym() {
        let h = CopyHeuristics::default();
        let m = h.classify("TPLFs").unwrap();
        assert_eq!(m.rule, CopyRule::Organization);
        assert_eq!(m.text, "TPLF");
        assert_eq!(rule(&h, "tplf"), None);
    }

    #[test]
    fn test_dictionary_minus_antidictionary() {
        let h = CopyHeuristics::new(2)
            .with_dictionary(["Cat ", "dog", ""])
            .with_antidictionary(["DOG"]);
        assert_eq!(rule(&h, "CAT"), Some(CopyRule::Dictionary));
        assert_eq!(rule(&h, "dog"), None);
        assert_eq!(rule(&CopyHeuristics::new(1).with_dictionary(["cat"]), "cat"), None);
    }

    #[test]
    fn test_exclude_punct() {
        let h = CopyHeuristics::default().with_exclude_punct(true);
        assert_eq!(rule(&h, "..."), None);
        assert_eq!(rule(&h, "$"), Some(CopyRule::Punctuation));
        assert_eq!(rule(&CopyHeuristics::default(), "..."), Some(CopyRule::Punctuation));
    }

    #[test]
    fn test_mark_line() {
        let h = CopyHeuristics::default();
        let marked = h.mark(&["RT", "@alice", ":", "great", "news", "TPLFs"], "@@");
        assert_eq!(
            marked.tokens,
            vec!["@@RT", "@@@alice", "@@:", "great", "news", "@@TPLF"]
        );
        assert_eq!(marked.marked, 4);
        assert!(!marked.whole_line);
    }

    #[test]
    fn test_mark_whole_line_when_most_are_marked() {
        let tokens = ["#a", "#b", "#c", "#d", "TPLFs"];
        let marked = CopyHeuristics::default().mark(&tokens, "@@");
        assert!(marked.whole_line);
        assert_eq!(marked.marked, 5);
        assert_eq!(marked.tokens, vec!["@@#a", "@@#b", "@@#c", "@@#d", "@@TPLFs"]);

        let marked = CopyHeuristics::new(3).mark(&["#a", "#b", "#c", "#d", "x"], "@@");
        assert!(!marked.whole_line);
        assert_eq!(marked.tokens[4], "x");
    }

    #[test]
    fn test_three_of_four_is_not_most() {
        let marked = CopyHeuristics::default().mark(&["#a", "#b", "#c", "x"], "<c>");
        assert!(!marked.whole_line);
        assert_eq!(marked.tokens, vec!["<c>#a", "<c>#b", "<c>#c", "x"]);
    }

    #[test]
    fn test_empty_line() {
        let marked = CopyHeuristics::default().mark::<&str>(&[], "@@");
        assert!(marked.tokens.is_empty());
        assert!(!marked.whole_line);
    }

    #[test]
    fn test_token_tagger() {
        let h = CopyHeuristics::default();
        assert_eq!(h.tag_token("#news", "O"), "HASH");
        assert_eq!(h.tag_token("hello", "O"), "O");
    }
}
