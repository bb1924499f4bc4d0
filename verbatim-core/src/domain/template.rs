//! Reversible placeholder substitution
//!
//! Phrase numbering follows the left-to-right order of first appearance of
//! each distinct phrase text within its scope: the global list for flat
//! output, one list per category for typed output.
//!
//! Untagged tokens that already look like placeholders are cut as phrases of
//! their own (flat scope, or the `DNT` category when typed), so restoration
//! returns them unchanged.

use super::error::Result;
use super::iob::{check_lengths, DNT_LABEL, OUTSIDE};
use super::phrase::{Grouping, PhraseGrouper};
use super::placeholder::Placeholder;
use super::side_channel::{Encoding, SideChannel};
use super::tokens::normalize;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Default cap on phrases cut from one record
pub const DEFAULT_MAX_PHRASES: usize = 200;

/// Output of [`Templater::cut`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templated {
    /// Transformed token sequence
    pub tokens: Vec<String>,
    /// Phrase data needed to restore `tokens`
    pub side_channel: SideChannel,
    /// Phrases left uncut because the per-scope cap was reached
    pub over_limit: usize,
    /// Lowercase token to placeholder, for the aligned counterpart
    token_lookup: HashMap<String, String>,
    /// Placeholder-shaped literal to the placeholder that escapes it
    literals: HashMap<String, String>,
}

impl Templated {
    /// Substitute placeholders into an aligned counterpart sequence.
    ///
    /// Any token equal (ignoring case) to a token folded into a phrase is
    /// replaced by that phrase's placeholder. Consecutive repeats of the same
    /// placeholder collapse into one, since a multi-token phrase matches
    /// several consecutive tokens.
    pub fn project_onto<T: AsRef<str>>(&self, aligned: &[T]) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(aligned.len());
        let mut last_substituted: Option<&str> = None;
        for tok in aligned {
            let tok = tok.as_ref();
            if let Some(escaped) = self.literals.get(tok) {
                out.push(escaped.clone());
                last_substituted = None;
                continue;
            }
            match self.token_lookup.get(&normalize(tok)) {
                Some(placeholder) => {
                    if last_substituted != Some(placeholder.as_str()) {
                        out.push(placeholder.clone());
                    }
                    last_substituted = Some(placeholder.as_str());
                }
                None => {
                    out.push(tok.to_string());
                    last_substituted = None;
                }
            }
        }
        out
    }
}

/// Cuts DNT phrases out of a tagged token sequence
#[derive(Debug, Clone)]
pub struct Templater {
    grouper: PhraseGrouper,
    max_phrases: usize,
}

impl Default for Templater {
    fn default() -> Self {
        Self::new(Encoding::Typed, OUTSIDE)
    }
}

impl Templater {
    /// Flat encoding groups by boundary markers, typed encoding by tag equality
    pub fn new(encoding: Encoding, outside: impl Into<String>) -> Self {
        let grouping = match encoding {
            Encoding::Flat => Grouping::Boundary,
            Encoding::Typed => Grouping::TagEquality,
        };
        Self {
            grouper: PhraseGrouper::new(grouping, outside),
            max_phrases: DEFAULT_MAX_PHRASES,
        }
    }

    /// Cap the number of distinct phrases per scope
    pub fn with_max_phrases(mut self, max_phrases: usize) -> Self {
        self.max_phrases = max_phrases;
        self
    }

    /// Replace every phrase with its placeholder
    pub fn cut<S: AsRef<str>, T: AsRef<str>>(&self, tokens: &[S], tags: &[T]) -> Result<Templated> {
        check_lengths(tokens.len(), tags.len())?;
        let spans = self.grouper.group(tags);

        let mut scopes: Scopes = IndexMap::new();
        let mut out = Vec::with_capacity(tokens.len());
        let mut token_lookup = HashMap::new();
        let mut literals = HashMap::new();
        let mut over_limit = 0;
        let mut cursor = 0;

        for span in &spans {
            for tok in &tokens[cursor..span.start] {
                out.push(self.copy_token(tok.as_ref(), &mut scopes, &mut literals));
            }
            cursor = span.end;

            let text = span.text(tokens);
            let phrases = scopes.entry(span.kind.clone()).or_default();
            let index = match phrases.iter().position(|p| *p == text) {
                Some(existing) => existing + 1,
                None if phrases.len() < self.max_phrases => {
                    phrases.push(text);
                    phrases.len()
                }
                None => {
                    over_limit += 1;
                    for tok in &tokens[span.start..span.end] {
                        out.push(self.copy_token(tok.as_ref(), &mut scopes, &mut literals));
                    }
                    continue;
                }
            };

            let placeholder = Placeholder {
                kind: span.kind.clone(),
                index,
            }
            .to_string();
            for tok in &tokens[span.start..span.end] {
                token_lookup.insert(normalize(tok.as_ref()), placeholder.clone());
            }
            out.push(placeholder);
        }
        for tok in &tokens[cursor..] {
            out.push(self.copy_token(tok.as_ref(), &mut scopes, &mut literals));
        }

        let side_channel = match self.grouper.grouping() {
            Grouping::Boundary => SideChannel::Flat(scopes.shift_remove(&None).unwrap_or_default()),
            Grouping::TagEquality => SideChannel::Typed(
                scopes
                    .into_iter()
                    .filter_map(|(kind, phrases)| kind.map(|k| (k, phrases)))
                    .collect(),
            ),
        };

        Ok(Templated {
            tokens: out,
            side_channel,
            over_limit,
            token_lookup,
            literals,
        })
    }

    /// Copy an uncut token, escaping it when it parses as a placeholder.
    /// Escapes ignore the phrase cap.
    fn copy_token(
        &self,
        tok: &str,
        scopes: &mut Scopes,
        literals: &mut HashMap<String, String>,
    ) -> String {
        if Placeholder::parse(tok).is_none() {
            return tok.to_string();
        }
        if let Some(escaped) = literals.get(tok) {
            return escaped.clone();
        }
        let kind = match self.grouper.grouping() {
            Grouping::Boundary => None,
            Grouping::TagEquality => Some(DNT_LABEL.to_string()),
        };
        let phrases = scopes.entry(kind.clone()).or_default();
        let index = match phrases.iter().position(|p| p == tok) {
            Some(existing) => existing + 1,
            None => {
                phrases.push(tok.to_string());
                phrases.len()
            }
        };
        let escaped = Placeholder { kind, index }.to_string();
        literals.insert(tok.to_string(), escaped.clone());
        escaped
    }
}

type Scopes = IndexMap<Option<String>, Vec<String>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::CoreError;
    use crate::domain::restore::Restorer;

    #[test]
    fn test_typed_cut_red_cross() {
        let tokens = ["Donate", "to", "the", "Red", "Cross", "now"];
        let tags = ["O", "O", "O", "ORG", "ORG", "O"];
        let cut = Templater::default().cut(&tokens, &tags).unwrap();
        assert_eq!(cut.tokens, vec!["Donate", "to", "the", "DNT_ORG_1", "now"]);
        assert_eq!(cut.side_channel.encode().unwrap(), r#"{"ORG":["Red Cross"]}"#);
        assert_eq!(cut.over_limit, 0);
    }

    #[test]
    fn test_flat_cut_numbers_in_discovery_order() {
        let tokens = ["John", "Smith", "met", "Ana", "and", "John", "Smith"];
        let tags = ["B-DNT", "I-DNT", "O", "B-DNT", "O", "B-DNT", "I-DNT"];
        let cut = Templater::new(Encoding::Flat, OUTSIDE).cut(&tokens, &tags).unwrap();
        assert_eq!(cut.tokens, vec!["DNT_1", "met", "DNT_2", "and", "DNT_1"]);
        assert_eq!(cut.side_channel.encode().unwrap(), "John|+|Smith Ana");
    }

    #[test]
    fn test_typed_scopes_number_independently() {
        let tokens = ["Ana", "IBM", "Bo", "UN"];
        let tags = ["PER", "ORG", "PER", "ORG"];
        let cut = Templater::default().cut(&tokens, &tags).unwrap();
        assert_eq!(cut.tokens, vec!["DNT_PER_1", "DNT_ORG_1", "DNT_PER_2", "DNT_ORG_2"]);
    }

    #[test]
    fn test_max_phrases_leaves_overflow_uncut() {
        let tokens = ["a", "x", "b", "x", "c"];
        let tags = ["B-DNT", "O", "B-DNT", "O", "B-DNT"];
        let cut = Templater::new(Encoding::Flat, OUTSIDE)
            .with_max_phrases(2)
            .cut(&tokens, &tags)
            .unwrap();
        assert_eq!(cut.tokens, vec!["DNT_1", "x", "DNT_2", "x", "c"]);
        assert_eq!(cut.over_limit, 1);
        assert_eq!(cut.side_channel.phrase_count(), 2);
    }

    #[test]
    fn test_no_phrases() {
        let cut = Templater::default().cut(&["a", "b"], &["O", "O"]).unwrap();
        assert_eq!(cut.tokens, vec!["a", "b"]);
        assert_eq!(cut.side_channel.encode().unwrap(), "{}");
    }

    #[test]
    fn test_length_mismatch_is_fatal() {
        let err = Templater::default().cut(&["a"], &["O", "O"]).unwrap_err();
        assert!(matches!(err, CoreError::LengthMismatch { tokens: 1, tags: 2 }));
    }

    #[test]
    fn test_placeholder_shaped_literal_survives_flat_round_trip() {
        let tokens = ["see", "DNT_1", "and", "Paris"];
        let tags = ["O", "O", "O", "B-DNT"];
        let cut = Templater::new(Encoding::Flat, OUTSIDE).cut(&tokens, &tags).unwrap();
        assert_eq!(cut.tokens, vec!["see", "DNT_1", "and", "DNT_2"]);
        assert_eq!(cut.side_channel.encode().unwrap(), "DNT_1 Paris");

        let side = SideChannel::decode(&cut.side_channel.encode().unwrap()).unwrap();
        let restored = Restorer::new(false).restore(&cut.tokens, &side).unwrap();
        assert_eq!(restored.text, "see DNT_1 and Paris");
    }

    #[test]
    fn test_placeholder_shaped_literal_survives_typed_round_trip() {
        let tokens = ["DNT_ORG_1", "Red", "Cross", "DNT_7", "DNT_ORG_1"];
        let tags = ["O", "ORG", "ORG", "O", "O"];
        let cut = Templater::default().cut(&tokens, &tags).unwrap();
        assert_eq!(
            cut.tokens,
            vec!["DNT_DNT_1", "DNT_ORG_1", "DNT_DNT_2", "DNT_DNT_1"]
        );
        let restored = Restorer::new(false).restore(&cut.tokens, &cut.side_channel).unwrap();
        assert_eq!(restored.text, tokens.join(" "));
    }

    #[test]
    fn test_over_limit_phrase_is_escaped_when_placeholder_shaped() {
        let tokens = ["a", "DNT_1"];
        let tags = ["B-DNT", "B-DNT"];
        let cut = Templater::new(Encoding::Flat, OUTSIDE)
            .with_max_phrases(1)
            .cut(&tokens, &tags)
            .unwrap();
        assert_eq!(cut.tokens, vec!["DNT_1", "DNT_2"]);
        assert_eq!(cut.over_limit, 1);
        let restored = Restorer::new(false).restore(&cut.tokens, &cut.side_channel).unwrap();
        assert_eq!(restored.text, "a DNT_1");
    }

    #[test]
    fn test_bare_begin_tag_restores() {
        let cut = Templater::default().cut(&["a", "Paris"], &["O", "B-"]).unwrap();
        assert_eq!(cut.tokens, vec!["a", "DNT_DNT_1"]);
        let restored = Restorer::new(false).restore(&cut.tokens, &cut.side_channel).unwrap();
        assert_eq!(restored.text, "a Paris");
    }

    #[test]
    fn test_flat_phrase_with_delimiter_cannot_encode() {
        let cut = Templater::new(Encoding::Flat, OUTSIDE)
            .cut(&["a|+|b", "c"], &["B-DNT", "O"])
            .unwrap();
        assert!(matches!(
            cut.side_channel.encode(),
            Err(CoreError::InvalidSideChannel(_))
        ));
    }

    #[test]
    fn test_project_onto_keeps_escaped_literals() {
        let cut = Templater::default()
            .cut(&["DNT_3", "IBM"], &["O", "ORG"])
            .unwrap();
        assert_eq!(
            cut.project_onto(&["DNT_3", "DNT_3", "IBM"]),
            vec!["DNT_DNT_1", "DNT_DNT_1", "DNT_ORG_1"]
        );
    }

    #[test]
    fn test_project_onto_collapses_repeats() {
        let src = ["the", "Red", "Cross", "helps"];
        let tags = ["O", "ORG", "ORG", "O"];
        let cut = Templater::default().cut(&src, &tags).unwrap();
        let tgt = ["la", "red", "cross", "ayuda", "Cross"];
        assert_eq!(
            cut.project_onto(&tgt),
            vec!["la", "DNT_ORG_1", "ayuda", "DNT_ORG_1"]
        );
    }
}
