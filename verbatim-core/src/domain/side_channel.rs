//! Side channel: the phrase data required to invert a cut
//!
//! Two encodings exist in persisted data and both decode:
//! - flat (legacy): phrases separated by spaces, tokens inside a phrase
//!   joined with `|+|`, e.g. `New|+|York Paris`
//! - typed: a JSON object from category to its ordered phrases,
//!   e.g. `{"ORG":["Red Cross"]}`

use super::error::{CoreError, Result};
use super::placeholder::Placeholder;
use indexmap::IndexMap;

/// Delimiter joining the tokens of one phrase in the flat encoding
pub const PHRASE_DELIMITER: &str = "|+|";

/// Phrase table emitted next to a transformed sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideChannel {
    /// Global list addressed by `DNT_<N>`
    Flat(Vec<String>),
    /// Per-category lists addressed by `DNT_<TYPE>_<N>`
    Typed(IndexMap<String, Vec<String>>),
}

/// Which side channel encoding to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Legacy delimiter-joined phrase list
    Flat,
    /// JSON object keyed by category
    #[default]
    Typed,
}

impl SideChannel {
    /// Serialize for the last column of a cut record.
    ///
    /// The flat encoding cannot represent a token that contains
    /// [`PHRASE_DELIMITER`], nor a first phrase starting with `{` (it would
    /// decode as JSON). Both are rejected.
    pub fn encode(&self) -> Result<String> {
        match self {
            SideChannel::Flat(phrases) => {
                if let Some(bad) = phrases.iter().find(|p| p.contains(PHRASE_DELIMITER)) {
                    return Err(CoreError::InvalidSideChannel(format!(
                        "phrase {bad:?} contains the flat delimiter {PHRASE_DELIMITER}"
                    )));
                }
                if let Some(first) = phrases.first().filter(|p| p.starts_with('{')) {
                    return Err(CoreError::InvalidSideChannel(format!(
                        "flat phrase {first:?} would decode as JSON"
                    )));
                }
                Ok(phrases
                    .iter()
                    .map(|phrase| phrase.split(' ').collect::<Vec<_>>().join(PHRASE_DELIMITER))
                    .collect::<Vec<_>>()
                    .join(" "))
            }
            SideChannel::Typed(map) => {
                serde_json::to_string(map).map_err(|e| CoreError::InvalidSideChannel(e.to_string()))
            }
        }
    }

    /// Parse either encoding. A leading `{` selects the typed encoding.
    pub fn decode(column: &str) -> Result<Self> {
        let column = column.trim();
        if column.starts_with('{') {
            let map: IndexMap<String, Vec<String>> = serde_json::from_str(column)
                .map_err(|e| CoreError::InvalidSideChannel(e.to_string()))?;
            return Ok(SideChannel::Typed(map));
        }
        Ok(SideChannel::Flat(
            column
                .split_whitespace()
                .map(|phrase| phrase.split(PHRASE_DELIMITER).collect::<Vec<_>>().join(" "))
                .collect(),
        ))
    }

    /// Total number of phrases across all scopes
    pub fn phrase_count(&self) -> usize {
        match self {
            SideChannel::Flat(phrases) => phrases.len(),
            SideChannel::Typed(map) => map.values().map(Vec::len).sum(),
        }
    }

    /// True when no phrase was recorded
    pub fn is_empty(&self) -> bool {
        self.phrase_count() == 0
    }

    /// Resolve a placeholder to its phrase text
    pub fn lookup(&self, placeholder: &Placeholder) -> Result<&str> {
        let scope = match (self, &placeholder.kind) {
            (SideChannel::Flat(phrases), None) => Some(phrases),
            (SideChannel::Typed(map), Some(kind)) => map.get(kind),
            _ => None,
        };
        let Some(phrases) = scope else {
            return Err(CoreError::UnknownType {
                placeholder: placeholder.to_string(),
                kind: placeholder.kind.clone(),
                available: self.describe(),
            });
        };
        placeholder
            .index
            .checked_sub(1)
            .and_then(|i| phrases.get(i))
            .map(String::as_str)
            .ok_or_else(|| CoreError::PlaceholderOutOfRange {
                placeholder: placeholder.to_string(),
                available: self.describe(),
            })
    }

    fn describe(&self) -> String {
        self.encode().unwrap_or_else(|_| format!("{self:?}"))
    }
}

impl Default for SideChannel {
    fn default() -> Self {
        SideChannel::Flat(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(entries: &[(&str, Vec<&str>)]) -> SideChannel {
        SideChannel::Typed(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
                .collect(),
        )
    }

    #[test]
    fn test_flat_encoding_uses_delimiter() {
        let side = SideChannel::Flat(vec!["New York".to_string(), "Paris".to_string()]);
        assert_eq!(side.encode().unwrap(), "New|+|York Paris");
    }

    #[test]
    fn test_flat_encoding_rejects_ambiguous_phrases() {
        let side = SideChannel::Flat(vec!["a|+|b".to_string()]);
        assert!(matches!(side.encode(), Err(CoreError::InvalidSideChannel(_))));

        let side = SideChannel::Flat(vec!["{x".to_string(), "y".to_string()]);
        assert!(matches!(side.encode(), Err(CoreError::InvalidSideChannel(_))));
        let side = SideChannel::Flat(vec!["y".to_string(), "{x".to_string()]);
        assert_eq!(side.encode().unwrap(), "y {x");

        let json = typed(&[("ORG", vec!["a|+|b"])]);
        assert_eq!(json.encode().unwrap(), r#"{"ORG":["a|+|b"]}"#);
    }

    #[test]
    fn test_flat_decoding_restores_spaces() {
        let side = SideChannel::decode("New|+|York Paris\n").unwrap();
        assert_eq!(
            side,
            SideChannel::Flat(vec!["New York".to_string(), "Paris".to_string()])
        );
    }

    #[test]
    fn test_typed_encoding_is_json_in_insertion_order() {
        let side = typed(&[("ORG", vec!["Red Cross"]), ("GPE", vec!["Geneva", "Bern"])]);
        let encoded = side.encode().unwrap();
        assert_eq!(encoded, r#"{"ORG":["Red Cross"],"GPE":["Geneva","Bern"]}"#);
        assert_eq!(SideChannel::decode(&encoded).unwrap(), side);
    }

    #[test]
    fn test_decode_python_style_json() {
        let side = SideChannel::decode(r#"{"ORG": ["Red Cross"], "PERSON": ["Ana"]}"#).unwrap();
        assert_eq!(side, typed(&[("ORG", vec!["Red Cross"]), ("PERSON", vec!["Ana"])]));
    }

    #[test]
    fn test_decode_invalid_json() {
        assert!(matches!(
            SideChannel::decode("{not json"),
            Err(CoreError::InvalidSideChannel(_))
        ));
    }

    #[test]
    fn test_empty_side_channels() {
        assert_eq!(SideChannel::decode("").unwrap(), SideChannel::Flat(vec![]));
        assert!(SideChannel::decode("{}").unwrap().is_empty());
        assert_eq!(SideChannel::default().encode().unwrap(), "");
    }

    #[test]
    fn test_lookup_flat() {
        let side = SideChannel::Flat(vec!["World".to_string()]);
        assert_eq!(side.lookup(&Placeholder::untyped(1)).unwrap(), "World");
        assert!(matches!(
            side.lookup(&Placeholder::untyped(5)),
            Err(CoreError::PlaceholderOutOfRange { .. })
        ));
        assert!(matches!(
            side.lookup(&Placeholder::untyped(0)),
            Err(CoreError::PlaceholderOutOfRange { .. })
        ));
        assert!(matches!(
            side.lookup(&Placeholder::typed("ORG", 1)),
            Err(CoreError::UnknownType { .. })
        ));
    }

    #[test]
    fn test_lookup_typed() {
        let side = typed(&[("ORG", vec!["Red Cross", "UN"])]);
        assert_eq!(side.lookup(&Placeholder::typed("ORG", 2)).unwrap(), "UN");
        assert!(matches!(
            side.lookup(&Placeholder::typed("ORG", 3)),
            Err(CoreError::PlaceholderOutOfRange { .. })
        ));
        match side.lookup(&Placeholder::typed("GPE", 1)) {
            Err(CoreError::UnknownType { kind, .. }) => assert_eq!(kind.as_deref(), Some("GPE")),
            other => panic!("expected UnknownType, got {other:?}"),
        }
        assert!(matches!(
            side.lookup(&Placeholder::untyped(1)),
            Err(CoreError::UnknownType { kind: None, .. })
        ));
        assert_eq!(side.phrase_count(), 2);
    }
}
