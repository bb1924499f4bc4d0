//! Token feature extraction for sequence labeling

use crate::domain::traits::{FeatureSequence, TokenFeatures};

/// Default number of neighbors on each side contributing context features
pub const DEFAULT_CONTEXT: usize = 2;

/// Prefix of the lowercase-word feature
pub const WORD_FEATURE: &str = "word.lower=";

/// Turns token sequences into per-token feature lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Featurizer {
    context: usize,
}

impl Default for Featurizer {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT)
    }
}

impl Featurizer {
    /// Create a featurizer looking `context` tokens in each direction
    pub fn new(context: usize) -> Self {
        Self { context }
    }

    /// Context window size
    pub fn context(&self) -> usize {
        self.context
    }

    /// Shape features of a single word
    pub fn featurize_word(word: &str) -> TokenFeatures {
        vec![
            "bias".to_string(),
            format!("{WORD_FEATURE}{}", word.to_lowercase()),
            format!("word.isupper={}", is_upper(word)),
            format!("word.islower={}", is_lower(word)),
            format!("word.istitle={}", is_title(word)),
            format!("word.isdigit={}", is_digit(word)),
        ]
    }

    /// Features of a whole sentence.
    ///
    /// The first token gets `BOS`, the last `EOS`. Each token then receives
    /// the features of its neighbors within the window, prefixed with the
    /// signed offset (`+1:`, `-2:`).
    pub fn featurize<S: AsRef<str>>(&self, words: &[S]) -> FeatureSequence {
        let mut own: Vec<TokenFeatures> = words
            .iter()
            .map(|w| Self::featurize_word(w.as_ref()))
            .collect();
        if let Some(first) = own.first_mut() {
            first.push("BOS".to_string());
        }
        if let Some(last) = own.last_mut() {
            last.push("EOS".to_string());
        }

        let n = own.len();
        (0..n)
            .map(|i| {
                let mut feats = own[i].clone();
                for j in i + 1..n.min(i + self.context + 1) {
                    let offset = j - i;
                    feats.extend(own[j].iter().map(|f| format!("+{offset}:{f}")));
                }
                for j in (i.saturating_sub(self.context)..i).rev() {
                    let offset = i - j;
                    feats.extend(own[j].iter().map(|f| format!("-{offset}:{f}")));
                }
                feats
            })
            .collect()
    }
}

/// Lowercase word carried by a token's own features
pub fn word_of(features: &[String]) -> Option<&str> {
    features.iter().find_map(|f| f.strip_prefix(WORD_FEATURE))
}

fn is_upper(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}

fn is_lower(word: &str) -> bool {
    word.chars().any(char::is_lowercase) && !word.chars().any(char::is_uppercase)
}

fn is_title(word: &str) -> bool {
    let mut cased_seen = false;
    let mut prev_cased = false;
    for c in word.chars() {
        if c.is_uppercase() {
            if prev_cased {
                return false;
            }
            prev_cased = true;
            cased_seen = true;
        } else if c.is_lowercase() {
            if !prev_cased {
                return false;
            }
            prev_cased = true;
            cased_seen = true;
        } else {
            prev_cased = false;
        }
    }
    cased_seen
}

fn is_digit(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_numeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_shape_features() {
        let feats = Featurizer::featurize_word("Smith");
        assert_eq!(
            feats,
            vec![
                "bias",
                "word.lower=smith",
                "word.isupper=false",
                "word.islower=false",
                "word.istitle=true",
                "word.isdigit=false",
            ]
        );
        assert!(Featurizer::featurize_word("IBM").contains(&"word.isupper=true".to_string()));
        assert!(Featurizer::featurize_word("2018").contains(&"word.isdigit=true".to_string()));
    }

    #[test]
    fn test_title_case_detection() {
        assert!(is_title("Hello World"));
        assert!(is_title("O'Neil"));
        assert!(!is_title("McDonald"));
        assert!(!is_title("hello"));
        assert!(!is_title("123"));
    }

    #[test]
    fn test_sequence_markers_and_context() {
        let seq = Featurizer::new(1).featurize(&["a", "b", "c"]);
        assert_eq!(seq.len(), 3);
        assert!(seq[0].contains(&"BOS".to_string()));
        assert!(seq[2].contains(&"EOS".to_string()));
        assert!(seq[0].contains(&"+1:word.lower=b".to_string()));
        assert!(!seq[0].iter().any(|f| f.starts_with("+2:")));
        assert!(seq[1].contains(&"-1:word.lower=a".to_string()));
        assert!(seq[1].contains(&"-1:BOS".to_string()));
        assert!(seq[1].contains(&"+1:EOS".to_string()));
    }

    #[test]
    fn test_empty_and_single_token() {
        assert!(Featurizer::default().featurize::<&str>(&[]).is_empty());
        let seq = Featurizer::default().featurize(&["x"]);
        assert!(seq[0].contains(&"BOS".to_string()) && seq[0].contains(&"EOS".to_string()));
        assert_eq!(word_of(&seq[0]), Some("x"));
    }
}
