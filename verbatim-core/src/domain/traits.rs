//! Capability traits consumed by the DNT pipeline
//!
//! Tagging and labeling back ends are abstract collaborators: the pipeline
//! only needs a per-token fallback tag, a whole-sentence entity tagger and a
//! trainable sequence labeler.

use super::error::Result;

// ============================================================================
// Tagging
// ============================================================================

/// Tags a single token in isolation
pub trait TokenTagger: Send + Sync {
    /// Tag for `token`, or `default` when the tagger has no opinion
    fn tag_token(&self, token: &str, default: &str) -> String;
}

/// Tags a whole sentence with entity categories
pub trait EntityRecognizer: Send + Sync {
    /// Tokenize `text` and tag each token, using `outside` for non-entities.
    ///
    /// The returned sequences always have equal length.
    fn tag(&self, text: &str, outside: &str) -> (Vec<String>, Vec<String>);
}

// ============================================================================
// Sequence labeling
// ============================================================================

/// Features of one token
pub type TokenFeatures = Vec<String>;

/// Features of one sentence, one entry per token
pub type FeatureSequence = Vec<TokenFeatures>;

/// A trained model mapping feature sequences to label sequences
pub trait SequenceLabeler: Send + Sync {
    /// Predict one label per token
    fn predict(&self, features: &[TokenFeatures]) -> Vec<String>;
}

/// Produces a [`SequenceLabeler`] from labeled data
pub trait LabelerTrainer {
    /// Model produced by training
    type Model: SequenceLabeler;

    /// Train on parallel feature and label sequences
    fn train(self, features: &[FeatureSequence], labels: &[Vec<String>]) -> Result<Self::Model>;
}
