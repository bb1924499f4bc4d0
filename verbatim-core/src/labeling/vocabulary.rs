//! Vocabulary-memorizing DNT labeler
//!
//! Training samples records with a seeded RNG and remembers which lowercase
//! words were labeled DNT (positive) and which were labeled outside
//! (negative). Prediction flags a word only if it was seen as DNT and never
//! as outside, then renders IOB tags through the span state machine.

use super::features::{word_of, Featurizer};
use crate::domain::error::{CoreError, Result};
use crate::domain::iob::{check_lengths, SpanTagger, DNT_LABEL, OUTSIDE};
use crate::domain::traits::{FeatureSequence, LabelerTrainer, SequenceLabeler, TokenFeatures};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Snapshot format version written by [`VocabularyModel::save`]
pub const SNAPSHOT_VERSION: u32 = 1;

/// Training parameters
#[derive(Debug, Clone, PartialEq)]
pub struct VocabularyTrainer {
    /// Probability that a record is memorized, in `[0, 1]`
    pub sample_rate: f64,
    /// RNG seed, so training runs are reproducible
    pub seed: u64,
    /// Tag of non-DNT tokens in the training labels
    pub outside: String,
    /// Span label used when rendering predictions
    pub label: String,
    /// Context window of the featurizer that produced the training data
    pub context: usize,
}

impl Default for VocabularyTrainer {
    fn default() -> Self {
        Self {
            sample_rate: 1.0,
            seed: 0,
            outside: OUTSIDE.to_string(),
            label: DNT_LABEL.to_string(),
            context: Featurizer::default().context(),
        }
    }
}

impl VocabularyTrainer {
    /// Builder-style setter for the sample rate
    pub fn sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Builder-style setter for the seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder-style setter for the featurizer context
    pub fn context(mut self, context: usize) -> Self {
        self.context = context;
        self
    }
}

impl LabelerTrainer for VocabularyTrainer {
    type Model = VocabularyModel;

    fn train(self, features: &[FeatureSequence], labels: &[Vec<String>]) -> Result<VocabularyModel> {
        if !(0.0..=1.0).contains(&self.sample_rate) {
            return Err(CoreError::InvalidParameter(format!(
                "sample rate {} is outside [0, 1]",
                self.sample_rate
            )));
        }
        check_lengths(features.len(), labels.len())?;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut positive = BTreeSet::new();
        let mut negative = BTreeSet::new();
        let mut memorized = 0usize;

        for (seq, tags) in features.iter().zip(labels) {
            check_lengths(seq.len(), tags.len())?;
            if !rng.gen_bool(self.sample_rate) {
                continue;
            }
            memorized += 1;
            for (feats, tag) in seq.iter().zip(tags) {
                let Some(word) = word_of(feats) else {
                    continue;
                };
                if *tag == self.outside {
                    negative.insert(word.to_string());
                } else {
                    positive.insert(word.to_string());
                }
            }
        }

        log::info!(
            "memorized {memorized} of {} records: {} DNT words, {} outside words",
            features.len(),
            positive.len(),
            negative.len()
        );

        Ok(VocabularyModel {
            version: SNAPSHOT_VERSION,
            label: self.label,
            context: self.context,
            positive,
            negative,
        })
    }
}

/// Trained, read-only vocabulary model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyModel {
    version: u32,
    label: String,
    context: usize,
    positive: BTreeSet<String>,
    negative: BTreeSet<String>,
}

impl VocabularyModel {
    /// Featurizer matching the one used at training time
    pub fn featurizer(&self) -> Featurizer {
        Featurizer::new(self.context)
    }

    /// Span label of predicted tags
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether `word` (any case) is predicted DNT
    pub fn is_dnt(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        self.positive.contains(&word) && !self.negative.contains(&word)
    }

    /// Number of memorized (DNT, outside) words
    pub fn vocabulary_size(&self) -> (usize, usize) {
        (self.positive.len(), self.negative.len())
    }

    /// Persist as JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| CoreError::Snapshot(e.to_string()))?;
        writer.flush()?;
        Ok(())
    }

    /// Load a snapshot written by [`VocabularyModel::save`]
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let model: Self =
            serde_json::from_reader(reader).map_err(|e| CoreError::Snapshot(e.to_string()))?;
        if model.version != SNAPSHOT_VERSION {
            return Err(CoreError::Snapshot(format!(
                "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
                model.version
            )));
        }
        Ok(model)
    }
}

impl SequenceLabeler for VocabularyModel {
    fn predict(&self, features: &[TokenFeatures]) -> Vec<String> {
        let flags: Vec<bool> = features
            .iter()
            .map(|feats| word_of(feats).is_some_and(|w| self.is_dnt(w)))
            .collect();
        let tagger = SpanTagger::new(self.label.as_str());
        // lengths always agree
        tagger
            .tag_flags(&flags)
            .unwrap_or_else(|_| vec![OUTSIDE.to_string(); flags.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dataset(rows: &[(&str, &str)]) -> (Vec<FeatureSequence>, Vec<Vec<String>>) {
        let featurizer = Featurizer::default();
        rows.iter()
            .map(|(words, tags)| {
                let words: Vec<&str> = words.split_whitespace().collect();
                let tags = tags.split_whitespace().map(str::to_string).collect();
                (featurizer.featurize(&words), tags)
            })
            .unzip()
    }

    #[test]
    fn test_train_and_predict() {
        let (x, y) = dataset(&[
            ("call John Smith", "O B-DNT I-DNT"),
            ("John said hi", "B-DNT O O"),
        ]);
        let model = VocabularyTrainer::default().train(&x, &y).unwrap();
        let seq = model.featurizer().featurize(&["smith", "and", "john", "said"]);
        assert_eq!(model.predict(&seq), vec!["B-DNT", "O", "B-DNT", "O"]);
    }

    #[test]
    fn test_negative_evidence_wins() {
        let (x, y) = dataset(&[("Apple pie", "B-DNT O"), ("apple tree", "O O")]);
        let model = VocabularyTrainer::default().train(&x, &y).unwrap();
        assert!(!model.is_dnt("Apple"));
    }

    #[test]
    fn test_zero_sample_rate_memorizes_nothing() {
        let (x, y) = dataset(&[("John", "B-DNT")]);
        let model = VocabularyTrainer::default().sample_rate(0.0).train(&x, &y).unwrap();
        assert_eq!(model.vocabulary_size(), (0, 0));
    }

    #[test]
    fn test_seeded_training_is_reproducible() {
        let rows: Vec<(String, String)> = (0..50)
            .map(|i| (format!("w{i} x"), "B-DNT O".to_string()))
            .collect();
        let rows: Vec<(&str, &str)> = rows.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        let (x, y) = dataset(&rows);
        let a = VocabularyTrainer::default().sample_rate(0.5).seed(7).train(&x, &y).unwrap();
        let b = VocabularyTrainer::default().sample_rate(0.5).seed(7).train(&x, &y).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_inputs() {
        let (x, y) = dataset(&[("a b", "O O")]);
        assert!(matches!(
            VocabularyTrainer::default().sample_rate(1.5).train(&x, &y),
            Err(CoreError::InvalidParameter(_))
        ));
        let bad = vec![vec!["O".to_string()]];
        assert!(matches!(
            VocabularyTrainer::default().train(&x, &bad),
            Err(CoreError::LengthMismatch { tokens: 2, tags: 1 })
        ));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let (x, y) = dataset(&[("visit Geneva today", "O B-DNT O")]);
        let model = VocabularyTrainer::default().context(3).train(&x, &y).unwrap();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        model.save(&path).unwrap();
        let loaded = VocabularyModel::load(&path).unwrap();
        assert_eq!(loaded, model);
        assert_eq!(loaded.featurizer().context(), 3);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(VocabularyModel::load(&path), Err(CoreError::Snapshot(_))));
        assert!(matches!(
            VocabularyModel::load(&dir.path().join("missing.json")),
            Err(CoreError::Io(_))
        ));
    }
}
