//! DNT tagging with a trained sequence labeler

use super::RecordProcessor;
use crate::record::{join_columns, Record};
use crate::summary::RunSummary;
use std::fmt;
use std::sync::Arc;
use verbatim_core::{Featurizer, SequenceLabeler, VocabularyModel};

/// Predicts IOB tags for the first column, producing `SRC\tTAGS`.
///
/// A second column (gold tags, say) is accepted and ignored, so evaluation
/// data can be tagged as is.
pub struct TagProcessor {
    labeler: Arc<dyn SequenceLabeler>,
    featurizer: Featurizer,
}

impl fmt::Debug for TagProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagProcessor")
            .field("featurizer", &self.featurizer)
            .finish_non_exhaustive()
    }
}

impl TagProcessor {
    /// `featurizer` must match the one the labeler was trained with
    pub fn new(labeler: Arc<dyn SequenceLabeler>, featurizer: Featurizer) -> Self {
        Self { labeler, featurizer }
    }

    /// Use a vocabulary model with its own featurizer
    pub fn from_model(model: VocabularyModel) -> Self {
        let featurizer = model.featurizer();
        Self::new(Arc::new(model), featurizer)
    }
}

impl RecordProcessor for TagProcessor {
    fn name(&self) -> &'static str {
        "tag"
    }

    fn columns(&self) -> &'static [usize] {
        &[1, 2]
    }

    fn process(
        &self,
        record: &Record<'_>,
        _summary: &mut RunSummary,
    ) -> verbatim_core::Result<Vec<String>> {
        let words = record.tokens(0);
        let tags = self.labeler.predict(&self.featurizer.featurize(&words));
        Ok(vec![join_columns([words.join(" "), tags.join(" ")])])
    }
}
