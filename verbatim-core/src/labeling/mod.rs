//! Trainable DNT sequence labeling
//!
//! A [`Featurizer`] turns sentences into per-token feature lists, a
//! [`LabelerTrainer`](crate::domain::LabelerTrainer) turns labeled feature
//! sequences into a [`SequenceLabeler`](crate::domain::SequenceLabeler), and
//! [`evaluate`] scores a labeler against gold data.

pub mod eval;
pub mod features;
pub mod vocabulary;

pub use eval::{evaluate, Evaluation, LabelScore, MacroAverage};
pub use features::{word_of, Featurizer, DEFAULT_CONTEXT};
pub use vocabulary::{VocabularyModel, VocabularyTrainer, SNAPSHOT_VERSION};
