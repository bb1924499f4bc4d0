//! Do-Not-Translate (DNT) span handling for machine translation pipelines
//!
//! Tokens that should be copied verbatim from source to target (names,
//! numbers, URLs, handles) are detected, grouped into phrases and cut out
//! of the text as placeholders before translation, then pasted back.
//!
//! # Architecture
//!
//! - **Domain layer** ([`domain`]): the record-scoped algorithms. Common-token
//!   flags, the IOB span tagger, phrase grouping, the templater and restorer,
//!   the greedy bilingual aligner and tag projection.
//! - **Tagging** ([`tagging`]): entity recognizers and per-token fallback
//!   taggers, including a regex tagger for numbers, handles and URLs.
//! - **Labeling** ([`labeling`]): features, a trainable vocabulary labeler
//!   and evaluation.
//!
//! # Example
//!
//! ```rust
//! use verbatim_core::{Restorer, Templater};
//!
//! let tokens = ["Donate", "to", "the", "Red", "Cross", "now"];
//! let tags = ["O", "O", "O", "ORG", "ORG", "O"];
//!
//! let cut = Templater::default().cut(&tokens, &tags).unwrap();
//! assert_eq!(cut.tokens, ["Donate", "to", "the", "DNT_ORG_1", "now"]);
//! assert_eq!(cut.side_channel.encode().unwrap(), r#"{"ORG":["Red Cross"]}"#);
//!
//! let restored = Restorer::new(false).restore(&cut.tokens, &cut.side_channel).unwrap();
//! assert_eq!(restored.text, tokens.join(" "));
//! ```

pub mod domain;
pub mod labeling;
pub mod tagging;

pub use domain::*;
pub use labeling::{
    evaluate, Evaluation, Featurizer, LabelScore, MacroAverage, VocabularyModel, VocabularyTrainer,
};
pub use tagging::{tag_and_project, CopyHeuristics, CopyMarked, CopyRule, ProjectedTags, RegexTagger};
