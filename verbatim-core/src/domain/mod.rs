//! Domain layer for Do-Not-Translate processing
//!
//! Pure, record-scoped algorithms: every call allocates its own phrase
//! tables and counters, so one failed record never affects the next.

pub mod align;
pub mod error;
pub mod iob;
pub mod phrase;
pub mod placeholder;
pub mod project;
pub mod restore;
pub mod side_channel;
pub mod template;
pub mod tokens;
pub mod traits;

pub use align::{Alignment, GreedyAligner, UnmatchedPolicy};
pub use error::{CoreError, Result};
pub use iob::{check_lengths, Marker, SpanState, SpanTagger, DNT_LABEL, OUTSIDE};
pub use phrase::{Grouping, PhraseGrouper, Span};
pub use placeholder::{Placeholder, PLACEHOLDER_PREFIX};
pub use project::{TagProjector, DEFAULT_FALLBACK_TAG};
pub use restore::{Restored, Restorer};
pub use side_channel::{Encoding, SideChannel, PHRASE_DELIMITER};
pub use template::{Templated, Templater, DEFAULT_MAX_PHRASES};
pub use tokens::{dnt_flags, gold_labels, is_punct_only, normalize, CommonTokenSet, GoldLabel};
pub use traits::{
    EntityRecognizer, FeatureSequence, LabelerTrainer, SequenceLabeler, TokenFeatures,
    TokenTagger,
};
