//! Labeled data for training and evaluation

use crate::config::MalformedPolicy;
use crate::error::{EngineError, Result};
use crate::record::Record;
use crate::summary::RunSummary;
use verbatim_core::{check_lengths, FeatureSequence, Featurizer};

/// Featurized `WORDS\tTAGS` lines, one pair per record
pub type LabeledData = Vec<(FeatureSequence, Vec<String>)>;

/// Read `WORDS\tTAGS` lines into feature and label sequences.
///
/// Lines with the wrong column count follow `policy`. A tag count that differs
/// from the word count is always an error.
pub fn read_labeled(
    lines: &[String],
    featurizer: &Featurizer,
    policy: MalformedPolicy,
    summary: &mut RunSummary,
) -> Result<LabeledData> {
    let mut data = Vec::with_capacity(lines.len());
    for (index, text) in lines.iter().enumerate() {
        let line = index + 1;
        let record = match Record::parse(line, text, &[2]) {
            Ok(record) => record,
            Err(err) if err.is_malformed() && policy == MalformedPolicy::Skip => {
                log::debug!("{err}, skipped");
                summary.malformed_skipped += 1;
                continue;
            }
            Err(err) => return Err(err),
        };
        let words = record.tokens(0);
        let tags: Vec<String> = record.tokens(1).into_iter().map(str::to_string).collect();
        check_lengths(words.len(), tags.len()).map_err(|e| EngineError::at_line(line, e))?;
        data.push((featurizer.featurize(&words), tags));
        summary.records += 1;
    }
    Ok(data)
}
