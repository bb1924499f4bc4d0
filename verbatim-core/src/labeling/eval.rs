//! Per-label precision, recall and F1 of a sequence labeler

use crate::domain::error::Result;
use crate::domain::iob::check_lengths;
use crate::domain::traits::{FeatureSequence, SequenceLabeler};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Scores of one gold label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelScore {
    /// Label name
    pub label: String,
    /// Tokens carrying this label in the gold data
    pub gold_count: usize,
    /// Tokens predicted with this label
    pub predicted_count: usize,
    /// Tokens where gold and prediction agree on this label
    pub correct: usize,
    /// `correct / predicted_count`, 0 when nothing was predicted
    pub precision: f64,
    /// `correct / gold_count`
    pub recall: f64,
    /// Harmonic mean of precision and recall, 0 when both are 0
    pub f1: f64,
}

/// Unweighted mean over labels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroAverage {
    /// Mean precision
    pub precision: f64,
    /// Mean recall
    pub recall: f64,
    /// Mean F1
    pub f1: f64,
}

/// Result of [`evaluate`]
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Evaluation {
    /// One entry per gold label, in order of first appearance
    pub scores: Vec<LabelScore>,
}

impl Evaluation {
    /// Macro average, None when the dataset had no tokens
    pub fn macro_average(&self) -> Option<MacroAverage> {
        if self.scores.is_empty() {
            return None;
        }
        let n = self.scores.len() as f64;
        let sum = |f: fn(&LabelScore) -> f64| self.scores.iter().map(f).sum::<f64>() / n;
        Some(MacroAverage {
            precision: sum(|s| s.precision),
            recall: sum(|s| s.recall),
            f1: sum(|s| s.f1),
        })
    }
}

const COLUMN_WIDTH: usize = 15;

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = COLUMN_WIDTH;
        writeln!(
            f,
            "{:>w$}{:>w$}{:>w$}{:>w$}{:>w$}{:>w$}{:>w$}",
            "Label", "GoldCount", "PredictedCount", "Correct", "Precision", "Recall", "F1"
        )?;
        for s in &self.scores {
            writeln!(
                f,
                "{:>w$}{:>w$}{:>w$}{:>w$}{:>w$.6}{:>w$.6}{:>w$.6}",
                s.label, s.gold_count, s.predicted_count, s.correct, s.precision, s.recall, s.f1
            )?;
        }
        if let Some(avg) = self.macro_average() {
            writeln!(
                f,
                "{:>w$}{:>w$}{:>w$}{:>w$}{:>w$.6}{:>w$.6}{:>w$.6}",
                "(Average)", "", "", "", avg.precision, avg.recall, avg.f1
            )?;
        }
        Ok(())
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Score `labeler` against gold label sequences.
///
/// Only labels occurring in the gold data are reported.
pub fn evaluate(
    labeler: &dyn SequenceLabeler,
    dataset: &[(FeatureSequence, Vec<String>)],
) -> Result<Evaluation> {
    // gold -> predicted -> count
    let mut confusion: IndexMap<String, IndexMap<String, usize>> = IndexMap::new();
    for (features, gold) in dataset {
        check_lengths(features.len(), gold.len())?;
        let predicted = labeler.predict(features);
        check_lengths(features.len(), predicted.len())?;
        for (g, p) in gold.iter().zip(predicted) {
            *confusion.entry(g.clone()).or_default().entry(p).or_default() += 1;
        }
    }

    let scores = confusion
        .iter()
        .map(|(label, row)| {
            let gold_count: usize = row.values().sum();
            let predicted_count: usize = confusion
                .values()
                .map(|r| r.get(label).copied().unwrap_or(0))
                .sum();
            let correct = row.get(label).copied().unwrap_or(0);
            let precision = ratio(correct, predicted_count);
            let recall = ratio(correct, gold_count);
            let f1 = if precision + recall == 0.0 {
                0.0
            } else {
                2.0 * precision * recall / (precision + recall)
            };
            LabelScore {
                label: label.clone(),
                gold_count,
                predicted_count,
                correct,
                precision,
                recall,
                f1,
            }
        })
        .collect();

    Ok(Evaluation { scores })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traits::TokenFeatures;

    /// Predicts `B-DNT` for every token
    struct AllDnt;

    impl SequenceLabeler for AllDnt {
        fn predict(&self, features: &[TokenFeatures]) -> Vec<String> {
            vec!["B-DNT".to_string(); features.len()]
        }
    }

    fn record(gold: &[&str]) -> (FeatureSequence, Vec<String>) {
        (
            gold.iter().map(|_| vec!["bias".to_string()]).collect(),
            gold.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_scores() {
        let data = vec![record(&["B-DNT", "O"]), record(&["O", "O"])];
        let eval = evaluate(&AllDnt, &data).unwrap();
        assert_eq!(eval.scores.len(), 2);

        let dnt = &eval.scores[0];
        assert_eq!(dnt.label, "B-DNT");
        assert_eq!((dnt.gold_count, dnt.predicted_count, dnt.correct), (1, 4, 1));
        assert!((dnt.precision - 0.25).abs() < 1e-9);
        assert!((dnt.recall - 1.0).abs() < 1e-9);
        assert!((dnt.f1 - 0.4).abs() < 1e-9);

        let outside = &eval.scores[1];
        assert_eq!(outside.label, "O");
        assert_eq!((outside.gold_count, outside.predicted_count, outside.correct), (3, 0, 0));
        assert_eq!(outside.precision, 0.0);
        assert_eq!(outside.f1, 0.0);

        let avg = eval.macro_average().unwrap();
        assert!((avg.precision - 0.125).abs() < 1e-9);
        assert!((avg.recall - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_report_layout() {
        let eval = evaluate(&AllDnt, &[record(&["B-DNT"])]).unwrap();
        let report = eval.to_string();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].trim_start().starts_with("Label"));
        assert!(lines[1].contains("1.000000"));
        assert!(lines[2].trim_start().starts_with("(Average)"));
    }

    #[test]
    fn test_empty_dataset() {
        let eval = evaluate(&AllDnt, &[]).unwrap();
        assert!(eval.scores.is_empty());
        assert!(eval.macro_average().is_none());
    }

    #[test]
    fn test_gold_length_mismatch() {
        let data = vec![(vec![vec!["bias".to_string()]], vec![])];
        assert!(evaluate(&AllDnt, &data).is_err());
    }
}
