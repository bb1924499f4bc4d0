//! End-of-run counters
//!
//! Every recoverable condition increments one of these counters; nothing is
//! dropped silently. Workers keep their own summary and merge at the end.

use std::fmt;

/// Counters accumulated over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Records processed successfully
    pub records: usize,
    /// Lines skipped under the skip policy
    pub malformed_skipped: usize,
    /// Placeholders replaced with the empty string
    pub restore_errors: usize,
    /// Source DNT runs left uncut by the aligner
    pub unmatched_runs: usize,
    /// Phrases left uncut because of the per-record cap
    pub phrases_over_limit: usize,
}

impl RunSummary {
    /// Add another summary's counts into this one
    pub fn merge(&mut self, other: &RunSummary) {
        self.records += other.records;
        self.malformed_skipped += other.malformed_skipped;
        self.restore_errors += other.restore_errors;
        self.unmatched_runs += other.unmatched_runs;
        self.phrases_over_limit += other.phrases_over_limit;
    }

    /// True when any recoverable condition occurred
    pub fn has_errors(&self) -> bool {
        self.malformed_skipped > 0
            || self.restore_errors > 0
            || self.unmatched_runs > 0
            || self.phrases_over_limit > 0
    }

    /// Log non-zero error counters at warn level
    pub fn log_warnings(&self) {
        if self.malformed_skipped > 0 {
            log::warn!("skipped {} malformed lines", self.malformed_skipped);
        }
        if self.restore_errors > 0 {
            log::warn!("found {} errors while restoring DNTs", self.restore_errors);
        }
        if self.unmatched_runs > 0 {
            log::warn!("left {} unmatched source DNT runs uncut", self.unmatched_runs);
        }
        if self.phrases_over_limit > 0 {
            log::warn!("left {} phrases uncut over the per-record limit", self.phrases_over_limit);
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "records: {}, malformed skipped: {}, restore errors: {}, unmatched runs: {}, phrases over limit: {}",
            self.records,
            self.malformed_skipped,
            self.restore_errors,
            self.unmatched_runs,
            self.phrases_over_limit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge() {
        let mut a = RunSummary {
            records: 2,
            restore_errors: 1,
            ..Default::default()
        };
        let b = RunSummary {
            records: 3,
            malformed_skipped: 1,
            unmatched_runs: 2,
            ..Default::default()
        };
        a.merge(&b);
        assert_eq!(a.records, 5);
        assert_eq!(a.restore_errors, 1);
        assert_eq!(a.malformed_skipped, 1);
        assert_eq!(a.unmatched_runs, 2);
    }

    #[test]
    fn test_has_errors() {
        let clean = RunSummary {
            records: 10,
            ..Default::default()
        };
        assert!(!clean.has_errors());
        let over = RunSummary {
            phrases_over_limit: 1,
            ..clean
        };
        assert!(over.has_errors());
    }

    #[test]
    fn test_display() {
        let summary = RunSummary {
            records: 4,
            restore_errors: 1,
            ..Default::default()
        };
        assert_eq!(
            summary.to_string(),
            "records: 4, malformed skipped: 0, restore errors: 1, unmatched runs: 0, phrases over limit: 0"
        );
    }
}
