//! Bilingual phrase identification without word alignment
//!
//! Adjacent DNT tokens are grouped greedily into phrases that receive the
//! same placeholder on both sides of a sentence pair:
//!
//! 1. flag tokens on both sides with the common-token heuristic
//! 2. collect every contiguous lowercase n-gram of each maximal flagged
//!    source run
//! 3. scan the target: at a flagged token take the longest flagged run,
//!    shrink it from the right until it is a source n-gram, and assign it
//!    the next phrase ID unless the same lowercase phrase already has one
//! 4. scan the source the same way, matching against the phrase table
//!
//! IDs are assigned in discovery order and never renumbered. Segmentation is
//! greedy, not minimal. Uncut tokens that parse as placeholders get a phrase
//! of their own so restoration leaves them unchanged.

use super::error::{CoreError, Result};
use super::placeholder::Placeholder;
use super::side_channel::SideChannel;
use super::tokens::{normalize, CommonTokenSet};
use std::collections::{HashMap, HashSet};

/// What to do with a source run that matches no phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmatchedPolicy {
    /// Fail the record
    Strict,
    /// Leave the tokens uncut and count the run
    #[default]
    Lenient,
}

/// Transformed pair and the phrase table that inverts it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    /// Source with phrases replaced by `DNT_<N>`
    pub source: Vec<String>,
    /// Target with phrases replaced by `DNT_<N>`
    pub target: Vec<String>,
    /// Phrase `N` at index `N - 1`, first-seen target casing, space-joined.
    /// Escaped placeholder-shaped literals appear here verbatim.
    pub phrases: Vec<String>,
    /// Source runs left uncut under the lenient policy
    pub unmatched_runs: usize,
}

impl Alignment {
    /// Flat side channel for the phrase table
    pub fn side_channel(&self) -> SideChannel {
        SideChannel::Flat(self.phrases.clone())
    }
}

/// Greedy n-gram phrase aligner
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyAligner {
    policy: UnmatchedPolicy,
}

impl GreedyAligner {
    /// Create an aligner with the given unmatched-run policy
    pub fn new(policy: UnmatchedPolicy) -> Self {
        Self { policy }
    }

    /// Align one sentence pair
    pub fn align<S: AsRef<str>, T: AsRef<str>>(&self, source: &[S], target: &[T]) -> Result<Alignment> {
        let common = CommonTokenSet::build(source, target);
        let src_flags = common.flags(source);
        let tgt_flags = common.flags(target);
        let src_lower: Vec<String> = source.iter().map(|t| normalize(t.as_ref())).collect();
        let tgt_lower: Vec<String> = target.iter().map(|t| normalize(t.as_ref())).collect();

        let source_grams = run_grams(&src_lower, &src_flags);

        // Target pass: discovers phrases
        let mut ids: HashMap<&[String], usize> = HashMap::new();
        let mut phrases: Vec<String> = Vec::new();
        let mut literals: HashMap<String, usize> = HashMap::new();
        let mut target_out = Vec::with_capacity(target.len());
        let mut cur = 0;
        while cur < target.len() {
            if !tgt_flags[cur] {
                target_out.push(copy_token(target[cur].as_ref(), &mut phrases, &mut literals));
                cur += 1;
                continue;
            }
            let end = run_end(&tgt_flags, cur);
            let Some(matched) = longest_match(&tgt_lower, cur, end, |g| source_grams.contains(g))
            else {
                return Err(CoreError::AlignmentInvariant {
                    position: cur,
                    token: target[cur].as_ref().to_string(),
                });
            };
            let gram = &tgt_lower[cur..matched];
            let id = match ids.get(gram) {
                Some(&id) => id,
                None => {
                    phrases.push(join(&target[cur..matched]));
                    ids.insert(gram, phrases.len());
                    phrases.len()
                }
            };
            target_out.push(Placeholder::untyped(id).to_string());
            cur = matched;
        }

        // Source pass: reuses phrase IDs
        let mut source_out = Vec::with_capacity(source.len());
        let mut unmatched_runs = 0;
        let mut in_unmatched = false;
        cur = 0;
        while cur < source.len() {
            if !src_flags[cur] {
                source_out.push(copy_token(source[cur].as_ref(), &mut phrases, &mut literals));
                in_unmatched = false;
                cur += 1;
                continue;
            }
            let end = run_end(&src_flags, cur);
            match longest_match(&src_lower, cur, end, |g| ids.contains_key(g)) {
                Some(matched) => {
                    let id = ids[&src_lower[cur..matched]];
                    source_out.push(Placeholder::untyped(id).to_string());
                    in_unmatched = false;
                    cur = matched;
                }
                None => match self.policy {
                    UnmatchedPolicy::Strict => {
                        return Err(CoreError::UnmatchedDntRun {
                            position: cur,
                            run: source[cur..end].iter().map(|t| t.as_ref().to_string()).collect(),
                        });
                    }
                    UnmatchedPolicy::Lenient => {
                        log::debug!(
                            "source DNT token {:?} at {cur} has no target phrase, left uncut",
                            source[cur].as_ref()
                        );
                        if !in_unmatched {
                            unmatched_runs += 1;
                        }
                        in_unmatched = true;
                        source_out.push(copy_token(source[cur].as_ref(), &mut phrases, &mut literals));
                        cur += 1;
                    }
                },
            }
        }

        Ok(Alignment {
            source: source_out,
            target: target_out,
            phrases,
            unmatched_runs,
        })
    }
}

/// Every contiguous n-gram of every maximal flagged run
fn run_grams<'a>(lower: &'a [String], flags: &[bool]) -> HashSet<&'a [String]> {
    let mut grams = HashSet::new();
    let mut cur = 0;
    while cur < lower.len() {
        if !flags[cur] {
            cur += 1;
            continue;
        }
        let end = run_end(flags, cur);
        for start in cur..end {
            for stop in start + 1..=end {
                grams.insert(&lower[start..stop]);
            }
        }
        cur = end;
    }
    grams
}

/// End of the flagged run starting at `start`
fn run_end(flags: &[bool], start: usize) -> usize {
    let mut end = start + 1;
    while end < flags.len() && flags[end] {
        end += 1;
    }
    end
}

/// Longest `[start, e)` with `e <= end` accepted by `accept`, shrinking from the right
fn longest_match<F>(lower: &[String], start: usize, end: usize, accept: F) -> Option<usize>
where
    F: Fn(&[String]) -> bool,
{
    (start + 1..=end).rev().find(|&e| accept(&lower[start..e]))
}

/// Uncut token, escaped through the phrase table when it parses as a placeholder
fn copy_token(tok: &str, phrases: &mut Vec<String>, literals: &mut HashMap<String, usize>) -> String {
    if Placeholder::parse(tok).is_none() {
        return tok.to_string();
    }
    let id = *literals.entry(tok.to_string()).or_insert_with(|| {
        phrases.push(tok.to_string());
        phrases.len()
    });
    Placeholder::untyped(id).to_string()
}

fn join<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ")
}
