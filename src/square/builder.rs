use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use super::candidates::CandidateSet;
use super::letter_pool::LetterPool;

/*
    Depth-first search that fills the square one row at a time.

    Placing row r fixes column r as well, so a new row must start with the
    letters already sitting in column r of the rows above it. Every branch
    gets its own copy of the partial square and the letter pool, which makes
    backtracking a plain return.
*/

/// A row in the partial square: the word and its characters
type Row<'a> = (&'a str, &'a [char]);

/// Why a search gave up before exhausting its candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    Cancelled,
    TimedOut,
    NodeLimit,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Cancelled => write!(f, "cancelled"),
            Self::TimedOut => write!(f, "timed out"),
            Self::NodeLimit => write!(f, "node limit reached"),
        }
    }
}

/// Bounds checked once per search node
#[derive(Debug, Clone, Default)]
pub struct SearchLimits {
    /// Set from another thread to stop the search
    pub cancel: Option<Arc<AtomicBool>>,
    pub deadline: Option<Instant>,
    /// Maximum number of search nodes to visit
    pub max_nodes: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Number of times the search was entered, one per (row, partial square)
    pub nodes: u64,
    /// Number of rows placed and then taken back
    pub backtracks: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Rows of the first square found
    Found(Vec<String>),
    /// Every candidate was tried without completing a square
    Exhausted,
    Stopped(StopReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

enum Step<'a> {
    Found(Vec<&'a str>),
    Backtrack,
    Stop(StopReason),
}

pub struct SquareBuilder<'a> {
    candidates: &'a CandidateSet,
    limits: SearchLimits,
    stats: SearchStats,
}

impl<'a> SquareBuilder<'a> {
    pub fn new(candidates: &'a CandidateSet) -> Self {
        Self {
            candidates,
            limits: SearchLimits::default(),
            stats: SearchStats::default(),
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Searches for the first square, in candidate order, that can be spelled from `pool`
    pub fn build(mut self, pool: &LetterPool) -> SearchReport {
        let outcome = match self.search(&[], pool) {
            Step::Found(rows) => SearchOutcome::Found(rows.into_iter().map(String::from).collect()),
            Step::Backtrack => SearchOutcome::Exhausted,
            Step::Stop(reason) => SearchOutcome::Stopped(reason),
        };
        log::debug!(
            "Search finished after {} nodes and {} backtracks: {:?}",
            self.stats.nodes,
            self.stats.backtracks,
            outcome
        );
        SearchReport {
            outcome,
            stats: self.stats,
        }
    }

    fn search(&mut self, square: &[Row<'a>], pool: &LetterPool) -> Step<'a> {
        self.stats.nodes += 1;
        let row = square.len();
        if row == self.candidates.size() {
            return Step::Found(square.iter().map(|&(word, _)| word).collect());
        }
        if let Some(reason) = self.check_limits() {
            return Step::Stop(reason);
        }

        let required_prefix = required_prefix(square, row);
        let candidates = self.candidates;
        for (word, letters) in candidates.iter() {
            if !letters.starts_with(&required_prefix) {
                continue;
            }
            if !pool.has_enough_for(word) {
                continue;
            }
            if !self.columns_can_complete(square, letters) {
                continue;
            }

            let mut next = square.to_vec();
            next.push((word, letters));
            match self.search(&next, &pool.consuming(word)) {
                Step::Backtrack => {
                    self.stats.backtracks += 1;
                    log::trace!("Backtracking from {:?} at row {}", word, row);
                }
                done => return done,
            }
        }
        Step::Backtrack
    }

    /// Every column to the right of the diagonal must still be the start of some candidate
    /// once `letters` is placed as the next row
    fn columns_can_complete(&self, square: &[Row<'a>], letters: &[char]) -> bool {
        let row = square.len();
        let mut column = String::with_capacity(4 * (row + 1));
        (row + 1..self.candidates.size()).all(|col| {
            column.clear();
            column.extend(square.iter().map(|&(_, placed)| placed[col]));
            column.push(letters[col]);
            self.candidates.has_prefix(&column)
        })
    }

    fn check_limits(&self) -> Option<StopReason> {
        if let Some(cancel) = &self.limits.cancel {
            if cancel.load(Ordering::Relaxed) {
                return Some(StopReason::Cancelled);
            }
        }
        if let Some(max_nodes) = self.limits.max_nodes {
            if self.stats.nodes > max_nodes {
                return Some(StopReason::NodeLimit);
            }
        }
        if let Some(deadline) = self.limits.deadline {
            if Instant::now() >= deadline {
                return Some(StopReason::TimedOut);
            }
        }
        None
    }
}

/// Letters already fixed in column `row` by the rows above it
fn required_prefix(square: &[Row], row: usize) -> Vec<char> {
    square.iter().map(|&(_, letters)| letters[row]).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::time::Duration;

    use super::*;
    use crate::square::candidates::CandidateOrder;

    fn candidates(size: usize, words: &[&str], letters: &str) -> (CandidateSet, LetterPool) {
        let vocab: BTreeSet<String> = words.iter().map(|w| w.to_string()).collect();
        let pool = LetterPool::from_sequence(letters).unwrap();
        let set = CandidateSet::filter(size, &vocab, &pool, CandidateOrder::Lexicographic).unwrap();
        (set, pool)
    }

    #[test]
    fn test_two_by_two() {
        let (set, pool) = candidates(2, &["to", "on"], "toon");
        let report = SquareBuilder::new(&set).build(&pool);

        assert_eq!(
            report.outcome,
            SearchOutcome::Found(vec!["to".to_string(), "on".to_string()])
        );
        // "on" is pruned up front since no candidate starts with "n"
        assert_eq!(report.stats.nodes, 3);
        assert_eq!(report.stats.backtracks, 0);
    }

    #[test]
    fn test_empty_candidates_exhaust() {
        let (set, pool) = candidates(3, &[], "abc");
        let report = SquareBuilder::new(&set).build(&pool);
        assert_eq!(report.outcome, SearchOutcome::Exhausted);
    }

    #[test]
    fn test_no_square_possible() {
        let (set, pool) = candidates(3, &["abc", "def", "ghi"], "abcdefghi");
        assert_eq!(set.len(), 3);
        let report = SquareBuilder::new(&set).build(&pool);
        assert_eq!(report.outcome, SearchOutcome::Exhausted);
    }

    #[test]
    fn test_branch_letters_are_enforced() {
        // "aa" alone would make a square, but only with two 'a's
        let (set, pool) = candidates(2, &["aa"], "a");
        assert!(set.is_empty());
        let report = SquareBuilder::new(&set).build(&pool);
        assert_eq!(report.outcome, SearchOutcome::Exhausted);

        // Both rows fit the full pool, but not together
        let (set, pool) = candidates(2, &["ab", "ba", "bb"], "abb");
        let report = SquareBuilder::new(&set).build(&pool);
        assert_eq!(report.outcome, SearchOutcome::Exhausted);
        assert!(report.stats.backtracks > 0);
    }

    #[test]
    fn test_four_by_four() {
        let (set, pool) = candidates(
            4,
            &["moan", "once", "acme", "need", "boat"],
            "aaccdeeeemmnnnoo",
        );
        let report = SquareBuilder::new(&set).build(&pool);
        assert_eq!(
            report.outcome,
            SearchOutcome::Found(
                ["moan", "once", "acme", "need"]
                    .iter()
                    .map(|w| w.to_string())
                    .collect()
            )
        );
    }

    #[test]
    fn test_cancelled_before_start() {
        let (set, pool) = candidates(2, &["to", "on"], "toon");
        let limits = SearchLimits {
            cancel: Some(Arc::new(AtomicBool::new(true))),
            ..Default::default()
        };
        let report = SquareBuilder::new(&set).with_limits(limits).build(&pool);
        assert_eq!(report.outcome, SearchOutcome::Stopped(StopReason::Cancelled));
        assert_eq!(report.stats.nodes, 1);
    }

    #[test]
    fn test_node_limit() {
        let (set, pool) = candidates(2, &["to", "on"], "toon");
        let limits = SearchLimits {
            max_nodes: Some(1),
            ..Default::default()
        };
        let report = SquareBuilder::new(&set).with_limits(limits).build(&pool);
        assert_eq!(report.outcome, SearchOutcome::Stopped(StopReason::NodeLimit));
    }

    #[test]
    fn test_deadline_in_the_past() {
        let (set, pool) = candidates(2, &["to", "on"], "toon");
        let limits = SearchLimits {
            deadline: Some(Instant::now() - Duration::from_millis(1)),
            ..Default::default()
        };
        let report = SquareBuilder::new(&set).with_limits(limits).build(&pool);
        assert_eq!(report.outcome, SearchOutcome::Stopped(StopReason::TimedOut));
    }

    #[test]
    fn test_required_prefix() {
        let moan = "moan".chars().collect::<Vec<_>>();
        let once = "once".chars().collect::<Vec<_>>();
        let square: Vec<Row> = vec![("moan", moan.as_slice()), ("once", once.as_slice())];

        assert!(required_prefix(&square[..0], 0).is_empty());
        assert_eq!(required_prefix(&square[..1], 1), vec!['o']);
        assert_eq!(required_prefix(&square, 2), vec!['a', 'c']);
        assert_eq!(required_prefix(&square, 3), vec!['n', 'e']);
    }
}
