use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;

use super::builder::{SearchLimits, SearchOutcome, SearchStats, SquareBuilder, StopReason};
use super::candidates::CandidateSet;
use super::config::SolverConfig;
use super::dictionary::Dictionary;
use super::error::{Result, WordSquareError};
use super::letter_pool::LetterPool;
use super::solution::Solution;

/// How a solve ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    Solved,
    /// Size zero was requested; the answer is the empty square
    ZeroSize,
    /// No dictionary word of the size can be spelled from the letters
    NoCandidates,
    /// The search tried everything without completing a square
    Exhausted,
    Cancelled,
    TimedOut,
    NodeLimit,
}

impl SolveStatus {
    /// The limit that stopped the search, if one did
    pub fn stop_reason(&self) -> Option<StopReason> {
        match self {
            Self::Cancelled => Some(StopReason::Cancelled),
            Self::TimedOut => Some(StopReason::TimedOut),
            Self::NodeLimit => Some(StopReason::NodeLimit),
            _ => None,
        }
    }
}

impl From<StopReason> for SolveStatus {
    fn from(reason: StopReason) -> Self {
        match reason {
            StopReason::Cancelled => Self::Cancelled,
            StopReason::TimedOut => Self::TimedOut,
            StopReason::NodeLimit => Self::NodeLimit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolveResult {
    pub solution: Option<Solution>,
    pub status: SolveStatus,
    /// Number of words that survived the letter pre-filter
    pub candidates: usize,
    pub stats: SearchStats,
}

impl SolveResult {
    fn unsolved(status: SolveStatus, candidates: usize) -> Self {
        Self {
            solution: None,
            status,
            candidates,
            stats: SearchStats::default(),
        }
    }
}

/// Builds word squares from a shared, read-only dictionary.
///
/// A solver holds no per-solve state, so one instance can serve many solves,
/// including parallel ones through [`Solver::solve_batch`].
pub struct Solver<'d> {
    dictionary: &'d Dictionary,
    config: SolverConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'d> Solver<'d> {
    pub fn new(dictionary: &'d Dictionary) -> Self {
        Self {
            dictionary,
            config: SolverConfig::default(),
            cancel: None,
        }
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Searches stop with [`SolveStatus::Cancelled`] once `flag` is set
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Finds a word square of side `size` using only the letters in `sequence`.
    ///
    /// Returns the rows of the first square found in candidate order, or an empty
    /// vector when there is none. A search cut short by a limit is an error so that
    /// an empty result always means no square exists.
    pub fn solve(&self, size: usize, sequence: &str) -> Result<Vec<String>> {
        let result = self.solve_detailed(size, sequence)?;
        if let Some(reason) = result.status.stop_reason() {
            return Err(WordSquareError::Interrupted { reason });
        }
        Ok(result.solution.map(Solution::into_rows).unwrap_or_default())
    }

    /// Like [`Solver::solve`], but reports how the search ended and what it cost
    /// The timeout, if configured, starts counting here and covers candidate filtering
    pub fn solve_detailed(&self, size: usize, sequence: &str) -> Result<SolveResult> {
        let started = Instant::now();
        let pool = LetterPool::from_sequence(sequence)?;
        if size == 0 {
            return Ok(SolveResult::unsolved(SolveStatus::ZeroSize, 0));
        }

        let words = self.dictionary.words_of_length(size)?;
        let candidates = CandidateSet::filter(size, words, &pool, self.config.order)?;
        if candidates.is_empty() {
            log::info!("No words of length {} can be spelled from {:?}", size, sequence);
            return Ok(SolveResult::unsolved(SolveStatus::NoCandidates, 0));
        }

        let report = SquareBuilder::new(&candidates)
            .with_limits(self.limits(started))
            .build(&pool);
        let (solution, status) = match report.outcome {
            SearchOutcome::Found(rows) => (Some(Solution::new(rows)), SolveStatus::Solved),
            SearchOutcome::Exhausted => (None, SolveStatus::Exhausted),
            SearchOutcome::Stopped(reason) => (None, reason.into()),
        };
        log::info!(
            "Solved size {} from {} letters: {:?} ({} candidates, {} nodes)",
            size,
            pool.total(),
            status,
            candidates.len(),
            report.stats.nodes
        );

        Ok(SolveResult {
            solution,
            status,
            candidates: candidates.len(),
            stats: report.stats,
        })
    }

    /// Solves independent requests in parallel. Results come back in request order.
    pub fn solve_batch<S>(&self, requests: &[(usize, S)]) -> Vec<Result<Vec<String>>>
    where
        S: AsRef<str> + Sync,
    {
        requests
            .par_iter()
            .map(|(size, sequence)| self.solve(*size, sequence.as_ref()))
            .collect()
    }

    fn limits(&self, started: Instant) -> SearchLimits {
        SearchLimits {
            cancel: self.cancel.clone(),
            deadline: self.config.timeout().map(|t| started + t),
            max_nodes: self.config.max_nodes,
        }
    }
}

/// Solves one puzzle with the default configuration.
///
/// A missing sequence is rejected the same way as an empty one.
pub fn solve_word_square(
    dictionary: &Dictionary,
    size: usize,
    sequence: Option<&str>,
) -> Result<Vec<String>> {
    let sequence = sequence.ok_or_else(|| {
        WordSquareError::InvalidInput("letter sequence must be provided".into())
    })?;
    Solver::new(dictionary).solve(size, sequence)
}
