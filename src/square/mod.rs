// Word square search: letters in, N symmetric rows out
pub mod builder;
pub mod candidates;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod letter_pool;
pub mod solution;
pub mod solver;

pub use self::builder::{SearchLimits, SearchOutcome, SearchReport, SearchStats, SquareBuilder, StopReason};
pub use self::candidates::{CandidateOrder, CandidateSet};
pub use self::config::SolverConfig;
pub use self::dictionary::Dictionary;
pub use self::error::{Result, WordSquareError};
pub use self::letter_pool::LetterPool;
pub use self::solution::Solution;
pub use self::solver::{solve_word_square, SolveResult, SolveStatus, Solver};
