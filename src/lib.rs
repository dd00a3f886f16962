pub mod square;
pub mod utils;

pub use square::{solve_word_square, Dictionary, Solver, SolverConfig, WordSquareError};
