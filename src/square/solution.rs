use std::fmt;

use ndarray::Array2;
use serde::Serialize;

use super::dictionary::Dictionary;
use super::letter_pool::LetterPool;

/// A completed word square, rows in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Solution {
    rows: Vec<String>,
}

impl Solution {
    pub fn new(rows: Vec<String>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<String> {
        self.rows
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// The letters as an N x N grid. Short rows are padded with spaces, long rows cut
    pub fn grid(&self) -> Array2<char> {
        let n = self.size();
        let mut grid = Array2::from_elem((n, n), ' ');
        for (i, row) in self.rows.iter().enumerate() {
            for (j, letter) in row.chars().take(n).enumerate() {
                grid[[i, j]] = letter;
            }
        }
        grid
    }

    /// True if every row has N letters and row i reads the same as column i
    pub fn is_symmetric(&self) -> bool {
        let n = self.size();
        if self.rows.iter().any(|row| row.chars().count() != n) {
            return false;
        }
        let grid = self.grid();
        grid == grid.t()
    }

    /// True if the letters used by all rows together are available in `pool`
    pub fn fits_within(&self, pool: &LetterPool) -> bool {
        let used: LetterPool = self.rows.iter().flat_map(|row| row.chars()).collect();
        pool.contains_pool(&used)
    }

    /// True if every row is a dictionary word of the square's size
    pub fn uses_words_from(&self, dictionary: &Dictionary) -> bool {
        match dictionary.words_of_length(self.size()) {
            Ok(words) => self.rows.iter().all(|row| words.contains(row)),
            Err(_) => false,
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.rows.iter() {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solution(rows: &[&str]) -> Solution {
        Solution::new(rows.iter().map(|r| r.to_string()).collect())
    }

    #[test]
    fn test_grid() {
        let square = solution(&["to", "on"]);
        let grid = square.grid();
        assert_eq!(grid.shape(), &[2, 2]);
        assert_eq!(grid[[0, 1]], 'o');
        assert_eq!(grid[[1, 0]], 'o');
        assert_eq!(grid[[1, 1]], 'n');
    }

    #[test]
    fn test_symmetry() {
        assert!(solution(&["moan", "once", "acme", "need"]).is_symmetric());
        assert!(!solution(&["moan", "once", "acme", "nede"]).is_symmetric());
        assert!(!solution(&["to", "o"]).is_symmetric());
        assert!(solution(&[]).is_symmetric());
    }

    #[test]
    fn test_fits_within() {
        let square = solution(&["to", "on"]);
        assert!(square.fits_within(&LetterPool::from_sequence("toon").unwrap()));
        assert!(square.fits_within(&LetterPool::from_sequence("toonx").unwrap()));
        assert!(!square.fits_within(&LetterPool::from_sequence("ton").unwrap()));
    }

    #[test]
    fn test_uses_words_from() {
        let dict = Dictionary::from_words(["to", "on", "moan"]);
        assert!(solution(&["to", "on"]).uses_words_from(&dict));
        assert!(!solution(&["to", "no"]).uses_words_from(&dict));
        assert!(!solution(&["abc", "def", "ghi"]).uses_words_from(&dict));
    }

    #[test]
    fn test_display_and_json() {
        let square = solution(&["to", "on"]);
        assert_eq!(square.to_string(), "to\non\n");
        assert_eq!(serde_json::to_string(&square).unwrap(), r#"["to","on"]"#);
    }
}
