use std::collections::BTreeMap;
use std::fmt;

use super::error::{Result, WordSquareError};

/// Multiset of letters available for building a square.
///
/// A pool is never changed once a search branch holds it: [`LetterPool::consuming`]
/// hands back a fresh pool, so sibling branches keep seeing their parent's letters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterPool {
    /// Histogram of the remaining letters. Letters that run out are removed
    counts: BTreeMap<char, usize>,
    /// The total number of remaining letters
    n_total: usize,
}

impl LetterPool {
    /// Builds a pool from raw user input. Letters are lowercased; anything that is
    /// not alphabetic (whitespace included) is rejected.
    pub fn from_sequence(letters: &str) -> Result<Self> {
        if letters.is_empty() {
            return Err(WordSquareError::InvalidInput(
                "letter sequence must not be empty".into(),
            ));
        }
        if let Some(c) = letters.chars().find(|c| !c.is_alphabetic()) {
            return Err(WordSquareError::InvalidInput(format!(
                "letter sequence must only contain letters, found {:?}",
                c
            )));
        }
        // Whole-string lowercasing, the same folding dictionary words get
        Ok(letters.to_lowercase().chars().collect())
    }

    pub fn count(&self, letter: char) -> usize {
        self.counts.get(&letter).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.n_total
    }

    pub fn is_empty(&self) -> bool {
        self.n_total == 0
    }

    /// True if every letter of `word` is in the pool at least as many times as it
    /// occurs in `word`
    pub fn has_enough_for(&self, word: &str) -> bool {
        // Cheap rejection before building the histogram
        if word.chars().count() > self.n_total {
            return false;
        }
        let needed: LetterPool = word.chars().collect();
        self.contains_pool(&needed)
    }

    /// Returns a new pool with one occurrence of every letter of `word` removed.
    /// The caller must have checked [`LetterPool::has_enough_for`] first.
    pub fn consuming(&self, word: &str) -> Self {
        let mut tmp = self.clone();
        word.chars().for_each(|l| tmp.remove_inplace(l));
        tmp
    }

    /// True if `other` is a sub-multiset of this pool
    pub fn contains_pool(&self, other: &LetterPool) -> bool {
        other
            .counts
            .iter()
            .all(|(&letter, &needed)| self.count(letter) >= needed)
    }

    fn add_inplace(&mut self, letter: char) {
        *self.counts.entry(letter).or_insert(0) += 1;
        self.n_total += 1;
    }

    fn remove_inplace(&mut self, letter: char) {
        match self.counts.get_mut(&letter) {
            Some(n) if *n > 1 => *n -= 1,
            Some(_) => {
                self.counts.remove(&letter);
            }
            None => {
                debug_assert!(false, "letter {:?} is not in the pool", letter);
                return;
            }
        }
        self.n_total -= 1;
    }
}

/// Collects letters as-is, with no validation or case folding
impl std::iter::FromIterator<char> for LetterPool {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        let mut pool = Self::default();
        iter.into_iter().for_each(|l| pool.add_inplace(l));
        pool
    }
}

impl fmt::Display for LetterPool {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (&letter, &n) in self.counts.iter() {
            for _ in 0..n {
                write!(f, "{}", letter)?;
            }
        }
        Ok(())
    }
}
