use fst::automaton::Str;
use fst::{Automaton, IntoStreamer, Set, Streamer};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::Result;
use super::letter_pool::LetterPool;

/// Order in which the search tries candidate words. The first square found
/// depends on it, so it is part of the solver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateOrder {
    /// Byte-wise ascending
    Lexicographic,
    /// A fixed permutation derived from the seed
    Shuffled { seed: u64 },
}

impl Default for CandidateOrder {
    fn default() -> Self {
        Self::Lexicographic
    }
}

/// Dictionary words of one length that can be spelled from the full letter pool.
///
/// Filtering against the initial pool is safe because every pool seen during the
/// search is a sub-multiset of it: a word rejected here could never be placed.
pub struct CandidateSet {
    /// Words in search order
    words: Vec<String>,
    /// Characters of each word, parallel to `words`
    letters: Vec<Vec<char>>,
    /// Prefix index over the same words, used for column completion checks
    index: Set<Vec<u8>>,
    /// Length of every word in the set
    size: usize,
}

impl CandidateSet {
    /// Keeps the words of length `size` that `pool` has enough letters for
    pub fn filter<'a, I>(
        size: usize,
        words: I,
        pool: &LetterPool,
        order: CandidateOrder,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let all = words.into_iter().map(String::as_str).collect::<Vec<_>>();
        // Order is preserved by the indexed parallel collect
        let mut words = all
            .par_iter()
            .filter(|w| w.chars().count() == size && pool.has_enough_for(w))
            .map(|w| w.to_string())
            .collect::<Vec<_>>();

        // fst needs its keys sorted and unique
        words.sort_unstable();
        words.dedup();
        let index = Set::from_iter(words.iter())?;

        if let CandidateOrder::Shuffled { seed } = order {
            let mut rng = StdRng::seed_from_u64(seed);
            words.shuffle(&mut rng);
        }

        let letters = words.iter().map(|w| w.chars().collect()).collect();
        log::debug!(
            "{} of {} words of length {} fit the letter pool",
            words.len(),
            all.len(),
            size
        );

        Ok(Self {
            words,
            letters,
            index,
            size,
        })
    }

    /// True if at least one candidate starts with `prefix`
    pub fn has_prefix(&self, prefix: &str) -> bool {
        let matcher = Str::new(prefix).starts_with();
        let mut stream = self.index.search(matcher).into_stream();
        stream.next().is_some()
    }

    /// Candidates in search order, each with its characters
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[char])> {
        self.words
            .iter()
            .map(String::as_str)
            .zip(self.letters.iter().map(Vec::as_slice))
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn words(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_filter_by_letters() {
        let vocab = words(&["moan", "once", "acme", "need", "boat"]);
        let pool = LetterPool::from_sequence("aaccdeeeemmnnnoo").unwrap();
        let set = CandidateSet::filter(4, &vocab, &pool, CandidateOrder::Lexicographic).unwrap();

        assert_eq!(set.words(), &["acme", "moan", "need", "once"]);
        assert_eq!(set.size(), 4);
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_filter_drops_other_lengths() {
        let vocab = words(&["to", "on", "toon"]);
        let pool = LetterPool::from_sequence("toon").unwrap();
        let set = CandidateSet::filter(2, &vocab, &pool, CandidateOrder::Lexicographic).unwrap();
        assert_eq!(set.words(), &["on", "to"]);
    }

    #[test]
    fn test_filter_can_be_empty() {
        let vocab = words(&["abc", "def"]);
        let pool = LetterPool::from_sequence("xyz").unwrap();
        let set = CandidateSet::filter(3, &vocab, &pool, CandidateOrder::Lexicographic).unwrap();
        assert!(set.is_empty());
        assert!(!set.has_prefix(""));
    }

    #[test]
    fn test_has_prefix_matches_linear_scan() {
        let vocab = words(&["feast", "earth", "armor", "stone", "threw"]);
        let pool = LetterPool::from_sequence("aaaeeeefhhmoonssrrrrttttw").unwrap();
        let set = CandidateSet::filter(5, &vocab, &pool, CandidateOrder::Lexicographic).unwrap();

        for prefix in ["", "f", "fe", "feast", "ea", "st", "sto", "x", "feasts", "th", "tr"] {
            let linear = set.words().iter().any(|w| w.starts_with(prefix));
            assert_eq!(set.has_prefix(prefix), linear, "prefix {:?}", prefix);
        }
    }

    #[test]
    fn test_shuffled_order_is_seeded() {
        let vocab = words(&["acme", "moan", "need", "once", "omen", "mean", "dame"]);
        let pool = LetterPool::from_sequence("aaccdeeeemmnnnoo").unwrap();
        let a = CandidateSet::filter(4, &vocab, &pool, CandidateOrder::Shuffled { seed: 3 }).unwrap();
        let b = CandidateSet::filter(4, &vocab, &pool, CandidateOrder::Shuffled { seed: 3 }).unwrap();
        let lex = CandidateSet::filter(4, &vocab, &pool, CandidateOrder::Lexicographic).unwrap();

        assert_eq!(a.words(), b.words());

        let mut sorted = a.words().to_vec();
        sorted.sort();
        assert_eq!(sorted, lex.words());

        // Letters stay aligned with their words after shuffling
        for (word, letters) in a.iter() {
            assert_eq!(word.chars().collect::<Vec<_>>(), letters);
        }
    }
}
