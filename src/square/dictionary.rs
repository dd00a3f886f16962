use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use super::error::{Result, WordSquareError};

/// Word list indexed by word length.
///
/// Words are trimmed and lowercased on the way in, blank lines are skipped and
/// duplicates collapse. Length is counted in characters, not bytes. Nothing
/// mutates a dictionary after loading, so one instance can be shared between
/// solves on different threads.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    by_length: HashMap<usize, BTreeSet<String>>,
}

impl Dictionary {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Self::default();
        words.into_iter().for_each(|w| dict.insert(w.as_ref()));
        dict
    }

    /// Reads one word per line
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut dict = Self::default();
        for line in reader.lines() {
            dict.insert(&line?);
        }
        Ok(dict)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let to_error = |source| WordSquareError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(to_error)?;
        let dict = Self::from_reader(BufReader::new(file)).map_err(to_error)?;
        log::info!(
            "Loaded {} words ({} distinct lengths) from {}",
            dict.len(),
            dict.by_length.len(),
            path.display()
        );
        Ok(dict)
    }

    /// All words with exactly `size` characters
    pub fn words_of_length(&self, size: usize) -> Result<&BTreeSet<String>> {
        self.by_length
            .get(&size)
            .ok_or(WordSquareError::DictionaryUnavailable { size })
    }

    /// Word lengths present in the dictionary, ascending
    pub fn lengths(&self) -> Vec<usize> {
        let mut lengths = self.by_length.keys().copied().collect::<Vec<_>>();
        lengths.sort_unstable();
        lengths
    }

    pub fn len(&self) -> usize {
        self.by_length.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_length.is_empty()
    }

    fn insert(&mut self, raw: &str) {
        let word = raw.trim().to_lowercase();
        if word.is_empty() {
            return;
        }
        self.by_length
            .entry(word.chars().count())
            .or_default()
            .insert(word);
    }
}
