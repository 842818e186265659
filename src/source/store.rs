//! Persistent word banks keyed by topic and difficulty

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use ahash::AHashMap;
use enum_dispatch::enum_dispatch;
use itertools::Itertools;
use linked_hash_map::LinkedHashMap;
use tempfile::NamedTempFile;

use crate::puzzle::Difficulty;
use crate::source::error::StoreError;
use crate::source::WordCandidate;

pub const DEFAULT_BANK_CAPACITY: usize = 200;

/// Identifies one word bank. Topics that differ only in case, spacing or punctuation share a
/// bank, so each bank maps to exactly one file name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BankKey {
    topic: String,
    difficulty: Difficulty,
}

impl BankKey {
    pub fn new(topic: &str, difficulty: Difficulty) -> Self {
        let slug = topic
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|part| !part.is_empty())
            .map(str::to_ascii_lowercase)
            .join("-");
        Self {
            topic: if slug.is_empty() { "topic".to_string() } else { slug },
            difficulty,
        }
    }

    /// The normalized topic, e.g. `90s-tv`
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// File name of the bank within a store directory, e.g. `words_90s-tv_hard.json`
    pub fn file_name(&self) -> String {
        format!(
            "words_{}_{}.json",
            self.topic,
            self.difficulty.label().to_lowercase()
        )
    }
}

/// Answers with their clues, oldest first. Holds at most `capacity` entries; writing an answer
/// again replaces its clue and makes it the newest.
#[derive(Clone, Debug)]
pub struct WordBank {
    words: LinkedHashMap<String, String>,
    capacity: usize,
}

impl WordBank {
    pub fn new(capacity: usize) -> Self {
        Self {
            words: LinkedHashMap::new(),
            capacity,
        }
    }

    pub fn from_words(words: impl IntoIterator<Item = WordCandidate>, capacity: usize) -> Self {
        let mut bank = WordBank::new(capacity);
        bank.extend(words);
        bank
    }

    pub fn insert(&mut self, word: WordCandidate) {
        self.words.remove(&word.answer);
        self.words.insert(word.answer, word.clue);
        while self.words.len() > self.capacity {
            self.words.pop_front();
        }
    }

    pub fn extend(&mut self, words: impl IntoIterator<Item = WordCandidate>) {
        for word in words {
            self.insert(word);
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> Vec<WordCandidate> {
        self.words
            .iter()
            .map(|(answer, clue)| WordCandidate::new(answer.as_str(), clue.as_str()))
            .collect()
    }
}

/// Storage for word banks
#[enum_dispatch]
pub trait WordStore {
    /// All words in the bank, oldest first. A bank that was never written is empty.
    fn get(&self, key: &BankKey) -> Result<Vec<WordCandidate>, StoreError>;

    /// Merges `words` into the bank and returns its new size
    fn put(&self, key: &BankKey, words: &[WordCandidate]) -> Result<usize, StoreError>;
}

/// Keeps banks for the life of the process
#[derive(Debug)]
pub struct MemoryWordStore {
    banks: Mutex<AHashMap<BankKey, WordBank>>,
    capacity: usize,
}

impl MemoryWordStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BANK_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            banks: Mutex::new(AHashMap::default()),
            capacity,
        }
    }
}

impl Default for MemoryWordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WordStore for MemoryWordStore {
    fn get(&self, key: &BankKey) -> Result<Vec<WordCandidate>, StoreError> {
        let banks = self.banks.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(banks.get(key).map(WordBank::words).unwrap_or_default())
    }

    fn put(&self, key: &BankKey, words: &[WordCandidate]) -> Result<usize, StoreError> {
        let mut banks = self.banks.lock().unwrap_or_else(PoisonError::into_inner);
        let capacity = self.capacity;
        let bank = banks
            .entry(key.clone())
            .or_insert_with(|| WordBank::new(capacity));
        bank.extend(words.iter().cloned());
        Ok(bank.len())
    }
}

/// Keeps each bank in a JSON file under one directory. Writes replace the file atomically.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
    capacity: usize,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Self::with_capacity(dir, DEFAULT_BANK_CAPACITY)
    }

    pub fn with_capacity(dir: impl Into<PathBuf>, capacity: usize) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            capacity,
            lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &BankKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    fn read(&self, key: &BankKey) -> Result<Vec<WordCandidate>, StoreError> {
        let file = match File::open(self.path(key)) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

impl WordStore for JsonFileStore {
    fn get(&self, key: &BankKey) -> Result<Vec<WordCandidate>, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.read(key)
    }

    fn put(&self, key: &BankKey, words: &[WordCandidate]) -> Result<usize, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let existing = match self.read(key) {
            Ok(existing) => existing,
            Err(StoreError::Json(e)) => {
                warn!("Replacing corrupt word bank {}: {}", key.file_name(), e);
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        let mut bank = WordBank::from_words(existing, self.capacity);
        bank.extend(words.iter().cloned());
        let mut file = NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer_pretty(&mut file, &bank.words())?;
        file.persist(self.path(key))?;
        debug!("Saved {} words to {}", bank.len(), key.file_name());
        Ok(bank.len())
    }
}

/// A word store chosen at runtime
#[enum_dispatch(WordStore)]
#[derive(Debug)]
pub enum AnyWordStore {
    MemoryWordStore,
    JsonFileStore,
}
