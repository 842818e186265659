//! The daily puzzle: generated once per calendar date and difficulty, reused until the date
//! changes

use std::cmp::Ordering;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::puzzle::{Difficulty, Puzzle};
use crate::source::error::StoreError;

/// Theme of every daily puzzle
pub const DAILY_THEME: &str = "Daily Mix";

#[derive(Serialize, Deserialize)]
struct DailyEntry {
    date: NaiveDate,
    puzzle: Puzzle,
}

/// Keeps the daily puzzle for each difficulty in a JSON file under one directory
#[derive(Debug)]
pub struct DailyPuzzleStore {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl DailyPuzzleStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, difficulty: Difficulty) -> PathBuf {
        self.dir.join(format!(
            "daily_puzzle_{}.json",
            difficulty.label().to_lowercase()
        ))
    }

    /// The puzzle saved for `date`. A puzzle saved on an earlier date has expired and is removed;
    /// one saved on a later date is left alone.
    pub fn get(
        &self,
        date: NaiveDate,
        difficulty: Difficulty,
    ) -> Result<Option<Puzzle>, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let path = self.path(difficulty);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let entry: DailyEntry = match serde_json::from_reader(BufReader::new(file)) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Ignoring corrupt daily puzzle {}: {}", path.display(), e);
                return Ok(None);
            }
        };
        match entry.date.cmp(&date) {
            Ordering::Equal => Ok(Some(entry.puzzle)),
            Ordering::Greater => Ok(None),
            Ordering::Less => {
                debug!("Daily puzzle from {} has expired", entry.date);
                match fs::remove_file(&path) {
                    Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
                    _ => Ok(None),
                }
            }
        }
    }

    /// Saves `puzzle` as the daily puzzle of `date`, replacing any earlier one
    pub fn put(&self, date: NaiveDate, puzzle: &Puzzle) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = DailyEntry {
            date,
            puzzle: puzzle.clone(),
        };
        let mut file = NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer_pretty(&mut file, &entry)?;
        file.persist(self.path(puzzle.difficulty()))?;
        debug!("Saved daily puzzle for {}", date);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::puzzle::{generate, DifficultyProfile, GenerateOptions};
    use crate::source::WordCandidate;

    fn puzzle(difficulty: Difficulty) -> Puzzle {
        let candidates = vec![
            WordCandidate::new("FRIENDS", "Central Perk regulars"),
            WordCandidate::new("ROSS", "Pivot!"),
        ];
        let profile = DifficultyProfile {
            grid_size: 11,
            min_words: 1,
            target_words: 2,
            fetch_count: 2,
        };
        generate(
            DAILY_THEME,
            difficulty,
            &candidates,
            &profile,
            &GenerateOptions::default(),
            &mut StdRng::seed_from_u64(5),
        )
        .unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn same_day_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = DailyPuzzleStore::new(dir.path()).unwrap();
        assert_eq!(None, store.get(date(1), Difficulty::Easy).unwrap());
        let saved = puzzle(Difficulty::Easy);
        store.put(date(1), &saved).unwrap();
        let store = DailyPuzzleStore::new(dir.path()).unwrap();
        assert_eq!(Some(saved), store.get(date(1), Difficulty::Easy).unwrap());
        assert_eq!(None, store.get(date(1), Difficulty::Hard).unwrap());
    }

    #[test]
    fn puzzle_expires_next_day() {
        let dir = tempfile::tempdir().unwrap();
        let store = DailyPuzzleStore::new(dir.path()).unwrap();
        store.put(date(1), &puzzle(Difficulty::Easy)).unwrap();
        assert_eq!(None, store.get(date(2), Difficulty::Easy).unwrap());
        assert_eq!(0, fs::read_dir(dir.path()).unwrap().count());
        assert_eq!(None, store.get(date(1), Difficulty::Easy).unwrap());
    }

    #[test]
    fn earlier_date_leaves_newer_puzzle() {
        let dir = tempfile::tempdir().unwrap();
        let store = DailyPuzzleStore::new(dir.path()).unwrap();
        store.put(date(2), &puzzle(Difficulty::Easy)).unwrap();
        assert_eq!(None, store.get(date(1), Difficulty::Easy).unwrap());
        assert!(store.get(date(2), Difficulty::Easy).unwrap().is_some());
    }

    #[test]
    fn corrupt_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("daily_puzzle_easy.json"), "{").unwrap();
        let store = DailyPuzzleStore::new(dir.path()).unwrap();
        assert_eq!(None, store.get(date(1), Difficulty::Easy).unwrap());
        store.put(date(1), &puzzle(Difficulty::Easy)).unwrap();
        assert!(store.get(date(1), Difficulty::Easy).unwrap().is_some());
    }
}
