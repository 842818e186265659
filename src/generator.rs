use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::puzzle::error::GenerateError;
use crate::puzzle::{generate, Difficulty, GenerateOptions, Puzzle, Region};
use crate::source::{ContentProvider, DailyPuzzleStore, WordSourcer, WordStore, DAILY_THEME};

/// Sources candidates for a topic and lays them out into a puzzle
pub struct PuzzleGenerator<P, S> {
    sourcer: WordSourcer<P, S>,
    options: GenerateOptions,
}

impl<P: ContentProvider, S: WordStore> PuzzleGenerator<P, S> {
    pub fn new(sourcer: WordSourcer<P, S>) -> Self {
        Self::with_options(sourcer, GenerateOptions::default())
    }

    pub fn with_options(sourcer: WordSourcer<P, S>, options: GenerateOptions) -> Self {
        Self { sourcer, options }
    }

    pub fn sourcer(&self) -> &WordSourcer<P, S> {
        &self.sourcer
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Generates a puzzle for `topic`. With a fixed seed in the options, the same candidates
    /// always produce the same puzzle.
    pub async fn generate_puzzle(
        &self,
        topic: &str,
        difficulty: Difficulty,
        region: Region,
    ) -> Result<Puzzle, GenerateError> {
        info!("Generating {} puzzle for \"{}\" ({})", difficulty, topic, region);
        let mut rng = match self.options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let candidates = self
            .sourcer
            .fetch_candidates(topic, difficulty, region, &mut rng)
            .await;
        if candidates.len() < self.sourcer.options().min_candidates {
            return Err(GenerateError::InsufficientCandidates {
                topic: topic.to_string(),
                available: candidates.len(),
            });
        }
        let puzzle = generate(
            topic,
            difficulty,
            &candidates,
            difficulty.profile(),
            &self.options,
            &mut rng,
        )?;
        info!(
            "Placed {} words in a {}x{} grid",
            puzzle.word_count(),
            puzzle.width(),
            puzzle.height()
        );
        Ok(puzzle)
    }

    /// The "Daily Mix" puzzle of `date`. The first request of the day generates and saves it;
    /// later requests that day get the saved puzzle back.
    pub async fn daily_puzzle(
        &self,
        store: &DailyPuzzleStore,
        date: NaiveDate,
        difficulty: Difficulty,
        region: Region,
    ) -> Result<Puzzle, GenerateError> {
        match store.get(date, difficulty) {
            Ok(Some(puzzle)) => {
                info!("Using saved daily puzzle for {}", date);
                return Ok(puzzle);
            }
            Ok(None) => {}
            Err(e) => warn!("Could not read daily puzzle: {}", e),
        }
        let puzzle = self.generate_puzzle(DAILY_THEME, difficulty, region).await?;
        if let Err(e) = store.put(date, &puzzle) {
            warn!("Could not save daily puzzle: {}", e);
        }
        Ok(puzzle)
    }
}
