use ahash::AHashSet;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::puzzle::error::GenerateError;
use crate::puzzle::layout::{layout, PlacedWord};
use crate::puzzle::normalize::normalize;
use crate::puzzle::{Difficulty, DifficultyProfile, Puzzle};
use crate::source::WordCandidate;

const MAX_ATTEMPTS: usize = 50;
const SCRATCH_SIZE: usize = 40;
const MIN_DIMENSION: usize = 10;
const DENSITY_RATIO: f32 = 0.9;

/// Tuning for the retry loop
#[derive(Clone, Debug, PartialEq)]
pub struct GenerateOptions {
    /// layout runs per puzzle; the first uses longest-first order, the rest are shuffled
    pub max_attempts: usize,
    /// width and height of the scratch grid used during placement
    pub scratch_size: usize,
    /// finished puzzles are padded to at least this size (capped by the profile's grid size)
    pub min_dimension: usize,
    /// how many words short of `min_words` a puzzle may fall and still be accepted
    pub min_words_grace: usize,
    /// stop retrying once this share of the candidate pool is placed
    pub density_ratio: f32,
    /// fixed RNG seed for reproducible puzzles
    pub seed: Option<u64>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            scratch_size: SCRATCH_SIZE,
            min_dimension: MIN_DIMENSION,
            min_words_grace: 0,
            density_ratio: DENSITY_RATIO,
            seed: None,
        }
    }
}

/// Runs the layout engine repeatedly over different orderings of `candidates` and keeps the
/// densest result. Ties keep the earliest attempt.
pub fn generate<R: Rng + ?Sized>(
    theme: &str,
    difficulty: Difficulty,
    candidates: &[WordCandidate],
    profile: &DifficultyProfile,
    options: &GenerateOptions,
    rng: &mut R,
) -> Result<Puzzle, GenerateError> {
    let pool = dedup(candidates);
    if pool.is_empty() {
        return Err(GenerateError::InsufficientCandidates {
            topic: theme.to_string(),
            available: 0,
        });
    }

    let mut best: Vec<PlacedWord> = Vec::new();
    for attempt in 0..options.max_attempts.max(1) {
        let ordering = if attempt == 0 {
            longest_first(&pool)
        } else {
            let mut shuffled = pool.clone();
            shuffled.shuffle(rng);
            shuffled
        };
        let placed = match layout(&ordering, profile.grid_size, options.scratch_size, rng) {
            Some(placed) => placed,
            None => {
                debug!("Attempt {}: seed word {} did not fit", attempt + 1, ordering[0].answer);
                continue;
            }
        };
        debug!(
            "Attempt {}: placed {}/{} words",
            attempt + 1,
            placed.len(),
            pool.len()
        );
        if placed.len() > best.len() {
            best = placed;
        }
        if is_dense_enough(best.len(), pool.len(), profile, options) {
            debug!("Density reached after {} attempts", attempt + 1);
            break;
        }
    }

    let required = profile
        .min_words
        .saturating_sub(options.min_words_grace)
        .max(1);
    if best.len() < required {
        return Err(GenerateError::LayoutBelowMinimum {
            topic: theme.to_string(),
            placed: best.len(),
            required,
        });
    }
    let lite = best.len() < profile.target_words;
    if lite {
        info!(
            "Placed {} of {} targeted words for \"{}\"",
            best.len(),
            profile.target_words,
            theme
        );
    }
    let normalized = normalize(&best, profile.grid_size, options.min_dimension);
    Ok(Puzzle::new(theme, difficulty, normalized, lite))
}

fn is_dense_enough(
    placed: usize,
    pool: usize,
    profile: &DifficultyProfile,
    options: &GenerateOptions,
) -> bool {
    placed >= profile.target_words || placed as f32 >= pool as f32 * options.density_ratio
}

/// Drops repeated answers, keeping the first occurrence
fn dedup(candidates: &[WordCandidate]) -> Vec<WordCandidate> {
    let mut seen: AHashSet<_> = AHashSet::new();
    candidates
        .iter()
        .filter(|c| seen.insert(c.answer.as_str()))
        .cloned()
        .collect()
}

fn longest_first(pool: &[WordCandidate]) -> Vec<WordCandidate> {
    let mut ordered = pool.to_vec();
    ordered.sort_by(|a, b| b.answer.len().cmp(&a.answer.len()));
    ordered
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{dedup, generate, longest_first, GenerateOptions};
    use crate::puzzle::error::GenerateError;
    use crate::puzzle::{Difficulty, DifficultyProfile};
    use crate::source::WordCandidate;

    fn candidates(answers: &[&str]) -> Vec<WordCandidate> {
        answers.iter().map(|a| WordCandidate::new(*a, "clue")).collect()
    }

    fn profile(min_words: usize, target_words: usize) -> DifficultyProfile {
        DifficultyProfile {
            grid_size: 11,
            min_words,
            target_words,
            fetch_count: 20,
        }
    }

    #[test]
    fn longest_first_is_stable() {
        let ordered = longest_first(&candidates(&["ROSS", "FRIENDS", "LOST", "ADELE"]));
        let answers: Vec<&str> = ordered.iter().map(|c| c.answer.as_str()).collect();
        assert_eq!(vec!["FRIENDS", "ADELE", "ROSS", "LOST"], answers);
    }

    #[test]
    fn dedup_keeps_first() {
        let mut words = candidates(&["ROSS", "LOST"]);
        words.push(WordCandidate::new("ROSS", "other"));
        let deduped = dedup(&words);
        assert_eq!(2, deduped.len());
        assert_eq!("clue", deduped[0].clue);
    }

    #[test]
    fn empty_pool() {
        let result = generate(
            "TV",
            Difficulty::Easy,
            &[],
            &profile(1, 1),
            &GenerateOptions::default(),
            &mut StdRng::seed_from_u64(1),
        );
        assert_eq!(
            Err(GenerateError::InsufficientCandidates {
                topic: "TV".to_string(),
                available: 0
            }),
            result
        );
    }

    #[test]
    fn lite_theme_when_short_of_target() {
        let puzzle = generate(
            "TV",
            Difficulty::Easy,
            &candidates(&["ROSS"]),
            &profile(1, 5),
            &GenerateOptions::default(),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        assert!(puzzle.is_lite());
        assert_eq!("TV (Lite)", puzzle.theme());
    }

    #[test]
    fn grace_lowers_requirement() {
        let options = GenerateOptions {
            min_words_grace: 1,
            ..GenerateOptions::default()
        };
        let result = generate(
            "TV",
            Difficulty::Easy,
            &candidates(&["ROSS", "ZZZ"]),
            &profile(2, 2),
            &options,
            &mut StdRng::seed_from_u64(1),
        );
        assert_eq!(1, result.unwrap().word_count());
    }
}
