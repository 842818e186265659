//! Candidate sourcing: the word bank cache, the content provider and the emergency fallback

use std::time::Duration;

use ahash::AHashSet;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::puzzle::{Difficulty, Region};

pub use self::daily::{DailyPuzzleStore, DAILY_THEME};
pub use self::emergency::emergency_words;
pub use self::provider::{
    parse_provider_response, CommandProvider, ContentProvider, JsonFileProvider, OfflineProvider,
    ProviderRequest, RawEntry,
};
pub use self::store::{
    AnyWordStore, BankKey, JsonFileStore, MemoryWordStore, WordBank, WordStore,
    DEFAULT_BANK_CAPACITY,
};

pub mod error;

mod daily;
mod emergency;
mod provider;
mod store;

/// Shortest usable answer
pub const MIN_ANSWER_LEN: usize = 3;

/// An answer and its clue, not yet placed on a grid. Answers contain only `A-Z`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordCandidate {
    pub answer: String,
    pub clue: String,
}

impl WordCandidate {
    pub fn new(answer: impl Into<String>, clue: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            clue: clue.into(),
        }
    }
}

/// Uppercases `raw` and strips everything but ASCII letters
pub fn sanitize_answer(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Turns raw provider entries into candidates. Entries missing a clue or with an answer outside
/// `MIN_ANSWER_LEN..=max_len` after stripping are dropped, as are repeated answers.
pub fn sanitize(entries: impl IntoIterator<Item = RawEntry>, max_len: usize) -> Vec<WordCandidate> {
    let mut seen: AHashSet<_> = AHashSet::new();
    entries
        .into_iter()
        .filter_map(|entry| {
            let answer = sanitize_answer(entry.answer.as_deref()?);
            let clue = entry.clue.as_deref()?.trim();
            if clue.is_empty() || answer.len() < MIN_ANSWER_LEN || answer.len() > max_len {
                return None;
            }
            Some(WordCandidate::new(answer, clue))
        })
        .filter(|word| seen.insert(word.answer.clone()))
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct SourcingOptions {
    /// upper bound on one provider round trip
    pub provider_timeout: Duration,
    /// most words kept per topic and difficulty
    pub bank_capacity: usize,
    /// most known answers listed in a provider request
    pub max_excluded: usize,
    /// below this many candidates, generation is not attempted
    pub min_candidates: usize,
}

impl Default for SourcingOptions {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(30),
            bank_capacity: DEFAULT_BANK_CAPACITY,
            max_excluded: 100,
            min_candidates: 3,
        }
    }
}

/// Decides per request whether cached words suffice or the provider must be asked
pub struct WordSourcer<P, S> {
    provider: P,
    store: S,
    options: SourcingOptions,
}

impl<P: ContentProvider, S: WordStore> WordSourcer<P, S> {
    pub fn new(provider: P, store: S) -> Self {
        Self::with_options(provider, store, SourcingOptions::default())
    }

    pub fn with_options(provider: P, store: S, options: SourcingOptions) -> Self {
        Self {
            provider,
            store,
            options,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn options(&self) -> &SourcingOptions {
        &self.options
    }

    /// Candidates for a topic, in random order. Never fails: when the provider is unavailable
    /// the cached and built-in emergency words are used instead.
    pub async fn fetch_candidates<R: Rng + ?Sized>(
        &self,
        topic: &str,
        difficulty: Difficulty,
        region: Region,
        rng: &mut R,
    ) -> Vec<WordCandidate> {
        let profile = difficulty.profile();
        let key = BankKey::new(topic, difficulty);
        // banks on disk may have been edited by hand
        let cached = match self.store.get(&key) {
            Ok(words) => sanitize(
                words.into_iter().map(|w| RawEntry::new(w.answer, w.clue)),
                profile.grid_size,
            ),
            Err(e) => {
                warn!("Could not read word bank for \"{}\": {}", topic, e);
                Vec::new()
            }
        };

        if cached.len() >= profile.fetch_count {
            debug!("Using {} cached words for \"{}\"", cached.len(), topic);
            let mut words = cached;
            words.shuffle(rng);
            words.truncate(profile.fetch_count);
            return words;
        }

        let excluded = cached
            .iter()
            .rev()
            .take(self.options.max_excluded)
            .map(|w| w.answer.clone())
            .collect();
        let request = ProviderRequest::new(topic, difficulty, region, profile.fetch_count, excluded);
        let mut words = match self.request(&request).await {
            Ok(entries) => {
                let fresh = sanitize(entries, profile.grid_size);
                info!("Content provider supplied {} usable words for \"{}\"", fresh.len(), topic);
                if !fresh.is_empty() {
                    if let Err(e) = self.store.put(&key, &fresh) {
                        warn!("Could not save word bank for \"{}\": {}", topic, e);
                    }
                }
                let mut words = merge(cached, fresh);
                let wanted = self.options.min_candidates.max(profile.min_words);
                if words.len() < wanted {
                    warn!(
                        "Only {} words for \"{}\", adding emergency words",
                        words.len(),
                        topic
                    );
                    words = merge(words, emergency(topic, profile.grid_size));
                }
                words
            }
            Err(e) => {
                warn!("Falling back to emergency words for \"{}\": {}", topic, e);
                merge(cached, emergency(topic, profile.grid_size))
            }
        };
        words.shuffle(rng);
        words
    }

    async fn request(&self, request: &ProviderRequest) -> Result<Vec<RawEntry>, error::ProviderError> {
        let timeout = self.options.provider_timeout;
        match tokio::time::timeout(timeout, self.provider.request_words(request)).await {
            Ok(result) => result,
            Err(_) => Err(error::ProviderError::Timeout(timeout)),
        }
    }
}

fn emergency(topic: &str, max_len: usize) -> Vec<WordCandidate> {
    emergency_words(topic)
        .into_iter()
        .filter(|w| w.answer.len() <= max_len)
        .collect()
}

/// `first` followed by the words of `second` with answers not already present
fn merge(first: Vec<WordCandidate>, second: Vec<WordCandidate>) -> Vec<WordCandidate> {
    let mut seen: AHashSet<String> = first.iter().map(|w| w.answer.clone()).collect();
    let mut merged = first;
    merged.extend(second.into_iter().filter(|w| seen.insert(w.answer.clone())));
    merged
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::error::ProviderError;
    use super::*;

    struct FakeProvider {
        result: Result<Vec<RawEntry>, ()>,
        delay: Option<Duration>,
        calls: AtomicUsize,
    }

    impl FakeProvider {
        fn returning(answers: &[&str]) -> Self {
            Self {
                result: Ok(answers
                    .iter()
                    .map(|a| RawEntry::new(*a, format!("{} clue", a)))
                    .collect()),
                delay: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                result: Err(()),
                delay: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ContentProvider for FakeProvider {
        async fn request_words(&self, _request: &ProviderRequest) -> Result<Vec<RawEntry>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.result
                .clone()
                .map_err(|_| ProviderError::Quota("out of requests".to_string()))
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn answers(words: &[WordCandidate]) -> AHashSet<&str> {
        words.iter().map(|w| w.answer.as_str()).collect()
    }

    #[test]
    fn sanitize_strips_and_filters() {
        let words = sanitize(
            vec![
                RawEntry::new("ro$s 2", "x"),
                RawEntry::new("ab", "too short"),
                RawEntry::new("Lost", "  "),
                RawEntry::new("SUPERCALIFRAGILISTIC", "too long"),
                RawEntry {
                    answer: None,
                    clue: Some("no answer".to_string()),
                },
                RawEntry::new("R.O.S", "duplicate"),
            ],
            11,
        );
        assert_eq!(vec![WordCandidate::new("ROS", "x")], words);
    }

    #[tokio::test]
    async fn cache_hit_skips_provider() {
        let store = MemoryWordStore::new();
        let key = BankKey::new("TV", Difficulty::Easy);
        let cached: Vec<_> = (b'A'..=b'Y')
            .map(|c| WordCandidate::new(format!("WORD{}", c as char), "c"))
            .collect();
        store.put(&key, &cached).unwrap();
        let sourcer = WordSourcer::new(FakeProvider::returning(&["ROSS"]), store);
        let words = sourcer
            .fetch_candidates("tv", Difficulty::Easy, Region::Mix, &mut rng())
            .await;
        assert_eq!(Difficulty::Easy.profile().fetch_count, words.len());
        assert_eq!(0, sourcer.provider.calls.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn cached_words_are_sanitized() {
        let store = MemoryWordStore::new();
        let key = BankKey::new("TV", Difficulty::Easy);
        store
            .put(
                &key,
                &[
                    WordCandidate::new("ro$s", "x"),
                    WordCandidate::new("ab", "y"),
                    WordCandidate::new("LOST", ""),
                ],
            )
            .unwrap();
        let sourcer = WordSourcer::new(OfflineProvider, store);
        let words = sourcer
            .fetch_candidates("TV", Difficulty::Easy, Region::Mix, &mut rng())
            .await;
        let answers = answers(&words);
        assert!(answers.contains("ROS"));
        assert!(!answers.contains("ab") && !answers.contains("AB"));
        assert!(words
            .iter()
            .all(|w| w.answer.chars().all(|c| c.is_ascii_uppercase())));
        assert!(words.iter().all(|w| !w.clue.is_empty()));
    }

    #[tokio::test]
    async fn provider_words_are_cached() {
        let sourcer = WordSourcer::new(
            FakeProvider::returning(&["FRIENDS", "ROSS", "OFFICE", "LOST", "ADELE"]),
            MemoryWordStore::new(),
        );
        let words = sourcer
            .fetch_candidates("TV", Difficulty::Easy, Region::Usa, &mut rng())
            .await;
        assert_eq!(5, words.len());
        let stored = sourcer
            .store()
            .get(&BankKey::new("tv", Difficulty::Easy))
            .unwrap();
        assert_eq!(answers(&words), answers(&stored));
    }

    #[tokio::test]
    async fn short_response_is_topped_up() {
        let sourcer = WordSourcer::new(FakeProvider::returning(&["ROSS"]), MemoryWordStore::new());
        let words = sourcer
            .fetch_candidates("Gaming Legends", Difficulty::Easy, Region::Mix, &mut rng())
            .await;
        let found = answers(&words);
        assert!(found.contains("ROSS"));
        assert!(found.contains("MARIO"));
        assert!(found.contains("NETFLIX"));
        assert_eq!(found.len(), words.len());
    }

    #[tokio::test]
    async fn provider_failure_falls_back() {
        let store = MemoryWordStore::new();
        store
            .put(
                &BankKey::new("TV", Difficulty::Easy),
                &[WordCandidate::new("CHANDLER", "Could he BE any more sarcastic")],
            )
            .unwrap();
        let sourcer = WordSourcer::new(FakeProvider::failing(), store);
        let words = sourcer
            .fetch_candidates("TV", Difficulty::Easy, Region::Mix, &mut rng())
            .await;
        let found = answers(&words);
        assert!(found.contains("CHANDLER"));
        assert!(found.contains("FRIENDS"));
        assert!(words.iter().all(|w| w.answer.len() <= 11));
    }

    #[tokio::test]
    async fn emergency_words_respect_grid_size() {
        let sourcer = WordSourcer::new(OfflineProvider, MemoryWordStore::new());
        let words = sourcer
            .fetch_candidates("tv", Difficulty::Easy, Region::Mix, &mut rng())
            .await;
        assert!(answers(&words).contains("MANDALORIAN"));
        assert!(words.iter().all(|w| w.answer.len() <= 11));
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let provider = FakeProvider {
            delay: Some(Duration::from_secs(5)),
            ..FakeProvider::returning(&["CHANDLER"])
        };
        let options = SourcingOptions {
            provider_timeout: Duration::from_millis(10),
            ..SourcingOptions::default()
        };
        let sourcer = WordSourcer::with_options(provider, MemoryWordStore::new(), options);
        let words = sourcer
            .fetch_candidates("Bird Watching", Difficulty::Easy, Region::Mix, &mut rng())
            .await;
        assert_eq!(1, sourcer.provider.calls.load(Ordering::SeqCst));
        assert!(!answers(&words).contains("CHANDLER"));
        assert!(answers(&words).contains("SEINFELD"));
    }
}
