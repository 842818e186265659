use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context as _, Result};
use clap::ArgMatches;
use popcross::puzzle::{Difficulty, Region};
use popcross::source::DAILY_THEME;

const DEFAULT_TIMEOUT_SECS: &str = "30";

#[derive(Clone)]
pub(crate) struct Options {
    topic: String,
    difficulty: Difficulty,
    region: Region,
    count: u32,
    attempts: Option<usize>,
    seed: Option<u64>,
    timeout: Duration,
    provider: Provider,
    store_path: Option<PathBuf>,
    json: bool,
    daily: bool,
}

/// Where words come from when the word bank runs short
#[derive(Clone)]
pub(crate) enum Provider {
    Offline,
    File(PathBuf),
    Command(String),
}

impl Options {
    pub fn from_args() -> Result<Self> {
        Self::from_arg_matches(&clap_app().get_matches())
    }

    fn from_arg_matches(matches: &ArgMatches<'_>) -> Result<Self> {
        let provider = if let Some(path) = matches.value_of("words") {
            Provider::File(path.into())
        } else if let Some(command) = matches.value_of("provider_cmd") {
            Provider::Command(command.to_string())
        } else {
            Provider::Offline
        };
        let daily = matches.is_present("daily");
        let topic = if daily {
            DAILY_THEME
        } else {
            matches
                .value_of("topic")
                .ok_or_else(|| anyhow!("missing topic"))?
        };
        Ok(Self {
            topic: topic.to_string(),
            difficulty: parse_value(matches, "difficulty")?.unwrap_or(Difficulty::Easy),
            region: parse_value(matches, "region")?.unwrap_or_default(),
            count: parse_value(matches, "count")?.unwrap_or(1),
            attempts: parse_value(matches, "attempts")?,
            seed: parse_value(matches, "seed")?,
            timeout: Duration::from_secs(parse_value(matches, "timeout")?.unwrap_or(30)),
            provider,
            store_path: matches.value_of("store").map(PathBuf::from),
            json: matches.is_present("json"),
            daily,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn attempts(&self) -> Option<usize> {
        self.attempts
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    pub fn store_path(&self) -> Option<&Path> {
        self.store_path.as_deref()
    }

    pub fn json(&self) -> bool {
        self.json
    }

    /// Play the puzzle of the day instead of a topic
    pub fn daily(&self) -> bool {
        self.daily
    }
}

fn parse_value<T>(matches: &ArgMatches<'_>, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    matches
        .value_of(name)
        .map(|s| s.parse::<T>().with_context(|| format!("invalid {}: {}", name, s)))
        .transpose()
}

fn clap_app() -> clap::App<'static, 'static> {
    use clap::{App, AppSettings, Arg};

    App::new("popcross")
        .help_message("Generate pop culture crossword puzzles")
        .setting(AppSettings::ArgRequiredElseHelp)
        .arg(
            Arg::with_name("topic")
                .value_name("TOPIC")
                .required_unless("daily")
                .help("theme of the puzzle, e.g. \"90s Nostalgia\""),
        )
        .arg(
            Arg::with_name("difficulty")
                .short("d")
                .long("difficulty")
                .takes_value(true)
                .possible_values(&["easy", "medium", "hard", "expert"])
                .case_insensitive(true)
                .help("difficulty tier [default: easy]"),
        )
        .arg(
            Arg::with_name("region")
                .short("r")
                .long("region")
                .takes_value(true)
                .value_name("REGION")
                .help("favor USA or UK references, or a mix [default: mix]"),
        )
        .arg(
            Arg::with_name("count")
                .short("c")
                .long("count")
                .takes_value(true)
                .help("the number of puzzles to generate"),
        )
        .arg(
            Arg::with_name("attempts")
                .long("attempts")
                .takes_value(true)
                .help("layout attempts per puzzle"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .help("seed for reproducible layouts"),
        )
        .arg(
            Arg::with_name("timeout")
                .long("timeout")
                .takes_value(true)
                .value_name("SECONDS")
                .default_value(DEFAULT_TIMEOUT_SECS)
                .help("how long to wait for the content provider"),
        )
        .arg(
            Arg::with_name("words")
                .short("w")
                .long("words")
                .takes_value(true)
                .value_name("PATH")
                .help("read candidate words from a JSON file"),
        )
        .arg(
            Arg::with_name("provider_cmd")
                .long("provider-cmd")
                .takes_value(true)
                .value_name("CMD")
                .conflicts_with("words")
                .help("command that reads a request on stdin and prints words as JSON"),
        )
        .arg(
            Arg::with_name("store")
                .short("s")
                .long("store")
                .takes_value(true)
                .value_name("DIR")
                .help("directory to keep word banks in (default: memory only)"),
        )
        .arg(
            Arg::with_name("daily")
                .long("daily")
                .conflicts_with("topic")
                .requires("store")
                .help("play today's \"Daily Mix\" puzzle, kept in the store for the day"),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .help("print puzzles as JSON"),
        )
}
