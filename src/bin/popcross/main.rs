#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused_qualifications)]

use std::io::{self, Write};

use anyhow::{anyhow, Context as _, Result};
use chrono::Utc;
use popcross::puzzle::{GenerateOptions, Puzzle};
use popcross::source::{
    AnyWordStore, CommandProvider, ContentProvider, DailyPuzzleStore, JsonFileProvider,
    JsonFileStore, MemoryWordStore, OfflineProvider, SourcingOptions, WordSourcer,
};
use popcross::PuzzleGenerator;

use crate::options::{Options, Provider};

mod options;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let options = Options::from_args()?;
    let generator = build_generator(&options)?;
    let daily = if options.daily() {
        let path = options.store_path().context("--daily needs a store directory")?;
        let store = DailyPuzzleStore::new(path)
            .with_context(|| format!("Error opening daily puzzle store: {}", path.display()))?;
        Some(store)
    } else {
        None
    };
    let stdout = io::stdout();
    for i in 1..=options.count() {
        eprintln!("Generating puzzle {}/{}", i, options.count());
        let puzzle = match &daily {
            Some(store) => {
                let today = Utc::now().date_naive();
                generator
                    .daily_puzzle(store, today, options.difficulty(), options.region())
                    .await?
            }
            None => {
                generator
                    .generate_puzzle(options.topic(), options.difficulty(), options.region())
                    .await?
            }
        };
        write_puzzle(&mut stdout.lock(), &puzzle, options.json())?;
    }
    Ok(())
}

fn build_generator(
    options: &Options,
) -> Result<PuzzleGenerator<Box<dyn ContentProvider>, AnyWordStore>> {
    let provider: Box<dyn ContentProvider> = match options.provider() {
        Provider::Offline => Box::new(OfflineProvider),
        Provider::File(path) => Box::new(JsonFileProvider::new(path)),
        Provider::Command(command) => Box::new(
            CommandProvider::parse(command).ok_or_else(|| anyhow!("empty provider command"))?,
        ),
    };
    let sourcing = SourcingOptions {
        provider_timeout: options.timeout(),
        ..SourcingOptions::default()
    };
    let store = match options.store_path() {
        Some(path) => AnyWordStore::from(
            JsonFileStore::with_capacity(path, sourcing.bank_capacity)
                .with_context(|| format!("Error opening word store: {}", path.display()))?,
        ),
        None => AnyWordStore::from(MemoryWordStore::with_capacity(sourcing.bank_capacity)),
    };
    let mut generate = GenerateOptions {
        seed: options.seed(),
        ..GenerateOptions::default()
    };
    if let Some(attempts) = options.attempts() {
        generate.max_attempts = attempts;
    }
    let sourcer = WordSourcer::with_options(provider, store, sourcing);
    Ok(PuzzleGenerator::with_options(sourcer, generate))
}

fn write_puzzle(out: &mut impl Write, puzzle: &Puzzle, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, puzzle)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", puzzle)?;
    }
    Ok(())
}
