//! The external content provider that invents answer/clue pairs for a topic

use std::io;
use std::path::PathBuf;
use std::process::Stdio;

use ahash::AHashSet;
use async_trait::async_trait;
use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::puzzle::{Difficulty, Region};
use crate::source::error::ProviderError;
use crate::source::{sanitize_answer, MIN_ANSWER_LEN};

/// What the sourcing pipeline asks the provider for
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProviderRequest {
    pub topic: String,
    pub difficulty: Difficulty,
    pub region: Region,
    /// how many words to return; the provider may return fewer
    pub count: usize,
    /// the longest answer that will be used
    pub max_len: usize,
    /// answers already known, which the provider should not repeat
    pub excluded: Vec<String>,
    pub steering: String,
}

impl ProviderRequest {
    pub fn new(
        topic: &str,
        difficulty: Difficulty,
        region: Region,
        count: usize,
        excluded: Vec<String>,
    ) -> Self {
        Self {
            topic: topic.to_string(),
            difficulty,
            region,
            count,
            max_len: difficulty.profile().grid_size,
            excluded,
            steering: format!("{} {}", region.hint(), difficulty.steering()),
        }
    }

    /// True if the (unsanitized) answer is in the excluded list
    pub fn is_excluded(&self, answer: &str) -> bool {
        let answer = sanitize_answer(answer);
        self.excluded.iter().any(|e| *e == answer)
    }

    /// Natural language form of the request for text generation backends
    pub fn prompt(&self) -> String {
        let mut prompt = format!(
            "Generate a list of {} words and clues for a crossword puzzle about \"{}\".\n\
             Focus strictly on pop culture (TV, movies, music) related to this theme.\n\
             {}\n\
             Answers must be single words of {} to {} letters, letters only.\n\
             Clues must be short (under 8 words).\n",
            self.count, self.topic, self.steering, MIN_ANSWER_LEN, self.max_len
        );
        if !self.excluded.is_empty() {
            prompt.push_str(&format!(
                "Do not use these answers: {}.\n",
                self.excluded.iter().join(", ")
            ));
        }
        prompt.push_str(
            "Return purely JSON in the format: \
             { \"words\": [ { \"answer\": \"ANSWER\", \"clue\": \"Hint\" } ] }\n",
        );
        prompt
    }
}

/// One unvalidated entry from a provider. Missing fields are dropped during sanitization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub answer: Option<String>,
    pub clue: Option<String>,
}

impl RawEntry {
    pub fn new(answer: impl Into<String>, clue: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
            clue: Some(clue.into()),
        }
    }

    fn from_json(value: &Value) -> Self {
        let field = |names: &[&str]| {
            names
                .iter()
                .filter_map(|name| value.get(*name))
                .find_map(Value::as_str)
                .map(String::from)
        };
        Self {
            answer: field(&["answer", "word"]),
            clue: field(&["clue", "hint"]),
        }
    }
}

/// Supplies candidate words for a topic
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Returns up to `request.count` entries. Any number of entries, including none, is a
    /// successful response.
    async fn request_words(&self, request: &ProviderRequest) -> Result<Vec<RawEntry>, ProviderError>;
}

#[async_trait]
impl<P: ContentProvider + ?Sized> ContentProvider for Box<P> {
    async fn request_words(&self, request: &ProviderRequest) -> Result<Vec<RawEntry>, ProviderError> {
        (**self).request_words(request).await
    }
}

/// Parses provider output: either `{ "words": [...] }` or a bare array, optionally wrapped in a
/// Markdown code fence. Entries may name the answer `answer` or `word`.
pub fn parse_provider_response(text: &str) -> Result<Vec<RawEntry>, ProviderError> {
    let value: Value = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| ProviderError::Malformed(e.to_string()))?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("words") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(ProviderError::Malformed(
                    "missing \"words\" array".to_string(),
                ))
            }
        },
        _ => {
            return Err(ProviderError::Malformed(
                "expected a JSON array or object".to_string(),
            ))
        }
    };
    Ok(items.iter().map(RawEntry::from_json).collect())
}

fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    if !text.starts_with("```") {
        return text;
    }
    let body = &text[3..];
    let body = body.strip_prefix("json").unwrap_or(body);
    body.trim().trim_end_matches("```").trim()
}

/// Provider used when none is configured; every request takes the fallback path
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineProvider;

#[async_trait]
impl ContentProvider for OfflineProvider {
    async fn request_words(&self, _request: &ProviderRequest) -> Result<Vec<RawEntry>, ProviderError> {
        Err(ProviderError::Unavailable(
            "no content provider configured".to_string(),
        ))
    }
}

/// Serves words from a JSON file in provider response format
#[derive(Clone, Debug)]
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ContentProvider for JsonFileProvider {
    async fn request_words(&self, request: &ProviderRequest) -> Result<Vec<RawEntry>, ProviderError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        let entries = parse_provider_response(&text)?;
        Ok(entries
            .into_iter()
            .filter(|e| e.answer.as_ref().map_or(true, |a| !request.is_excluded(a)))
            .take(request.count)
            .collect())
    }
}

/// Runs an external program, writing the request prompt to its stdin and parsing its stdout
#[derive(Clone, Debug)]
pub struct CommandProvider {
    program: String,
    args: Vec<String>,
}

impl CommandProvider {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Splits a command line on whitespace into a program and its arguments
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace();
        let program = parts.next()?;
        Some(parts.fold(Self::new(program), |provider, arg| provider.arg(arg)))
    }
}

#[async_trait]
impl ContentProvider for CommandProvider {
    async fn request_words(&self, request: &ProviderRequest) -> Result<Vec<RawEntry>, ProviderError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(request.prompt().as_bytes()).await {
                // the program may answer without reading its input
                if e.kind() != io::ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
        }
        let output = child.wait_with_output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = format!("{} exited with {}: {}", self.program, output.status, stderr.trim());
            if stderr.to_ascii_lowercase().contains("quota") {
                return Err(ProviderError::Quota(message));
            }
            return Err(ProviderError::Unavailable(message));
        }
        let entries = parse_provider_response(&String::from_utf8_lossy(&output.stdout))?;
        let mut seen: AHashSet<_> = AHashSet::new();
        Ok(entries
            .into_iter()
            .filter(|e| e.answer.as_ref().map_or(true, |a| seen.insert(a.clone())))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn request() -> ProviderRequest {
        ProviderRequest::new(
            "TV Bingers",
            Difficulty::Easy,
            Region::Uk,
            3,
            vec!["ROSS".to_string()],
        )
    }

    #[test]
    fn parse_words_object() {
        let entries = parse_provider_response(
            r#"{ "words": [ { "word": "Ross", "clue": "Pivot!" }, { "answer": "LOST" } ] }"#,
        )
        .unwrap();
        assert_eq!(
            vec![
                RawEntry::new("Ross", "Pivot!"),
                RawEntry {
                    answer: Some("LOST".to_string()),
                    clue: None
                }
            ],
            entries
        );
    }

    #[test]
    fn parse_fenced_array() {
        let text = "```json\n[{\"answer\": \"DUNE\", \"clue\": \"Spice planet\"}]\n```";
        assert_eq!(
            vec![RawEntry::new("DUNE", "Spice planet")],
            parse_provider_response(text).unwrap()
        );
    }

    #[test]
    fn malformed_entries_are_kept_empty() {
        let entries = parse_provider_response(r#"[42, {"answer": 7, "clue": "x"}]"#).unwrap();
        assert_eq!(2, entries.len());
        assert_eq!(None, entries[0].answer);
        assert_eq!(None, entries[1].answer);
    }

    #[test]
    fn parse_garbage() {
        assert!(matches!(
            parse_provider_response("Sorry, I can't help with that"),
            Err(ProviderError::Malformed(_))
        ));
        assert!(matches!(
            parse_provider_response(r#"{"items": []}"#),
            Err(ProviderError::Malformed(_))
        ));
    }

    #[test]
    fn prompt_mentions_request() {
        let prompt = request().prompt();
        assert!(prompt.contains("3 words"));
        assert!(prompt.contains("\"TV Bingers\""));
        assert!(prompt.contains("British pop culture"));
        assert!(prompt.contains("3 to 11 letters"));
        assert!(prompt.contains("Do not use these answers: ROSS."));
    }

    #[test]
    fn excluded_after_sanitizing() {
        assert!(request().is_excluded("ro ss"));
        assert!(!request().is_excluded("LOST"));
    }

    #[test]
    fn parse_command_line() {
        let provider = CommandProvider::parse("gen-words --model fast").unwrap();
        assert_eq!("gen-words", provider.program);
        assert_eq!(vec!["--model", "fast"], provider.args);
        assert!(CommandProvider::parse("   ").is_none());
    }

    #[tokio::test]
    async fn offline_provider_fails() {
        assert!(matches!(
            OfflineProvider.request_words(&request()).await,
            Err(ProviderError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn file_provider_skips_excluded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"words": [{{"word": "ROSS", "clue": "a"}}, {{"word": "LOST", "clue": "b"}},
                {{"word": "DUNE", "clue": "c"}}, {{"word": "ADELE", "clue": "d"}},
                {{"word": "OFFICE", "clue": "e"}}]}}"#
        )
        .unwrap();
        let entries = JsonFileProvider::new(file.path())
            .request_words(&request())
            .await
            .unwrap();
        let answers: Vec<_> = entries.into_iter().filter_map(|e| e.answer).collect();
        assert_eq!(vec!["LOST", "DUNE", "ADELE"], answers);
    }

    #[tokio::test]
    async fn file_provider_missing_file() {
        let provider = JsonFileProvider::new("/nonexistent/words.json");
        assert!(matches!(
            provider.request_words(&request()).await,
            Err(ProviderError::Transport(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn command_provider_reads_stdout() {
        let provider = CommandProvider::new("sh").arg("-c").arg(
            r#"cat > /dev/null; printf '%s' '{"words": [{"word": "ROSS", "clue": "Pivot"}]}'"#,
        );
        let entries = provider.request_words(&request()).await.unwrap();
        assert_eq!(vec![RawEntry::new("ROSS", "Pivot")], entries);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn command_provider_quota_failure() {
        let provider = CommandProvider::new("sh")
            .arg("-c")
            .arg("echo 'daily quota exceeded' >&2; exit 3");
        assert!(matches!(
            provider.request_words(&request()).await,
            Err(ProviderError::Quota(_))
        ));
    }
}
