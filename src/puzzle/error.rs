use thiserror::Error;

/// A puzzle could not be generated
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("not enough usable words for \"{topic}\" ({available} available)")]
    InsufficientCandidates { topic: String, available: usize },
    #[error(
        "could only fit {placed} of the {required} words needed for \"{topic}\"; \
         try again or pick another topic"
    )]
    LayoutBelowMinimum {
        topic: String,
        placed: usize,
        required: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown difficulty: \"{0}\"")]
pub struct ParseDifficultyError(pub(crate) String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown region: \"{0}\"")]
pub struct ParseRegionError(pub(crate) String);
