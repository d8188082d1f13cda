use thiserror::Error;

/// Guarded preconditions of coordinator operations.
///
/// None of these are fatal; callers log them and leave state unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Point of interest not found: {0}")]
    PointNotFound(String),

    #[error("Prompt category not found: {0}")]
    CategoryNotFound(usize),

    #[error("No prompt category is open")]
    NoCategorySelected,

    #[error("Prompt not found: {0}")]
    PromptNotFound(usize),

    #[error("Prompt catalogue is not available")]
    CatalogueUnavailable,
}

/// Reasons a prompt submission is refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Prompt is empty")]
    EmptyPrompt,

    #[error("A prompt is already in flight")]
    Busy,
}

pub type Result<T> = std::result::Result<T, StateError>;
