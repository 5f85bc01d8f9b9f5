//! Error types for Lead Scout.

/// Top-level error type for the workflow engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Suggestion error: {0}")]
    Suggest(#[from] SuggestError),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Bad or missing user input — caught at the workflow boundary, before any
/// external call is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Describe your company before continuing")]
    EmptyDescription,

    #[error("Enter a location before searching")]
    EmptyLocation,

    #[error("Enter a business type before searching")]
    EmptyBusinessType,

    #[error("There are no suggested categories to continue with")]
    NoSuggestions,

    #[error("\"{value}\" is not one of the suggested categories")]
    UnknownCategory { value: String },

    #[error("Pick a single category before asking for keyword help")]
    KeywordsForAllCategories,

    #[error("Action \"{action}\" is not available in stage {stage}")]
    InvalidAction { stage: String, action: String },
}

/// Failures from the AI suggestion services.
#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    #[error("The AI service is unavailable, try again: {reason}")]
    Unavailable { reason: String },

    #[error("The AI reply contained no usable suggestions")]
    EmptyResponse,
}

/// Failures from the lead search service.
///
/// An empty result set is not an error — see `SearchOutcome::NoResults`.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("The business directory is unavailable, try again: {reason}")]
    DirectoryUnavailable { reason: String },

    #[error("Invalid search job: {reason}")]
    InvalidJob { reason: String },
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for the workflow engine.
pub type Result<T> = std::result::Result<T, Error>;
