use thiserror::Error;

/// Main error type for the prediction engine
#[derive(Error, Debug)]
pub enum RinksideError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Data loading errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    // Domain errors
    #[error("Unknown team: {0}")]
    UnknownTeam(String),

    #[error("Stats unavailable for team: {0}")]
    StatsUnavailable(String),

    // Evaluation errors
    #[error("Unknown evaluation target: {0}")]
    UnknownTarget(String),

    // Generic errors
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for RinksideError
pub type Result<T> = std::result::Result<T, RinksideError>;
