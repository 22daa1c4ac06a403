use thiserror::Error;

/// Errors raised by the strict edges of the projector.
///
/// Totals computation itself never fails; these cover key parsing,
/// configuration files and JSON payload decoding.
#[derive(Debug, Error)]
pub enum ProjectorError {
    #[error("Invalid date key: {0:?} (expected YYYY-MM-DD)")]
    InvalidDateKey(String),
    #[error("Invalid month key: {0:?} (expected YYYY-MM)")]
    InvalidMonthKey(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ProjectorResult<T> = Result<T, ProjectorError>;
