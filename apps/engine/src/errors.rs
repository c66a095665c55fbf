use thiserror::Error;

/// Engine-level error type.
///
/// Internal failures are recovered locally by the fallback chain; only total
/// exhaustion of every tier (`Exhausted`) is surfaced to callers. Absent
/// consultants/tenders are scored as zero inside the engine and only become a
/// user-facing error at the API boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Unsupported document: {0}")]
    Unsupported(String),

    #[error("All fallback tiers exhausted for operation '{0}'")]
    Exhausted(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
