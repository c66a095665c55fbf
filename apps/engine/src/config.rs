use anyhow::{ensure, Context, Result};

use crate::matching::DEFAULT_MIN_SCORE;

/// Identifiers of the five workflow-backend operations. Each is optional: a
/// missing id simply means the workflow tier reports itself unavailable and
/// the fallback chain moves on.
#[derive(Debug, Clone, Default)]
pub struct WorkflowIds {
    pub pdf_analysis: Option<String>,
    pub docx_analysis: Option<String>,
    pub skill_extraction: Option<String>,
    pub matching: Option<String>,
    pub portfolio_generation: Option<String>,
}

/// Engine configuration loaded from environment variables. Only validation
/// failures are fatal; every backend setting has a working default or is
/// optional.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL of the workflow backend (e.g. "http://localhost:5678").
    /// Absent → the workflow tier is left out of every chain.
    pub workflow_base_url: Option<String>,
    pub workflow_api_key: Option<String>,
    pub workflow_ids: WorkflowIds,
    /// Per-tier timeout for fallback-chain calls, in seconds.
    pub tier_timeout_secs: u64,
    /// Base URL of the RAG service; absent → no enrichment.
    pub rag_base_url: Option<String>,
    /// Bounded worker-pool size for batch discovery scoring.
    pub discovery_concurrency: usize,
    /// Default minimum score (0–100) for discovery queries.
    pub min_match_score: f64,
    pub rust_log: String,
}

impl EngineConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = EngineConfig {
            workflow_base_url: optional_env("N8N_BASE_URL"),
            workflow_api_key: optional_env("N8N_API_KEY"),
            workflow_ids: WorkflowIds {
                pdf_analysis: optional_env("N8N_PDF_ANALYSIS_WORKFLOW_ID"),
                docx_analysis: optional_env("N8N_DOCX_ANALYSIS_WORKFLOW_ID"),
                skill_extraction: optional_env("N8N_SKILL_EXTRACTION_WORKFLOW_ID"),
                matching: optional_env("N8N_MATCHING_WORKFLOW_ID"),
                portfolio_generation: optional_env("N8N_PORTFOLIO_WORKFLOW_ID"),
            },
            tier_timeout_secs: parsed_env("TIER_TIMEOUT_SECS", 30)?,
            rag_base_url: optional_env("RAG_SERVICE_URL"),
            discovery_concurrency: parsed_env("DISCOVERY_CONCURRENCY", 8)?,
            min_match_score: parsed_env("MIN_MATCH_SCORE", DEFAULT_MIN_SCORE)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        };

        ensure!(
            (0.0..=100.0).contains(&config.min_match_score),
            "MIN_MATCH_SCORE must be on the 0-100 scale, got {}",
            config.min_match_score
        );
        ensure!(
            config.discovery_concurrency > 0,
            "DISCOVERY_CONCURRENCY must be at least 1"
        );

        Ok(config)
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

fn parsed_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(value) => value
            .parse::<T>()
            .with_context(|| format!("'{key}' has an invalid value")),
        None => Ok(default),
    }
}
