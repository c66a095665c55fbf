//! Workflow backend client — the single point of entry for all calls to the
//! external automation engine.
//!
//! Every call carries an explicit timeout; a timeout, transport error, or
//! non-2xx response is a failure. There are no same-tier retries here: the
//! fallback coordinator's contract is to advance to the next tier on first
//! failure, not to hammer the same backend.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::errors::EngineError;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("workflow {workflow_id} returned status {status}: {message}")]
    Api {
        workflow_id: String,
        status: u16,
        message: String,
    },
}

impl From<WorkflowError> for EngineError {
    fn from(err: WorkflowError) -> Self {
        EngineError::BackendUnavailable(err.to_string())
    }
}

#[derive(Clone)]
pub struct WorkflowClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl WorkflowClient {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn execution_url(&self, workflow_id: &str) -> String {
        format!(
            "{}/api/v1/workflows/{workflow_id}/execute",
            self.base_url.trim_end_matches('/')
        )
    }

    /// Executes a workflow with a JSON payload and returns its JSON result.
    pub async fn execute(&self, workflow_id: &str, payload: &Value) -> Result<Value, WorkflowError> {
        let url = self.execution_url(workflow_id);
        let mut request = self.client.post(&url).json(payload);
        if let Some(key) = &self.api_key {
            request = request.header("X-N8N-API-KEY", key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(WorkflowError::Api {
                workflow_id: workflow_id.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let result = response.json::<Value>().await?;
        debug!(workflow_id, "workflow executed");
        Ok(result)
    }
}
