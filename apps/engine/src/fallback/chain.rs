//! The ordered strategy list behind every fallback-capable operation.
//!
//! Each tier runs under its own timeout/error boundary; on timeout or any
//! error, control moves to the next tier — no same-tier retries. Adding or
//! removing a tier is a list edit, not a code restructuring.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{Provenance, Tagged};
use crate::errors::EngineError;

/// One tier of a fallback chain.
#[async_trait]
pub trait Strategy<I, O>: Send + Sync
where
    I: Send + Sync,
    O: Send,
{
    fn provenance(&self) -> Provenance;

    async fn run(&self, input: &I) -> Result<O, EngineError>;
}

/// An ordered list of tiers for one logical operation.
pub struct FallbackChain<I, O> {
    operation: &'static str,
    tier_timeout: Duration,
    tiers: Vec<Box<dyn Strategy<I, O>>>,
}

impl<I, O> FallbackChain<I, O>
where
    I: Send + Sync,
    O: Send,
{
    pub fn new(operation: &'static str, tier_timeout: Duration) -> Self {
        Self {
            operation,
            tier_timeout,
            tiers: Vec::new(),
        }
    }

    pub fn with_tier(mut self, tier: Box<dyn Strategy<I, O>>) -> Self {
        self.tiers.push(tier);
        self
    }

    /// Runs tiers in order until one succeeds. Only exhaustion of every tier
    /// surfaces an error; with a static last tier that never happens.
    pub async fn execute(&self, input: &I) -> Result<Tagged<O>, EngineError> {
        for tier in &self.tiers {
            let provenance = tier.provenance();
            match tokio::time::timeout(self.tier_timeout, tier.run(input)).await {
                Ok(Ok(value)) => {
                    debug!(
                        operation = self.operation,
                        tier = provenance.as_str(),
                        "tier succeeded"
                    );
                    return Ok(Tagged { value, provenance });
                }
                Ok(Err(err)) => {
                    warn!(
                        operation = self.operation,
                        tier = provenance.as_str(),
                        error = %err,
                        "tier failed, falling back"
                    );
                }
                Err(_) => {
                    warn!(
                        operation = self.operation,
                        tier = provenance.as_str(),
                        timeout_ms = self.tier_timeout.as_millis() as u64,
                        "tier timed out, falling back"
                    );
                }
            }
        }
        Err(EngineError::Exhausted(self.operation.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fails(Provenance);

    #[async_trait]
    impl Strategy<String, String> for Fails {
        fn provenance(&self) -> Provenance {
            self.0
        }

        async fn run(&self, _input: &String) -> Result<String, EngineError> {
            Err(EngineError::BackendUnavailable("forced failure".to_string()))
        }
    }

    struct Succeeds(Provenance, &'static str);

    #[async_trait]
    impl Strategy<String, String> for Succeeds {
        fn provenance(&self) -> Provenance {
            self.0
        }

        async fn run(&self, input: &String) -> Result<String, EngineError> {
            Ok(format!("{}:{input}", self.1))
        }
    }

    struct Hangs;

    #[async_trait]
    impl Strategy<String, String> for Hangs {
        fn provenance(&self) -> Provenance {
            Provenance::Workflow
        }

        async fn run(&self, _input: &String) -> Result<String, EngineError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok("never".to_string())
        }
    }

    fn chain() -> FallbackChain<String, String> {
        FallbackChain::new("test_op", Duration::from_millis(50))
    }

    #[tokio::test]
    async fn test_first_successful_tier_wins() {
        let chain = chain()
            .with_tier(Box::new(Succeeds(Provenance::Workflow, "wf")))
            .with_tier(Box::new(Succeeds(Provenance::Heuristic, "heur")));

        let tagged = chain.execute(&"x".to_string()).await.unwrap();
        assert_eq!(tagged.provenance, Provenance::Workflow);
        assert_eq!(tagged.value, "wf:x");
    }

    #[tokio::test]
    async fn test_failing_tier_falls_through_with_next_tag() {
        let chain = chain()
            .with_tier(Box::new(Fails(Provenance::Workflow)))
            .with_tier(Box::new(Succeeds(Provenance::Heuristic, "heur")));

        let tagged = chain.execute(&"x".to_string()).await.unwrap();
        assert_eq!(tagged.provenance, Provenance::Heuristic);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_tier_times_out_and_falls_through() {
        let chain = chain()
            .with_tier(Box::new(Hangs))
            .with_tier(Box::new(Succeeds(Provenance::FallbackStatic, "static")));

        let tagged = chain.execute(&"x".to_string()).await.unwrap();
        assert_eq!(tagged.provenance, Provenance::FallbackStatic);
        assert_eq!(tagged.value, "static:x");
    }

    #[tokio::test]
    async fn test_all_tiers_failing_is_exhausted() {
        let chain = chain()
            .with_tier(Box::new(Fails(Provenance::Workflow)))
            .with_tier(Box::new(Fails(Provenance::Heuristic)));

        let result = chain.execute(&"x".to_string()).await;
        assert!(matches!(result, Err(EngineError::Exhausted(_))));
    }

    #[tokio::test]
    async fn test_empty_chain_is_exhausted() {
        let result = chain().execute(&"x".to_string()).await;
        assert!(matches!(result, Err(EngineError::Exhausted(_))));
    }
}
