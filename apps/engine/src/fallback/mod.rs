// Tiered fallback: every analysis operation tries the external workflow
// backend first and degrades through the internal heuristic implementation
// to a static stub that cannot fail. Availability over accuracy.

pub mod chain;
pub mod coordinator;
pub mod stubs;

use serde::{Deserialize, Serialize};

pub use chain::{FallbackChain, Strategy};
pub use coordinator::{AnalysisCoordinator, CvDocumentInput, MatchingInput, PortfolioInput};

/// Which tier produced a result. Serialized as `workflow` / `heuristic` /
/// `fallback_static` for auditability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Workflow,
    Heuristic,
    FallbackStatic,
}

impl Default for Provenance {
    fn default() -> Self {
        Provenance::Heuristic
    }
}

impl Provenance {
    pub fn as_str(self) -> &'static str {
        match self {
            Provenance::Workflow => "workflow",
            Provenance::Heuristic => "heuristic",
            Provenance::FallbackStatic => "fallback_static",
        }
    }
}

/// A result together with the tier that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tagged<T> {
    pub value: T,
    pub provenance: Provenance,
}
