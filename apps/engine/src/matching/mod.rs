// Matching: four-factor consultant/tender scoring, the simplified coverage
// matcher used by the fallback tiers, and repository-backed batch discovery.

pub mod coverage;
pub mod discovery;
pub mod engine;

pub use coverage::{score_cv_against_tender, CvTenderMatch, SkillMatchDetail};
pub use discovery::{MatchCandidate, MatchEngine, DEFAULT_MIN_SCORE, SUGGESTION_MIN_SCORE};
pub use engine::{score_pair, MatchResult, MatchWeights, Recommendation};
