//! TalentMatch core engine.
//!
//! Matches staffing consultants to tenders and extracts structured profile
//! data from free-text CV documents. Four pieces do the real work:
//!
//! - [`extraction`] — heuristic CV text segmentation plus the skill
//!   normalizer (level and years-of-experience detection).
//! - [`taxonomy`] — the immutable skill keyword taxonomy, built once and
//!   injected everywhere.
//! - [`matching`] — the four-factor weighted scorer, the simplified coverage
//!   matcher, and repository-backed batch discovery.
//! - [`fallback`] — tiered degradation across the external workflow backend,
//!   the internal heuristics, and static stubs that never fail.
//!
//! Everything rule-based and deterministic: no ML inference, no geographic
//! distance, best-effort extraction on arbitrary layouts.
//!
//! REST routing, persistence, authentication, and file storage live in the
//! API layer on top; this crate consumes them only through the narrow
//! contracts in [`repository`], [`document`], [`workflow`], and [`rag`].

pub mod config;
pub mod document;
pub mod errors;
pub mod extraction;
pub mod fallback;
pub mod matching;
pub mod models;
pub mod portfolio;
pub mod presentation;
pub mod rag;
pub mod repository;
pub mod taxonomy;
pub mod workflow;

pub use config::EngineConfig;
pub use errors::EngineError;
pub use fallback::{AnalysisCoordinator, Provenance, Tagged};
pub use matching::{MatchEngine, MatchResult};
pub use taxonomy::SkillTaxonomy;
