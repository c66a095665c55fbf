//! Batch match discovery over repository pools.
//!
//! Each pair score is an independent pure computation, so candidates are
//! dispatched across a bounded tokio worker pool and merged through one
//! deterministic join: results are stably sorted by score (ties keep the
//! original pool order), never by completion order.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::debug;
use uuid::Uuid;

use super::engine::{score_pair, MatchResult, MatchWeights};
use crate::errors::EngineError;
use crate::fallback::Provenance;
use crate::models::{ConsultantProfile, TenderRequisition};
use crate::repository::{ConsultantRepository, TenderRepository};

/// Default minimum score (0–100) for discovery queries.
pub const DEFAULT_MIN_SCORE: f64 = 60.0;
/// Minimum score used by cross-company suggestions.
pub const SUGGESTION_MIN_SCORE: f64 = 70.0;

/// One scored consultant/tender pairing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub consultant_id: Uuid,
    pub tender_id: Uuid,
    pub result: MatchResult,
}

/// Entity-level matching engine over repository-backed pools.
pub struct MatchEngine {
    consultants: Arc<dyn ConsultantRepository>,
    tenders: Arc<dyn TenderRepository>,
    weights: MatchWeights,
    concurrency: usize,
}

impl MatchEngine {
    pub fn new(
        consultants: Arc<dyn ConsultantRepository>,
        tenders: Arc<dyn TenderRepository>,
        weights: MatchWeights,
        concurrency: usize,
    ) -> Result<Self, EngineError> {
        weights.validate()?;
        Ok(Self {
            consultants,
            tenders,
            weights,
            concurrency: concurrency.max(1),
        })
    }

    /// Scores a pair by id. A missing consultant or tender yields the
    /// zero-score result — a deliberate contract, not an error.
    pub async fn score_by_ids(
        &self,
        consultant_id: Uuid,
        tender_id: Uuid,
    ) -> Result<MatchResult, EngineError> {
        let Some(consultant) = self.consultants.get_by_id(consultant_id).await? else {
            debug!(%consultant_id, "consultant not found, scoring zero");
            return Ok(MatchResult::zero(Provenance::Heuristic));
        };
        let Some(tender) = self.tenders.get_by_id(tender_id).await? else {
            debug!(%tender_id, "tender not found, scoring zero");
            return Ok(MatchResult::zero(Provenance::Heuristic));
        };
        Ok(score_pair(&consultant, &tender, &self.weights))
    }

    /// Consultants matching a tender, best first. Unknown tender → empty.
    pub async fn find_matches_for_tender(
        &self,
        tender_id: Uuid,
        min_score: f64,
        include_partner_pool: bool,
    ) -> Result<Vec<MatchCandidate>, EngineError> {
        let Some(tender) = self.tenders.get_by_id(tender_id).await? else {
            return Ok(Vec::new());
        };

        let pool = if include_partner_pool {
            self.consultants.get_all().await?
        } else {
            self.consultants.get_by_company(tender.company_id).await?
        };

        let tender = Arc::new(tender);
        let scored = self
            .score_bounded(pool, move |consultant, weights| {
                let result = score_pair(&consultant, &tender, &weights);
                MatchCandidate {
                    consultant_id: consultant.id,
                    tender_id: tender.id,
                    result,
                }
            })
            .await;

        Ok(filter_and_rank(scored, min_score))
    }

    /// Tenders matching a consultant, best first. Unknown consultant → empty.
    pub async fn find_matches_for_consultant(
        &self,
        consultant_id: Uuid,
        min_score: f64,
        include_partner_pool: bool,
    ) -> Result<Vec<MatchCandidate>, EngineError> {
        let Some(consultant) = self.consultants.get_by_id(consultant_id).await? else {
            return Ok(Vec::new());
        };

        let pool = if include_partner_pool {
            self.tenders.get_all().await?
        } else {
            self.tenders.get_by_company(consultant.company_id).await?
        };

        let consultant = Arc::new(consultant);
        let scored = self
            .score_bounded(pool, move |tender, weights| {
                let result = score_pair(&consultant, &tender, &weights);
                MatchCandidate {
                    consultant_id: consultant.id,
                    tender_id: tender.id,
                    result,
                }
            })
            .await;

        Ok(filter_and_rank(scored, min_score))
    }

    /// Best matches across a company's consultants and tenders, both
    /// directions unioned, de-duplicated by pair, truncated to `limit`.
    pub async fn suggest_top_matches(
        &self,
        company_id: Uuid,
        limit: usize,
    ) -> Result<Vec<MatchCandidate>, EngineError> {
        let consultants = self.consultants.get_by_company(company_id).await?;
        let tenders = self.tenders.get_by_company(company_id).await?;

        let mut all: Vec<MatchCandidate> = Vec::new();
        let mut seen: HashSet<(Uuid, Uuid)> = HashSet::new();

        for consultant in &consultants {
            for candidate in self
                .find_matches_for_consultant(consultant.id, SUGGESTION_MIN_SCORE, true)
                .await?
            {
                if seen.insert((candidate.consultant_id, candidate.tender_id)) {
                    all.push(candidate);
                }
            }
        }
        for tender in &tenders {
            for candidate in self
                .find_matches_for_tender(tender.id, SUGGESTION_MIN_SCORE, true)
                .await?
            {
                if seen.insert((candidate.consultant_id, candidate.tender_id)) {
                    all.push(candidate);
                }
            }
        }

        // Stable sort: equal scores keep insertion order.
        all.sort_by(|a, b| {
            b.result
                .score
                .partial_cmp(&a.result.score)
                .unwrap_or(Ordering::Equal)
        });
        all.truncate(limit);
        Ok(all)
    }

    /// Scores every pool item on at most `concurrency` concurrent tasks and
    /// returns `(pool index, candidate)` pairs for a deterministic merge.
    async fn score_bounded<T, F>(&self, pool: Vec<T>, score: F) -> Vec<(usize, MatchCandidate)>
    where
        T: Send + 'static,
        F: Fn(T, MatchWeights) -> MatchCandidate + Clone + Send + Sync + 'static,
    {
        let mut results = Vec::with_capacity(pool.len());
        let mut set = JoinSet::new();
        let mut in_flight = 0usize;

        for (index, item) in pool.into_iter().enumerate() {
            if in_flight == self.concurrency {
                if let Some(Ok(scored)) = set.join_next().await {
                    results.push(scored);
                }
                in_flight -= 1;
            }
            let score = score.clone();
            let weights = self.weights;
            set.spawn(async move { (index, score(item, weights)) });
            in_flight += 1;
        }
        while let Some(joined) = set.join_next().await {
            if let Ok(scored) = joined {
                results.push(scored);
            }
        }
        results
    }
}

fn filter_and_rank(
    mut scored: Vec<(usize, MatchCandidate)>,
    min_score: f64,
) -> Vec<MatchCandidate> {
    scored.retain(|(_, candidate)| candidate.result.score >= min_score);
    scored.sort_by(|a, b| {
        b.1.result
            .score
            .partial_cmp(&a.1.result.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    scored.into_iter().map(|(_, candidate)| candidate).collect()
}
