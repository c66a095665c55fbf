//! Simplified two-factor matcher between an extracted CV's skills and a
//! tender's requirements: required coverage (0.8) plus preferred coverage
//! (0.2). This is the report shape produced by the fallback matching tiers.
//!
//! Unlike the four-factor engine, an empty required list here is vacuously
//! satisfied (coverage 1.0).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::engine::{round2, Recommendation};
use crate::fallback::Provenance;
use crate::models::{Importance, ProficiencyLevel, SkillMention, TenderSkillRequirement};

pub const REQUIRED_WEIGHT: f64 = 0.8;
pub const PREFERRED_WEIGHT: f64 = 0.2;

/// Target vs candidate detail for one matched skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillMatchDetail {
    pub name: String,
    pub target_level: Option<ProficiencyLevel>,
    pub candidate_level: ProficiencyLevel,
    pub target_years: Option<u32>,
    pub candidate_years: Option<u32>,
}

/// Coverage report for one CV/tender pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvTenderMatch {
    /// Final score on the 0–100 scale, two decimals.
    pub score: f64,
    pub required_matches: Vec<SkillMatchDetail>,
    pub required_misses: Vec<String>,
    pub preferred_matches: Vec<SkillMatchDetail>,
    pub recommendation: Recommendation,
    #[serde(default)]
    pub matching_method: Provenance,
}

impl CvTenderMatch {
    /// Canned zero-score report; the static fallback tier returns this with
    /// every required skill listed as missed.
    pub fn zero(requirements: &[TenderSkillRequirement], matching_method: Provenance) -> Self {
        Self {
            score: 0.0,
            required_matches: Vec::new(),
            required_misses: requirements
                .iter()
                .filter(|r| r.importance == Importance::Required)
                .map(|r| r.name.clone())
                .collect(),
            preferred_matches: Vec::new(),
            recommendation: Recommendation::WeakMatch,
            matching_method,
        }
    }
}

fn detail(requirement: &TenderSkillRequirement, mention: &SkillMention) -> SkillMatchDetail {
    SkillMatchDetail {
        name: requirement.name.clone(),
        target_level: requirement.target_level,
        candidate_level: mention.level,
        target_years: requirement.target_years,
        candidate_years: mention.years_experience,
    }
}

/// Scores a set of CV skill mentions against tender requirements. Required
/// requirements count toward required coverage; everything else counts as
/// preferred.
pub fn score_cv_against_tender(
    cv_skills: &[SkillMention],
    requirements: &[TenderSkillRequirement],
) -> CvTenderMatch {
    let by_name: HashMap<String, &SkillMention> = cv_skills
        .iter()
        .map(|m| (m.skill.canonical_name.to_lowercase(), m))
        .collect();

    let mut required_total = 0usize;
    let mut preferred_total = 0usize;
    let mut required_matches = Vec::new();
    let mut required_misses = Vec::new();
    let mut preferred_matches = Vec::new();

    for requirement in requirements {
        let mention = by_name.get(&requirement.name.to_lowercase());
        if requirement.importance == Importance::Required {
            required_total += 1;
            match mention {
                Some(m) => required_matches.push(detail(requirement, m)),
                None => required_misses.push(requirement.name.clone()),
            }
        } else {
            preferred_total += 1;
            if let Some(m) = mention {
                preferred_matches.push(detail(requirement, m));
            }
        }
    }

    let required_coverage = if required_total == 0 {
        1.0
    } else {
        required_matches.len() as f64 / required_total as f64
    };
    let preferred_coverage = if preferred_total == 0 {
        1.0
    } else {
        preferred_matches.len() as f64 / preferred_total as f64
    };

    let score = round2(
        (required_coverage * REQUIRED_WEIGHT + preferred_coverage * PREFERRED_WEIGHT) * 100.0,
    );

    CvTenderMatch {
        score,
        required_matches,
        required_misses,
        preferred_matches,
        recommendation: Recommendation::for_score(score),
        matching_method: Provenance::Heuristic,
    }
}
