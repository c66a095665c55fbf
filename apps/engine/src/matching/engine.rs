//! Four-factor weighted matching between a consultant and a tender.
//!
//! Pure, stateless scoring: skills, experience, location, and availability
//! sub-scores (each in [0, 1]) combine into a final score on the canonical
//! 0–100 scale, rounded to two decimals. `score_pair` called twice on
//! identical inputs returns identical output — no time or randomness.

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::fallback::Provenance;
use crate::models::{
    AvailabilityStatus, ConsultantProfile, Importance, ProficiencyLevel, TenderRequisition,
};

/// Inclusive lower bounds of the recommendation tiers, on the 0–100 scale.
pub const STRONG_MATCH_THRESHOLD: f64 = 80.0;
pub const PARTIAL_MATCH_THRESHOLD: f64 = 50.0;

/// Experience floor/ceiling: a tender is assumed to ask for about three
/// years; five or more is fully qualified.
const EXPERIENCE_FLOOR_YEARS: f64 = 3.0;
const EXPERIENCE_CEILING_YEARS: f64 = 5.0;

/// Weights of the four sub-scores. Must sum to 1.0; validated at
/// construction, distinct from the deliberate clamp of `level/5` inside the
/// skills formula.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchWeights {
    pub skills: f64,
    pub experience: f64,
    pub location: f64,
    pub availability: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            skills: 0.5,
            experience: 0.2,
            location: 0.15,
            availability: 0.15,
        }
    }
}

impl MatchWeights {
    pub fn validate(&self) -> Result<(), EngineError> {
        let sum = self.skills + self.experience + self.location + self.availability;
        if (sum - 1.0).abs() > 1e-9 {
            return Err(EngineError::Configuration(format!(
                "match weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    StrongMatch,
    PartialMatch,
    WeakMatch,
}

impl Recommendation {
    /// Tier for a score on the 0–100 scale. Lower bounds are inclusive.
    pub fn for_score(score: f64) -> Self {
        if score >= STRONG_MATCH_THRESHOLD {
            Recommendation::StrongMatch
        } else if score >= PARTIAL_MATCH_THRESHOLD {
            Recommendation::PartialMatch
        } else {
            Recommendation::WeakMatch
        }
    }
}

/// Full scoring breakdown for one consultant/tender pair. Always recomputed
/// as a whole, never partially mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub skills_subscore: f64,
    pub experience_subscore: f64,
    pub location_subscore: f64,
    pub availability_subscore: f64,
    /// Final weighted score on the 0–100 scale, two decimals.
    pub score: f64,
    pub recommendation: Recommendation,
    pub required_matches: Vec<String>,
    pub required_misses: Vec<String>,
    pub preferred_matches: Vec<String>,
    #[serde(default)]
    pub matching_method: Provenance,
}

impl MatchResult {
    /// The deliberate zero-score result returned when a referenced consultant
    /// or tender does not exist.
    pub fn zero(matching_method: Provenance) -> Self {
        Self {
            skills_subscore: 0.0,
            experience_subscore: 0.0,
            location_subscore: 0.0,
            availability_subscore: 0.0,
            score: 0.0,
            recommendation: Recommendation::WeakMatch,
            required_matches: Vec::new(),
            required_misses: Vec::new(),
            preferred_matches: Vec::new(),
            matching_method,
        }
    }
}

struct SkillsBreakdown {
    subscore: f64,
    required_matches: Vec<String>,
    required_misses: Vec<String>,
    preferred_matches: Vec<String>,
}

/// Scores a consultant against a tender.
pub fn score_pair(
    consultant: &ConsultantProfile,
    tender: &TenderRequisition,
    weights: &MatchWeights,
) -> MatchResult {
    let skills = skills_subscore(consultant, tender);
    let experience = experience_subscore(consultant.experience_years);
    let location = location_subscore(consultant, tender);
    let availability = availability_subscore(consultant, tender);

    let weighted = weights.skills * skills.subscore
        + weights.experience * experience
        + weights.location * location
        + weights.availability * availability;
    let score = round2(weighted * 100.0);

    MatchResult {
        skills_subscore: skills.subscore,
        experience_subscore: experience,
        location_subscore: location,
        availability_subscore: availability,
        score,
        recommendation: Recommendation::for_score(score),
        required_matches: skills.required_matches,
        required_misses: skills.required_misses,
        preferred_matches: skills.preferred_matches,
        matching_method: Provenance::Heuristic,
    }
}

/// Importance-weighted skills sub-score. A tender with no skill requirements
/// scores 0.0 — no requirements means no evidence of fit.
fn skills_subscore(consultant: &ConsultantProfile, tender: &TenderRequisition) -> SkillsBreakdown {
    let mut total_weight = 0.0;
    let mut matched_weight = 0.0;
    let mut required_matches = Vec::new();
    let mut required_misses = Vec::new();
    let mut preferred_matches = Vec::new();

    for requirement in &tender.skill_requirements {
        let weight = requirement.importance.weight();
        total_weight += weight;

        match consultant.skill(&requirement.name) {
            Some(mention) => {
                // Levels are 1–5 by construction; the clamp keeps the factor
                // in range even for hand-built data.
                let level_factor =
                    (mention.level.value() as f64 / ProficiencyLevel::MAX as f64).min(1.0);
                matched_weight += weight * level_factor;

                match requirement.importance {
                    Importance::Required => required_matches.push(requirement.name.clone()),
                    Importance::Preferred => preferred_matches.push(requirement.name.clone()),
                    Importance::NiceToHave => {}
                }
            }
            None => {
                if requirement.importance == Importance::Required {
                    required_misses.push(requirement.name.clone());
                }
            }
        }
    }

    let subscore = if total_weight == 0.0 {
        0.0
    } else {
        matched_weight / total_weight
    };

    SkillsBreakdown {
        subscore,
        required_matches,
        required_misses,
        preferred_matches,
    }
}

/// Piecewise-linear experience sub-score around the 3-year floor and 5-year
/// ceiling. Unknown years score a neutral 0.5.
fn experience_subscore(years: Option<u32>) -> f64 {
    let Some(years) = years else {
        return 0.5;
    };
    let years = years as f64;

    if years >= EXPERIENCE_CEILING_YEARS {
        1.0
    } else if years >= EXPERIENCE_FLOOR_YEARS {
        0.7 + 0.3 * (years - EXPERIENCE_FLOOR_YEARS)
            / (EXPERIENCE_CEILING_YEARS - EXPERIENCE_FLOOR_YEARS)
    } else {
        (0.7 * years / EXPERIENCE_FLOOR_YEARS).max(0.3)
    }
}

/// Location sub-score. No geographic distance computation is available; a
/// declared travel radius scores a neutral 0.5.
fn location_subscore(consultant: &ConsultantProfile, tender: &TenderRequisition) -> f64 {
    if tender.remote_allowed {
        return if consultant.remote_ok { 1.0 } else { 0.3 };
    }

    if let (Some(consultant_loc), Some(tender_loc)) = (&consultant.location, &tender.location) {
        if consultant_loc.to_lowercase() == tender_loc.to_lowercase() {
            return 1.0;
        }
    }

    if consultant.max_travel_distance_km.is_some() {
        return 0.5;
    }

    0.3
}

fn availability_subscore(consultant: &ConsultantProfile, tender: &TenderRequisition) -> f64 {
    match consultant.availability_status {
        AvailabilityStatus::Unavailable | AvailabilityStatus::OnMission => 0.0,
        AvailabilityStatus::Available => 1.0,
        AvailabilityStatus::PartiallyAvailable => {
            if let (Some(available_from), Some(start)) =
                (consultant.availability_date, tender.start_date)
            {
                if available_from > start {
                    // Consultant only frees up after the tender starts.
                    return 0.3;
                }
            }
            0.7
        }
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SkillCategory, SkillMention, TenderSkillRequirement};
    use crate::models::Skill;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn mention(name: &str, level: u8, years: Option<u32>) -> SkillMention {
        SkillMention {
            skill: Skill {
                canonical_name: name.to_string(),
                category: SkillCategory::Other,
            },
            level: ProficiencyLevel::new(level).unwrap(),
            years_experience: years,
        }
    }

    fn requirement(name: &str, importance: Importance) -> TenderSkillRequirement {
        TenderSkillRequirement {
            name: name.to_string(),
            importance,
            target_level: None,
            target_years: None,
        }
    }

    fn consultant(skills: Vec<SkillMention>) -> ConsultantProfile {
        ConsultantProfile {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            title: "Développeuse Full Stack".to_string(),
            bio: String::new(),
            skills,
            experience_years: Some(6),
            location: Some("Paris".to_string()),
            remote_ok: true,
            max_travel_distance_km: None,
            availability_status: AvailabilityStatus::Available,
            availability_date: None,
        }
    }

    fn tender(requirements: Vec<TenderSkillRequirement>) -> TenderRequisition {
        TenderRequisition {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            title: "Mission React".to_string(),
            description: String::new(),
            skill_requirements: requirements,
            location: Some("Paris".to_string()),
            remote_allowed: true,
            start_date: None,
            keywords: Vec::new(),
        }
    }

    #[test]
    fn test_score_pair_is_deterministic() {
        let c = consultant(vec![mention("React", 4, Some(5))]);
        let t = tender(vec![requirement("React", Importance::Required)]);
        let weights = MatchWeights::default();

        let first = score_pair(&c, &t, &weights);
        let second = score_pair(&c, &t, &weights);
        assert_eq!(first.score, second.score);
        assert_eq!(first.recommendation, second.recommendation);
        assert_eq!(first.required_matches, second.required_matches);
    }

    #[test]
    fn test_score_stays_on_the_0_100_scale() {
        let c = consultant(vec![mention("React", 5, Some(10))]);
        let t = tender(vec![requirement("React", Importance::Required)]);
        let result = score_pair(&c, &t, &MatchWeights::default());
        assert!(result.score >= 0.0 && result.score <= 100.0);

        let empty = score_pair(&consultant(vec![]), &tender(vec![]), &MatchWeights::default());
        assert!(empty.score >= 0.0 && empty.score <= 100.0);
    }

    #[test]
    fn test_zero_skill_overlap_gives_zero_skills_subscore() {
        let c = consultant(vec![mention("Cobol", 5, Some(20))]);
        let t = tender(vec![
            requirement("React", Importance::Required),
            requirement("TypeScript", Importance::Preferred),
        ]);
        let result = score_pair(&c, &t, &MatchWeights::default());
        assert_eq!(result.skills_subscore, 0.0);
        assert_eq!(result.required_misses, vec!["React".to_string()]);
        assert!(result.required_matches.is_empty());
    }

    #[test]
    fn test_full_required_coverage_at_max_level_gives_full_skills_subscore() {
        let c = consultant(vec![mention("React", 5, Some(8)), mention("Rust", 5, Some(8))]);
        let t = tender(vec![
            requirement("React", Importance::Required),
            requirement("Rust", Importance::Required),
        ]);
        let result = score_pair(&c, &t, &MatchWeights::default());
        assert_eq!(result.skills_subscore, 1.0);
        assert!(result.required_misses.is_empty());
    }

    #[test]
    fn test_empty_tender_requirements_default_to_zero_skills_subscore() {
        let c = consultant(vec![mention("React", 5, Some(8))]);
        let result = score_pair(&c, &tender(vec![]), &MatchWeights::default());
        assert_eq!(result.skills_subscore, 0.0);
    }

    #[test]
    fn test_raising_a_required_skill_level_never_lowers_the_score() {
        let t = tender(vec![requirement("React", Importance::Required)]);
        let weights = MatchWeights::default();

        let mut previous = f64::MIN;
        for level in 1..=5 {
            let c = consultant(vec![mention("React", level, Some(3))]);
            let score = score_pair(&c, &t, &weights).score;
            assert!(score >= previous, "level {level} lowered score: {score} < {previous}");
            previous = score;
        }
    }

    #[test]
    fn test_recommendation_tier_boundaries_are_inclusive() {
        assert_eq!(Recommendation::for_score(80.0), Recommendation::StrongMatch);
        assert_eq!(Recommendation::for_score(79.9), Recommendation::PartialMatch);
        assert_eq!(Recommendation::for_score(50.0), Recommendation::PartialMatch);
        assert_eq!(Recommendation::for_score(49.9), Recommendation::WeakMatch);
    }

    #[test]
    fn test_experience_subscore_piecewise() {
        assert_eq!(experience_subscore(None), 0.5);
        assert_eq!(experience_subscore(Some(5)), 1.0);
        assert_eq!(experience_subscore(Some(7)), 1.0);
        assert!((experience_subscore(Some(4)) - 0.85).abs() < 1e-9);
        assert_eq!(experience_subscore(Some(3)), 0.7);
        // 0.7 * 2/3 ≈ 0.4667
        assert!((experience_subscore(Some(2)) - 0.7 * 2.0 / 3.0).abs() < 1e-9);
        // Below the floor the score never drops under 0.3.
        assert_eq!(experience_subscore(Some(0)), 0.3);
    }

    #[test]
    fn test_location_remote_tender() {
        let mut c = consultant(vec![]);
        let t = tender(vec![]);
        assert_eq!(location_subscore(&c, &t), 1.0);

        c.remote_ok = false;
        assert_eq!(location_subscore(&c, &t), 0.3);
    }

    #[test]
    fn test_location_on_site_cases() {
        let mut c = consultant(vec![]);
        let mut t = tender(vec![]);
        t.remote_allowed = false;

        // Same city, case-insensitive.
        c.location = Some("PARIS".to_string());
        assert_eq!(location_subscore(&c, &t), 1.0);

        // Different city with a travel radius → neutral.
        c.location = Some("Lyon".to_string());
        c.max_travel_distance_km = Some(200);
        assert_eq!(location_subscore(&c, &t), 0.5);

        // Different city, no radius.
        c.max_travel_distance_km = None;
        assert_eq!(location_subscore(&c, &t), 0.3);
    }

    #[test]
    fn test_availability_cases() {
        let mut c = consultant(vec![]);
        let mut t = tender(vec![]);

        c.availability_status = AvailabilityStatus::Unavailable;
        assert_eq!(availability_subscore(&c, &t), 0.0);

        c.availability_status = AvailabilityStatus::OnMission;
        assert_eq!(availability_subscore(&c, &t), 0.0);

        c.availability_status = AvailabilityStatus::Available;
        assert_eq!(availability_subscore(&c, &t), 1.0);

        // Partially available, only free after the tender starts.
        c.availability_status = AvailabilityStatus::PartiallyAvailable;
        c.availability_date = NaiveDate::from_ymd_opt(2026, 9, 1);
        t.start_date = NaiveDate::from_ymd_opt(2026, 8, 1);
        assert_eq!(availability_subscore(&c, &t), 0.3);

        // Partially available and free before the start.
        c.availability_date = NaiveDate::from_ymd_opt(2026, 7, 1);
        assert_eq!(availability_subscore(&c, &t), 0.7);

        // Partially available with no date at all.
        c.availability_date = None;
        assert_eq!(availability_subscore(&c, &t), 0.7);
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let bad = MatchWeights {
            skills: 0.9,
            experience: 0.2,
            location: 0.15,
            availability: 0.15,
        };
        assert!(bad.validate().is_err());
        assert!(MatchWeights::default().validate().is_ok());
    }

    #[test]
    fn test_nice_to_have_contributes_to_score_but_not_to_lists() {
        let c = consultant(vec![mention("Docker", 5, None)]);
        let t = tender(vec![requirement("Docker", Importance::NiceToHave)]);
        let result = score_pair(&c, &t, &MatchWeights::default());
        assert_eq!(result.skills_subscore, 1.0);
        assert!(result.required_matches.is_empty());
        assert!(result.preferred_matches.is_empty());
    }
}
