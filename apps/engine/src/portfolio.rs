//! Portfolio (dossier de compétences) generation: the consultant's skills and
//! experiences re-ranked for one specific tender, with the coverage match
//! report and the presentation narrative embedded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fallback::Provenance;
use crate::matching::{score_cv_against_tender, CvTenderMatch};
use crate::models::{
    ConsultantProfile, EducationEntry, ExperienceEntry, ExtractedCvDocument, Importance,
    SkillMention, TenderRequisition,
};
use crate::presentation::build_presentation;

/// Relevance points for a tender skill found in an experience description.
const REQUIRED_SKILL_POINTS: u32 = 10;
const PREFERRED_SKILL_POINTS: u32 = 5;
const KEYWORD_POINTS: u32 = 3;

/// A consultant skill that a tender asks for, tagged with the requirement's
/// importance tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelevantSkill {
    pub mention: SkillMention,
    pub relevance: Importance,
}

/// An experience entry with its relevance points for the tender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedExperience {
    pub entry: ExperienceEntry,
    pub relevance_score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub consultant_name: String,
    pub consultant_title: String,
    pub consultant_summary: String,
    pub custom_presentation: String,
    pub tender_title: String,
    pub tender_description: String,
    pub match_score: f64,
    pub match_details: CvTenderMatch,
    pub relevant_skills: Vec<RelevantSkill>,
    pub other_skills: Vec<SkillMention>,
    pub relevant_experiences: Vec<RankedExperience>,
    pub education: Vec<EducationEntry>,
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub generation_method: Provenance,
}

/// Builds the full portfolio. Experiences and education come from the
/// extracted CV when one is available; skills come from the profile.
pub fn build_portfolio(
    consultant: &ConsultantProfile,
    cv: Option<&ExtractedCvDocument>,
    tender: &TenderRequisition,
) -> Portfolio {
    let match_details = score_cv_against_tender(&consultant.skills, &tender.skill_requirements);

    let experiences: &[ExperienceEntry] = cv.map(|d| d.experience.as_slice()).unwrap_or(&[]);
    let education: Vec<EducationEntry> = cv.map(|d| d.education.clone()).unwrap_or_default();

    let relevant_experiences = rank_experiences(experiences, tender);
    let (relevant_skills, other_skills) = split_skills(&consultant.skills, tender);

    // The most recent experience is the first in the parsed list.
    let custom_presentation = build_presentation(
        consultant,
        &tender.title,
        match_details.score,
        match_details.recommendation,
        experiences.first(),
    );

    Portfolio {
        consultant_name: consultant.full_name(),
        consultant_title: consultant.title.clone(),
        consultant_summary: consultant.bio.clone(),
        custom_presentation,
        tender_title: tender.title.clone(),
        tender_description: tender.description.clone(),
        match_score: match_details.score,
        match_details,
        relevant_skills,
        other_skills,
        relevant_experiences,
        education,
        generated_at: Utc::now(),
        generation_method: Provenance::Heuristic,
    }
}

/// Scores each experience by the tender skills and keywords its description
/// or title mentions, keeps only the relevant ones, best first (ties keep
/// the parsed order).
fn rank_experiences(experiences: &[ExperienceEntry], tender: &TenderRequisition) -> Vec<RankedExperience> {
    let mut ranked: Vec<RankedExperience> = experiences
        .iter()
        .filter_map(|entry| {
            let score = experience_relevance(entry, tender);
            (score > 0).then(|| RankedExperience {
                entry: entry.clone(),
                relevance_score: score,
            })
        })
        .collect();
    ranked.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    ranked
}

fn experience_relevance(entry: &ExperienceEntry, tender: &TenderRequisition) -> u32 {
    let description = entry.description.to_lowercase();
    let title = entry.title.to_lowercase();
    let mut score = 0;

    for requirement in &tender.skill_requirements {
        if description.contains(&requirement.name.to_lowercase()) {
            score += match requirement.importance {
                Importance::Required => REQUIRED_SKILL_POINTS,
                _ => PREFERRED_SKILL_POINTS,
            };
        }
    }

    if score == 0 {
        for keyword in &tender.keywords {
            let keyword = keyword.to_lowercase();
            if title.contains(&keyword) || description.contains(&keyword) {
                score = KEYWORD_POINTS;
                break;
            }
        }
    }

    score
}

/// Splits the consultant's skills into those the tender asks for (tagged with
/// the requirement's importance) and the rest.
fn split_skills(
    skills: &[SkillMention],
    tender: &TenderRequisition,
) -> (Vec<RelevantSkill>, Vec<SkillMention>) {
    let mut relevant = Vec::new();
    let mut other = Vec::new();

    for mention in skills {
        let name = mention.skill.canonical_name.to_lowercase();
        let requirement = tender
            .skill_requirements
            .iter()
            .find(|r| r.name.to_lowercase() == name);
        match requirement {
            Some(r) => relevant.push(RelevantSkill {
                mention: mention.clone(),
                relevance: r.importance,
            }),
            None => other.push(mention.clone()),
        }
    }

    (relevant, other)
}
