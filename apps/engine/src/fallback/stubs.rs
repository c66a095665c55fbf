//! Canned results for the terminal fallback tier. These never fail, so every
//! operation is guaranteed to return a well-formed tagged result even with
//! the workflow backend down and the heuristic analyzer unable to run.

use chrono::Utc;

use super::Provenance;
use crate::models::{
    ConsultantProfile, EducationEntry, ExperienceEntry, ExtractedCvDocument, PersonalInfo,
    ProficiencyLevel, Skill, SkillCategory, SkillMention, TenderRequisition,
};
use crate::portfolio::Portfolio;

fn canned_mention(
    name: &str,
    category: SkillCategory,
    level: ProficiencyLevel,
    years: u32,
) -> SkillMention {
    SkillMention {
        skill: Skill {
            canonical_name: name.to_string(),
            category,
        },
        level,
        years_experience: Some(years),
    }
}

/// The canned skill set of the placeholder profile.
pub fn static_skill_mentions() -> Vec<SkillMention> {
    vec![
        canned_mention(
            "JavaScript",
            SkillCategory::ProgrammingLanguage,
            ProficiencyLevel::EXPERT,
            5,
        ),
        canned_mention(
            "Python",
            SkillCategory::ProgrammingLanguage,
            ProficiencyLevel::INTERMEDIATE,
            3,
        ),
        canned_mention(
            "React",
            SkillCategory::FrontendFramework,
            ProficiencyLevel::EXPERT,
            4,
        ),
    ]
}

/// The canned extraction result: a plausible, well-formed document with
/// every field populated.
pub fn static_cv_document() -> ExtractedCvDocument {
    ExtractedCvDocument {
        skills: static_skill_mentions(),
        experience: vec![ExperienceEntry {
            title: "Développeur Full Stack".to_string(),
            company: "Tech Solutions".to_string(),
            location: Some("Paris".to_string()),
            start_date: Some("Janvier 2020".to_string()),
            end_date: Some("Présent".to_string()),
            description: "Développement d'applications web avec React et Node.js.".to_string(),
        }],
        education: vec![EducationEntry {
            degree: "Master en Informatique".to_string(),
            institution: "Université de Paris".to_string(),
            year: Some(2019),
        }],
        personal_info: PersonalInfo {
            name: Some("John Doe".to_string()),
            email: Some("john.doe@example.com".to_string()),
            phone: Some("+33123456789".to_string()),
            location: Some("Paris, France".to_string()),
        },
        extraction_method: Provenance::FallbackStatic,
    }
}

/// Minimal portfolio: relevant-skill filter only, no match computation.
pub fn static_portfolio(
    consultant: &ConsultantProfile,
    tender: &TenderRequisition,
) -> Portfolio {
    let tender_skills: Vec<String> = tender
        .skill_requirements
        .iter()
        .map(|r| r.name.to_lowercase())
        .collect();

    let relevant_skills = consultant
        .skills
        .iter()
        .filter(|m| tender_skills.contains(&m.skill.canonical_name.to_lowercase()))
        .map(|m| crate::portfolio::RelevantSkill {
            mention: m.clone(),
            relevance: crate::models::Importance::Required,
        })
        .collect();

    Portfolio {
        consultant_name: consultant.full_name(),
        consultant_title: consultant.title.clone(),
        consultant_summary: consultant.bio.clone(),
        custom_presentation: String::new(),
        tender_title: tender.title.clone(),
        tender_description: tender.description.clone(),
        match_score: 0.0,
        match_details: crate::matching::CvTenderMatch::zero(
            &tender.skill_requirements,
            Provenance::FallbackStatic,
        ),
        relevant_skills,
        other_skills: Vec::new(),
        relevant_experiences: Vec::new(),
        education: Vec::new(),
        generated_at: Utc::now(),
        generation_method: Provenance::FallbackStatic,
    }
}
