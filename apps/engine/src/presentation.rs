//! Deterministic narrative generator. Builds the consultant pitch paragraph
//! from profile data, the match score, and one of three canned templates
//! keyed by recommendation tier. No model call happens here — LLM-backed
//! enrichment is an optional collaborator layered on top, never required.

use crate::matching::Recommendation;
use crate::models::{ConsultantProfile, ExperienceEntry};

/// How many top skills (by years of experience) the narrative cites.
const TOP_SKILLS: usize = 5;

/// Builds the presentation paragraph. Pure function of its inputs: the same
/// consultant, tender title, score, and recommendation always produce the
/// same text.
pub fn build_presentation(
    consultant: &ConsultantProfile,
    tender_title: &str,
    score: f64,
    recommendation: Recommendation,
    recent_experience: Option<&ExperienceEntry>,
) -> String {
    let full_name = consultant.full_name();
    let name = non_empty_or(&full_name, "Consultant");
    let title = non_empty_or(&consultant.title, "Professionnel IT");
    let years = consultant
        .experience_years
        .or_else(|| {
            consultant
                .skills
                .iter()
                .filter_map(|m| m.years_experience)
                .max()
        })
        .unwrap_or(3);

    let mut top_skills: Vec<_> = consultant.skills.iter().collect();
    top_skills.sort_by_key(|m| std::cmp::Reverse(m.years_experience.unwrap_or(0)));
    let skills_text = top_skills
        .iter()
        .take(TOP_SKILLS)
        .map(|m| m.skill.canonical_name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut presentation = format!(
        "{name} est un {title} avec {years} ans d'expérience, spécialisé en {skills_text}.\n\n\
         Avec un score de correspondance de {score:.0}% pour {tender_title}, {name} présente "
    );

    presentation.push_str(match recommendation {
        Recommendation::StrongMatch => {
            "une excellente adéquation avec les exigences du projet. Ses compétences \
             correspondent parfaitement aux besoins exprimés, et son expérience \
             professionnelle démontre sa capacité à contribuer immédiatement et efficacement."
        }
        Recommendation::PartialMatch => {
            "une bonne adéquation avec les exigences principales du projet. Bien que \
             certaines compétences requises soient présentes, d'autres pourraient nécessiter \
             une montée en compétence rapide ou une formation complémentaire."
        }
        Recommendation::WeakMatch => {
            "quelques compétences pertinentes pour le projet. Cependant, plusieurs \
             compétences clés requises demanderaient une montée en compétence significative \
             ou un accompagnement pour garantir le succès du projet."
        }
    });

    if let Some(experience) = recent_experience {
        presentation.push_str(&format!(
            "\n\nRécemment, {name} a occupé le poste de {} chez {}, où il a développé des \
             compétences directement applicables à ce projet.",
            non_empty_or(&experience.title, "professionnel"),
            non_empty_or(&experience.company, "une entreprise"),
        ));
    }

    presentation
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}
