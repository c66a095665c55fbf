// CV text extraction pipeline: section segmentation, personal info, and the
// skill normalizer. Input is plain text — binary→text conversion is a
// collaborator concern (see `document`).

pub mod normalizer;
pub mod personal;
pub mod sections;

use crate::fallback::Provenance;
use crate::models::ExtractedCvDocument;
use crate::taxonomy::SkillTaxonomy;

/// Parses a CV text into a structured document. Never fails: malformed or
/// empty input yields a sparse document with every field present. The skill
/// scan runs over the full text, not just the skills section, so skills
/// mentioned inside experience descriptions are caught too.
pub fn parse_cv_text(text: &str, taxonomy: &SkillTaxonomy) -> ExtractedCvDocument {
    ExtractedCvDocument {
        skills: normalizer::scan_skills(text, taxonomy),
        experience: sections::extract_experience(text),
        education: sections::extract_education(text),
        personal_info: personal::extract_personal_info(text),
        extraction_method: Provenance::Heuristic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CV: &str = "\
JOHN DOE
Développeur Full Stack
Paris, France | +33123456789 | john.doe@example.com

COMPÉTENCES
• Langages: JavaScript (5 ans), Python (3 ans), TypeScript (2 ans)
• Frontend: React (4 ans), Angular (2 ans)
• DevOps: Docker, Kubernetes, AWS

EXPÉRIENCE PROFESSIONNELLE
Développeur Full Stack
Tech Solutions, Paris
Janvier 2020 - Présent
• Développement d'applications web avec React et Node.js

FORMATION
Master en Informatique
Université de Paris
2016 - 2018

LANGUES
• Français (natif)
";

    #[test]
    fn test_parse_cv_text_populates_every_field() {
        let taxonomy = SkillTaxonomy::builtin();
        let doc = parse_cv_text(SAMPLE_CV, &taxonomy);

        assert!(!doc.skills.is_empty());
        assert_eq!(doc.experience.len(), 1);
        assert_eq!(doc.education.len(), 1);
        assert_eq!(doc.personal_info.name.as_deref(), Some("JOHN DOE"));
        assert_eq!(doc.extraction_method, Provenance::Heuristic);
    }

    #[test]
    fn test_parse_cv_text_is_idempotent() {
        let taxonomy = SkillTaxonomy::builtin();
        assert_eq!(
            parse_cv_text(SAMPLE_CV, &taxonomy),
            parse_cv_text(SAMPLE_CV, &taxonomy)
        );
    }

    #[test]
    fn test_parse_cv_text_on_garbage_yields_sparse_document() {
        let taxonomy = SkillTaxonomy::builtin();
        let doc = parse_cv_text("%%%% \u{0} not a cv at all %%%%", &taxonomy);

        assert!(doc.skills.is_empty());
        assert!(doc.experience.is_empty());
        assert!(doc.education.is_empty());
        assert_eq!(doc.personal_info.email, None);
    }

    #[test]
    fn test_parse_cv_text_empty_input() {
        let taxonomy = SkillTaxonomy::builtin();
        let doc = parse_cv_text("", &taxonomy);
        assert_eq!(doc, ExtractedCvDocument::empty(Provenance::Heuristic));
    }
}
