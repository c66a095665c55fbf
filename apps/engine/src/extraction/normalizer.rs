//! Skill normalizer — resolves proficiency level and years of experience for
//! every taxonomy keyword mentioned in a CV text.
//!
//! `detect_level` and `detect_years` are pure functions of
//! `(text, keyword offset)` so the proximity heuristic is unit-testable
//! without running full document parsing. Identical input always yields
//! identical output.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ProficiencyLevel, SkillMention};
use crate::taxonomy::SkillTaxonomy;

/// Ranked level keywords; earlier entries win when several fall inside the
/// proximity window.
const LEVEL_KEYWORDS: &[(&str, ProficiencyLevel)] = &[
    ("beginner", ProficiencyLevel::BEGINNER),
    ("basic", ProficiencyLevel::BEGINNER),
    ("elementary", ProficiencyLevel::BEGINNER),
    ("novice", ProficiencyLevel::BEGINNER),
    ("intermediate", ProficiencyLevel::INTERMEDIATE),
    ("moderate", ProficiencyLevel::INTERMEDIATE),
    ("average", ProficiencyLevel::INTERMEDIATE),
    ("advanced", ProficiencyLevel::ADVANCED),
    ("proficient", ProficiencyLevel::ADVANCED),
    ("skilled", ProficiencyLevel::ADVANCED),
    ("competent", ProficiencyLevel::ADVANCED),
    ("expert", ProficiencyLevel::EXPERT),
    ("master", ProficiencyLevel::EXPERT),
    ("experienced", ProficiencyLevel::EXPERT),
    ("senior", ProficiencyLevel::EXPERT),
    ("specialist", ProficiencyLevel::SPECIALIST),
    ("guru", ProficiencyLevel::SPECIALIST),
    ("authority", ProficiencyLevel::SPECIALIST),
];

/// Proximity window, in bytes, around a keyword occurrence.
const PROXIMITY_WINDOW: usize = 100;

/// Years-of-experience patterns anchored right after the keyword, tried in
/// order: "(N an", ": N an" / "- N an", then "N an". "an" also covers "ans".
static YEARS_PAREN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\((\d+)\s*an").expect("paren years regex"));
static YEARS_SEP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[:\-]\s*(\d+)\s*an").expect("separator years regex"));
static YEARS_PLAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+(\d+)\s+an").expect("plain years regex"));

/// Finds the proficiency level for the keyword at `keyword_idx` in
/// (lower-cased) `text`. The first ranked level word with an occurrence
/// within ±100 bytes wins; the default is intermediate.
pub fn detect_level(text: &str, keyword_idx: usize) -> ProficiencyLevel {
    for (word, level) in LEVEL_KEYWORDS {
        for (idx, _) in text.match_indices(word) {
            if keyword_idx.abs_diff(idx) < PROXIMITY_WINDOW {
                return *level;
            }
        }
    }
    ProficiencyLevel::default()
}

/// Finds a years-of-experience figure in the window following the keyword at
/// `keyword_idx` (with byte length `keyword_len`). Returns `None` when no
/// pattern matches.
pub fn detect_years(text: &str, keyword_idx: usize, keyword_len: usize) -> Option<u32> {
    let start = keyword_idx.checked_add(keyword_len)?;
    if start >= text.len() {
        return None;
    }

    let mut end = (start + PROXIMITY_WINDOW).min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let window = &text[start..end];

    for pattern in [&*YEARS_PAREN_RE, &*YEARS_SEP_RE, &*YEARS_PLAIN_RE] {
        if let Some(caps) = pattern.captures(window) {
            return caps[1].parse().ok();
        }
    }
    None
}

/// Scans `text` for every taxonomy keyword (case-insensitive substring
/// match) and resolves level and years from the first occurrence. The
/// taxonomy's sorted keyword order makes the result deterministic.
pub fn scan_skills(text: &str, taxonomy: &SkillTaxonomy) -> Vec<SkillMention> {
    let lower = text.to_lowercase();
    let mut mentions = Vec::new();

    for keyword in taxonomy.keywords() {
        let Some(idx) = lower.find(keyword) else {
            continue;
        };
        let Some(skill) = taxonomy.lookup(keyword) else {
            continue;
        };
        mentions.push(SkillMention {
            skill: skill.clone(),
            level: detect_level(&lower, idx),
            years_experience: detect_years(&lower, idx, keyword.len()),
        });
    }
    mentions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SkillCategory;

    #[test]
    fn test_detect_level_inside_window() {
        let text = "compétences avancées: react (niveau expert)";
        let idx = text.find("react").unwrap();
        assert_eq!(detect_level(text, idx), ProficiencyLevel::EXPERT);
    }

    #[test]
    fn test_detect_level_outside_window_defaults_to_intermediate() {
        let filler = "x".repeat(150);
        let text = format!("expert {filler} react");
        let idx = text.find("react").unwrap();
        assert_eq!(detect_level(&text, idx), ProficiencyLevel::INTERMEDIATE);
    }

    #[test]
    fn test_detect_level_ranked_order_wins() {
        // Both "beginner" and "expert" sit inside the window; "beginner" is
        // ranked earlier and wins.
        let text = "beginner react expert";
        let idx = text.find("react").unwrap();
        assert_eq!(detect_level(text, idx), ProficiencyLevel::BEGINNER);
    }

    #[test]
    fn test_detect_level_no_keyword_anywhere() {
        let text = "react, vue et angular au quotidien";
        let idx = text.find("react").unwrap();
        assert_eq!(detect_level(text, idx), ProficiencyLevel::INTERMEDIATE);
    }

    #[test]
    fn test_detect_years_paren_pattern() {
        let text = "javascript (5 ans), python (3 ans)";
        let idx = text.find("javascript").unwrap();
        assert_eq!(detect_years(text, idx, "javascript".len()), Some(5));
    }

    #[test]
    fn test_detect_years_separator_pattern() {
        let text = "python : 3 ans d'expérience";
        let idx = text.find("python").unwrap();
        assert_eq!(detect_years(text, idx, "python".len()), Some(3));

        let text = "python - 7 ans";
        assert_eq!(detect_years(text, 0, "python".len()), Some(7));
    }

    #[test]
    fn test_detect_years_plain_pattern() {
        let text = "docker 4 ans en production";
        assert_eq!(detect_years(text, 0, "docker".len()), Some(4));
    }

    #[test]
    fn test_detect_years_absent() {
        let text = "docker et kubernetes";
        assert_eq!(detect_years(text, 0, "docker".len()), None);
    }

    #[test]
    fn test_detect_years_at_end_of_text() {
        let text = "docker";
        assert_eq!(detect_years(text, 0, "docker".len()), None);
    }

    #[test]
    fn test_scan_skills_finds_known_keywords_case_insensitively() {
        let taxonomy = SkillTaxonomy::builtin();
        let text = "Stack: React, TypeScript (2 ans), PostgreSQL.";
        let mentions = scan_skills(text, &taxonomy);

        let names: Vec<&str> = mentions
            .iter()
            .map(|m| m.skill.canonical_name.as_str())
            .collect();
        assert!(names.contains(&"React"));
        assert!(names.contains(&"TypeScript"));
        assert!(names.contains(&"PostgreSQL"));

        let ts = mentions
            .iter()
            .find(|m| m.skill.canonical_name == "TypeScript")
            .unwrap();
        assert_eq!(ts.years_experience, Some(2));
        assert_eq!(ts.skill.category, SkillCategory::ProgrammingLanguage);
    }

    #[test]
    fn test_scan_skills_is_deterministic() {
        let taxonomy = SkillTaxonomy::builtin();
        let text = "Expert React, senior Python (8 ans), notions de Docker.";
        assert_eq!(scan_skills(text, &taxonomy), scan_skills(text, &taxonomy));
    }

    #[test]
    fn test_scan_skills_empty_text() {
        let taxonomy = SkillTaxonomy::builtin();
        assert!(scan_skills("", &taxonomy).is_empty());
    }
}
