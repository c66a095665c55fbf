//! Header-bounded CV section segmentation.
//!
//! Sections are located by multilingual (French/English) header keywords,
//! bounded by the next known header, and split into candidate entries on
//! blank-line boundaries. All functions are infallible: malformed input
//! yields the partial or empty structure built so far.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{EducationEntry, ExperienceEntry};

static EXPERIENCE_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)EXPÉRIENCE PROFESSIONNELLE|EXPERIENCE|EMPLOIS").expect("experience header regex")
});

static EDUCATION_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)FORMATION|ÉDUCATION|EDUCATION").expect("education header regex"));

static SKILLS_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)COMPÉTENCES|COMPETENCES|SKILLS").expect("skills header regex"));

/// Headers that terminate the education section.
static AFTER_EDUCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)LANGUES|CERTIFICATIONS|COMPÉTENCES").expect("post-education header regex")
});

/// Headers that terminate the skills section.
static AFTER_SKILLS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)EXPÉRIENCE PROFESSIONNELLE|EXPERIENCE|EMPLOIS|FORMATION|ÉDUCATION|EDUCATION|LANGUES|CERTIFICATIONS")
        .expect("post-skills header regex")
});

static BLANK_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("blank line regex"));

/// French month names and abbreviations, plus the open-ended "présent".
static DATE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(Janvier|Février|Mars|Avril|Mai|Juin|Juillet|Août|Septembre|Octobre|Novembre|Décembre|Jan|Fév|Mar|Avr|Jun|Jul|Aoû|Sep|Oct|Nov|Déc)\s+(\d{4})\s*-\s*(Janvier|Février|Mars|Avril|Mai|Juin|Juillet|Août|Septembre|Octobre|Novembre|Décembre|Jan|Fév|Mar|Avr|Jun|Jul|Aoû|Sep|Oct|Nov|Déc|Présent|Present)\s*(\d{4})?",
    )
    .expect("date range regex")
});

static YEAR_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})\s*-\s*(\d{4})|(\d{4})").expect("year range regex"));

/// Slice of `text` after the first match of `header`, bounded at the next
/// match of `next` when one exists.
fn section_after<'a>(text: &'a str, header: &Regex, next: Option<&Regex>) -> Option<&'a str> {
    let m = header.find(text)?;
    let rest = &text[m.end()..];
    match next.and_then(|re| re.find(rest)) {
        Some(n) => Some(&rest[..n.start()]),
        None => Some(rest),
    }
}

/// Splits a section into entry blocks on blank-line boundaries.
fn entry_blocks(section: &str) -> impl Iterator<Item = &str> {
    BLANK_LINE_RE
        .split(section)
        .map(str::trim)
        .filter(|block| !block.is_empty())
}

/// Raw entries of the skills section (bullet blocks), if the section exists.
pub fn extract_skills_section(text: &str) -> Vec<String> {
    let Some(section) = section_after(text, &SKILLS_HEADER_RE, Some(&AFTER_SKILLS_RE)) else {
        return Vec::new();
    };
    entry_blocks(section).map(str::to_string).collect()
}

/// Professional experience entries. Blocks need at least three non-empty
/// lines (title, company/location, date range); shorter blocks are discarded.
pub fn extract_experience(text: &str) -> Vec<ExperienceEntry> {
    let Some(section) = section_after(text, &EXPERIENCE_HEADER_RE, Some(&EDUCATION_HEADER_RE))
    else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for block in entry_blocks(section) {
        let lines: Vec<&str> = block
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() < 3 {
            continue;
        }

        let title = lines[0].to_string();
        let (company, location) = match lines[1].split_once(',') {
            Some((company, location)) => (company.trim().to_string(), Some(location.trim().to_string())),
            None => (lines[1].to_string(), None),
        };
        let (start_date, end_date) = parse_date_range(lines[2]);
        let description = lines[3..].join("\n");

        entries.push(ExperienceEntry {
            title,
            company,
            location,
            start_date,
            end_date,
            description,
        });
    }
    entries
}

/// Education entries. Blocks need at least two lines (degree, institution);
/// the year comes from a `YYYY - YYYY` range (end year) or a lone `YYYY`.
pub fn extract_education(text: &str) -> Vec<EducationEntry> {
    let Some(section) = section_after(text, &EDUCATION_HEADER_RE, Some(&AFTER_EDUCATION_RE)) else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for block in entry_blocks(section) {
        let lines: Vec<&str> = block
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() < 2 {
            continue;
        }

        let year = YEAR_RANGE_RE.captures(block).and_then(|caps| {
            caps.get(3)
                .or_else(|| caps.get(2))
                .and_then(|m| m.as_str().parse().ok())
        });

        entries.push(EducationEntry {
            degree: lines[0].to_string(),
            institution: lines[1].to_string(),
            year,
        });
    }
    entries
}

/// Parses a "Janvier 2020 - Présent" style date line into start/end strings.
/// "Présent"/"Present" is an open end date.
pub fn parse_date_range(line: &str) -> (Option<String>, Option<String>) {
    let Some(caps) = DATE_RANGE_RE.captures(line) else {
        return (None, None);
    };

    let start = format!("{} {}", &caps[1], &caps[2]);
    let end_month = &caps[3];
    let end = if end_month.eq_ignore_ascii_case("present") || end_month.to_lowercase() == "présent"
    {
        "Présent".to_string()
    } else {
        match caps.get(4) {
            Some(year) => format!("{} {}", end_month, year.as_str()),
            None => end_month.to_string(),
        }
    };

    (Some(start), Some(end))
}
