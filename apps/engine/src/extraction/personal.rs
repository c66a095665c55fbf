//! Personal-info extraction from the top of a CV.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::PersonalInfo;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("email regex")
});

/// International (+33 1 23 45 67 89) or French local (01 23 45 67 89) digit
/// groups.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+\d{1,4}[\s\d-]{7,12}|\d{2}[\s.\-]?\d{2}[\s.\-]?\d{2}[\s.\-]?\d{2}[\s.\-]?\d{2}")
        .expect("phone regex")
});

/// Ordered location patterns; the first match wins.
static LOCATION_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        // Labeled field: "Adresse: 12 rue X, Paris"
        Regex::new(r"(?:Adresse|Location|Localisation|Ville)\s*:\s*([^,\n]+(?:,\s*[^,\n]+)*)")
            .expect("labeled location regex"),
        // "City, Country" immediately before a | separator
        Regex::new(r"([^,|\n]+,\s*[^,|\n]+)\s*\|").expect("separator location regex"),
        // Capitalized city before a known country name
        Regex::new(r"\n([A-Z][a-zé]+(?: [A-Z][a-zé]+)*,\s*(?:France|Belgique|Suisse|Canada))")
            .expect("country location regex"),
    ]
});

/// Maximum number of whitespace tokens for the first line to count as a name.
const NAME_MAX_TOKENS: usize = 4;

/// Extracts name, email, phone, and location. Infallible; anything not found
/// is `None`.
pub fn extract_personal_info(text: &str) -> PersonalInfo {
    let mut info = PersonalInfo::default();

    if let Some(first_line) = text.trim().lines().next() {
        let line = first_line.trim();
        if !line.is_empty() && line.split_whitespace().count() <= NAME_MAX_TOKENS {
            info.name = Some(line.to_string());
        }
    }

    info.email = EMAIL_RE.find(text).map(|m| m.as_str().to_string());
    // The digit-group class eats a trailing separator space; trim it off.
    info.phone = PHONE_RE.find(text).map(|m| m.as_str().trim().to_string());

    for pattern in LOCATION_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            info.location = Some(caps[1].trim().to_string());
            break;
        }
    }

    info
}
