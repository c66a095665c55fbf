use serde::{Deserialize, Serialize};

use super::skill::SkillMention;
use crate::fallback::Provenance;

/// One professional experience block parsed out of a CV. Dates are kept as
/// the strings found in the document ("Janvier 2020", "Présent").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: Option<i32>,
}

/// Personal details extracted from the top of a CV. Every field is optional;
/// absence is `None`, never a missing key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

/// Structured data extracted from one uploaded CV. Transient — produced per
/// upload, never persisted here. `extraction_method` records which fallback
/// tier produced it, for auditability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedCvDocument {
    pub skills: Vec<SkillMention>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub extraction_method: Provenance,
}

impl ExtractedCvDocument {
    pub fn empty(extraction_method: Provenance) -> Self {
        Self {
            skills: Vec::new(),
            experience: Vec::new(),
            education: Vec::new(),
            personal_info: PersonalInfo::default(),
            extraction_method,
        }
    }
}
