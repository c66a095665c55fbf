use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// Closed set of skill categories. Every taxonomy entry carries exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    ProgrammingLanguage,
    FrontendFramework,
    BackendFramework,
    Database,
    Devops,
    Cloud,
    Design,
    SoftSkill,
    Methodology,
    DataScience,
    Mobile,
    Testing,
    Other,
}

/// A skill as defined by the taxonomy. Immutable once defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub canonical_name: String,
    pub category: SkillCategory,
}

/// Proficiency on the 1–5 scale derived from level words found near a skill
/// mention. Construction outside the range fails fast; the separate clamp of
/// `level/5` inside the scoring formula is a scoring decision, not validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ProficiencyLevel(u8);

impl ProficiencyLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub const BEGINNER: Self = Self(1);
    pub const INTERMEDIATE: Self = Self(2);
    pub const ADVANCED: Self = Self(3);
    pub const EXPERT: Self = Self(4);
    pub const SPECIALIST: Self = Self(5);

    pub fn new(level: u8) -> Result<Self, EngineError> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(EngineError::Configuration(format!(
                "proficiency level {level} outside [{}, {}]",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for ProficiencyLevel {
    fn default() -> Self {
        Self::INTERMEDIATE
    }
}

impl TryFrom<u8> for ProficiencyLevel {
    type Error = EngineError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<ProficiencyLevel> for u8 {
    fn from(level: ProficiencyLevel) -> Self {
        level.0
    }
}

/// How mandatory a tender skill requirement is. The weights are fixed and
/// monotonically ordered: required > preferred > nice_to_have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Required,
    Preferred,
    NiceToHave,
}

impl Importance {
    pub fn weight(self) -> f64 {
        match self {
            Importance::Required => 1.0,
            Importance::Preferred => 0.7,
            Importance::NiceToHave => 0.3,
        }
    }
}

/// A skill mention resolved by the normalizer and attached to a consultant
/// profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMention {
    pub skill: Skill,
    pub level: ProficiencyLevel,
    pub years_experience: Option<u32>,
}
