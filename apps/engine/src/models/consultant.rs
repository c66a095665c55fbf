use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::skill::SkillMention;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    Available,
    PartiallyAvailable,
    Unavailable,
    OnMission,
}

/// A candidate/contractor profile with skills, experience, and availability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultantProfile {
    pub id: Uuid,
    pub company_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    #[serde(default)]
    pub bio: String,
    pub skills: Vec<SkillMention>,
    pub experience_years: Option<u32>,
    pub location: Option<String>,
    pub remote_ok: bool,
    pub max_travel_distance_km: Option<u32>,
    pub availability_status: AvailabilityStatus,
    pub availability_date: Option<NaiveDate>,
}

impl ConsultantProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Finds a skill mention by canonical name, case-insensitively.
    pub fn skill(&self, name: &str) -> Option<&SkillMention> {
        let wanted = name.to_lowercase();
        self.skills
            .iter()
            .find(|m| m.skill.canonical_name.to_lowercase() == wanted)
    }
}
