use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::skill::{Importance, ProficiencyLevel};

/// One skill asked for by a tender, with its importance tier and optional
/// target level/years used by the coverage matcher's detail records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenderSkillRequirement {
    pub name: String,
    pub importance: Importance,
    pub target_level: Option<ProficiencyLevel>,
    pub target_years: Option<u32>,
}

/// A staffing requisition published by an agency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenderRequisition {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub skill_requirements: Vec<TenderSkillRequirement>,
    pub location: Option<String>,
    pub remote_allowed: bool,
    pub start_date: Option<NaiveDate>,
    /// Free-form keywords used for experience relevance ranking in portfolios.
    #[serde(default)]
    pub keywords: Vec<String>,
}
