pub mod consultant;
pub mod cv;
pub mod skill;
pub mod tender;

pub use consultant::{AvailabilityStatus, ConsultantProfile};
pub use cv::{EducationEntry, ExperienceEntry, ExtractedCvDocument, PersonalInfo};
pub use skill::{Importance, ProficiencyLevel, Skill, SkillCategory, SkillMention};
pub use tender::{TenderRequisition, TenderSkillRequirement};
