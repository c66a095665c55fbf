//! Skill taxonomy — static, immutable mapping from lower-cased keyword to a
//! canonical skill. Constructed once at process start and passed explicitly
//! (by `Arc`) to the parser, normalizer, and engine; no global mutable state.

use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{Skill, SkillCategory};

use SkillCategory::*;

/// Built-in keyword table: (lookup keyword, canonical display name, category).
/// Keywords are matched case-insensitively as substrings of the CV text.
const BUILTIN: &[(&str, &str, SkillCategory)] = &[
    // Programming languages
    ("python", "Python", ProgrammingLanguage),
    ("javascript", "JavaScript", ProgrammingLanguage),
    ("typescript", "TypeScript", ProgrammingLanguage),
    ("java", "Java", ProgrammingLanguage),
    ("c#", "C#", ProgrammingLanguage),
    ("c++", "C++", ProgrammingLanguage),
    ("php", "PHP", ProgrammingLanguage),
    ("ruby", "Ruby", ProgrammingLanguage),
    ("go", "Go", ProgrammingLanguage),
    ("rust", "Rust", ProgrammingLanguage),
    ("swift", "Swift", ProgrammingLanguage),
    ("kotlin", "Kotlin", ProgrammingLanguage),
    // Frontend frameworks
    ("react", "React", FrontendFramework),
    ("angular", "Angular", FrontendFramework),
    ("vue", "Vue", FrontendFramework),
    ("svelte", "Svelte", FrontendFramework),
    ("jquery", "jQuery", FrontendFramework),
    // Backend frameworks
    ("django", "Django", BackendFramework),
    ("flask", "Flask", BackendFramework),
    ("fastapi", "FastAPI", BackendFramework),
    ("express", "Express", BackendFramework),
    ("spring", "Spring", BackendFramework),
    ("laravel", "Laravel", BackendFramework),
    ("ruby on rails", "Ruby on Rails", BackendFramework),
    ("asp.net", "ASP.NET", BackendFramework),
    // Databases
    ("sql", "SQL", Database),
    ("mysql", "MySQL", Database),
    ("postgresql", "PostgreSQL", Database),
    ("mongodb", "MongoDB", Database),
    ("redis", "Redis", Database),
    ("elasticsearch", "Elasticsearch", Database),
    ("sqlite", "SQLite", Database),
    ("oracle", "Oracle", Database),
    ("cassandra", "Cassandra", Database),
    // DevOps
    ("docker", "Docker", Devops),
    ("kubernetes", "Kubernetes", Devops),
    ("jenkins", "Jenkins", Devops),
    ("github actions", "GitHub Actions", Devops),
    ("gitlab ci", "GitLab CI", Devops),
    ("terraform", "Terraform", Devops),
    ("ansible", "Ansible", Devops),
    // Cloud
    ("aws", "AWS", Cloud),
    ("azure", "Azure", Cloud),
    ("gcp", "GCP", Cloud),
    // Design
    ("figma", "Figma", Design),
    ("sketch", "Sketch", Design),
    ("adobe xd", "Adobe XD", Design),
    ("photoshop", "Photoshop", Design),
    ("illustrator", "Illustrator", Design),
    // Soft skills
    ("communication", "Communication", SoftSkill),
    ("leadership", "Leadership", SoftSkill),
    ("teamwork", "Teamwork", SoftSkill),
    ("problem solving", "Problem Solving", SoftSkill),
    ("time management", "Time Management", SoftSkill),
    ("critical thinking", "Critical Thinking", SoftSkill),
    ("project management", "Project Management", SoftSkill),
    // Methodologies
    ("agile", "Agile", Methodology),
    ("scrum", "Scrum", Methodology),
    ("kanban", "Kanban", Methodology),
    // Data science
    ("machine learning", "Machine Learning", DataScience),
    ("deep learning", "Deep Learning", DataScience),
    ("tensorflow", "TensorFlow", DataScience),
    ("pytorch", "PyTorch", DataScience),
    ("pandas", "Pandas", DataScience),
    ("numpy", "NumPy", DataScience),
    ("scikit-learn", "scikit-learn", DataScience),
    ("data analysis", "Data Analysis", DataScience),
    ("statistics", "Statistics", DataScience),
    ("big data", "Big Data", DataScience),
    ("hadoop", "Hadoop", DataScience),
    ("spark", "Spark", DataScience),
    // Mobile
    ("ios", "iOS", Mobile),
    ("android", "Android", Mobile),
    ("react native", "React Native", Mobile),
    ("flutter", "Flutter", Mobile),
    ("xamarin", "Xamarin", Mobile),
    // Testing
    ("testing", "Testing", Testing),
    ("unit testing", "Unit Testing", Testing),
    ("integration testing", "Integration Testing", Testing),
    ("e2e testing", "E2E Testing", Testing),
    ("jest", "Jest", Testing),
    ("pytest", "pytest", Testing),
    ("selenium", "Selenium", Testing),
    ("cypress", "Cypress", Testing),
    ("mocha", "Mocha", Testing),
    ("chai", "Chai", Testing),
];

/// Immutable keyword → skill mapping. Keyword iteration order is sorted so
/// scans over the taxonomy are reproducible.
#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    entries: HashMap<String, Skill>,
    keywords: Vec<String>,
}

impl SkillTaxonomy {
    /// The taxonomy recovered from the production keyword table.
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN.iter().map(|(keyword, canonical, category)| {
            (
                (*keyword).to_string(),
                Skill {
                    canonical_name: (*canonical).to_string(),
                    category: *category,
                },
            )
        }))
    }

    /// Builds a taxonomy from arbitrary entries (alternate taxonomies for
    /// tests, tenant-specific keyword sets). Keys are lower-cased.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Skill)>,
    {
        let entries: HashMap<String, Skill> = entries
            .into_iter()
            .map(|(keyword, skill)| (keyword.to_lowercase(), skill))
            .collect();
        let mut keywords: Vec<String> = entries.keys().cloned().collect();
        keywords.sort();
        Self { entries, keywords }
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::builtin())
    }

    /// Looks up a keyword (case-insensitive).
    pub fn lookup(&self, keyword: &str) -> Option<&Skill> {
        self.entries.get(&keyword.to_lowercase())
    }

    /// All keywords in sorted order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
