//! Vector/RAG store contract and its HTTP client, plus the optional skill
//! enrichment the heuristic extraction tier can layer on top of a parse.
//! Enrichment is best-effort: failures are logged and ignored, never fatal.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::EngineError;
use crate::models::{ExtractedCvDocument, Skill, SkillCategory, SkillMention};
use crate::taxonomy::SkillTaxonomy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedDocument {
    pub content: String,
    pub score: f64,
    #[serde(default)]
    pub metadata: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedAnswer {
    pub generated_text: String,
    #[serde(default)]
    pub source_docs: Vec<RankedDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f64,
    pub top_k: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            top_k: 3,
        }
    }
}

#[async_trait]
pub trait RagService: Send + Sync {
    async fn query(
        &self,
        text: &str,
        filters: &Value,
        top_k: u32,
    ) -> Result<Vec<RankedDocument>, EngineError>;

    async fn generate(
        &self,
        text: &str,
        filters: &Value,
        params: &GenerationParams,
    ) -> Result<GeneratedAnswer, EngineError>;
}

pub struct HttpRagClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRagClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl RagService for HttpRagClient {
    async fn query(
        &self,
        text: &str,
        filters: &Value,
        top_k: u32,
    ) -> Result<Vec<RankedDocument>, EngineError> {
        let response = self
            .client
            .post(self.endpoint("query"))
            .json(&serde_json::json!({ "text": text, "filters": filters, "top_k": top_k }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EngineError::BackendUnavailable(format!(
                "rag query returned status {}",
                response.status()
            )));
        }
        Ok(response.json().await?)
    }

    async fn generate(
        &self,
        text: &str,
        filters: &Value,
        params: &GenerationParams,
    ) -> Result<GeneratedAnswer, EngineError> {
        let response = self
            .client
            .post(self.endpoint("generate"))
            .json(&serde_json::json!({ "text": text, "filters": filters, "params": params }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EngineError::BackendUnavailable(format!(
                "rag generate returned status {}",
                response.status()
            )));
        }
        Ok(response.json().await?)
    }
}

/// Shape the RAG backend is asked to produce for skill suggestions.
#[derive(Debug, Deserialize)]
struct SuggestedSkill {
    name: String,
    #[serde(default)]
    years_experience: Option<u32>,
}

const ENRICHMENT_INSTRUCTION: &str =
    "Lister en JSON les compétences additionnelles présentes dans ce CV: \
     [{\"name\": \"...\", \"years_experience\": 0}]";

/// Asks the RAG backend for additional skills and merges the non-duplicates
/// into the document. Any failure leaves the document unchanged.
pub async fn enrich_with_rag(
    doc: &mut ExtractedCvDocument,
    raw_text: &str,
    rag: &dyn RagService,
    taxonomy: &SkillTaxonomy,
) {
    let filters = serde_json::json!({ "document_type": "cv_template" });
    let prompt = format!("{ENRICHMENT_INSTRUCTION}\n\n{raw_text}");

    let answer = match rag
        .generate(&prompt, &filters, &GenerationParams::default())
        .await
    {
        Ok(answer) => answer,
        Err(err) => {
            warn!(error = %err, "rag enrichment unavailable, keeping heuristic parse");
            return;
        }
    };

    let suggested: Vec<SuggestedSkill> = match serde_json::from_str(&answer.generated_text) {
        Ok(suggested) => suggested,
        Err(err) => {
            warn!(error = %err, "rag enrichment returned unparseable skills");
            return;
        }
    };

    let added = merge_additional_skills(&mut doc.skills, suggested, taxonomy);
    if added > 0 {
        debug!(added, "merged rag-suggested skills");
    }
}

/// Merges suggestions not already mentioned (by name, case-insensitive).
/// Names known to the taxonomy keep their canonical form and category;
/// unknown names land in the `other` category. Returns the number added.
fn merge_additional_skills(
    skills: &mut Vec<SkillMention>,
    suggested: Vec<SuggestedSkill>,
    taxonomy: &SkillTaxonomy,
) -> usize {
    let mut added = 0;
    for suggestion in suggested {
        let lower = suggestion.name.to_lowercase();
        let already_known = skills
            .iter()
            .any(|m| m.skill.canonical_name.to_lowercase() == lower);
        if already_known || lower.is_empty() {
            continue;
        }

        let skill = taxonomy.lookup(&lower).cloned().unwrap_or(Skill {
            canonical_name: suggestion.name,
            category: SkillCategory::Other,
        });
        skills.push(SkillMention {
            skill,
            level: Default::default(),
            years_experience: suggestion.years_experience,
        });
        added += 1;
    }
    added
}
