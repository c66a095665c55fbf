//! Wires the four fallback chains: CV extraction, skill analysis, matching,
//! and portfolio generation. Every chain is an explicit ordered tier list —
//! [workflow backend, internal heuristic, static stub] — and the coordinator
//! stamps each result with the tier that produced it.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

use super::chain::{FallbackChain, Strategy};
use super::{stubs, Provenance, Tagged};
use crate::config::WorkflowIds;
use crate::document::DocumentTextExtractor;
use crate::errors::EngineError;
use crate::extraction::{normalizer, parse_cv_text};
use crate::matching::{score_cv_against_tender, CvTenderMatch};
use crate::models::{
    ConsultantProfile, ExtractedCvDocument, SkillMention, TenderRequisition,
    TenderSkillRequirement,
};
use crate::portfolio::{build_portfolio, Portfolio};
use crate::rag::{enrich_with_rag, RagService};
use crate::taxonomy::SkillTaxonomy;
use crate::workflow::WorkflowClient;

/// A CV document as uploaded: raw bytes plus the original filename.
#[derive(Debug, Clone)]
pub struct CvDocumentInput {
    pub content: Vec<u8>,
    pub filename: String,
}

/// Input of the matching operation.
#[derive(Debug, Clone)]
pub struct MatchingInput {
    pub cv_skills: Vec<SkillMention>,
    pub requirements: Vec<TenderSkillRequirement>,
}

/// Input of the portfolio operation.
#[derive(Debug, Clone)]
pub struct PortfolioInput {
    pub consultant: ConsultantProfile,
    pub cv: Option<ExtractedCvDocument>,
    pub tender: TenderRequisition,
}

fn workflow_metadata() -> Value {
    json!({
        "source": "TalentMatch",
        "timestamp": Utc::now().to_rfc3339(),
        "version": "1.0",
    })
}

fn require_workflow_id(id: &Option<String>, operation: &str) -> Result<String, EngineError> {
    id.clone().ok_or_else(|| {
        EngineError::BackendUnavailable(format!("no workflow configured for {operation}"))
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Workflow tiers
// ────────────────────────────────────────────────────────────────────────────

struct WorkflowExtraction {
    client: Arc<WorkflowClient>,
    pdf_workflow: Option<String>,
    docx_workflow: Option<String>,
}

#[async_trait]
impl Strategy<CvDocumentInput, ExtractedCvDocument> for WorkflowExtraction {
    fn provenance(&self) -> Provenance {
        Provenance::Workflow
    }

    async fn run(&self, input: &CvDocumentInput) -> Result<ExtractedCvDocument, EngineError> {
        let name = input.filename.to_lowercase();
        let (workflow_id, file_type, suffix) = if name.ends_with(".pdf") {
            (require_workflow_id(&self.pdf_workflow, "pdf analysis")?, "pdf", ".pdf")
        } else if name.ends_with(".docx") {
            (require_workflow_id(&self.docx_workflow, "docx analysis")?, "docx", ".docx")
        } else {
            return Err(EngineError::Unsupported(format!(
                "no workflow for '{}'",
                input.filename
            )));
        };

        // The workflow backend reads the document from a shared temp path;
        // the file must outlive the call.
        let mut temp = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .map_err(|e| EngineError::Internal(e.into()))?;
        temp.write_all(&input.content)
            .map_err(|e| EngineError::Internal(e.into()))?;

        let payload = json!({
            "file_path": temp.path(),
            "file_type": file_type,
            "metadata": workflow_metadata(),
        });
        let result = self.client.execute(&workflow_id, &payload).await?;
        Ok(serde_json::from_value(result)?)
    }
}

struct WorkflowSkillAnalysis {
    client: Arc<WorkflowClient>,
    workflow: Option<String>,
}

#[async_trait]
impl Strategy<String, Vec<SkillMention>> for WorkflowSkillAnalysis {
    fn provenance(&self) -> Provenance {
        Provenance::Workflow
    }

    async fn run(&self, input: &String) -> Result<Vec<SkillMention>, EngineError> {
        let workflow_id = require_workflow_id(&self.workflow, "skill extraction")?;
        let payload = json!({
            "cv_text": input,
            "metadata": workflow_metadata(),
        });
        let result = self.client.execute(&workflow_id, &payload).await?;

        // Accept both a bare array and an object with a `skills` field.
        let skills = match result.get("skills") {
            Some(skills) => skills.clone(),
            None => result,
        };
        Ok(serde_json::from_value(skills)?)
    }
}

struct WorkflowMatching {
    client: Arc<WorkflowClient>,
    workflow: Option<String>,
}

#[async_trait]
impl Strategy<MatchingInput, CvTenderMatch> for WorkflowMatching {
    fn provenance(&self) -> Provenance {
        Provenance::Workflow
    }

    async fn run(&self, input: &MatchingInput) -> Result<CvTenderMatch, EngineError> {
        let workflow_id = require_workflow_id(&self.workflow, "matching")?;
        let payload = json!({
            "cv_data": { "skills": input.cv_skills },
            "tender_data": { "skills": input.requirements },
            "metadata": workflow_metadata(),
        });
        let result = self.client.execute(&workflow_id, &payload).await?;
        Ok(serde_json::from_value(result)?)
    }
}

struct WorkflowPortfolio {
    client: Arc<WorkflowClient>,
    workflow: Option<String>,
}

#[async_trait]
impl Strategy<PortfolioInput, Portfolio> for WorkflowPortfolio {
    fn provenance(&self) -> Provenance {
        Provenance::Workflow
    }

    async fn run(&self, input: &PortfolioInput) -> Result<Portfolio, EngineError> {
        let workflow_id = require_workflow_id(&self.workflow, "portfolio generation")?;
        let payload = json!({
            "consultant_data": input.consultant,
            "tender_data": input.tender,
            "metadata": workflow_metadata(),
        });
        let result = self.client.execute(&workflow_id, &payload).await?;
        Ok(serde_json::from_value(result)?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Heuristic tiers
// ────────────────────────────────────────────────────────────────────────────

struct HeuristicExtraction {
    extractor: Arc<dyn DocumentTextExtractor>,
    taxonomy: Arc<SkillTaxonomy>,
    rag: Option<Arc<dyn RagService>>,
}

#[async_trait]
impl Strategy<CvDocumentInput, ExtractedCvDocument> for HeuristicExtraction {
    fn provenance(&self) -> Provenance {
        Provenance::Heuristic
    }

    async fn run(&self, input: &CvDocumentInput) -> Result<ExtractedCvDocument, EngineError> {
        let text = self.extractor.extract_text(&input.content, &input.filename)?;
        let mut doc = parse_cv_text(&text, &self.taxonomy);
        if let Some(rag) = &self.rag {
            enrich_with_rag(&mut doc, &text, rag.as_ref(), &self.taxonomy).await;
        }
        Ok(doc)
    }
}

struct HeuristicSkillAnalysis {
    taxonomy: Arc<SkillTaxonomy>,
}

#[async_trait]
impl Strategy<String, Vec<SkillMention>> for HeuristicSkillAnalysis {
    fn provenance(&self) -> Provenance {
        Provenance::Heuristic
    }

    async fn run(&self, input: &String) -> Result<Vec<SkillMention>, EngineError> {
        Ok(normalizer::scan_skills(input, &self.taxonomy))
    }
}

struct HeuristicMatching;

#[async_trait]
impl Strategy<MatchingInput, CvTenderMatch> for HeuristicMatching {
    fn provenance(&self) -> Provenance {
        Provenance::Heuristic
    }

    async fn run(&self, input: &MatchingInput) -> Result<CvTenderMatch, EngineError> {
        Ok(score_cv_against_tender(&input.cv_skills, &input.requirements))
    }
}

struct HeuristicPortfolio;

#[async_trait]
impl Strategy<PortfolioInput, Portfolio> for HeuristicPortfolio {
    fn provenance(&self) -> Provenance {
        Provenance::Heuristic
    }

    async fn run(&self, input: &PortfolioInput) -> Result<Portfolio, EngineError> {
        Ok(build_portfolio(
            &input.consultant,
            input.cv.as_ref(),
            &input.tender,
        ))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static tiers (never fail)
// ────────────────────────────────────────────────────────────────────────────

struct StaticExtraction;

#[async_trait]
impl Strategy<CvDocumentInput, ExtractedCvDocument> for StaticExtraction {
    fn provenance(&self) -> Provenance {
        Provenance::FallbackStatic
    }

    async fn run(&self, _input: &CvDocumentInput) -> Result<ExtractedCvDocument, EngineError> {
        Ok(stubs::static_cv_document())
    }
}

struct StaticSkillAnalysis;

#[async_trait]
impl Strategy<String, Vec<SkillMention>> for StaticSkillAnalysis {
    fn provenance(&self) -> Provenance {
        Provenance::FallbackStatic
    }

    async fn run(&self, _input: &String) -> Result<Vec<SkillMention>, EngineError> {
        Ok(stubs::static_skill_mentions())
    }
}

struct StaticMatching;

#[async_trait]
impl Strategy<MatchingInput, CvTenderMatch> for StaticMatching {
    fn provenance(&self) -> Provenance {
        Provenance::FallbackStatic
    }

    async fn run(&self, input: &MatchingInput) -> Result<CvTenderMatch, EngineError> {
        Ok(CvTenderMatch::zero(
            &input.requirements,
            Provenance::FallbackStatic,
        ))
    }
}

struct StaticPortfolio;

#[async_trait]
impl Strategy<PortfolioInput, Portfolio> for StaticPortfolio {
    fn provenance(&self) -> Provenance {
        Provenance::FallbackStatic
    }

    async fn run(&self, input: &PortfolioInput) -> Result<Portfolio, EngineError> {
        Ok(stubs::static_portfolio(&input.consultant, &input.tender))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Coordinator
// ────────────────────────────────────────────────────────────────────────────

/// Coordinates the four analysis operations across their fallback chains.
pub struct AnalysisCoordinator {
    extraction: FallbackChain<CvDocumentInput, ExtractedCvDocument>,
    skills: FallbackChain<String, Vec<SkillMention>>,
    matching: FallbackChain<MatchingInput, CvTenderMatch>,
    portfolio: FallbackChain<PortfolioInput, Portfolio>,
}

impl AnalysisCoordinator {
    pub fn new(
        taxonomy: Arc<SkillTaxonomy>,
        extractor: Arc<dyn DocumentTextExtractor>,
        workflow: Option<(Arc<WorkflowClient>, WorkflowIds)>,
        rag: Option<Arc<dyn RagService>>,
        tier_timeout: Duration,
    ) -> Self {
        let mut extraction = FallbackChain::new("cv_extraction", tier_timeout);
        let mut skills = FallbackChain::new("skill_analysis", tier_timeout);
        let mut matching = FallbackChain::new("matching", tier_timeout);
        let mut portfolio = FallbackChain::new("portfolio_generation", tier_timeout);

        if let Some((client, ids)) = workflow {
            extraction = extraction.with_tier(Box::new(WorkflowExtraction {
                client: Arc::clone(&client),
                pdf_workflow: ids.pdf_analysis.clone(),
                docx_workflow: ids.docx_analysis.clone(),
            }));
            skills = skills.with_tier(Box::new(WorkflowSkillAnalysis {
                client: Arc::clone(&client),
                workflow: ids.skill_extraction.clone(),
            }));
            matching = matching.with_tier(Box::new(WorkflowMatching {
                client: Arc::clone(&client),
                workflow: ids.matching.clone(),
            }));
            portfolio = portfolio.with_tier(Box::new(WorkflowPortfolio {
                client,
                workflow: ids.portfolio_generation,
            }));
        }

        Self {
            extraction: extraction
                .with_tier(Box::new(HeuristicExtraction {
                    extractor,
                    taxonomy: Arc::clone(&taxonomy),
                    rag,
                }))
                .with_tier(Box::new(StaticExtraction)),
            skills: skills
                .with_tier(Box::new(HeuristicSkillAnalysis { taxonomy }))
                .with_tier(Box::new(StaticSkillAnalysis)),
            matching: matching
                .with_tier(Box::new(HeuristicMatching))
                .with_tier(Box::new(StaticMatching)),
            portfolio: portfolio
                .with_tier(Box::new(HeuristicPortfolio))
                .with_tier(Box::new(StaticPortfolio)),
        }
    }

    /// Extracts structured data from an uploaded CV document.
    pub async fn extract_cv(
        &self,
        input: &CvDocumentInput,
    ) -> Result<ExtractedCvDocument, EngineError> {
        let tagged = self.extraction.execute(input).await?;
        let mut doc = tagged.value;
        doc.extraction_method = tagged.provenance;
        Ok(doc)
    }

    /// Resolves the skill mentions of an already-extracted CV text.
    pub async fn analyze_skills(
        &self,
        cv_text: &str,
    ) -> Result<Tagged<Vec<SkillMention>>, EngineError> {
        self.skills.execute(&cv_text.to_string()).await
    }

    /// Matches CV skills against tender requirements.
    pub async fn match_cv(&self, input: &MatchingInput) -> Result<CvTenderMatch, EngineError> {
        let tagged = self.matching.execute(input).await?;
        let mut report = tagged.value;
        report.matching_method = tagged.provenance;
        Ok(report)
    }

    /// Generates a portfolio for a consultant against a tender.
    pub async fn generate_portfolio(
        &self,
        input: &PortfolioInput,
    ) -> Result<Portfolio, EngineError> {
        let tagged = self.portfolio.execute(input).await?;
        let mut portfolio = tagged.value;
        portfolio.generation_method = tagged.provenance;
        Ok(portfolio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::StandardDocumentExtractor;
    use crate::matching::Recommendation;
    use crate::models::{AvailabilityStatus, Importance, ProficiencyLevel, Skill, SkillCategory};
    use uuid::Uuid;

    const SAMPLE_CV: &str = "\
JOHN DOE
Développeur Full Stack
Paris, France | +33123456789 | john.doe@example.com

COMPÉTENCES
• Langages: JavaScript (5 ans), Python (3 ans)
• Frontend: React (4 ans)
";

    fn coordinator(workflow: Option<(Arc<WorkflowClient>, WorkflowIds)>) -> AnalysisCoordinator {
        AnalysisCoordinator::new(
            SkillTaxonomy::shared(),
            Arc::new(StandardDocumentExtractor),
            workflow,
            None,
            Duration::from_millis(500),
        )
    }

    /// A workflow client pointed at a discard port: every call fails with a
    /// refused connection, without touching the network.
    fn dead_workflow() -> (Arc<WorkflowClient>, WorkflowIds) {
        let client = WorkflowClient::new(
            "http://127.0.0.1:9".to_string(),
            None,
            Duration::from_millis(200),
        )
        .unwrap();
        let ids = WorkflowIds {
            pdf_analysis: Some("wf-pdf".to_string()),
            docx_analysis: Some("wf-docx".to_string()),
            skill_extraction: Some("wf-skills".to_string()),
            matching: Some("wf-match".to_string()),
            portfolio_generation: Some("wf-portfolio".to_string()),
        };
        (Arc::new(client), ids)
    }

    fn mention(name: &str, level: u8) -> SkillMention {
        SkillMention {
            skill: Skill {
                canonical_name: name.to_string(),
                category: SkillCategory::Other,
            },
            level: ProficiencyLevel::new(level).unwrap(),
            years_experience: Some(5),
        }
    }

    fn requirement(name: &str, importance: Importance) -> TenderSkillRequirement {
        TenderSkillRequirement {
            name: name.to_string(),
            importance,
            target_level: None,
            target_years: None,
        }
    }

    fn consultant() -> ConsultantProfile {
        ConsultantProfile {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            title: "Développeuse".to_string(),
            bio: String::new(),
            skills: vec![mention("React", 4)],
            experience_years: Some(6),
            location: None,
            remote_ok: true,
            max_travel_distance_km: None,
            availability_status: AvailabilityStatus::Available,
            availability_date: None,
        }
    }

    fn tender(required: &[&str]) -> TenderRequisition {
        TenderRequisition {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            title: "Mission React".to_string(),
            description: String::new(),
            skill_requirements: required
                .iter()
                .map(|name| requirement(name, Importance::Required))
                .collect(),
            location: None,
            remote_allowed: true,
            start_date: None,
            keywords: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_extraction_without_workflow_uses_heuristic_tier() {
        let coordinator = coordinator(None);
        let doc = coordinator
            .extract_cv(&CvDocumentInput {
                content: SAMPLE_CV.as_bytes().to_vec(),
                filename: "cv.txt".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(doc.extraction_method, Provenance::Heuristic);
        assert!(doc
            .skills
            .iter()
            .any(|m| m.skill.canonical_name == "React"));
        assert_eq!(doc.personal_info.name.as_deref(), Some("JOHN DOE"));
    }

    #[tokio::test]
    async fn test_failing_workflow_backend_falls_back_to_heuristic() {
        let coordinator = coordinator(Some(dead_workflow()));
        let doc = coordinator
            .extract_cv(&CvDocumentInput {
                content: SAMPLE_CV.as_bytes().to_vec(),
                filename: "cv.txt".to_string(),
            })
            .await
            .unwrap();

        // The workflow tier refuses the connection (txt has no workflow
        // anyway); the heuristic tier still produces a tagged result.
        assert_eq!(doc.extraction_method, Provenance::Heuristic);
    }

    #[tokio::test]
    async fn test_unsupported_document_degrades_to_static_stub() {
        let coordinator = coordinator(Some(dead_workflow()));
        let doc = coordinator
            .extract_cv(&CvDocumentInput {
                content: b"PK\x03\x04".to_vec(),
                filename: "cv.docx".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(doc.extraction_method, Provenance::FallbackStatic);
        assert!(!doc.skills.is_empty());
        assert!(doc.personal_info.name.is_some());
    }

    #[tokio::test]
    async fn test_skill_analysis_tagged_heuristic() {
        let coordinator = coordinator(Some(dead_workflow()));
        let tagged = coordinator.analyze_skills(SAMPLE_CV).await.unwrap();

        assert_eq!(tagged.provenance, Provenance::Heuristic);
        assert!(tagged
            .value
            .iter()
            .any(|m| m.skill.canonical_name == "JavaScript"));
    }

    #[tokio::test]
    async fn test_matching_end_to_end_through_fallback() {
        let coordinator = coordinator(Some(dead_workflow()));
        let input = MatchingInput {
            cv_skills: vec![mention("React", 4), mention("JavaScript", 4)],
            requirements: vec![
                requirement("React", Importance::Required),
                requirement("JavaScript", Importance::Required),
                requirement("TypeScript", Importance::Preferred),
            ],
        };

        let report = coordinator.match_cv(&input).await.unwrap();
        assert_eq!(report.matching_method, Provenance::Heuristic);
        assert_eq!(report.score, 80.0);
        assert_eq!(report.recommendation, Recommendation::StrongMatch);
        assert_eq!(report.required_matches.len(), 2);
        assert!(report.required_misses.is_empty());
    }

    #[tokio::test]
    async fn test_portfolio_generation_tagged_heuristic() {
        let coordinator = coordinator(None);
        let input = PortfolioInput {
            consultant: consultant(),
            cv: None,
            tender: tender(&["React"]),
        };

        let portfolio = coordinator.generate_portfolio(&input).await.unwrap();
        assert_eq!(portfolio.generation_method, Provenance::Heuristic);
        assert!(!portfolio.custom_presentation.is_empty());
        assert_eq!(portfolio.relevant_skills.len(), 1);
    }
}
