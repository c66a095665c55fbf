//! Narrow persistence contracts consumed by the matching engine. The real
//! implementations live in the API/persistence layer; the in-memory variants
//! here back tests and embedded use.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::EngineError;
use crate::models::{ConsultantProfile, TenderRequisition};

#[async_trait]
pub trait ConsultantRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<ConsultantProfile>, EngineError>;
    async fn get_all(&self) -> Result<Vec<ConsultantProfile>, EngineError>;
    async fn get_by_company(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<ConsultantProfile>, EngineError>;
}

#[async_trait]
pub trait TenderRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<TenderRequisition>, EngineError>;
    async fn get_all(&self) -> Result<Vec<TenderRequisition>, EngineError>;
    async fn get_by_company(&self, company_id: Uuid)
        -> Result<Vec<TenderRequisition>, EngineError>;
}

#[derive(Debug, Default)]
pub struct InMemoryConsultantRepository {
    consultants: Vec<ConsultantProfile>,
}

impl InMemoryConsultantRepository {
    pub fn new(consultants: Vec<ConsultantProfile>) -> Self {
        Self { consultants }
    }
}

#[async_trait]
impl ConsultantRepository for InMemoryConsultantRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<ConsultantProfile>, EngineError> {
        Ok(self.consultants.iter().find(|c| c.id == id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<ConsultantProfile>, EngineError> {
        Ok(self.consultants.clone())
    }

    async fn get_by_company(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<ConsultantProfile>, EngineError> {
        Ok(self
            .consultants
            .iter()
            .filter(|c| c.company_id == company_id)
            .cloned()
            .collect())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryTenderRepository {
    tenders: Vec<TenderRequisition>,
}

impl InMemoryTenderRepository {
    pub fn new(tenders: Vec<TenderRequisition>) -> Self {
        Self { tenders }
    }
}

#[async_trait]
impl TenderRepository for InMemoryTenderRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<TenderRequisition>, EngineError> {
        Ok(self.tenders.iter().find(|t| t.id == id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<TenderRequisition>, EngineError> {
        Ok(self.tenders.clone())
    }

    async fn get_by_company(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<TenderRequisition>, EngineError> {
        Ok(self
            .tenders
            .iter()
            .filter(|t| t.company_id == company_id)
            .cloned()
            .collect())
    }
}
