// src/services/request_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::RequestRepository,
    models::request::{
        MedicationRequest, NewRequest, RequestPatch, RequestSummary, ReviewDecision,
        STATUS_EM_ANALISE,
    },
};

#[derive(Clone)]
pub struct RequestService {
    request_repo: RequestRepository,
    pool: PgPool,
}

impl RequestService {
    pub fn new(request_repo: RequestRepository, pool: PgPool) -> Self {
        Self { request_repo, pool }
    }

    /// Abre a solicitação em "EM ANALISE" e devolve o protocolo.
    pub async fn create(&self, new: &NewRequest) -> Result<i32, AppError> {
        let mut tx = self.pool.begin().await?;

        let protocolo = self
            .request_repo
            .create(&mut *tx, new, STATUS_EM_ANALISE)
            .await?
            .ok_or_else(|| AppError::Internal("Erro ao gravar solicitação.".into()))?;

        tx.commit().await?;

        tracing::info!(protocolo, medication_id = new.medication_id, "📨 Solicitação registrada");
        Ok(protocolo)
    }

    pub async fn list(&self, cpf: Option<&str>) -> Result<Vec<RequestSummary>, AppError> {
        match cpf.map(str::trim).filter(|c| !c.is_empty()) {
            Some(cpf) => self.request_repo.list_summaries_by_cpf(cpf).await,
            None => self.request_repo.list_summaries().await,
        }
    }

    pub async fn get(&self, id: i32) -> Result<MedicationRequest, AppError> {
        self.request_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::RequestNotFound)
    }

    pub async fn review(
        &self,
        id: i32,
        decision: ReviewDecision,
    ) -> Result<MedicationRequest, AppError> {
        let updated = self.set_status(id, decision.as_str()).await?;
        tracing::info!(id, status = decision.as_str(), "Solicitação avaliada");
        Ok(updated)
    }

    /// `status` já normalizado (maiúsculas, não vazio).
    pub async fn set_status(&self, id: i32, status: &str) -> Result<MedicationRequest, AppError> {
        let mut tx = self.pool.begin().await?;
        let updated = self
            .request_repo
            .update_status(&mut *tx, id, status)
            .await?
            .ok_or(AppError::RequestNotFound)?;
        tx.commit().await?;
        Ok(updated)
    }

    pub async fn update(&self, id: i32, patch: &RequestPatch) -> Result<MedicationRequest, AppError> {
        let mut tx = self.pool.begin().await?;
        let updated = self
            .request_repo
            .apply_patch(&mut *tx, id, patch)
            .await?
            .ok_or(AppError::RequestNotFound)?;
        tx.commit().await?;

        tracing::info!(id, "Solicitação atualizada");
        Ok(updated)
    }
}
