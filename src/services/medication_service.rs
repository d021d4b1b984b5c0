// src/services/medication_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{MedicationRepository, RequestRepository},
    models::medication::{DeleteOutcome, Medication, MedicationOption},
};

#[derive(Clone)]
pub struct MedicationService {
    medication_repo: MedicationRepository,
    request_repo: RequestRepository,
    pool: PgPool,
}

impl MedicationService {
    pub fn new(
        medication_repo: MedicationRepository,
        request_repo: RequestRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            medication_repo,
            request_repo,
            pool,
        }
    }

    pub async fn list_active(&self) -> Result<Vec<MedicationOption>, AppError> {
        self.medication_repo.list_active().await
    }

    pub async fn list_all(&self) -> Result<Vec<Medication>, AppError> {
        self.medication_repo.list_all().await
    }

    pub async fn create(&self, name: &str, dosage: Option<&str>) -> Result<Medication, AppError> {
        let mut tx = self.pool.begin().await?;
        let medication = self.medication_repo.create(&mut *tx, name, dosage).await?;
        tx.commit().await?;

        tracing::info!(id = medication.id, "💊 Medicamento cadastrado");
        Ok(medication)
    }

    pub async fn update(
        &self,
        id: i32,
        name: &str,
        dosage: Option<&str>,
    ) -> Result<Medication, AppError> {
        let mut tx = self.pool.begin().await?;
        let medication = self
            .medication_repo
            .update(&mut *tx, id, name, dosage)
            .await?
            .ok_or(AppError::MedicationNotFound)?;
        tx.commit().await?;

        tracing::info!(id, "Medicamento atualizado");
        Ok(medication)
    }

    /// Exclui de verdade só se nenhuma solicitação usa o medicamento;
    /// senão apenas inativa. Checagem e escrita na mesma transação.
    pub async fn delete(&self, id: i32) -> Result<DeleteOutcome, AppError> {
        let mut tx = self.pool.begin().await?;

        if !self.medication_repo.lock(&mut *tx, id).await? {
            return Err(AppError::MedicationNotFound);
        }

        let references = self.request_repo.count_by_medication(&mut *tx, id).await?;
        let outcome = if references > 0 {
            self.medication_repo.deactivate(&mut *tx, id).await?;
            DeleteOutcome::Deactivated
        } else {
            self.medication_repo.delete(&mut *tx, id).await?;
            DeleteOutcome::Removed
        };

        tx.commit().await?;

        match outcome {
            DeleteOutcome::Deactivated => {
                tracing::warn!(id, references, "Medicamento em uso: inativado em vez de excluído")
            }
            DeleteOutcome::Removed => tracing::info!(id, "🗑️ Medicamento excluído"),
        }
        Ok(outcome)
    }
}
