// src/db/medication_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::medication::{Medication, MedicationOption},
};

#[derive(Clone)]
pub struct MedicationRepository {
    pool: PgPool,
}

impl MedicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leitura (pool principal)
    // ---

    /// Só ativos, por nome: o que o cidadão pode pedir.
    pub async fn list_active(&self) -> Result<Vec<MedicationOption>, AppError> {
        let medications = sqlx::query_as::<_, MedicationOption>(
            r#"
            SELECT id, name, dosage
            FROM medications
            WHERE active = TRUE
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(medications)
    }

    /// Ativos e inativos, pelo código.
    pub async fn list_all(&self) -> Result<Vec<Medication>, AppError> {
        let medications = sqlx::query_as::<_, Medication>(
            "SELECT id, name, dosage, active FROM medications ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(medications)
    }

    // ---
    // Escrita (dentro da transação do serviço)
    // ---

    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        dosage: Option<&str>,
    ) -> Result<Medication, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let medication = sqlx::query_as::<_, Medication>(
            r#"
            INSERT INTO medications (name, dosage, active)
            VALUES ($1, $2, TRUE)
            RETURNING id, name, dosage, active
            "#,
        )
        .bind(name)
        .bind(dosage)
        .fetch_one(executor)
        .await?;
        Ok(medication)
    }

    /// `None` quando o id não existe.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i32,
        name: &str,
        dosage: Option<&str>,
    ) -> Result<Option<Medication>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let medication = sqlx::query_as::<_, Medication>(
            r#"
            UPDATE medications
            SET name = $2,
                dosage = COALESCE($3, dosage)
            WHERE id = $1
            RETURNING id, name, dosage, active
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(dosage)
        .fetch_optional(executor)
        .await?;
        Ok(medication)
    }

    /// Trava a linha até o fim da transação. Novas solicitações para este
    /// medicamento esperam (a FK pede KEY SHARE na mesma linha).
    pub async fn lock<'e, E>(&self, executor: E, id: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let found = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM medications WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(found.is_some())
    }

    pub async fn deactivate<'e, E>(&self, executor: E, id: i32) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE medications SET active = FALSE WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM medications WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
