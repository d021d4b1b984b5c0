// src/db/request_repo.rs

use sqlx::{Executor, PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    models::request::{MedicationRequest, NewRequest, RequestPatch, RequestSummary},
};

// Colunas da solicitação completa; o CPF vem de CHAR(11), por isso o trim.
const REQUEST_COLUMNS: &str =
    "id, trim(user_cpf) AS user_cpf, medication_id, comment, quantity, status, created_at";

const SUMMARY_SELECT: &str = r#"
    SELECT
        r.id,
        u.name AS requester_name,
        trim(r.user_cpf) AS user_cpf,
        m.name AS medication_name,
        r.quantity,
        to_char(r.created_at, 'DD/MM/YYYY') AS created_on,
        r.status
    FROM medication_requests r
    JOIN users u ON r.user_cpf = u.cpf
    JOIN medications m ON r.medication_id = m.id
"#;

// Mais recentes primeiro; o id desempata criações no mesmo instante.
const SUMMARY_ORDER: &str = " ORDER BY r.created_at DESC, r.id DESC";

#[derive(Clone)]
pub struct RequestRepository {
    pool: PgPool,
}

impl RequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leitura
    // ---

    pub async fn list_summaries(&self) -> Result<Vec<RequestSummary>, AppError> {
        let sql = format!("{SUMMARY_SELECT}{SUMMARY_ORDER}");
        let rows = sqlx::query_as::<_, RequestSummary>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn list_summaries_by_cpf(&self, cpf: &str) -> Result<Vec<RequestSummary>, AppError> {
        let sql = format!("{SUMMARY_SELECT} WHERE r.user_cpf = $1{SUMMARY_ORDER}");
        let rows = sqlx::query_as::<_, RequestSummary>(&sql)
            .bind(cpf)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<MedicationRequest>, AppError> {
        let sql = format!("SELECT {REQUEST_COLUMNS} FROM medication_requests WHERE id = $1");
        let row = sqlx::query_as::<_, MedicationRequest>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn count_by_medication<'e, E>(
        &self,
        executor: E,
        medication_id: i32,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM medication_requests WHERE medication_id = $1",
        )
        .bind(medication_id)
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    // ---
    // Escrita
    // ---

    /// Grava no status inicial. Devolve o id gerado (o protocolo), se houver.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        new: &NewRequest,
        initial_status: &str,
    ) -> Result<Option<i32>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO medication_requests (user_cpf, medication_id, comment, quantity, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&new.user_cpf)
        .bind(new.medication_id)
        .bind(new.comment.as_deref())
        .bind(new.quantity)
        .bind(initial_status)
        .fetch_optional(executor)
        .await?;
        Ok(id)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: i32,
        status: &str,
    ) -> Result<Option<MedicationRequest>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "UPDATE medication_requests SET status = $2 WHERE id = $1 RETURNING {REQUEST_COLUMNS}"
        );
        let row = sqlx::query_as::<_, MedicationRequest>(&sql)
            .bind(id)
            .bind(status)
            .fetch_optional(executor)
            .await?;
        Ok(row)
    }

    /// Um único UPDATE só com os campos presentes no patch.
    /// Valores sempre vão como parâmetro; o texto do SQL só tem nomes de coluna fixos.
    pub async fn apply_patch<'e, E>(
        &self,
        executor: E,
        id: i32,
        patch: &RequestPatch,
    ) -> Result<Option<MedicationRequest>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if patch.is_empty() {
            return Err(AppError::Validation(
                "Nenhum campo para atualizar foi fornecido.".into(),
            ));
        }

        let mut builder = build_patch_query(id, patch);
        let row = builder
            .build_query_as::<MedicationRequest>()
            .fetch_optional(executor)
            .await?;
        Ok(row)
    }
}

fn build_patch_query(id: i32, patch: &RequestPatch) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new("UPDATE medication_requests SET ");

    let mut assignments = builder.separated(", ");
    if let Some(status) = &patch.status {
        assignments.push("status = ");
        assignments.push_bind_unseparated(status.clone());
    }
    if let Some(quantity) = patch.quantity {
        assignments.push("quantity = ");
        assignments.push_bind_unseparated(quantity);
    }
    if let Some(comment) = &patch.comment {
        assignments.push("comment = ");
        assignments.push_bind_unseparated(comment.clone());
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING ");
    builder.push(REQUEST_COLUMNS);
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_sql_only_touches_supplied_fields() {
        let patch = RequestPatch {
            status: Some("APROVADO".into()),
            quantity: None,
            comment: Some(None),
        };
        let builder = build_patch_query(9, &patch);
        assert_eq!(
            builder.sql(),
            format!(
                "UPDATE medication_requests SET status = $1, comment = $2 WHERE id = $3 RETURNING {REQUEST_COLUMNS}"
            )
        );
    }

    #[test]
    fn patch_sql_never_inlines_values() {
        let patch = RequestPatch {
            status: Some("'; DROP TABLE users; --".into()),
            quantity: Some(2),
            comment: Some(Some("x".into())),
        };
        let builder = build_patch_query(1, &patch);
        let sql = builder.sql();
        assert!(!sql.contains("DROP"));
        assert!(sql.contains("status = $1, quantity = $2, comment = $3 WHERE id = $4"));
    }
}
