use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Validação que não cabe em um atributo do `validator`
    #[error("{0}")]
    Validation(String),

    #[error("JSON inválido: {0}")]
    InvalidJson(#[from] JsonRejection),

    #[error("Parâmetro de rota inválido: {0}")]
    InvalidPath(#[from] PathRejection),

    #[error("Parâmetro de consulta inválido: {0}")]
    InvalidQuery(#[from] QueryRejection),

    #[error("Medicamento não encontrado.")]
    MedicationNotFound,

    #[error("Solicitação não encontrada.")]
    RequestNotFound,

    // Variante para erros de banco de dados
    #[error("{0}")]
    DatabaseError(#[from] sqlx::Error),

    // Invariante violada (ex.: INSERT sem id gerado)
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::Validation(_)
            | AppError::InvalidJson(_)
            | AppError::InvalidPath(_)
            | AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AppError::MedicationNotFound | AppError::RequestNotFound => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Junta as mensagens de cada campo numa lista estável (ordenada por campo).
fn validation_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("Campo '{}' inválido ({}).", field, e.code),
            })
        })
        .collect()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Erro Interno do Servidor: {}", self);
        }

        let body = match &self {
            AppError::ValidationError(errors) => Json(json!({
                "tipo": "ERRO",
                "mensagem": validation_messages(errors),
            })),
            // A mensagem do banco é repassada ao cliente
            other => Json(json!({ "tipo": "ERRO", "mensagem": other.to_string() })),
        };

        (status, body).into_response()
    }
}
