// src/handlers/medications.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::{
    common::{
        envelope::Sucesso,
        error::AppError,
        extract::{JsonBody, PathParam, QueryParams},
    },
    config::AppState,
    models::medication::{
        CreateMedicationPayload, MedicationListQuery, MedicationOption, UpdateMedicationPayload,
    },
};

// GET /api/medicamentos[?todos=true]
#[utoipa::path(
    get,
    path = "/api/medicamentos",
    tag = "Medicamentos",
    params(MedicationListQuery),
    responses(
        (status = 200, description = "Ativos por nome. Com todos=true devolve todos por código, no formato de Medication", body = Vec<MedicationOption>)
    )
)]
pub async fn list_medications(
    State(app_state): State<AppState>,
    WithRejection(Query(query), _): QueryParams<MedicationListQuery>,
) -> Result<Response, AppError> {
    if query.todos.unwrap_or(false) {
        let medications = app_state.medication_service.list_all().await?;
        return Ok((StatusCode::OK, Json(medications)).into_response());
    }

    let medications = app_state.medication_service.list_active().await?;
    Ok((StatusCode::OK, Json(medications)).into_response())
}

// POST /api/medicamentos
#[utoipa::path(
    post,
    path = "/api/medicamentos",
    tag = "Medicamentos",
    request_body = CreateMedicationPayload,
    responses(
        (status = 201, description = "Medicamento cadastrado (envelope SUCESSO com item)"),
        (status = 400, description = "Nome ausente ou vazio")
    )
)]
pub async fn create_medication(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): JsonBody<CreateMedicationPayload>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload.normalized();
    payload.validate()?;

    let medication = app_state
        .medication_service
        .create(
            payload.nome.as_deref().unwrap_or_default(),
            payload.dosagem.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Sucesso::com_item("Medicamento cadastrado!", medication)),
    ))
}

// PUT /api/medicamentos
#[utoipa::path(
    put,
    path = "/api/medicamentos",
    tag = "Medicamentos",
    request_body = UpdateMedicationPayload,
    responses(
        (status = 200, description = "Medicamento atualizado (envelope SUCESSO com item)"),
        (status = 400, description = "id ou nome ausentes"),
        (status = 404, description = "Medicamento não encontrado")
    )
)]
pub async fn update_medication(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): JsonBody<UpdateMedicationPayload>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload.normalized();
    payload.validate()?;
    let id = payload.medication_id()?;

    let medication = app_state
        .medication_service
        .update(
            id,
            payload.nome.as_deref().unwrap_or_default(),
            payload.dosagem.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(Sucesso::com_item("Medicamento atualizado!", medication)),
    ))
}

// DELETE /api/medicamentos/{id}
#[utoipa::path(
    delete,
    path = "/api/medicamentos/{id}",
    tag = "Medicamentos",
    params(("id" = i32, Path, description = "Código do medicamento")),
    responses(
        (status = 200, description = "Excluído, ou inativado se já possui solicitações"),
        (status = 404, description = "Medicamento não encontrado")
    )
)]
pub async fn delete_medication(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): PathParam<i32>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = app_state.medication_service.delete(id).await?;
    Ok((StatusCode::OK, Json(Sucesso::mensagem(outcome.message()))))
}
