// src/handlers/requests.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;

use crate::{
    common::{
        envelope::Sucesso,
        error::AppError,
        extract::{JsonBody, PathParam, QueryParams},
    },
    config::AppState,
    models::request::{
        CreateRequestPayload, MedicationRequest, RequestListQuery, RequestPatch, RequestSummary,
        ReviewPayload, StatusPayload, UpdateRequestPayload,
    },
};

// POST /api/solicitacoes
#[utoipa::path(
    post,
    path = "/api/solicitacoes",
    tag = "Solicitações",
    request_body = CreateRequestPayload,
    responses(
        (status = 201, description = "Solicitação criada; o id volta como 'protocolo'"),
        (status = 400, description = "CPF, medicamento ou quantidade inválidos"),
        (status = 500, description = "Erro do banco (ex.: CPF ou medicamento inexistente)")
    )
)]
pub async fn create_request(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): JsonBody<CreateRequestPayload>,
) -> Result<impl IntoResponse, AppError> {
    let new = payload.into_new_request()?;

    let protocolo = app_state.request_service.create(&new).await?;

    Ok((
        StatusCode::CREATED,
        Json(Sucesso::protocolo("Solicitação realizada com sucesso!", protocolo)),
    ))
}

// GET /api/listar_solicitacoes
#[utoipa::path(
    get,
    path = "/api/listar_solicitacoes",
    tag = "Solicitações",
    responses(
        (status = 200, description = "Fila completa, mais recentes primeiro", body = Vec<RequestSummary>)
    )
)]
pub async fn list_all_requests(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state.request_service.list(None).await?;
    Ok((StatusCode::OK, Json(rows)))
}

// GET /api/solicitacoes[?cpf=]
#[utoipa::path(
    get,
    path = "/api/solicitacoes",
    tag = "Solicitações",
    params(RequestListQuery),
    responses(
        (status = 200, description = "Solicitações, opcionalmente de um CPF", body = Vec<RequestSummary>)
    )
)]
pub async fn list_requests(
    State(app_state): State<AppState>,
    WithRejection(Query(query), _): QueryParams<RequestListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .request_service
        .list(query.cpf.as_deref())
        .await?;
    Ok((StatusCode::OK, Json(rows)))
}

// GET /api/minhas_solicitacoes/{cpf}
#[utoipa::path(
    get,
    path = "/api/minhas_solicitacoes/{cpf}",
    tag = "Solicitações",
    params(("cpf" = String, Path, description = "CPF do cidadão")),
    responses(
        (status = 200, description = "Pedidos do cidadão, mais recentes primeiro", body = Vec<RequestSummary>)
    )
)]
pub async fn list_my_requests(
    State(app_state): State<AppState>,
    WithRejection(Path(cpf), _): PathParam<String>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state.request_service.list(Some(&cpf)).await?;
    Ok((StatusCode::OK, Json(rows)))
}

// GET /api/solicitacoes/{id}
#[utoipa::path(
    get,
    path = "/api/solicitacoes/{id}",
    tag = "Solicitações",
    params(("id" = i32, Path, description = "Protocolo")),
    responses(
        (status = 200, description = "Solicitação", body = MedicationRequest),
        (status = 404, description = "Solicitação não encontrada")
    )
)]
pub async fn get_request(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): PathParam<i32>,
) -> Result<impl IntoResponse, AppError> {
    let request = app_state.request_service.get(id).await?;
    Ok((StatusCode::OK, Json(request)))
}

// PUT /api/solicitacoes/{id}
#[utoipa::path(
    put,
    path = "/api/solicitacoes/{id}",
    tag = "Solicitações",
    params(("id" = i32, Path, description = "Protocolo")),
    request_body = UpdateRequestPayload,
    responses(
        (status = 200, description = "Atualizada (envelope SUCESSO com item)"),
        (status = 400, description = "Nenhum campo, ou campo inválido"),
        (status = 404, description = "Solicitação não encontrada")
    )
)]
pub async fn update_request(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): PathParam<i32>,
    WithRejection(Json(payload), _): JsonBody<UpdateRequestPayload>,
) -> Result<impl IntoResponse, AppError> {
    let patch = RequestPatch::try_from(payload)?;

    let updated = app_state.request_service.update(id, &patch).await?;

    Ok((
        StatusCode::OK,
        Json(Sucesso::com_item("Solicitação atualizada.", updated)),
    ))
}

// PUT /api/solicitacoes/{id}/status
#[utoipa::path(
    put,
    path = "/api/solicitacoes/{id}/status",
    tag = "Solicitações",
    params(("id" = i32, Path, description = "Protocolo")),
    request_body = StatusPayload,
    responses(
        (status = 200, description = "Status atualizado (envelope SUCESSO com item)"),
        (status = 400, description = "Status ausente ou vazio"),
        (status = 404, description = "Solicitação não encontrada")
    )
)]
pub async fn update_request_status(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): PathParam<i32>,
    WithRejection(Json(payload), _): JsonBody<StatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let status = payload.into_status()?;

    let updated = app_state.request_service.set_status(id, &status).await?;

    Ok((
        StatusCode::OK,
        Json(Sucesso::com_item("Status da solicitação atualizado.", updated)),
    ))
}

// PUT /api/avaliar_solicitacao
#[utoipa::path(
    put,
    path = "/api/avaliar_solicitacao",
    tag = "Solicitações",
    request_body = ReviewPayload,
    responses(
        (status = 200, description = "Avaliada (envelope SUCESSO com item)"),
        (status = 400, description = "Sem id, ou status diferente de DEFERIDO/INDEFERIDO"),
        (status = 404, description = "Solicitação não encontrada")
    )
)]
pub async fn review_request(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): JsonBody<ReviewPayload>,
) -> Result<impl IntoResponse, AppError> {
    let (id, decision) = payload.into_decision()?;

    let updated = app_state.request_service.review(id, decision).await?;

    Ok((
        StatusCode::OK,
        Json(Sucesso::com_item("Status atualizado!", updated)),
    ))
}
