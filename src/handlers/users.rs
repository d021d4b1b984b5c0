// src/handlers/users.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::WithRejection;

use crate::{
    common::{envelope::Sucesso, error::AppError, extract::JsonBody},
    config::AppState,
    models::user::{UpsertUserPayload, UserView},
};

// GET /api/usuarios
#[utoipa::path(
    get,
    path = "/api/usuarios",
    tag = "Usuários",
    responses(
        (status = 200, description = "Usuários por nome, com o nome do papel", body = Vec<UserView>)
    )
)]
pub async fn list_users(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = app_state.user_service.list().await?;
    Ok((StatusCode::OK, Json(users)))
}

// POST /api/usuarios
#[utoipa::path(
    post,
    path = "/api/usuarios",
    tag = "Usuários",
    request_body = UpsertUserPayload,
    responses(
        (status = 200, description = "Usuário criado ou atualizado (a senha não é alterada)"),
        (status = 400, description = "CPF, nome ou papel ausentes/inválidos")
    )
)]
pub async fn save_user(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): JsonBody<UpsertUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    let input = payload.into_upsert()?;

    let saved = app_state.user_service.upsert(&input).await?;

    let mensagem = if saved.created {
        "Usuário cadastrado com sucesso!"
    } else {
        "Usuário salvo com sucesso!"
    };
    Ok((StatusCode::OK, Json(Sucesso::com_item(mensagem, saved.user))))
}
