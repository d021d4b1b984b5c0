//! MedSolicita: API de solicitação de medicamentos sobre Postgres.
//!
//! Camadas: handlers (axum) → services (regras e transações) → db (sqlx).

use axum::{
    routing::{get, put},
    Json, Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod services;

pub use crate::config::{AppState, Config};

/// Monta todas as rotas sob `/api`.
pub fn app(app_state: AppState) -> Router {
    let medication_routes = Router::new()
        .route(
            "/medicamentos",
            get(handlers::medications::list_medications)
                .post(handlers::medications::create_medication)
                .put(handlers::medications::update_medication),
        )
        .route(
            "/medicamentos/{id}",
            axum::routing::delete(handlers::medications::delete_medication),
        );

    let request_routes = Router::new()
        .route(
            "/solicitacoes",
            get(handlers::requests::list_requests).post(handlers::requests::create_request),
        )
        .route(
            "/solicitacoes/{id}",
            get(handlers::requests::get_request).put(handlers::requests::update_request),
        )
        .route(
            "/solicitacoes/{id}/status",
            put(handlers::requests::update_request_status),
        )
        .route(
            "/listar_solicitacoes",
            get(handlers::requests::list_all_requests),
        )
        .route(
            "/avaliar_solicitacao",
            put(handlers::requests::review_request),
        )
        .route(
            "/minhas_solicitacoes/{cpf}",
            get(handlers::requests::list_my_requests),
        );

    let user_routes = Router::new().route(
        "/usuarios",
        get(handlers::users::list_users).post(handlers::users::save_user),
    );

    let dashboard_routes =
        Router::new().route("/dashboard/resumo", get(handlers::dashboard::get_summary));

    let api = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route(
            "/docs/openapi.json",
            get(|| async { Json(docs::ApiDoc::openapi()) }),
        )
        .merge(medication_routes)
        .merge(request_routes)
        .merge(user_routes)
        .merge(dashboard_routes);

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
