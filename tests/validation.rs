mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{offline_app, send, send_raw};

fn assert_error(status: StatusCode, body: &serde_json::Value, expected: StatusCode) {
    assert_eq!(status, expected, "corpo: {body}");
    assert_eq!(body["tipo"], "ERRO", "corpo: {body}");
    assert!(!body["mensagem"].is_null(), "corpo: {body}");
}

#[tokio::test]
async fn health_is_ok() {
    let app = offline_app();
    let response = tower::ServiceExt::oneshot(
        app,
        axum::http::Request::get("/api/health")
            .body(axum::body::Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = offline_app();
    let (status, body) = send(&app, Method::GET, "/api/docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/solicitacoes"].is_object());
}

#[tokio::test]
async fn medication_create_requires_a_name() {
    let app = offline_app();

    let (status, body) = send(&app, Method::POST, "/api/medicamentos", Some(json!({}))).await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);
    assert!(body["mensagem"].is_array());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/medicamentos",
        Some(json!({"nome": "   ", "dosagem": "10mg"})),
    )
    .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn medication_update_requires_id_and_name() {
    let app = offline_app();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/medicamentos",
        Some(json!({"nome": "Dipirona"})),
    )
    .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);

    let (status, body) =
        send(&app, Method::PUT, "/api/medicamentos", Some(json!({"id": 3}))).await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/medicamentos",
        Some(json!({"id": "zero", "nome": "Dipirona"})),
    )
    .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_is_a_400_not_a_422() {
    let app = offline_app();
    let (status, body) = send_raw(&app, Method::POST, "/api/solicitacoes", "{nao é json").await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);

    let (status, body) = send_raw(
        &app,
        Method::POST,
        "/api/solicitacoes",
        r#"{"codUsuarioCPF": "1", "idMedicamento": [7]}"#,
    )
    .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);
}

// A tela do cidadão manda o id do <select> como texto.
#[tokio::test]
async fn request_create_accepts_medication_id_as_text() {
    let app = offline_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/solicitacoes",
        Some(json!({"codUsuarioCPF": "123", "idMedicamento": "7", "observacao": ""})),
    )
    .await;
    // Passou da validação e só falhou por não haver banco
    assert_error(status, &body, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/solicitacoes",
        Some(json!({"codUsuarioCPF": "123", "idMedicamento": "sete"})),
    )
    .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn request_create_validates_fields() {
    let app = offline_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/solicitacoes",
        Some(json!({"idMedicamento": 7})),
    )
    .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/solicitacoes",
        Some(json!({"codUsuarioCPF": "123"})),
    )
    .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/solicitacoes",
        Some(json!({"codUsuarioCPF": "123", "idMedicamento": 7, "quantidade": 0})),
    )
    .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn review_rejects_statuses_outside_the_decision_pair() {
    let app = offline_app();

    for status_value in ["APROVADO", "EM ANALISE", "", "qualquer"] {
        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/avaliar_solicitacao",
            Some(json!({"idSolicitacao": 1, "status": status_value})),
        )
        .await;
        assert_error(status, &body, StatusCode::BAD_REQUEST);
    }

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/avaliar_solicitacao",
        Some(json!({"status": "DEFERIDO"})),
    )
    .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn partial_update_needs_a_valid_field() {
    let app = offline_app();

    let (status, body) = send(&app, Method::PUT, "/api/solicitacoes/1", Some(json!({}))).await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/solicitacoes/1",
        Some(json!({"quantidade": -2})),
    )
    .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/solicitacoes/1",
        Some(json!({"status": "  "})),
    )
    .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_only_update_requires_status() {
    let app = offline_app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/solicitacoes/1/status",
        Some(json!({"status": ""})),
    )
    .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_numeric_id_is_a_400() {
    let app = offline_app();
    let (status, body) = send(&app, Method::GET, "/api/solicitacoes/abc", None).await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::DELETE, "/api/medicamentos/abc", None).await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn user_upsert_requires_cpf_name_and_role() {
    let app = offline_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/usuarios",
        Some(json!({"cpf": "123", "nome": "Ana"})),
    )
    .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/usuarios",
        Some(json!({"cpf": "123", "nome": "Ana", "papel": "X"})),
    )
    .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn store_failure_is_a_500_in_the_error_envelope() {
    let app = offline_app();
    let (status, body) = send(&app, Method::GET, "/api/usuarios", None).await;
    assert_error(status, &body, StatusCode::INTERNAL_SERVER_ERROR);
}
