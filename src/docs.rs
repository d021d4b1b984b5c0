// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MedSolicita API",
        description = "Solicitação de medicamentos: cidadãos pedem, equipe avalia, gestor acompanha."
    ),
    paths(
        // --- Medicamentos ---
        handlers::medications::list_medications,
        handlers::medications::create_medication,
        handlers::medications::update_medication,
        handlers::medications::delete_medication,

        // --- Solicitações ---
        handlers::requests::create_request,
        handlers::requests::list_all_requests,
        handlers::requests::list_requests,
        handlers::requests::list_my_requests,
        handlers::requests::get_request,
        handlers::requests::update_request,
        handlers::requests::update_request_status,
        handlers::requests::review_request,

        // --- Usuários ---
        handlers::users::list_users,
        handlers::users::save_user,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
    ),
    components(
        schemas(
            models::medication::Medication,
            models::medication::MedicationOption,
            models::medication::CreateMedicationPayload,
            models::medication::UpdateMedicationPayload,

            models::request::MedicationRequest,
            models::request::RequestSummary,
            models::request::CreateRequestPayload,
            models::request::ReviewPayload,
            models::request::StatusPayload,
            models::request::UpdateRequestPayload,

            models::user::UserView,
            models::user::UpsertUserPayload,

            models::dashboard::DashboardSummary,
        )
    ),
    tags(
        (name = "Medicamentos", description = "Catálogo de medicamentos"),
        (name = "Solicitações", description = "Fluxo de solicitação e avaliação"),
        (name = "Usuários", description = "Cadastro de cidadãos e equipe"),
        (name = "Dashboard", description = "Resumo para o gestor")
    )
)]
pub struct ApiDoc;
