pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod medication_service;
pub use medication_service::MedicationService;
pub mod request_service;
pub use request_service::RequestService;
pub mod user_service;
pub use user_service::UserService;
