// Consultas em tempo de execução (`query_as::<_, T>`), não as macros checadas:
// o build não depende de banco nem de dados offline em `.sqlx/`.
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
pub mod medication_repo;
pub use medication_repo::MedicationRepository;
pub mod request_repo;
pub use request_repo::RequestRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
