pub mod dashboard;
pub mod medication;
pub mod request;
pub mod user;
