pub mod dashboard;
pub mod medications;
pub mod requests;
pub mod users;
