pub mod envelope;
pub mod error;
pub mod extract;
pub mod serde_utils;
