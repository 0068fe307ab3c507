pub mod error;
pub mod health_repo;
