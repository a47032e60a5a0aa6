pub mod sqlx_bookmark_repository;
pub mod sqlx_finding_persister;
