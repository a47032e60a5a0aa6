use thiserror::Error;

/// Errors surfaced by repository/infrastructure ports.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DomainError::NotFound("row not found".into()),
            other => DomainError::Infrastructure(other.to_string()),
        }
    }
}
