use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed profile document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl DashboardError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        DashboardError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        DashboardError::InvalidInput(message.into())
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
