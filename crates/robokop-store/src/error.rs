use thiserror::Error;

use robokop_trapi::TrapiError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("document {0} has no data")]
    MissingData(String),

    #[error("parent document not found: {0}")]
    MissingParent(String),

    #[error("invalid visibility: {0}")]
    InvalidVisibility(String),

    #[error("invalid TRAPI message: {}", .0.join("; "))]
    InvalidMessage(Vec<String>),

    #[error(transparent)]
    Trapi(#[from] TrapiError),

    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
}
