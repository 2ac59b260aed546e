use crate::types::ContractId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TenureError>;

#[derive(Debug, Error)]
pub enum TenureError {
    #[error("Missing or empty required field: {0}")]
    Validation(&'static str),

    #[error("Contract not found: {0}")]
    ContractNotFound(ContractId),

    #[error("Chat session not found: {0}")]
    SessionNotFound(String),

    #[error("Inference service unavailable: {0}")]
    Upstream(String),

    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
