use thiserror::Error;

/// Failure of an external collaborator (exchange, account, market data)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Missing data: {0}")]
    MissingData(String),
}

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;
