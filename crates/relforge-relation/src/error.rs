use thiserror::Error;

/// Failure to reach or read the schema source. Always fatal for a run.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("schema source unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read table '{table}': {message}")]
    Table { table: String, message: String },
}

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("schema provider failed: {0}")]
    Provider(#[from] ProviderError),
}
