use thiserror::Error;

use crate::transport::TransportError;

/// Request rejected before any network activity
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Please set the OPENROUTER_API_KEY environment variable before running.")]
    MissingApiKey,
    #[error("Please enter some code to analyze.")]
    EmptyCode,
}

/// Terminal failure of one analysis request. Nothing is recorded in history
/// for any of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error(transparent)]
    Transport(TransportError),
    #[error("API request failed. Status: {status} Body: {body}")]
    Api { status: u16, body: String },
    #[error("analysis worker failed: {0}")]
    Worker(String),
}

impl From<TransportError> for AnalysisError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Api { status, body } => AnalysisError::Api { status, body },
            other => AnalysisError::Transport(other),
        }
    }
}
