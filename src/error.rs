use thiserror::Error;

pub type Result<T> = std::result::Result<T, TransitError>;

/// Which JSON-RPC surface an error belongs to. Protocol faults become
/// `error` envelopes (-32603); tool faults become successful envelopes
/// whose payload carries `isError: true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorTier {
    Protocol,
    Tool,
}

#[derive(Error, Debug)]
pub enum TransitError {
    /// Domain error reported by an upstream API inside its response body.
    /// Displayed verbatim; the message is already user-facing.
    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    NoResults(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0} parameter is required")]
    MissingArgument(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Unknown tool: {name}. Valid tools: {}", .valid.join(", "))]
    UnknownTool { name: String, valid: Vec<String> },

    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TransitError {
    pub fn upstream(msg: impl Into<String>) -> Self {
        TransitError::Upstream(msg.into())
    }

    pub fn no_results(msg: impl Into<String>) -> Self {
        TransitError::NoResults(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        TransitError::Config(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        TransitError::InvalidArgument(msg.into())
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        TransitError::InvalidRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        TransitError::Internal(msg.into())
    }

    pub fn tier(&self) -> ErrorTier {
        match self {
            TransitError::UnknownMethod(_)
            | TransitError::ResourceNotFound(_)
            | TransitError::InvalidRequest(_)
            | TransitError::Internal(_) => ErrorTier::Protocol,
            _ => ErrorTier::Tool,
        }
    }
}
