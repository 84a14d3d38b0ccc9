use thiserror::Error;

pub type Result<T> = std::result::Result<T, OpenAiError>;

#[derive(Debug, Error)]
pub enum OpenAiError {
    #[error("invalid API key: {0}")]
    InvalidCredential(String),
    #[error("invalid base URI `{uri}`: {reason}")]
    InvalidBaseUri { uri: String, reason: String },
    #[error("no HTTP client available; inject one with `with_http_client` or enable the `reqwest-client` feature")]
    NoHttpClientAvailable,
    #[error("invalid header `{name}`: {reason}")]
    InvalidHeader { name: String, reason: String },
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        error_type: Option<String>,
        code: Option<String>,
    },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OpenAiError {
    pub(crate) fn invalid_base_uri(uri: &str, reason: impl Into<String>) -> Self {
        Self::InvalidBaseUri {
            uri: uri.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_header(name: &str, reason: impl ToString) -> Self {
        Self::InvalidHeader {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// 是否为 `make` 阶段产生的构造错误
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredential(_)
                | Self::InvalidBaseUri { .. }
                | Self::NoHttpClientAvailable
                | Self::InvalidHeader { .. }
        )
    }
}
