//! Error type shared by every ACD client operation.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AcdError>;

#[derive(Debug, Error)]
pub enum AcdError {
    /// A required option was absent or empty. Raised before any request is sent.
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// An option was present but unusable, e.g. a body id that contradicts the path id.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The service answered with a non-2xx status.
    #[error("ACD API returned status {status}: {message}")]
    Api {
        status: u16,
        message: String,
        correlation_id: Option<String>,
    },

    /// Connection, TLS, timeout or body-read failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx body did not match the expected shape.
    #[error("failed to decode ACD response: {0}")]
    Decode(String),

    #[error("invalid client configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AcdError {
    /// HTTP status for API errors, `None` for everything else.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }

    /// True for HTTP 409, which the service uses for "resource already exists".
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(StatusCode::CONFLICT.as_u16())
    }

    pub fn is_missing_parameter(&self) -> bool {
        matches!(self, Self::MissingParameter(_))
    }

    /// Builds an [`AcdError::Api`] from a failed response body.
    ///
    /// The service reports failures as `{"code", "message", "correlationId"}`;
    /// anything else falls back to the raw text, then to the canonical reason.
    pub(crate) fn from_response_body(status: StatusCode, body: &[u8]) -> Self {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct ErrorBody {
            message: Option<String>,
            error: Option<String>,
            correlation_id: Option<String>,
        }

        let parsed = serde_json::from_slice::<ErrorBody>(body).ok();
        let correlation_id = parsed.as_ref().and_then(|b| b.correlation_id.clone());
        let message = parsed
            .and_then(|b| b.message.or(b.error))
            .filter(|m| !m.trim().is_empty())
            .or_else(|| {
                let text = String::from_utf8_lossy(body).trim().to_string();
                (!text.is_empty()).then_some(text)
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });

        Self::Api {
            status: status.as_u16(),
            message,
            correlation_id,
        }
    }
}

/// Rejects absent or blank required string options.
pub(crate) fn require<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AcdError::MissingParameter(name)),
    }
}
