//! Error types for the Clash of Clans player lookup

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;


pub type Result<T> = std::result::Result<T, ClashError>;

#[derive(Error, Debug)]
pub enum ClashError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Formatting failed: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("API token not provided: {env_var} environment variable not set")]
    MissingToken { env_var: String },

    #[error("Invalid port: {value}")]
    InvalidPort { value: String },

    #[error("Invalid view: {view} (expected overview, troops or achievements)")]
    InvalidView { view: String },

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Message used when the upstream body cannot be parsed as JSON.
pub const MALFORMED_RESPONSE_MESSAGE: &str = "Malformed response from upstream";

/// Status reported for upstream bodies that are not valid JSON.
pub const MALFORMED_RESPONSE_STATUS: u16 = 502;

/// Every way a single player lookup can fail.
///
/// The `Display` text of each variant is the user-facing message; the
/// optional upstream body is available through [`LookupError::details`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    /// No tag was supplied. Raised before any network call.
    #[error("Player tag is required")]
    MissingInput,

    /// The request never produced an HTTP response.
    #[error("Failed to fetch player data")]
    Network { description: String },

    #[error(
        "API access forbidden. This usually means your IP address is not whitelisted in the API key settings."
    )]
    Forbidden { details: Option<Value> },

    #[error("Player not found. Please check if the tag is correct.")]
    NotFound { details: Option<Value> },

    #[error("Too many requests. Please try again later.")]
    RateLimited { details: Option<Value> },

    /// Any other non-success status, or a body that was not JSON.
    #[error("API Error: {message}")]
    Upstream {
        status: u16,
        message: String,
        details: Option<Value>,
    },
}

impl LookupError {
    /// HTTP status the inbound surface answers with for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            LookupError::MissingInput => StatusCode::BAD_REQUEST,
            LookupError::Network { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            LookupError::Forbidden { .. } => StatusCode::FORBIDDEN,
            LookupError::NotFound { .. } => StatusCode::NOT_FOUND,
            LookupError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            LookupError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }

    /// Short machine-readable kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::MissingInput => "missing_input",
            LookupError::Network { .. } => "network_error",
            LookupError::Forbidden { .. } => "forbidden",
            LookupError::NotFound { .. } => "not_found",
            LookupError::RateLimited { .. } => "rate_limited",
            LookupError::Upstream { .. } => "upstream_error",
        }
    }

    /// Diagnostic detail for troubleshooting: the upstream body when one was
    /// received, or the transport failure description.
    pub fn details(&self) -> Option<Value> {
        match self {
            LookupError::MissingInput => None,
            LookupError::Network { description } => Some(Value::String(description.clone())),
            LookupError::Forbidden { details }
            | LookupError::NotFound { details }
            | LookupError::RateLimited { details }
            | LookupError::Upstream { details, .. } => details.clone(),
        }
    }
}

/// JSON body returned for every failed lookup.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<&LookupError> for ErrorBody {
    fn from(err: &LookupError) -> Self {
        Self {
            error: err.to_string(),
            details: err.details(),
        }
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::from(&self))).into_response()
    }
}
