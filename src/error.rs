use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde::Serialize;
use thiserror::Error;

pub const REFUSAL_MESSAGE: &str = "The model couldn't process this image. Please try a different one.";
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred during image generation. Please try again.";

/// Problems with the user's input, caught before any remote call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please upload an image first.")]
    NoImage,
    #[error("Please select an art style.")]
    NoStyle,
    #[error("Invalid style selected.")]
    UnknownStyle(String),
    #[error("Unsupported image type: {0}. Use PNG, JPEG, or WEBP.")]
    UnsupportedMimeType(String),
    #[error("A generation is already in progress.")]
    AlreadyGenerating,
}

/// Failures of a single call to the image model.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("HTTP error: status={status} body={body}")]
    Api { status: u16, body: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("{0}")]
    ModelRefusal(String),
}

impl GenerationError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::Transport(_) | Self::Api { .. } | Self::Parse(_) => "transport",
            Self::ModelRefusal(_) => "model_refusal",
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Transport(format!("request timed out: {e}"))
        } else {
            Self::Transport(e.to_string())
        }
    }
}

/// Maps a lower-level error text onto what the user sees.
///
/// Anything mentioning "refused" gets the friendlier retry-with-another-image
/// message; everything else collapses into the generic one.
pub fn user_message(raw: &str) -> &'static str {
    if raw.contains("refused") {
        REFUSAL_MESSAGE
    } else {
        GENERIC_FAILURE_MESSAGE
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid upload: {0}")]
    Upload(String),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::Upload(_) => "validation",
            Self::Generation(e) => e.kind(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Upload(_) => StatusCode::BAD_REQUEST,
            Self::Generation(GenerationError::Configuration(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Generation(GenerationError::ModelRefusal(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Generation(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Upload(msg) => msg.clone(),
            Self::Generation(e) => user_message(&e.to_string()).to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub kind: &'static str,
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody { status: "failed", kind: self.kind(), error: self.user_message() };
        (self.status(), Json(body)).into_response()
    }
}
