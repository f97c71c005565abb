use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::encoder;

/// One entry of the fixed art-style catalog.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StyleOption {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    pub prompt: &'static str,
}

/// The portrait the user picked, valid for a single generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub file_name: Option<String>,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl UploadedImage {
    pub fn new(mime_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self { file_name: None, mime_type: mime_type.into(), bytes: bytes.into() }
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }
}

/// An image returned by the model, still base64 encoded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub data: String,
}

impl GeneratedImage {
    /// `data:<mime>;base64,<payload>`, directly usable as an `<img src>`.
    pub fn data_uri(&self) -> String {
        encoder::to_data_uri(&self.mime_type, &self.data)
    }
}

/// Serialisable snapshot of the studio, as rendered by the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StudioView {
    Idle,
    Ready { style_id: Option<String> },
    Generating { style_id: String },
    Success { style_id: Option<String>, image_url: String },
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub generation_id: Uuid,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub view: StudioView,
}
