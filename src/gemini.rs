use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::{
    config::Config,
    encoder,
    error::GenerationError,
    models::{GeneratedImage, UploadedImage},
};

pub const NO_IMAGE_MESSAGE: &str = "No image was generated. The model may have refused the request.";

/// Anything that can turn a portrait plus a style prompt into a new image.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, image: &UploadedImage, style_prompt: &str) -> Result<GeneratedImage, GenerationError>;
}

/// Full instruction sent alongside the portrait.
pub fn build_instruction(style_prompt: &str) -> String {
    format!(
        "Integrate the person in this portrait into a new image based on the following theme: {style_prompt}. \
        It is crucial to retain the person's key facial features and likeness while seamlessly blending them into the new Pharaonic-themed scene. \
        The final output must be a high-quality, photorealistic image."
    )
}

// Helper function to truncate base64 data in JSON for cleaner logging
fn truncate_base64_in_json(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, val) in map.iter_mut() {
                if key == "data" {
                    if let serde_json::Value::String(s) = val {
                        if s.len() > 100 && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '=') {
                            *val = serde_json::Value::String(format!("{}...[truncated {} chars]", &s[..50], s.len() - 50));
                        }
                    }
                } else {
                    truncate_base64_in_json(val);
                }
            }
        }
        serde_json::Value::Array(arr) => {
            for val in arr.iter_mut() {
                truncate_base64_in_json(val);
            }
        }
        _ => {}
    }
}

fn loggable(value: &impl Serialize) -> String {
    match serde_json::to_value(value) {
        Ok(mut json) => {
            truncate_base64_in_json(&mut json);
            json.to_string()
        }
        Err(_) => String::new(),
    }
}

pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = config.generation_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|e| {
            warn!("Falling back to default HTTP client: {}", e);
            Client::new()
        });
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.api_base.clone(),
            model: config.image_model.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    async fn perform_api_call(&self, api_key: &str, body: &GenerateContentRequest) -> Result<GenerateContentResponse, GenerationError> {
        let url = self.endpoint();
        info!("🔗 Making request to: {}", url);
        info!("📤 Request body: {}", loggable(body));

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        info!("📥 Response status: {}", status);

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!("❌ API Error response: {}", error_body);
            return Err(GenerationError::Api { status: status.as_u16(), body: error_body });
        }

        let response_text = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&response_text)
            .map_err(|e| GenerationError::Parse(e.to_string()))?;
        info!("📥 Gemini API response: {}", loggable(&parsed));
        Ok(parsed)
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    /// The credential is the one captured from the environment at startup
    /// (`Config::from_env`); when it was missing this fails with
    /// `Configuration` before any request is sent.
    async fn generate(&self, image: &UploadedImage, style_prompt: &str) -> Result<GeneratedImage, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| GenerationError::Configuration("GEMINI_API_KEY environment variable not set".into()))?;

        let instruction = build_instruction(style_prompt);
        let body = GenerateContentRequest::new(&image.mime_type, encoder::encode_base64(&image.bytes), instruction);

        info!("Generating image with Gemini API ({} bytes of {})...", image.bytes.len(), image.mime_type);
        let parsed = self.perform_api_call(api_key, &body).await?;

        match extract_first_image(&parsed) {
            Some(img) => {
                info!("✅ Extracted {} image ({} chars)", img.mime_type, img.data.len());
                Ok(img)
            }
            None => {
                warn!(
                    finish_reasons = ?parsed.finish_reasons(),
                    block_reason = ?parsed.prompt_feedback.as_ref().and_then(|f| f.block_reason.as_deref()),
                    "⚠️ No image data found in API response"
                );
                Err(GenerationError::ModelRefusal(NO_IMAGE_MESSAGE.into()))
            }
        }
    }
}

// --- Wire types ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart {
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text { text: String },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

impl GenerateContentRequest {
    fn new(mime_type: &str, data: String, instruction: String) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart::Inline { inline_data: InlineData { data, mime_type: mime_type.to_string() } },
                    RequestPart::Text { text: instruction },
                ],
            }],
            generation_config: GenerationConfig { response_modalities: vec!["IMAGE"] },
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    fn finish_reasons(&self) -> Vec<&str> {
        self.candidates.iter().filter_map(|c| c.finish_reason.as_deref()).collect()
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Content,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
enum Part {
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text { text: String },
    Other(serde_json::Value),
}

#[derive(Debug, Deserialize, Serialize)]
struct InlineData {
    data: String,
    #[serde(rename = "mimeType")]
    mime_type: String,
}

fn extract_first_image(resp: &GenerateContentResponse) -> Option<GeneratedImage> {
    resp.candidates
        .iter()
        .flat_map(|c| c.content.parts.iter())
        .find_map(|p| match p {
            Part::Inline { inline_data } => Some(GeneratedImage {
                mime_type: inline_data.mime_type.clone(),
                data: inline_data.data.clone(),
            }),
            _ => None,
        })
}
