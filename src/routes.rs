use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use chrono::Utc;
use include_dir::{include_dir, Dir};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::{
    encoder,
    error::{AppError, ValidationError},
    gemini::ImageGenerator,
    models::{GenerateResponse, StyleOption, UploadedImage},
    studio::Studio,
    styles,
};

static ASSETS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/assets");

// Multipart framing and the style field on top of the image itself.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn ImageGenerator>,
    pub max_upload_bytes: usize,
}

pub fn router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes.saturating_add(FORM_OVERHEAD_BYTES);
    Router::new()
        .route("/", get(index))
        .route("/assets/*path", get(asset))
        .route("/health", get(health))
        .route("/api/styles", get(list_styles))
        .route("/api/generate", post(generate))
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)),
        )
        .with_state(state)
}

async fn index() -> Response {
    serve_asset("index.html")
}

async fn asset(Path(path): Path<String>) -> Response {
    serve_asset(&path)
}

fn serve_asset(path: &str) -> Response {
    match ASSETS.get_file(path) {
        Some(file) => ([(header::CONTENT_TYPE, content_type_for(path))], file.contents()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn content_type_for(path: &str) -> &'static str {
    match path.rsplit_once('.').map(|(_, ext)| ext) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

async fn health() -> &'static str {
    "ok"
}

pub async fn list_styles() -> Json<&'static [StyleOption]> {
    Json(styles::all())
}

#[derive(Debug, Default)]
struct Submission {
    image: Option<UploadedImage>,
    style_id: Option<String>,
}

async fn read_submission(mut multipart: Multipart, max_upload_bytes: usize) -> Result<Submission, AppError> {
    let mut submission = Submission::default();
    while let Some(field) = multipart.next_field().await.map_err(|e| AppError::Upload(e.body_text()))? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => {
                let file_name = field.file_name().filter(|n| !n.is_empty()).map(str::to_string);
                let declared = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(|e| AppError::Upload(e.body_text()))?;
                if data.is_empty() {
                    // browsers send an empty part when no file was picked
                    continue;
                }
                let (mime, bytes) = if file_name.is_none() && data.starts_with(b"data:") {
                    let text = std::str::from_utf8(&data).map_err(|_| AppError::Upload("image data URI is not valid UTF-8".into()))?;
                    let (mime, bytes) = encoder::decode_data_uri(text)
                        .ok_or_else(|| AppError::Upload("image data URI is not valid base64".into()))?;
                    (encoder::resolve_mime(Some(&mime), &bytes), Bytes::from(bytes))
                } else {
                    (encoder::resolve_mime(declared.as_deref(), &data), data)
                };
                if bytes.len() > max_upload_bytes {
                    return Err(AppError::Upload(format!("Image is too large (limit {max_upload_bytes} bytes).")));
                }
                let mime = mime.ok_or_else(|| ValidationError::UnsupportedMimeType("unknown".into()))?;
                let mut image = UploadedImage::new(mime, bytes);
                if let Some(name) = file_name {
                    image = image.with_file_name(name);
                }
                submission.image = Some(image);
            }
            Some("style_id") => {
                let text = field.text().await.map_err(|e| AppError::Upload(e.body_text()))?;
                let text = text.trim();
                if !text.is_empty() {
                    submission.style_id = Some(text.to_string());
                }
            }
            _ => {}
        }
    }
    Ok(submission)
}

pub async fn generate(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let multipart = multipart.map_err(|e| AppError::Upload(e.body_text()))?;
    let submission = read_submission(multipart, state.max_upload_bytes).await?;

    let mut studio = Studio::new();
    if let Some(image) = submission.image {
        studio.select_image(image)?;
    }
    if let Some(style_id) = submission.style_id {
        studio.select_style(style_id);
    }
    let ticket = studio.begin_generation()?;

    let generation_id = Uuid::new_v4();
    let span = info_span!(
        "generation",
        id = %generation_id,
        style = ticket.style.id,
        mime = %ticket.image.mime_type
    );

    async move {
        info!(
            "🎯 Generating '{}' portrait from {} ({} bytes)",
            ticket.style.name,
            ticket.image.file_name.as_deref().unwrap_or("<unnamed>"),
            ticket.image.bytes.len()
        );
        let outcome = state.generator.generate(&ticket.image, ticket.style.prompt).await;
        studio.complete(ticket.attempt, &outcome);

        match outcome {
            Ok(_) => {
                info!("✅ Generation finished");
                Ok(Json(GenerateResponse { generation_id, generated_at: Utc::now(), view: studio.view() }))
            }
            Err(e) => {
                error!("❌ Generation failed: {}", e);
                Err(AppError::from(e))
            }
        }
    }
    .instrument(span)
    .await
}
