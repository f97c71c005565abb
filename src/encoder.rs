use base64::Engine;
use std::path::Path;

pub const SUPPORTED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

pub fn encode_base64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

pub fn to_data_uri(mime_type: &str, payload: &str) -> String {
    format!("data:{mime_type};base64,{payload}")
}

/// Payload after the first comma of a data URI; anything without a comma is returned whole.
pub fn strip_data_uri_prefix(s: &str) -> &str {
    match s.split_once(',') {
        Some((_, payload)) => payload,
        None => s,
    }
}

/// Reads a file and returns its bare base64 payload.
///
/// File-based entry point to the same encoding; HTTP uploads already arrive
/// as bytes and go through [`encode_base64`] directly.
pub async fn read_file_base64(path: impl AsRef<Path>) -> std::io::Result<String> {
    let bytes = tokio::fs::read(path).await?;
    Ok(encode_base64(&bytes))
}

/// Splits `data:<mime>;base64,<payload>` into its MIME type and decoded bytes.
pub fn decode_data_uri(s: &str) -> Option<(String, Vec<u8>)> {
    let header = s.strip_prefix("data:")?.split_once(',')?.0;
    let mime = header.strip_suffix(";base64")?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(strip_data_uri_prefix(s).trim())
        .ok()?;
    Some((mime.to_string(), bytes))
}

pub fn is_supported(mime_type: &str) -> bool {
    SUPPORTED_MIME_TYPES.contains(&mime_type)
}

/// Guesses the MIME type from magic bytes.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    match image::guess_format(bytes).ok()? {
        image::ImageFormat::Png => Some("image/png"),
        image::ImageFormat::Jpeg => Some("image/jpeg"),
        image::ImageFormat::WebP => Some("image/webp"),
        other => Some(other.to_mime_type()),
    }
}

/// Declared MIME type of an upload, falling back to sniffing when the
/// browser sent nothing useful.
pub fn resolve_mime(declared: Option<&str>, bytes: &[u8]) -> Option<String> {
    let declared = declared
        .map(|m| m.trim().to_ascii_lowercase())
        .filter(|m| !m.is_empty() && m != "application/octet-stream");
    let declared = declared.map(|m| if m == "image/jpg" { "image/jpeg".to_string() } else { m });
    declared.or_else(|| sniff_mime(bytes).map(str::to_string))
}
