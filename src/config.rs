use std::time::Duration;
use tracing::warn;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Process configuration, read once from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` when `GEMINI_API_KEY` is unset or empty; generation then fails fast.
    pub api_key: Option<String>,
    pub api_base: String,
    pub image_model: String,
    pub generation_timeout: Option<Duration>,
    pub port: u16,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            generation_timeout: None,
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup so tests don't touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            api_key: non_empty("GEMINI_API_KEY"),
            api_base: non_empty("GEMINI_API_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            image_model: non_empty("GEMINI_IMAGE_MODEL").unwrap_or(defaults.image_model),
            generation_timeout: parse_or_warn::<u64>("GENERATION_TIMEOUT_SECS", non_empty("GENERATION_TIMEOUT_SECS"))
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            port: parse_or_warn("PORT", non_empty("PORT")).unwrap_or(defaults.port),
            max_upload_bytes: parse_or_warn("MAX_UPLOAD_BYTES", non_empty("MAX_UPLOAD_BYTES"))
                .unwrap_or(defaults.max_upload_bytes),
        }
    }

    /// First few characters of the key, for startup logs.
    pub fn redacted_key(&self) -> String {
        match &self.api_key {
            Some(key) => {
                let shown: String = key.chars().take(6).collect();
                format!("{shown}***")
            }
            None => "<unset>".to_string(),
        }
    }
}

fn parse_or_warn<T: std::str::FromStr>(key: &str, raw: Option<String>) -> Option<T> {
    let raw = raw?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring invalid {}={:?}, using default", key, raw);
            None
        }
    }
}
