use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    /// `/chat` body is consumed as raw text chunks and re-rendered on every chunk.
    #[default]
    Stream,
    /// `/chat` body is a single `{summary, related_text}` JSON document.
    Batched,
}

impl fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseMode::Stream => write!(f, "stream"),
            ResponseMode::Batched => write!(f, "batched"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseResponseModeError {
    message: String,
}

impl fmt::Display for ParseResponseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseResponseModeError {}

impl FromStr for ResponseMode {
    type Err = ParseResponseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stream" | "streaming" => Ok(ResponseMode::Stream),
            "batched" | "batch" => Ok(ResponseMode::Batched),
            _ =>
                Err(ParseResponseModeError {
                    message: format!("Invalid response mode: '{}' (expected stream or batched)", s),
                }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    pub mode: ResponseMode,
    /// Ask `/related_articles` first and forward its article list to `/chat`.
    pub related_articles: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            mode: ResponseMode::Stream,
            related_articles: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            timeout: Some(Duration::from_secs(120)),
        }
    }
}

impl BackendConfig {
    pub fn endpoint(&self, route: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), route)
    }
}
