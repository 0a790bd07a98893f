use clap::Parser;
use std::time::Duration;

use crate::config::{ BackendConfig, ControllerConfig, ResponseMode, DEFAULT_BACKEND_URL };

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Submit this query once and exit. Without it, queries are read from stdin line by line.
    pub query: Option<String>,

    // --- Backend Args ---
    /// Base URL of the chat backend serving /chat and /related_articles.
    #[arg(long, env = "CHAT_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    /// How the /chat response is consumed (stream, batched).
    #[arg(long, env = "RESPONSE_MODE", default_value = "stream")]
    pub response_mode: ResponseMode,

    /// Ask /related_articles before /chat and forward its article list.
    #[arg(
        long,
        env = "RELATED_ARTICLES",
        default_value = "true",
        action = clap::ArgAction::Set
    )]
    pub related_articles: bool,

    /// Per-request timeout in seconds. 0 disables the timeout.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "120")]
    pub request_timeout_secs: u64,

    // --- Output Args ---
    /// Write log records to this file (truncated on start) instead of stderr.
    #[arg(long, env = "LOG_FILE")]
    pub log_file: Option<String>,

    /// Write the rendered conversation as an HTML document here when the session ends.
    #[arg(long, env = "TRANSCRIPT_PATH")]
    pub transcript: Option<String>,

    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,
}

impl Args {
    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            mode: self.response_mode,
            related_articles: self.related_articles,
        }
    }

    pub fn backend_config(&self) -> BackendConfig {
        let timeout = if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.request_timeout_secs))
        };
        BackendConfig {
            base_url: self.backend_url.clone(),
            timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_streaming_with_articles() {
        let args = Args::try_parse_from(["article-chat"]).unwrap();
        assert_eq!(args.query, None);
        assert_eq!(args.controller_config(), ControllerConfig::default());
        assert_eq!(args.backend_config().timeout, Some(Duration::from_secs(120)));
    }

    #[test]
    fn flags_map_onto_configs() {
        let args = Args::try_parse_from([
            "article-chat",
            "--backend-url",
            "http://chat.internal:9000",
            "--response-mode",
            "batched",
            "--related-articles",
            "false",
            "--request-timeout-secs",
            "0",
            "what is new in rust?",
        ]).unwrap();

        assert_eq!(args.query.as_deref(), Some("what is new in rust?"));
        let controller = args.controller_config();
        assert_eq!(controller.mode, ResponseMode::Batched);
        assert!(!controller.related_articles);
        let backend = args.backend_config();
        assert_eq!(backend.base_url, "http://chat.internal:9000");
        assert_eq!(backend.timeout, None);
    }

    #[test]
    fn rejects_unknown_response_mode() {
        assert!(Args::try_parse_from(["article-chat", "--response-mode", "sse"]).is_err());
    }
}
