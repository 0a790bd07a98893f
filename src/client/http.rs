use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{ decoded_text_stream, ChatBackend, TextStream, CHAT_ROUTE, RELATED_ARTICLES_ROUTE };
use crate::config::BackendConfig;
use crate::error::{ ClientError, Result };
use crate::models::api::{
    ChatRequest,
    ChatSummaryResponse,
    RelatedArticlesRequest,
    RelatedArticlesResponse,
};

#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: HttpClient,
    config: BackendConfig,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Result<Self> {
        let mut builder = HttpClient::builder();
        // reqwest applies this to the whole exchange, streamed body included.
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    async fn post(&self, route: &str, body: &impl Serialize) -> Result<reqwest::Response> {
        let url = self.config.endpoint(route);
        debug!("POST {}", url);
        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::status(route, status.as_u16()));
        }
        Ok(response)
    }

    async fn post_json<T: DeserializeOwned>(&self, route: &str, body: &impl Serialize) -> Result<T> {
        let response = self.post(route, body).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::malformed(route, e))
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn related_articles(
        &self,
        request: &RelatedArticlesRequest
    ) -> Result<RelatedArticlesResponse> {
        self.post_json(RELATED_ARTICLES_ROUTE, request).await
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatSummaryResponse> {
        self.post_json(CHAT_ROUTE, request).await
    }

    async fn chat_stream(&self, request: &ChatRequest) -> Result<TextStream> {
        let response = self.post(CHAT_ROUTE, request).await?;
        Ok(decoded_text_stream(response.bytes_stream()))
    }
}
