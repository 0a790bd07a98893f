pub mod http;

use async_trait::async_trait;
use futures::{ Future, Stream, StreamExt };
use log::warn;
use std::pin::Pin;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::{ ClientError, Result };
use crate::format::decoder::Utf8StreamDecoder;
use crate::models::api::{
    ChatRequest,
    ChatSummaryResponse,
    RelatedArticlesRequest,
    RelatedArticlesResponse,
};

pub use self::http::HttpBackend;

pub const RELATED_ARTICLES_ROUTE: &str = "/related_articles";
pub const CHAT_ROUTE: &str = "/chat";

const STREAM_CHANNEL_CAPACITY: usize = 32;

/// Decoded text chunks of one streamed `/chat` body, in arrival order.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn related_articles(
        &self,
        request: &RelatedArticlesRequest
    ) -> Result<RelatedArticlesResponse>;

    /// Batched `/chat`: the whole body parsed as `{summary, related_text}`.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatSummaryResponse>;

    /// Streaming `/chat`. Resolves once the response status is known to be a
    /// success; failures after that arrive as `Err` items on the stream.
    async fn chat_stream(&self, request: &ChatRequest) -> Result<TextStream>;
}

pub fn create_streaming_response<F, Fut>(response_fn: F) -> TextStream
    where
        F: FnOnce(mpsc::Sender<Result<String>>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static
{
    let (tx, rx) = mpsc::channel(STREAM_CHANNEL_CAPACITY);

    tokio::spawn(async move {
        response_fn(tx).await;
    });

    Box::pin(ReceiverStream::new(rx))
}

/// Turns a raw byte-chunk stream into decoded text chunks. Decoder state
/// lives for the whole body, so characters split across chunks survive.
pub fn decoded_text_stream<S, B, E>(bytes: S) -> TextStream
    where
        S: Stream<Item = std::result::Result<B, E>> + Send + 'static,
        B: AsRef<[u8]> + Send + 'static,
        E: Into<ClientError> + Send + 'static
{
    create_streaming_response(move |tx| async move {
        let mut bytes = Box::pin(bytes);
        let mut decoder = Utf8StreamDecoder::new();

        while let Some(chunk) = bytes.next().await {
            match chunk {
                Ok(buf) => {
                    let text = decoder.decode(buf.as_ref());
                    if text.is_empty() {
                        continue;
                    }
                    if tx.send(Ok(text)).await.is_err() {
                        return;
                    }
                }
                Err(e) => {
                    let _ = tx.send(Err(e.into())).await;
                    return;
                }
            }
        }

        if decoder.has_pending() {
            warn!("Response body ended inside a multi-byte character");
        }
        let tail = decoder.finish();
        if !tail.is_empty() {
            let _ = tx.send(Ok(tail)).await;
        }
    })
}
