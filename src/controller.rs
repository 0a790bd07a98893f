use futures::StreamExt;
use log::{ debug, error, info, warn };
use uuid::Uuid;

use crate::client::ChatBackend;
use crate::config::{ ControllerConfig, ResponseMode };
use crate::error::Result;
use crate::format::{ escape_html, format_message };
use crate::models::api::{ ChatRequest, RelatedArticlesRequest };
use crate::models::chat::{ Message, Sender, SidebarContent };
use crate::view::{ ChatView, ScrollAnchor, UiState, ViewEvent };

pub const APOLOGY: &str = "Sorry, I encountered an error. Please try again.";
pub const SIDEBAR_PLACEHOLDER: &str = "Searching for relevant articles...";

fn searching() -> SidebarContent {
    SidebarContent::Text(SIDEBAR_PLACEHOLDER.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enablement {
    Idle,
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing was sent or shown.
    Ignored,
    /// A previous submission is still in flight.
    Busy,
    Completed,
    /// The apology message was shown.
    Failed,
}

/// Text of one in-flight streamed reply. Only ever appended to.
#[derive(Debug, Default)]
pub struct StreamBuffer {
    text: String,
    chunks: usize,
}

impl StreamBuffer {
    pub fn push(&mut self, chunk: &str) {
        self.text.push_str(chunk);
        self.chunks += 1;
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Owns the conversation for one session: the message list, the sidebar and
/// the Idle/Busy enablement state. Every change is mirrored to the view.
pub struct ConversationController<B, V> {
    backend: B,
    view: V,
    config: ControllerConfig,
    messages: Vec<Message>,
    sidebar: SidebarContent,
    state: Enablement,
}

impl<B: ChatBackend, V: ChatView> ConversationController<B, V> {
    pub fn new(backend: B, mut view: V, config: ControllerConfig) -> Self {
        view.apply(ViewEvent::StateChanged(UiState::idle()));
        Self {
            backend,
            view,
            config,
            messages: Vec::new(),
            sidebar: SidebarContent::default(),
            state: Enablement::Idle,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn sidebar(&self) -> &SidebarContent {
        &self.sidebar
    }

    pub fn state(&self) -> Enablement {
        self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Shows a system notice, e.g. connection details at start-up.
    pub fn notify(&mut self, text: &str) {
        self.append(Message::system(text));
    }

    pub async fn submit(&mut self, query: &str) -> SubmitOutcome {
        let query = query.trim();
        if query.is_empty() {
            debug!("Ignoring empty submission");
            return SubmitOutcome::Ignored;
        }
        if self.state == Enablement::Busy {
            warn!("Submission rejected while a request is in flight");
            return SubmitOutcome::Busy;
        }

        info!("Submitting query ({} chars, mode: {})", query.chars().count(), self.config.mode);
        self.append(Message::user(query));
        self.view.apply(ViewEvent::InputCleared);
        self.set_state(Enablement::Busy);
        self.set_sidebar(searching());

        let mut placeholder = None;
        let outcome = match self.exchange(query, &mut placeholder).await {
            Ok(()) => SubmitOutcome::Completed,
            Err(e) => {
                error!("Chat request failed: {}", e);
                self.show_apology(placeholder);
                SubmitOutcome::Failed
            }
        };
        if self.sidebar == searching() {
            self.set_sidebar(SidebarContent::default());
        }
        self.set_state(Enablement::Idle);
        outcome
    }

    async fn exchange(&mut self, query: &str, placeholder: &mut Option<Uuid>) -> Result<()> {
        let articles_list = if self.config.related_articles {
            let request = RelatedArticlesRequest { message: query.to_string() };
            let related = self.backend.related_articles(&request).await?;
            info!("Related articles received: {} article(s)", related.articles_list.len());
            self.set_sidebar(SidebarContent::from_value(related.related_text));
            Some(related.articles_list)
        } else {
            None
        };

        let request = ChatRequest {
            message: query.to_string(),
            articles_list,
        };

        match self.config.mode {
            ResponseMode::Batched => {
                let response = self.backend.chat(&request).await?;
                self.view.apply(ViewEvent::StateChanged(UiState::busy(false)));
                self.append(Message::bot(response.summary));
                self.set_sidebar(SidebarContent::from_value(response.related_text));
                Ok(())
            }
            ResponseMode::Stream => self.consume_stream(&request, placeholder).await,
        }
    }

    async fn consume_stream(
        &mut self,
        request: &ChatRequest,
        placeholder: &mut Option<Uuid>
    ) -> Result<()> {
        let mut stream = self.backend.chat_stream(request).await?;
        self.view.apply(ViewEvent::StateChanged(UiState::busy(false)));
        let id = self.append(Message::bot(""));
        *placeholder = Some(id);

        let mut buffer = StreamBuffer::default();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            buffer.push(&chunk);
            self.update_message(id, buffer.as_str(), chunk);
        }

        if buffer.is_empty() {
            warn!("Stream finished without any text");
            self.remove_if_empty(id);
            *placeholder = None;
            return Ok(());
        }
        info!(
            "Stream finished: {} chunk(s), {} bytes",
            buffer.chunk_count(),
            buffer.len()
        );
        Ok(())
    }

    fn render(message: &Message) -> String {
        match message.sender {
            Sender::Bot => format_message(&message.content),
            Sender::User | Sender::System => escape_html(&message.content),
        }
    }

    fn append(&mut self, message: Message) -> Uuid {
        let id = message.id;
        let anchor = match message.sender {
            Sender::Bot => ScrollAnchor::Start,
            Sender::User | Sender::System => ScrollAnchor::End,
        };
        let html = Self::render(&message);
        self.messages.push(message.clone());
        self.view.apply(ViewEvent::MessageAppended { message, html });
        self.view.apply(ViewEvent::ScrollTo { id, anchor });
        id
    }

    fn update_message(&mut self, id: Uuid, content: &str, delta: String) {
        let Some(message) = self.messages.iter_mut().find(|m| m.id == id) else {
            return;
        };
        message.content.clear();
        message.content.push_str(content);
        let message = message.clone();
        let html = Self::render(&message);
        self.view.apply(ViewEvent::MessageUpdated { message, html, delta });
    }

    fn remove_if_empty(&mut self, id: Uuid) {
        let empty = self.messages.iter().any(|m| m.id == id && m.content.is_empty());
        if empty {
            self.messages.retain(|m| m.id != id);
            self.view.apply(ViewEvent::MessageRemoved { id });
        }
    }

    fn show_apology(&mut self, placeholder: Option<Uuid>) {
        if let Some(id) = placeholder {
            self.remove_if_empty(id);
        }
        self.append(Message::bot(APOLOGY));
    }

    fn set_state(&mut self, state: Enablement) {
        self.state = state;
        let ui = match state {
            Enablement::Idle => UiState::idle(),
            Enablement::Busy => UiState::busy(true),
        };
        self.view.apply(ViewEvent::StateChanged(ui));
    }

    fn set_sidebar(&mut self, sidebar: SidebarContent) {
        self.sidebar = sidebar.clone();
        self.view.apply(ViewEvent::SidebarUpdated(sidebar));
    }
}
