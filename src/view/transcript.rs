use std::fs;
use std::path::Path;
use uuid::Uuid;

use super::{ ChatView, ViewEvent };
use crate::error::Result;
use crate::format::escape_html;
use crate::models::chat::Sender;

struct Entry {
    id: Uuid,
    sender: Sender,
    html: String,
}

/// Records the rendered conversation while forwarding every event to an
/// inner view, so a session can be saved as a standalone HTML page.
pub struct Transcript<V> {
    inner: V,
    entries: Vec<Entry>,
    sidebar: String,
}

impl<V: ChatView> Transcript<V> {
    pub fn new(inner: V) -> Self {
        Self {
            inner,
            entries: Vec::new(),
            sidebar: String::new(),
        }
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }

    pub fn message_count(&self) -> usize {
        self.entries.len()
    }

    fn record(&mut self, event: &ViewEvent) {
        match event {
            ViewEvent::MessageAppended { message, html } => {
                self.entries.push(Entry {
                    id: message.id,
                    sender: message.sender,
                    html: html.clone(),
                });
            }
            ViewEvent::MessageUpdated { message, html, .. } => {
                if let Some(entry) = self.entries.iter_mut().find(|e| e.id == message.id) {
                    entry.html = html.clone();
                }
            }
            ViewEvent::MessageRemoved { id } => {
                self.entries.retain(|e| e.id != *id);
            }
            ViewEvent::SidebarUpdated(sidebar) => {
                self.sidebar = escape_html(&sidebar.render());
            }
            ViewEvent::StateChanged(_) | ViewEvent::InputCleared | ViewEvent::ScrollTo { .. } => {}
        }
    }

    pub fn to_html(&self) -> String {
        let mut body = String::new();
        for entry in &self.entries {
            body.push_str(&format!(
                "<div class=\"message {}-message\">{}</div>\n",
                entry.sender,
                entry.html
            ));
        }
        format!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Chat transcript</title></head>\n<body>\n<div id=\"chat-window\">\n{}</div>\n<pre id=\"related-articles\">{}</pre>\n</body>\n</html>\n",
            body,
            self.sidebar
        )
    }

    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_html())?;
        Ok(())
    }
}

impl<V: ChatView> ChatView for Transcript<V> {
    fn apply(&mut self, event: ViewEvent) {
        self.record(&event);
        self.inner.apply(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::{ Message, SidebarContent };
    use serde_json::json;

    #[derive(Default)]
    struct Count(usize);

    impl ChatView for Count {
        fn apply(&mut self, _event: ViewEvent) {
            self.0 += 1;
        }
    }

    #[test]
    fn forwards_and_tracks_updates() {
        let mut transcript = Transcript::new(Count::default());
        let mut bot = Message::bot("");
        transcript.apply(ViewEvent::MessageAppended { message: bot.clone(), html: String::new() });
        bot.content = "**hi**".into();
        transcript.apply(ViewEvent::MessageUpdated {
            message: bot,
            html: "<p><strong>hi</strong></p>".into(),
            delta: "**hi**".into(),
        });

        assert_eq!(transcript.inner().0, 2);
        assert_eq!(transcript.message_count(), 1);
        assert!(transcript.to_html().contains(
            "<div class=\"message bot-message\"><p><strong>hi</strong></p></div>"
        ));
    }

    #[test]
    fn removed_messages_leave_the_transcript() {
        let mut transcript = Transcript::new(Count::default());
        let bot = Message::bot("");
        let id = bot.id;
        transcript.apply(ViewEvent::MessageAppended { message: bot, html: String::new() });
        transcript.apply(ViewEvent::MessageRemoved { id });
        assert_eq!(transcript.message_count(), 0);
    }

    #[test]
    fn sidebar_is_escaped() {
        let mut transcript = Transcript::new(Count::default());
        transcript.apply(
            ViewEvent::SidebarUpdated(SidebarContent::from_value(json!({ "Title": "<b>" })))
        );
        assert!(transcript.to_html().contains("&lt;b&gt;"));
    }

    #[test]
    fn writes_document_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.html");
        let mut transcript = Transcript::new(Count::default());
        transcript.apply(ViewEvent::MessageAppended {
            message: Message::user("a < b"),
            html: "a &lt; b".into(),
        });
        transcript.write_to(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
        assert!(written.contains("<div class=\"message user-message\">a &lt; b</div>"));
    }
}
