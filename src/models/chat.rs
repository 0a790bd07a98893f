use serde::{ Serialize, Deserialize };
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
    System,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
            Sender::System => write!(f, "system"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender: Sender,
    pub content: String,
}

impl Message {
    pub fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Sender::User, content)
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(Sender::Bot, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Sender::System, content)
    }
}

/// What the related-articles sidebar shows. Replaced wholesale on every request.
#[derive(Clone, Debug, PartialEq)]
pub enum SidebarContent {
    Text(String),
    Json(Value),
}

impl SidebarContent {
    /// Backend `related_text` fields may be a bare string or any JSON value.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(s) => SidebarContent::Text(s),
            other => SidebarContent::Json(other),
        }
    }

    pub fn render(&self) -> String {
        match self {
            SidebarContent::Text(s) => s.clone(),
            SidebarContent::Json(v) =>
                serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string()),
        }
    }
}

impl Default for SidebarContent {
    fn default() -> Self {
        SidebarContent::Text(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_related_text_becomes_plain_text() {
        let sidebar = SidebarContent::from_value(json!("Article A"));
        assert_eq!(sidebar, SidebarContent::Text("Article A".to_string()));
        assert_eq!(sidebar.render(), "Article A");
    }

    #[test]
    fn structured_related_text_is_pretty_printed() {
        let sidebar = SidebarContent::from_value(json!([{ "Title": "Rust 2024" }]));
        assert_eq!(sidebar.render(), "[\n  {\n    \"Title\": \"Rust 2024\"\n  }\n]");
    }

    #[test]
    fn messages_get_distinct_ids() {
        let a = Message::user("hi");
        let b = Message::user("hi");
        assert_ne!(a.id, b.id);
        assert_eq!(a.sender, Sender::User);
        assert_eq!(Sender::Bot.to_string(), "bot");
    }
}
