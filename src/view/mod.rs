pub mod console;
pub mod transcript;

use uuid::Uuid;

use crate::models::chat::{ Message, SidebarContent };

pub use self::console::ConsoleView;
pub use self::transcript::Transcript;

pub const SEND_LABEL: &str = "Send";
pub const BUSY_LABEL: &str = "Thinking...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAnchor {
    Start,
    End,
}

/// Enablement of the input controls as a view should present them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiState {
    pub input_enabled: bool,
    pub button_enabled: bool,
    pub button_label: &'static str,
    pub loading_indicator: bool,
}

impl UiState {
    pub fn idle() -> Self {
        Self {
            input_enabled: true,
            button_enabled: true,
            button_label: SEND_LABEL,
            loading_indicator: false,
        }
    }

    pub fn busy(loading_indicator: bool) -> Self {
        Self {
            input_enabled: false,
            button_enabled: false,
            button_label: BUSY_LABEL,
            loading_indicator,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    MessageAppended {
        message: Message,
        html: String,
    },
    /// `message.content` is the whole accumulated text; `delta` is the chunk
    /// that was just added to it.
    MessageUpdated {
        message: Message,
        html: String,
        delta: String,
    },
    MessageRemoved {
        id: Uuid,
    },
    SidebarUpdated(SidebarContent),
    StateChanged(UiState),
    InputCleared,
    ScrollTo {
        id: Uuid,
        anchor: ScrollAnchor,
    },
}

pub trait ChatView {
    fn apply(&mut self, event: ViewEvent);
}
