use log::warn;
use std::io::{ self, Stdout, Write };
use uuid::Uuid;

use super::{ ChatView, ViewEvent };
use crate::models::chat::{ Message, Sender };

/// Plain-text rendering for a terminal. Bot replies are streamed as raw text
/// deltas; the HTML produced for richer views is ignored here.
pub struct ConsoleView<W: Write> {
    out: W,
    streaming: Option<Uuid>,
    line_open: bool,
}

impl ConsoleView<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            streaming: None,
            line_open: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, text: &str) {
        let result = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush());
        if let Err(e) = result {
            warn!("Failed to write to console: {}", e);
        }
    }

    fn close_line(&mut self) {
        if self.line_open {
            self.write("\n");
            self.line_open = false;
        }
    }

    fn print_message(&mut self, message: &Message) {
        self.close_line();
        match message.sender {
            Sender::User => self.write(&format!("you: {}\n", message.content)),
            Sender::System => self.write(&format!("[{}]\n", message.content)),
            Sender::Bot if message.content.is_empty() => {
                self.write("bot: ");
                self.streaming = Some(message.id);
                self.line_open = true;
            }
            Sender::Bot => self.write(&format!("bot: {}\n", message.content)),
        }
    }
}

impl<W: Write> ChatView for ConsoleView<W> {
    fn apply(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::MessageAppended { message, .. } => self.print_message(&message),
            ViewEvent::MessageUpdated { message, delta, .. } => {
                if self.streaming == Some(message.id) {
                    self.write(&delta);
                    self.line_open = !delta.ends_with('\n');
                }
            }
            ViewEvent::MessageRemoved { id } => {
                if self.streaming == Some(id) {
                    self.streaming = None;
                    self.close_line();
                }
            }
            ViewEvent::SidebarUpdated(sidebar) => {
                self.close_line();
                self.write(&format!("--- related articles ---\n{}\n", sidebar.render()));
            }
            ViewEvent::StateChanged(state) => {
                if state.loading_indicator {
                    self.close_line();
                    self.write(&format!("{}\n", state.button_label));
                } else if state.input_enabled {
                    self.streaming = None;
                    self.close_line();
                }
            }
            ViewEvent::InputCleared | ViewEvent::ScrollTo { .. } => {}
        }
    }
}
