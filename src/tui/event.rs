//! Event handling for the picker
//!
//! Terminal input is read through crossterm's async `EventStream`, owned by
//! the picker for exactly as long as it holds the terminal.

use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use futures::StreamExt;
use tracing::debug;

/// Input events from the terminal
#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

/// User commands triggered by input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Move the cursor toward the top of the list
    NavigateUp,
    /// Move the cursor toward the query line
    NavigateDown,
    /// Pick the item under the cursor
    Select,
    /// Leave without picking anything
    Cancel,
    /// Append to the query
    TextInput(char),
    Backspace,
    ClearQuery,
    /// Page up in preview
    PageUp,
    /// Page down in preview
    PageDown,
}

impl UserCommand {
    /// Convert a key event to a user command
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        match (key.code, key.modifiers) {
            // Navigation
            (KeyCode::Up, _) | (KeyCode::Char('p' | 'k'), KeyModifiers::CONTROL) => {
                Some(UserCommand::NavigateUp)
            }
            (KeyCode::Down, _) | (KeyCode::Char('n' | 'j'), KeyModifiers::CONTROL) => {
                Some(UserCommand::NavigateDown)
            }

            (KeyCode::Enter, _) => Some(UserCommand::Select),

            (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                Some(UserCommand::Cancel)
            }

            // Query editing
            (KeyCode::Backspace, _) => Some(UserCommand::Backspace),
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => Some(UserCommand::ClearQuery),

            // Preview scrolling
            (KeyCode::PageUp, _) => Some(UserCommand::PageUp),
            (KeyCode::PageDown, _) => Some(UserCommand::PageDown),

            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                Some(UserCommand::TextInput(c))
            }

            _ => None,
        }
    }
}

/// Terminal input source
pub struct EventLoop {
    reader: EventStream,
}

impl EventLoop {
    pub fn new() -> Self {
        Self {
            reader: EventStream::new(),
        }
    }

    /// Receive the next key press or resize; `None` once input is closed
    pub async fn next(&mut self) -> Option<InputEvent> {
        while let Some(event) = self.reader.next().await {
            match event {
                // Key releases are reported on some platforms
                Ok(CrosstermEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                    return Some(InputEvent::Key(key));
                }
                Ok(CrosstermEvent::Resize(w, h)) => return Some(InputEvent::Resize(w, h)),
                Ok(_) => {}
                Err(e) => debug!("Error reading terminal event: {}", e),
            }
        }
        None
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}
