//! Interactive picker
//!
//! Takes over the terminal, lets the user narrow the item list with a fuzzy
//! query and returns the chosen item (or nothing on cancel). Multiplexer
//! state is never touched here beyond capturing panes for the preview.

use std::io::{self, Stdout};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use tracing::{debug, info};

use super::event::{EventLoop, InputEvent, UserCommand};
use super::theme::Theme;
use super::widgets::{ItemList, PreviewPane, PreviewView};
use crate::error::{Result, TuiError};
use crate::picker::Selector;
use crate::preview::Previewer;
use crate::provider::Item;

const PROMPT: &str = "> ";

/// Run the picker over `items`; `None` means the user cancelled
pub async fn select(items: Vec<Item>, previewer: Previewer) -> Result<Option<Item>> {
    App::new(items, previewer).run().await
}

/// Picker UI state
#[derive(Default)]
pub struct AppUiState {
    /// Preview of the highlighted row
    pub preview: Option<PreviewPane>,
    /// Set once the user picks or cancels
    pub done: bool,
    pub chosen: Option<Item>,
}

/// Main picker application
pub struct App {
    selector: Selector,
    previewer: Previewer,
    theme: Theme,
    ui_state: AppUiState,
}

impl App {
    pub fn new(items: Vec<Item>, previewer: Previewer) -> Self {
        Self {
            selector: Selector::new(items),
            previewer,
            theme: Theme::default(),
            ui_state: AppUiState::default(),
        }
    }

    /// Run until the user picks or cancels
    pub async fn run(mut self) -> Result<Option<Item>> {
        let mut terminal = self.setup_terminal()?;
        let mut events = EventLoop::new();

        let result = self.main_loop(&mut terminal, &mut events).await;
        drop(events);

        self.restore_terminal(&mut terminal)?;
        result?;

        info!(
            "Picker closed: {}",
            self.ui_state
                .chosen
                .as_ref()
                .map_or("cancelled", |item| item.id.as_str())
        );
        Ok(self.ui_state.chosen)
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode().map_err(|e| TuiError::InitFailed(e.to_string()))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)
            .map_err(|e| TuiError::InitFailed(e.to_string()))?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).map_err(|e| TuiError::InitFailed(e.to_string()))?;

        Ok(terminal)
    }

    fn restore_terminal(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode().map_err(|e| TuiError::RestoreFailed(e.to_string()))?;

        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|e| TuiError::RestoreFailed(e.to_string()))?;

        terminal
            .show_cursor()
            .map_err(|e| TuiError::RestoreFailed(e.to_string()))?;

        Ok(())
    }

    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        events: &mut EventLoop,
    ) -> Result<()> {
        while !self.ui_state.done {
            self.update_preview().await;

            terminal
                .draw(|f| self.render(f))
                .map_err(|e| TuiError::RenderError(e.to_string()))?;

            match events.next().await {
                Some(InputEvent::Key(key)) => {
                    if let Some(cmd) = UserCommand::from_key(key) {
                        self.handle_command(cmd);
                    }
                }
                // Redrawn on the next iteration
                Some(InputEvent::Resize(..)) => {}
                None => {
                    let closed = TuiError::EventError("terminal input closed".to_string());
                    return Err(closed.into());
                }
            }
        }

        Ok(())
    }

    /// Rebuild the preview when the highlighted row changes
    async fn update_preview(&mut self) {
        let Some(item) = self.selector.selected() else {
            self.ui_state.preview = None;
            return;
        };

        if let Some(ref pane) = self.ui_state.preview {
            if pane.key == item.display {
                return;
            }
        }

        debug!("Building preview for '{}'", item.id);
        let text = self.previewer.preview(item).await;
        self.ui_state.preview = Some(PreviewPane::new(item, text));
    }

    pub fn handle_command(&mut self, cmd: UserCommand) {
        match cmd {
            UserCommand::NavigateUp => self.selector.move_up(),
            UserCommand::NavigateDown => self.selector.move_down(),
            UserCommand::TextInput(c) => self.selector.push_char(c),
            UserCommand::Backspace => self.selector.pop_char(),
            UserCommand::ClearQuery => self.selector.set_query(""),
            UserCommand::PageUp => {
                if let Some(pane) = self.ui_state.preview.as_mut() {
                    pane.half_page_up();
                }
            }
            UserCommand::PageDown => {
                if let Some(pane) = self.ui_state.preview.as_mut() {
                    pane.half_page_down();
                }
            }
            UserCommand::Select => {
                // Enter on an empty list does nothing
                if let Some(item) = self.selector.selected() {
                    self.ui_state.chosen = Some(item.clone());
                    self.ui_state.done = true;
                }
            }
            UserCommand::Cancel => {
                self.ui_state.chosen = None;
                self.ui_state.done = true;
            }
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(frame.area());

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(columns[0]);

        frame.render_widget(ItemList::new(&self.selector, &self.theme), left[0]);
        self.render_query(frame, left[1]);
        self.render_preview(frame, columns[1]);
    }

    fn render_query(&self, frame: &mut Frame, area: Rect) {
        let query = self.selector.query();
        let line = Line::from(vec![
            Span::styled(PROMPT, Style::default().fg(self.theme.prompt)),
            Span::raw(query),
            Span::styled(
                format!("  {}/{}", self.selector.entries().len(), self.selector.total()),
                Style::default().fg(self.theme.text_secondary),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);

        let column = (PROMPT.len() + query.chars().count()) as u16;
        frame.set_cursor_position((area.x + column.min(area.width.saturating_sub(1)), area.y));
    }

    fn render_preview(&mut self, frame: &mut Frame, area: Rect) {
        // Inside the border
        if let Some(pane) = self.ui_state.preview.as_mut() {
            pane.fit(area.width.saturating_sub(2), area.height.saturating_sub(2));
        }

        let view = PreviewView::new(self.ui_state.preview.as_ref(), &self.theme);
        frame.render_widget(view, area);
    }
}
