//! Picker theme
//!
//! Supports multiple color depths for terminal compatibility.

use ratatui::style::{Color, Modifier, Style};

/// Terminal color capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Basic 16 ANSI colors (maximum compatibility)
    Basic,
    /// 256 color palette
    #[default]
    Indexed,
    /// True color (24-bit RGB)
    TrueColor,
}

impl ColorMode {
    /// Detect the best color mode for the current terminal
    pub fn detect() -> Self {
        Self::from_env(
            std::env::var("COLORTERM").ok().as_deref(),
            std::env::var("TERM").ok().as_deref(),
        )
    }

    fn from_env(colorterm: Option<&str>, term: Option<&str>) -> Self {
        if matches!(colorterm, Some("truecolor" | "24bit")) {
            return Self::TrueColor;
        }

        match term {
            Some(t) if t.contains("kitty") || t.contains("alacritty") => Self::TrueColor,
            Some(t) if t.contains("256color") => Self::Indexed,
            _ => Self::Basic,
        }
    }
}

/// Colors used by the picker
#[derive(Debug, Clone)]
pub struct Theme {
    pub border: Color,

    pub selection_bg: Color,
    pub selection_fg: Option<Color>,

    /// Characters matched by the query
    pub matched: Color,

    // Item markers
    pub marker_live: Color,
    pub marker_worktree: Color,
    pub marker_session: Color,

    /// Tree-drawing prefix of worktree children
    pub tree: Color,

    pub prompt: Color,
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_color_mode(ColorMode::detect())
    }
}

impl Theme {
    pub fn for_color_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Basic => Self::basic(),
            ColorMode::Indexed => Self::indexed(),
            ColorMode::TrueColor => Self::truecolor(),
        }
    }

    pub fn basic() -> Self {
        Self {
            border: Color::DarkGray,
            selection_bg: Color::Blue,
            selection_fg: Some(Color::White),
            matched: Color::Yellow,
            marker_live: Color::Green,
            marker_worktree: Color::Magenta,
            marker_session: Color::Cyan,
            tree: Color::DarkGray,
            prompt: Color::Cyan,
            text_secondary: Color::DarkGray,
        }
    }

    pub fn indexed() -> Self {
        Self {
            border: Color::Indexed(243),
            selection_bg: Color::Indexed(60),     // Muted purple-blue
            selection_fg: Some(Color::Indexed(255)),
            matched: Color::Indexed(222),         // Pastel peach
            marker_live: Color::Indexed(156),     // Pastel mint green
            marker_worktree: Color::Indexed(183), // Pastel orchid
            marker_session: Color::Indexed(117),  // Pastel sky blue
            tree: Color::Indexed(243),
            prompt: Color::Indexed(147),          // Pastel lavender
            text_secondary: Color::Indexed(250),
        }
    }

    pub fn truecolor() -> Self {
        Self {
            border: Color::Rgb(88, 91, 112),
            selection_bg: Color::Rgb(69, 71, 90),
            selection_fg: Some(Color::Rgb(245, 245, 250)),
            matched: Color::Rgb(249, 226, 175),          // Pastel peach
            marker_live: Color::Rgb(166, 227, 161),      // Pastel mint
            marker_worktree: Color::Rgb(203, 166, 247),  // Pastel mauve
            marker_session: Color::Rgb(137, 180, 250),   // Pastel sky
            tree: Color::Rgb(88, 91, 112),
            prompt: Color::Rgb(180, 190, 254),           // Pastel periwinkle
            text_secondary: Color::Rgb(166, 173, 200),
        }
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for the row under the cursor
    pub fn selection(&self) -> Style {
        let style = Style::default().bg(self.selection_bg);
        match self.selection_fg {
            Some(fg) => style.fg(fg),
            None => style,
        }
    }

    pub fn matched(&self) -> Style {
        Style::default()
            .fg(self.matched)
            .add_modifier(Modifier::BOLD)
    }

    /// Color for an item marker such as `[x]` or `[TMUX]`
    pub fn marker(&self, marker: &str) -> Style {
        let color = match marker {
            "[x]" => self.marker_live,
            "[w]" => self.marker_worktree,
            "[TMUX]" => self.marker_session,
            _ => return Style::default(),
        };
        Style::default().fg(color)
    }
}
