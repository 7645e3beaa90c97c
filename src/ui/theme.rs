use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeConfig;

// ─── Color Palette ──────────────────────────────────────────────────────

/// Status bar text on top of the widget background
pub const FG: Color = Color::Black;

/// Colors for the chrome around the widget (status bar, help overlay).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub foreground: Color,
    pub background: Color,
    pub accent: Color,
    pub dim: Color,
}

impl From<&ThemeConfig> for Theme {
    fn from(config: &ThemeConfig) -> Self {
        Self {
            foreground: config.foreground,
            background: config.background,
            accent: config.accent,
            dim: config.dim,
        }
    }
}

// ─── Style Constructors ──────────────────────────────────────────────────

impl Theme {
    pub fn style_default(&self) -> Style {
        Style::default().fg(FG).bg(self.background)
    }

    pub fn style_dim(&self) -> Style {
        Style::default().fg(self.dim).bg(self.background)
    }

    pub fn style_accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn style_accent_bold(&self) -> Style {
        self.style_accent().add_modifier(Modifier::BOLD)
    }

    /// Highlights the active node in the status bar
    pub fn style_active(&self) -> Style {
        Style::default()
            .fg(self.foreground)
            .bg(self.background)
            .add_modifier(Modifier::BOLD)
    }

    pub fn style_key_hint(&self) -> Style {
        Style::default()
            .fg(self.foreground)
            .bg(self.background)
            .add_modifier(Modifier::BOLD)
    }

    pub fn style_key_desc(&self) -> Style {
        self.style_dim()
    }
}
