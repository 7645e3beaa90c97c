use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::theme::Theme;
use crate::animation::spinner::{direction_glyph, spinner_frame};
use crate::app::App;

/// Render the bottom status bar: key hints on the left, chain state on the right
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let hints = Paragraph::new(Line::from(hints(theme))).style(theme.style_default());
    frame.render_widget(hints, chunks[0]);

    let status = Paragraph::new(Line::from(chain_status(app)))
        .style(theme.style_default())
        .alignment(Alignment::Right);
    frame.render_widget(status, chunks[1]);
}

fn hints(theme: &Theme) -> Vec<Span<'static>> {
    vec![
        key(theme, "Space/Click"),
        desc(theme, "Step "),
        key(theme, "?"),
        desc(theme, "Help "),
        key(theme, "q"),
        desc(theme, "Quit"),
    ]
}

/// `node 2/5 ▼ ⠙` style summary of the chain
pub(crate) fn chain_status(app: &App) -> Vec<Span<'static>> {
    let theme = &app.theme;
    let renderer = &app.renderer;
    let chain = renderer.chain();

    let mut spans = vec![
        Span::styled("node ", theme.style_dim()),
        Span::styled(
            format!("{}/{}", chain.active_index() + 1, chain.len()),
            theme.style_active(),
        ),
        Span::styled(
            format!(" {} ", direction_glyph(chain.direction().sign())),
            theme.style_default(),
        ),
        Span::styled(
            format!("{:.2} ", chain.active().state.scale),
            theme.style_dim(),
        ),
    ];
    if renderer.is_animating() {
        spans.push(Span::styled(
            format!("{} ", spinner_frame(renderer.frame_count())),
            theme.style_active(),
        ));
    } else {
        spans.push(Span::styled("idle ", theme.style_dim()));
    }
    spans
}

fn key(theme: &Theme, k: &'static str) -> Span<'static> {
    Span::styled(format!(" [{k}] "), theme.style_key_hint())
}

fn desc(theme: &Theme, d: &'static str) -> Span<'static> {
    Span::styled(d, theme.style_key_desc())
}
