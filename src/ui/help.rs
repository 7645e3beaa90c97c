use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::App;

/// Keybinding entries: (key, description)
const KEYBINDINGS: &[(&str, &str)] = &[
    ("Space", "Animate the next node"),
    ("Enter", "Animate the next node"),
    ("Click", "Animate the next node"),
    ("?", "Toggle this help"),
    ("Esc / q", "Quit"),
    ("Ctrl+C", "Quit"),
];

/// Render the help overlay
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let width = 44_u16.min(area.width.saturating_sub(4));
    let height = (KEYBINDINGS.len() as u16 + 6).min(area.height.saturating_sub(2));

    let dialog = centered_rect_fixed(width, height, area);
    frame.render_widget(Clear, dialog);

    let block = Block::default()
        .title(Span::styled(" Keybindings ", t.style_accent_bold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(t.style_accent())
        .style(t.style_default());

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(""));

    for (key, desc) in KEYBINDINGS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<10}", key), t.style_key_hint()),
            Span::styled(*desc, t.style_default()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Press ", t.style_dim()),
        Span::styled("?", t.style_key_hint()),
        Span::styled(" to close", t.style_dim()),
    ]));

    let para = Paragraph::new(lines).block(block);
    frame.render_widget(para, dialog);
}

/// Center a fixed-size rectangle inside `area`
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [dialog] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    dialog
}
