pub mod canvas;
pub mod help;
pub mod status_bar;
pub mod theme;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::app::App;
use canvas::CanvasSurface;

/// Top-level draw function: the arrow chain fills the screen above a
/// one-line status bar
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Widget
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    let mut surface = CanvasSurface::for_area(chunks[0]);
    app.renderer.render(&mut surface);
    surface.render(f, chunks[0]);

    status_bar::render(f, app, chunks[1]);

    if app.show_help {
        help::render(f, app, f.area());
    }
}
