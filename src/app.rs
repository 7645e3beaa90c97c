use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind};
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::ArrowResult;
use crate::event::{Event, EventScheduler};
use crate::renderer::ArrowRenderer;
use crate::ui::theme::Theme;

// ── Application State ─────────────────────────────────────────────────

pub struct App {
    pub should_quit: bool,
    pub show_help: bool,
    pub theme: Theme,
    pub renderer: ArrowRenderer<EventScheduler>,
}

impl App {
    pub fn new(config: &Config, event_tx: mpsc::UnboundedSender<Event>) -> ArrowResult<Self> {
        let widget = config.widget()?;
        Ok(Self {
            should_quit: false,
            show_help: false,
            theme: Theme::from(&config.theme),
            renderer: ArrowRenderer::new(widget, EventScheduler::new(event_tx)),
        })
    }

    /// Route a non-redraw event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                    self.tap();
                }
            }
            Event::Resize(w, h) => {
                debug!(w, h, "terminal resized");
                self.renderer.request_redraw();
            }
            Event::Redraw => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.show_help = !self.show_help;
                self.renderer.request_redraw();
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.tap(),
            _ => {}
        }
    }

    fn tap(&mut self) {
        if !self.renderer.handle_tap() {
            trace!("tap ignored: step in progress");
        }
    }
}
