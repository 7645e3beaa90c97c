//! Arrow cluster geometry.
//!
//! Each node is drawn as `lines` short strokes stacked in rows of two. The
//! strokes rotate open one after another during the first half of a step;
//! during the second half the whole cluster slides right and turns by 90
//! degrees (clockwise for even nodes, counter-clockwise for odd ones).

use glam::Vec2;
use ratatui::style::Color;
use serde::Serialize;

use crate::animation::scale::{divide_scale, half_index, parity_sign};
use crate::config::WidgetConfig;

/// Paint used for strokes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

/// Minimal drawing API the widget needs from its host.
///
/// Coordinates are y-down; positive rotations turn clockwise on screen.
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    fn clear(&mut self, color: Color);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    fn rotate(&mut self, degrees: f32);
    fn draw_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke);
}

/// Chain layout derived from the surface size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeLayout {
    /// Vertical distance between node centers
    pub gap: f32,
    /// Half extent of a cluster
    pub size: f32,
    /// Stroke width
    pub stroke_width: f32,
}

impl NodeLayout {
    pub fn new(width: f32, height: f32, config: &WidgetConfig) -> Self {
        let gap = height / (config.nodes + 1) as f32;
        Self {
            gap,
            size: gap / config.size_factor,
            stroke_width: width.min(height) / config.stroke_factor,
        }
    }
}

/// Draw node `index` at progress `scale`.
pub fn draw_arrow_node<S: Surface + ?Sized>(
    surface: &mut S,
    index: usize,
    scale: f32,
    config: &WidgetConfig,
) {
    let w = surface.width();
    let h = surface.height();
    let layout = NodeLayout::new(w, h, config);
    let size = layout.size;
    let stroke = Stroke {
        color: config.foreground,
        width: layout.stroke_width,
    };
    let sc1 = divide_scale(scale, 0, 2);
    let sc2 = divide_scale(scale, 1, 2);
    let sf = parity_sign(index);

    surface.save();
    surface.translate(
        w / 2.0 + (w / 2.0 + size) * divide_scale(sc2, 1, 2),
        layout.gap * (index + 1) as f32,
    );
    surface.rotate(90.0 * sf * divide_scale(sc2, 0, 2));
    surface.translate(0.0, -size);
    for j in 0..config.lines {
        let sc = divide_scale(sc1, j, config.lines);
        surface.save();
        draw_rotating_arrow(
            surface,
            2.0 * size,
            size / config.arrow_size_factor,
            j,
            sc,
            config.arrow_degrees,
            &stroke,
        );
        surface.restore();
    }
    surface.restore();
}

fn draw_rotating_arrow<S: Surface + ?Sized>(
    surface: &mut S,
    row_gap: f32,
    arrow_size: f32,
    j: usize,
    scale: f32,
    degrees: f32,
    stroke: &Stroke,
) {
    let flip = parity_sign(j);
    surface.save();
    surface.translate(0.0, row_gap * half_index(j) as f32);
    surface.rotate(degrees * flip * scale);
    surface.draw_line(Vec2::ZERO, Vec2::new(arrow_size * flip, 0.0), stroke);
    surface.restore();
}

// ─── Command Recording ──────────────────────────────────────────────────

/// One call made against a [`Surface`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        color: Color,
    },
    Save,
    Restore,
    Translate {
        dx: f32,
        dy: f32,
    },
    Rotate {
        degrees: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Stroke,
    },
}

/// A surface that only remembers what was asked of it.
#[derive(Debug, Clone, Serialize)]
pub struct CommandRecorder {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[cfg(test)]
    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

impl Surface for CommandRecorder {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear { color });
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.commands.push(DrawCommand::Translate { dx, dy });
    }

    fn rotate(&mut self, degrees: f32) {
        self.commands.push(DrawCommand::Rotate { degrees });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) {
        self.commands.push(DrawCommand::Line {
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
            stroke: *stroke,
        });
    }
}
