use glam::{Affine2, Vec2};
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};
use ratatui::Frame;

use crate::geometry::{Stroke, Surface};

/// Braille dots per terminal cell.
const DOTS_X: f32 = 2.0;
const DOTS_Y: f32 = 4.0;

/// Extra parallel passes are capped so thick strokes stay legible.
const MAX_STROKE_PASSES: usize = 3;

/// A segment already mapped to surface coordinates (y-down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
    pub color: Color,
}

/// Terminal-backed drawing surface.
///
/// Transforms compose like a canvas matrix; lines are collected in surface
/// space and painted onto a ratatui `Canvas` in one go.
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    width: f32,
    height: f32,
    transform: Affine2,
    stack: Vec<Affine2>,
    background: Color,
    segments: Vec<Segment>,
}

impl CanvasSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            transform: Affine2::IDENTITY,
            stack: Vec::new(),
            background: Color::Reset,
            segments: Vec::new(),
        }
    }

    /// Surface covering `area` at Braille resolution.
    pub fn for_area(area: Rect) -> Self {
        Self::new(area.width as f32 * DOTS_X, area.height as f32 * DOTS_Y)
    }

    #[cfg(test)]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[cfg(test)]
    pub fn background(&self) -> Color {
        self.background
    }

    /// Paint everything collected so far into `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if area.is_empty() || self.width <= 0.0 || self.height <= 0.0 {
            return;
        }
        let height = self.height as f64;
        let canvas = Canvas::default()
            .background_color(self.background)
            .marker(Marker::Braille)
            .x_bounds([0.0, self.width as f64])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for segment in &self.segments {
                    // Canvas y grows upward
                    ctx.draw(&CanvasLine {
                        x1: segment.from.x as f64,
                        y1: height - segment.from.y as f64,
                        x2: segment.to.x as f64,
                        y2: height - segment.to.y as f64,
                        color: segment.color,
                    });
                }
            });
        frame.render_widget(canvas, area);
    }
}

/// Number of one-dot passes used to fake a stroke of `width` dots.
fn stroke_passes(width: f32) -> usize {
    (width.round().max(1.0) as usize).min(MAX_STROKE_PASSES)
}

impl Surface for CanvasSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self, color: Color) {
        self.background = color;
        self.segments.clear();
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(transform) = self.stack.pop() {
            self.transform = transform;
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.transform = self.transform * Affine2::from_translation(Vec2::new(dx, dy));
    }

    fn rotate(&mut self, degrees: f32) {
        self.transform = self.transform * Affine2::from_angle(degrees.to_radians());
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) {
        let from = self.transform.transform_point2(from);
        let to = self.transform.transform_point2(to);
        let passes = stroke_passes(stroke.width);
        let normal = (to - from).perp().normalize_or_zero();
        for pass in 0..passes {
            let offset = normal * (pass as f32 - (passes - 1) as f32 / 2.0);
            self.segments.push(Segment {
                from: from + offset,
                to: to + offset,
                color: stroke.color,
            });
        }
    }
}
