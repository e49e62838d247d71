//! Avatar rendering
//!
//! Glyph geometry comes from the core in a y-down box; the canvas is y-up,
//! so every point is flipped on the way in.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle, Line, Rectangle},
        Widget,
    },
};

use helpme_core::{Avatar, AvatarSize, Glyph, Shape};

use crate::theme::avatar_color;

/// Terminal cells (width, height) an avatar occupies at each size
pub fn cell_bounds(size: AvatarSize) -> (u16, u16) {
    match size {
        AvatarSize::Small => (6, 3),
        AvatarSize::Medium => (10, 5),
        AvatarSize::Large => (16, 8),
    }
}

/// One-character stand-in for list rows
pub fn shape_symbol(shape: Shape) -> &'static str {
    match shape {
        Shape::Circle => "●",
        Shape::Triangle => "▲",
        Shape::Square => "■",
        Shape::Diamond => "◆",
        Shape::Hexagon => "⬢",
        Shape::Star => "★",
    }
}

pub struct AvatarWidget {
    avatar: Avatar,
    size: AvatarSize,
}

impl AvatarWidget {
    pub fn new(avatar: Avatar, size: AvatarSize) -> Self {
        Self { avatar, size }
    }

    /// Center an area of this avatar's cell bounds inside `area`
    pub fn area_in(&self, area: Rect) -> Rect {
        let (width, height) = cell_bounds(self.size);
        let width = width.min(area.width);
        let height = height.min(area.height);
        Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        )
    }
}

impl Widget for AvatarWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dim = self.size.dimension();
        let color = avatar_color(&self.avatar.color);
        let glyph = self.avatar.shape.glyph(dim);
        let flip = |y: f64| dim - y;

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, dim])
            .y_bounds([0.0, dim])
            .paint(|ctx| match &glyph {
                Glyph::Circle { cx, cy, r } => ctx.draw(&Circle {
                    x: *cx,
                    y: flip(*cy),
                    radius: *r,
                    color,
                }),
                Glyph::Rect {
                    x,
                    y,
                    width,
                    height,
                } => ctx.draw(&Rectangle {
                    x: *x,
                    y: flip(*y + *height),
                    width: *width,
                    height: *height,
                    color,
                }),
                Glyph::Polygon(_) => {
                    for ((x1, y1), (x2, y2)) in glyph.edges() {
                        ctx.draw(&Line::new(x1, flip(y1), x2, flip(y2), color));
                    }
                }
            })
            .background_color(Color::Reset)
            .render(area, buf);
    }
}
