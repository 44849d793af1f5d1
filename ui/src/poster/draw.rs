//! Drawing primitives shared by every poster backend.
//!
//! Layout code talks to the [`Canvas`] trait only. [`DrawList`] records the
//! calls so they can be compared in tests and replayed onto a real target
//! (SVG for native rasterization, a browser 2D context on the web).

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Straight (non-premultiplied) RGBA color, alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Self::rgb(
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        )
    }

    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// CSS color string understood by both SVG and the canvas API.
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({},{},{},{})",
                self.r,
                self.g,
                self.b,
                trim_float(self.a.max(0.0))
            )
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Color,
}

pub const fn stop(offset: f64, color: Color) -> ColorStop {
    ColorStop { offset, color }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: Vec<ColorStop>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub stops: Vec<ColorStop>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear(LinearGradient),
    Radial(RadialGradient),
}

impl Paint {
    pub fn linear(start: Point, end: Point, stops: &[ColorStop]) -> Self {
        Paint::Linear(LinearGradient {
            start,
            end,
            stops: stops.to_vec(),
        })
    }

    pub fn radial(center: Point, inner_radius: f64, outer_radius: f64, stops: &[ColorStop]) -> Self {
        Paint::Radial(RadialGradient {
            center,
            inner_radius,
            outer_radius,
            stops: stops.to_vec(),
        })
    }

    pub fn stops(&self) -> &[ColorStop] {
        match self {
            Paint::Solid(_) => &[],
            Paint::Linear(gradient) => &gradient.stops,
            Paint::Radial(gradient) => &gradient.stops,
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

impl LineCap {
    pub fn as_css(&self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f64,
    pub cap: LineCap,
}

impl Stroke {
    pub fn new(paint: impl Into<Paint>, width: f64) -> Self {
        Self {
            paint: paint.into(),
            width,
            cap: LineCap::Butt,
        }
    }

    pub fn round(mut self) -> Self {
        self.cap = LineCap::Round;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    SemiBold,
    Bold,
}

impl FontWeight {
    pub fn css_weight(&self) -> u16 {
        match self {
            FontWeight::Regular => 400,
            FontWeight::SemiBold => 600,
            FontWeight::Bold => 700,
        }
    }
}

/// Font family list used everywhere on the poster.
pub const FONT_FAMILY: &str =
    "'PingFang SC', 'Noto Sans CJK SC', 'Microsoft YaHei', 'Noto Color Emoji', sans-serif";

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub weight: FontWeight,
    pub color: Color,
    pub align: TextAlign,
}

impl TextStyle {
    pub fn new(size: f64, color: Color) -> Self {
        Self {
            size,
            weight: FontWeight::Regular,
            color,
            align: TextAlign::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn semibold(mut self) -> Self {
        self.weight = FontWeight::SemiBold;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }

    pub fn right(mut self) -> Self {
        self.align = TextAlign::Right;
        self
    }

    /// CSS `font` shorthand (canvas `ctx.font`).
    pub fn css_font(&self) -> String {
        format!(
            "{} {}px {}",
            self.weight.css_weight(),
            trim_float(self.size),
            FONT_FAMILY
        )
    }
}

/// Arc segment, angles in radians measured clockwise from 3 o'clock
/// (canvas convention).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Arc {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// 2D drawing target. Text baselines are alphabetic; `at.x` is interpreted
/// according to the style's alignment.
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, paint: &Paint);
    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint);
    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: &Stroke);
    fn stroke_arc(&mut self, arc: Arc, stroke: &Stroke);
    fn fill_round_rect(&mut self, rect: Rect, radius: f64, paint: &Paint);
    fn stroke_round_rect(&mut self, rect: Rect, radius: f64, stroke: &Stroke);
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke);
    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        paint: Paint,
    },
    FillCircle {
        center: Point,
        radius: f64,
        paint: Paint,
    },
    StrokeCircle {
        center: Point,
        radius: f64,
        stroke: Stroke,
    },
    StrokeArc {
        arc: Arc,
        stroke: Stroke,
    },
    FillRoundRect {
        rect: Rect,
        radius: f64,
        paint: Paint,
    },
    StrokeRoundRect {
        rect: Rect,
        radius: f64,
        stroke: Stroke,
    },
    StrokeRect {
        rect: Rect,
        stroke: Stroke,
    },
    FillText {
        text: String,
        at: Point,
        style: TextStyle,
    },
}

/// Recorded sequence of draw calls.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Every string passed to `fill_text`, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, Point, &TextStyle)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::FillText { text, at, style } => Some((text.as_str(), *at, style)),
            _ => None,
        })
    }

    /// Issue the recorded calls against another canvas.
    pub fn replay<C: Canvas + ?Sized>(&self, target: &mut C) {
        for command in &self.commands {
            match command {
                DrawCommand::FillRect { rect, paint } => target.fill_rect(*rect, paint),
                DrawCommand::FillCircle {
                    center,
                    radius,
                    paint,
                } => target.fill_circle(*center, *radius, paint),
                DrawCommand::StrokeCircle {
                    center,
                    radius,
                    stroke,
                } => target.stroke_circle(*center, *radius, stroke),
                DrawCommand::StrokeArc { arc, stroke } => target.stroke_arc(*arc, stroke),
                DrawCommand::FillRoundRect {
                    rect,
                    radius,
                    paint,
                } => target.fill_round_rect(*rect, *radius, paint),
                DrawCommand::StrokeRoundRect {
                    rect,
                    radius,
                    stroke,
                } => target.stroke_round_rect(*rect, *radius, stroke),
                DrawCommand::StrokeRect { rect, stroke } => target.stroke_rect(*rect, stroke),
                DrawCommand::FillText { text, at, style } => target.fill_text(text, *at, style),
            }
        }
    }
}

impl Canvas for DrawList {
    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            paint: paint.clone(),
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            paint: paint.clone(),
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            stroke: stroke.clone(),
        });
    }

    fn stroke_arc(&mut self, arc: Arc, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeArc {
            arc,
            stroke: stroke.clone(),
        });
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: f64, paint: &Paint) {
        self.commands.push(DrawCommand::FillRoundRect {
            rect,
            radius,
            paint: paint.clone(),
        });
    }

    fn stroke_round_rect(&mut self, rect: Rect, radius: f64, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeRoundRect {
            rect,
            radius,
            stroke: stroke.clone(),
        });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            stroke: stroke.clone(),
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            at,
            style: style.clone(),
        });
    }
}

/// Shortest decimal form for markup (`2` instead of `2.0`, 3 decimals max).
pub(crate) fn trim_float(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        let text = format!("{rounded:.3}");
        text.trim_end_matches('0').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_css_forms() {
        assert_eq!(Color::hex(0x667eea).to_css(), "#667eea");
        assert_eq!(Color::WHITE.with_alpha(0.15).to_css(), "rgba(255,255,255,0.15)");
    }

    #[test]
    fn trim_float_drops_trailing_zeros() {
        assert_eq!(trim_float(2.0), "2");
        assert_eq!(trim_float(187.5), "187.5");
        assert_eq!(trim_float(-1.5707963), "-1.571");
    }

    #[test]
    fn replay_reproduces_the_list() {
        let mut original = DrawList::new();
        original.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), &Color::WHITE.into());
        original.fill_text("hi", Point::new(1.0, 2.0), &TextStyle::new(12.0, Color::WHITE));

        let mut copy = DrawList::new();
        original.replay(&mut copy);
        assert_eq!(original, copy);
    }
}
