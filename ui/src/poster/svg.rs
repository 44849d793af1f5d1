//! SVG serialization of a draw list. Used for native rasterization (resvg)
//! and handy for inspecting a layout in a browser.

use std::f64::consts::{PI, TAU};
use std::fmt::Write;

use super::draw::{
    trim_float as n, Arc, Canvas, DrawList, Paint, Point, Rect, Stroke, TextAlign, TextStyle,
    FONT_FAMILY,
};

const EPSILON: f64 = 1e-9;

/// Canvas that writes SVG elements.
#[derive(Debug, Default)]
pub struct SvgCanvas {
    defs: String,
    body: String,
    next_gradient: usize,
}

impl SvgCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish the document with the given logical size.
    pub fn finish(self, width: f64, height: f64) -> String {
        let mut out = String::with_capacity(self.defs.len() + self.body.len() + 256);
        let _ = write!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
            w = n(width),
            h = n(height)
        );
        if !self.defs.is_empty() {
            out.push_str("<defs>");
            out.push_str(&self.defs);
            out.push_str("</defs>");
        }
        out.push_str(&self.body);
        out.push_str("</svg>");
        out
    }

    /// Attribute value for a paint, registering gradient defs as needed.
    fn paint_ref(&mut self, paint: &Paint) -> String {
        match paint {
            Paint::Solid(color) => color.to_css(),
            Paint::Linear(gradient) => {
                let id = self.gradient_id();
                let _ = write!(
                    self.defs,
                    "<linearGradient id=\"{id}\" gradientUnits=\"userSpaceOnUse\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\">",
                    n(gradient.start.x),
                    n(gradient.start.y),
                    n(gradient.end.x),
                    n(gradient.end.y)
                );
                self.write_stops(paint);
                self.defs.push_str("</linearGradient>");
                format!("url(#{id})")
            }
            Paint::Radial(gradient) => {
                let id = self.gradient_id();
                let _ = write!(
                    self.defs,
                    "<radialGradient id=\"{id}\" gradientUnits=\"userSpaceOnUse\" cx=\"{cx}\" cy=\"{cy}\" r=\"{}\" fx=\"{cx}\" fy=\"{cy}\" fr=\"{}\">",
                    n(gradient.outer_radius),
                    n(gradient.inner_radius),
                    cx = n(gradient.center.x),
                    cy = n(gradient.center.y),
                );
                self.write_stops(paint);
                self.defs.push_str("</radialGradient>");
                format!("url(#{id})")
            }
        }
    }

    fn gradient_id(&mut self) -> String {
        self.next_gradient += 1;
        format!("g{}", self.next_gradient)
    }

    fn write_stops(&mut self, paint: &Paint) {
        for stop in paint.stops() {
            let _ = write!(
                self.defs,
                "<stop offset=\"{}\" stop-color=\"{}\"/>",
                n(stop.offset),
                stop.color.to_css()
            );
        }
    }

    fn stroke_attrs(&mut self, stroke: &Stroke) -> String {
        let paint = self.paint_ref(&stroke.paint);
        format!(
            "fill=\"none\" stroke=\"{paint}\" stroke-width=\"{}\" stroke-linecap=\"{}\"",
            n(stroke.width),
            stroke.cap.as_css()
        )
    }
}

impl Canvas for SvgCanvas {
    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let fill = self.paint_ref(paint);
        let _ = write!(
            self.body,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{fill}\"/>",
            n(rect.x),
            n(rect.y),
            n(rect.width),
            n(rect.height)
        );
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        let fill = self.paint_ref(paint);
        let _ = write!(
            self.body,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{fill}\"/>",
            n(center.x),
            n(center.y),
            n(radius)
        );
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: &Stroke) {
        let attrs = self.stroke_attrs(stroke);
        let _ = write!(
            self.body,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" {attrs}/>",
            n(center.x),
            n(center.y),
            n(radius)
        );
    }

    fn stroke_arc(&mut self, arc: Arc, stroke: &Stroke) {
        let span = arc.span();
        if span.abs() < EPSILON {
            return;
        }
        if span.abs() >= TAU - EPSILON {
            self.stroke_circle(arc.center, arc.radius, stroke);
            return;
        }

        let start = point_on(arc.center, arc.radius, arc.start_angle);
        let end = point_on(arc.center, arc.radius, arc.end_angle);
        let large_arc = u8::from(span.abs() > PI);
        let sweep = u8::from(span > 0.0);
        let attrs = self.stroke_attrs(stroke);
        let _ = write!(
            self.body,
            "<path d=\"M {} {} A {r} {r} 0 {large_arc} {sweep} {} {}\" {attrs}/>",
            n(start.x),
            n(start.y),
            n(end.x),
            n(end.y),
            r = n(arc.radius),
        );
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: f64, paint: &Paint) {
        let fill = self.paint_ref(paint);
        let radius = clamp_radius(rect, radius);
        let _ = write!(
            self.body,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{r}\" ry=\"{r}\" fill=\"{fill}\"/>",
            n(rect.x),
            n(rect.y),
            n(rect.width),
            n(rect.height),
            r = n(radius),
        );
    }

    fn stroke_round_rect(&mut self, rect: Rect, radius: f64, stroke: &Stroke) {
        let attrs = self.stroke_attrs(stroke);
        let radius = clamp_radius(rect, radius);
        let _ = write!(
            self.body,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{r}\" ry=\"{r}\" {attrs}/>",
            n(rect.x),
            n(rect.y),
            n(rect.width),
            n(rect.height),
            r = n(radius),
        );
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        self.stroke_round_rect(rect, 0.0, stroke);
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        let anchor = match style.align {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
            TextAlign::Right => "end",
        };
        let _ = write!(
            self.body,
            "<text x=\"{}\" y=\"{}\" font-family=\"{FONT_FAMILY}\" font-size=\"{}\" font-weight=\"{}\" fill=\"{}\" text-anchor=\"{anchor}\">{}</text>",
            n(at.x),
            n(at.y),
            n(style.size),
            style.weight.css_weight(),
            style.color.to_css(),
            escape_xml(text)
        );
    }
}

/// Serialize a draw list into a standalone SVG document.
pub fn to_svg(list: &DrawList, width: f64, height: f64) -> String {
    let mut canvas = SvgCanvas::new();
    list.replay(&mut canvas);
    canvas.finish(width, height)
}

fn point_on(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Rounded-rect radius limited to half of the shorter side (canvas
/// `roundRect` behaviour). Zero-width bars get a zero radius.
pub(crate) fn clamp_radius(rect: Rect, radius: f64) -> f64 {
    radius
        .min(rect.width.abs() / 2.0)
        .min(rect.height.abs() / 2.0)
        .max(0.0)
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
