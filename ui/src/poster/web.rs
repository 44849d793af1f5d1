//! Browser backend: replays a draw list onto an off-screen `<canvas>`.

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

use super::draw::{Arc, Canvas, Paint, Point, Rect, Stroke, TextAlign, TextStyle};
use super::error::PosterError;
use super::surface::RenderSurface;
use super::svg::clamp_radius;

/// `Canvas` over a 2D rendering context. The first failing call is kept and
/// reported by [`WebCanvas::finish`].
pub struct WebCanvas<'a> {
    ctx: &'a CanvasRenderingContext2d,
    error: Option<String>,
}

impl<'a> WebCanvas<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx, error: None }
    }

    pub fn finish(self) -> Result<(), PosterError> {
        match self.error {
            Some(err) => Err(PosterError::Render(err)),
            None => Ok(()),
        }
    }

    fn check(&mut self, result: Result<(), JsValue>) {
        if let Err(err) = result {
            if self.error.is_none() {
                self.error = Some(format!("{err:?}"));
            }
        }
    }

    fn gradient(&mut self, paint: &Paint) -> Option<CanvasGradient> {
        let gradient = match paint {
            Paint::Solid(_) => return None,
            Paint::Linear(linear) => Some(self.ctx.create_linear_gradient(
                linear.start.x,
                linear.start.y,
                linear.end.x,
                linear.end.y,
            )),
            Paint::Radial(radial) => {
                let created = self.ctx.create_radial_gradient(
                    radial.center.x,
                    radial.center.y,
                    radial.inner_radius,
                    radial.center.x,
                    radial.center.y,
                    radial.outer_radius,
                );
                match created {
                    Ok(gradient) => Some(gradient),
                    Err(err) => {
                        self.check(Err(err));
                        None
                    }
                }
            }
        }?;
        for stop in paint.stops() {
            let added = gradient.add_color_stop(stop.offset as f32, &stop.color.to_css());
            self.check(added);
        }
        Some(gradient)
    }

    fn set_fill(&mut self, paint: &Paint) {
        match (paint, self.gradient(paint)) {
            (Paint::Solid(color), _) => self.ctx.set_fill_style_str(&color.to_css()),
            (_, Some(gradient)) => self.ctx.set_fill_style_canvas_gradient(&gradient),
            (_, None) => {}
        }
    }

    fn set_stroke(&mut self, stroke: &Stroke) {
        match (&stroke.paint, self.gradient(&stroke.paint)) {
            (Paint::Solid(color), _) => self.ctx.set_stroke_style_str(&color.to_css()),
            (_, Some(gradient)) => self.ctx.set_stroke_style_canvas_gradient(&gradient),
            (_, None) => {}
        }
        self.ctx.set_line_width(stroke.width);
        self.ctx.set_line_cap(stroke.cap.as_css());
    }

    fn round_rect_path(&mut self, rect: Rect, radius: f64) {
        let r = clamp_radius(rect, radius);
        let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);
        self.ctx.begin_path();
        self.ctx.move_to(x + r, y);
        let corners = [
            self.ctx.arc_to(x + w, y, x + w, y + h, r),
            self.ctx.arc_to(x + w, y + h, x, y + h, r),
            self.ctx.arc_to(x, y + h, x, y, r),
            self.ctx.arc_to(x, y, x + w, y, r),
        ];
        for corner in corners {
            self.check(corner);
        }
        self.ctx.close_path();
    }

    fn circle_path(&mut self, center: Point, radius: f64) {
        self.ctx.begin_path();
        let result = self.ctx.arc(center.x, center.y, radius, 0.0, TAU);
        self.check(result);
    }
}

impl Canvas for WebCanvas<'_> {
    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.set_fill(paint);
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        self.set_fill(paint);
        self.circle_path(center, radius);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: &Stroke) {
        self.set_stroke(stroke);
        self.circle_path(center, radius);
        self.ctx.stroke();
    }

    fn stroke_arc(&mut self, arc: Arc, stroke: &Stroke) {
        self.set_stroke(stroke);
        self.ctx.begin_path();
        let result = self.ctx.arc(
            arc.center.x,
            arc.center.y,
            arc.radius,
            arc.start_angle,
            arc.end_angle,
        );
        self.check(result);
        self.ctx.stroke();
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: f64, paint: &Paint) {
        self.set_fill(paint);
        self.round_rect_path(rect, radius);
        self.ctx.fill();
    }

    fn stroke_round_rect(&mut self, rect: Rect, radius: f64, stroke: &Stroke) {
        self.set_stroke(stroke);
        self.round_rect_path(rect, radius);
        self.ctx.stroke();
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        self.set_stroke(stroke);
        self.ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.ctx.set_font(&style.css_font());
        self.ctx.set_text_baseline("alphabetic");
        self.ctx.set_text_align(match style.align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        });
        self.ctx.set_fill_style_str(&style.color.to_css());
        let result = self.ctx.fill_text(text, at.x, at.y);
        self.check(result);
    }
}

/// Paint the surface onto a fresh canvas element and serialize it as a PNG
/// data URL.
pub fn render_data_url(surface: &RenderSurface) -> Result<String, PosterError> {
    let render_err = |what: &str| PosterError::Render(what.to_string());

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| render_err("document unavailable"))?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| render_err("unable to create canvas"))?
        .dyn_into()
        .map_err(|_| render_err("canvas cast failed"))?;

    let (width, height) = surface.pixel_size();
    canvas.set_width(width);
    canvas.set_height(height);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|_| render_err("canvas context unavailable"))?
        .ok_or_else(|| render_err("canvas context missing"))?
        .dyn_into()
        .map_err(|_| render_err("context cast failed"))?;

    let ratio = surface.pixel_ratio();
    ctx.scale(ratio, ratio)
        .map_err(|_| render_err("unable to scale context"))?;

    let mut target = WebCanvas::new(&ctx);
    surface.draw_list().replay(&mut target);
    target.finish()?;

    canvas
        .to_data_url_with_type("image/png")
        .map_err(|_| render_err("unable to serialise canvas"))
}
