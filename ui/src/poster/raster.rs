//! Native rasterization: draw list → SVG → resvg → pixels → PNG.

use std::sync::Arc;

use once_cell::sync::Lazy;
use resvg::{tiny_skia, usvg};

use super::error::PosterError;
use super::surface::RenderSurface;
use super::svg;

/// System fonts, loaded once. CJK and emoji glyphs come from whatever the
/// platform ships.
static FONT_DB: Lazy<Arc<usvg::fontdb::Database>> = Lazy::new(|| {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    tracing::debug!(faces = db.len(), "loaded system fonts for poster rendering");
    Arc::new(db)
});

/// Straight-alpha RGBA8 pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub fn rasterize(surface: &RenderSurface) -> Result<Bitmap, PosterError> {
    let (logical_w, logical_h) = surface.logical_size();
    let markup = svg::to_svg(surface.draw_list(), logical_w, logical_h);

    let mut options = usvg::Options::default();
    options.fontdb = FONT_DB.clone();
    let tree = usvg::Tree::from_str(&markup, &options)
        .map_err(|err| PosterError::Render(err.to_string()))?;

    let (width, height) = surface.pixel_size();
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PosterError::Render(format!("cannot allocate {width}x{height} pixmap")))?;

    let scale = surface.pixel_ratio() as f32;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    let rgba = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();

    Ok(Bitmap {
        width,
        height,
        rgba,
    })
}

pub fn encode_png(bitmap: &Bitmap) -> Result<Vec<u8>, PosterError> {
    let mut buffer = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buffer, bitmap.width, bitmap.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .write_header()
            .map_err(|err| PosterError::Encode(err.to_string()))?
            .write_image_data(&bitmap.rgba)
            .map_err(|err| PosterError::Encode(err.to_string()))?;
    }
    Ok(buffer)
}

pub fn decode_png(bytes: &[u8]) -> Result<Bitmap, PosterError> {
    let decoder = png::Decoder::new(bytes);
    let mut reader = decoder
        .read_info()
        .map_err(|err| PosterError::Encode(err.to_string()))?;
    let mut rgba = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut rgba)
        .map_err(|err| PosterError::Encode(err.to_string()))?;
    if info.color_type != png::ColorType::Rgba || info.bit_depth != png::BitDepth::Eight {
        return Err(PosterError::Encode(format!(
            "unexpected PNG layout {:?}/{:?}",
            info.color_type, info.bit_depth
        )));
    }
    rgba.truncate(info.buffer_size());
    Ok(Bitmap {
        width: info.width,
        height: info.height,
        rgba,
    })
}
