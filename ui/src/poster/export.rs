//! Turning a rendered surface into something the user can keep: a PNG file
//! download or an image on the system clipboard.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::error::PosterError;
use super::surface::RenderSurface;

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// PNG-encoded poster. Derived on demand from a [`RenderSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    png: Vec<u8>,
    width: u32,
    height: u32,
}

impl ExportArtifact {
    pub fn from_png(png: Vec<u8>, width: u32, height: u32) -> Self {
        Self { png, width, height }
    }

    /// Parse a `data:image/png;base64,...` URL (what `canvas.toDataURL`
    /// returns).
    pub fn from_data_url(url: &str, width: u32, height: u32) -> Result<Self, PosterError> {
        let encoded = url
            .strip_prefix(DATA_URL_PREFIX)
            .ok_or_else(|| PosterError::Encode("malformed data URL".into()))?;
        let png = STANDARD
            .decode(encoded)
            .map_err(|err| PosterError::Encode(err.to_string()))?;
        Ok(Self::from_png(png, width, height))
    }

    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn data_url(&self) -> String {
        format!("{DATA_URL_PREFIX}{}", STANDARD.encode(&self.png))
    }
}

/// Rasterize `surface` into a PNG artifact.
pub fn derive_artifact(surface: &RenderSurface) -> Result<ExportArtifact, PosterError> {
    if surface.is_blank() {
        return Err(PosterError::Render("surface has not been drawn".into()));
    }

    #[cfg(target_arch = "wasm32")]
    {
        let (width, height) = surface.pixel_size();
        let url = super::web::render_data_url(surface)?;
        ExportArtifact::from_data_url(&url, width, height)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let bitmap = super::raster::rasterize(surface)?;
        let png = super::raster::encode_png(&bitmap)?;
        Ok(ExportArtifact::from_png(png, bitmap.width, bitmap.height))
    }
}

/// `{prefix}-YYYYMMDD_HHMMSS.png`
pub fn poster_filename(prefix: &str) -> String {
    format!("{prefix}-{}.png", timestamp_slug())
}

fn timestamp_slug() -> String {
    use time::{macros::format_description, OffsetDateTime};

    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "poster".into())
}

/// Save the artifact. In the browser a transient anchor triggers the
/// download (`Ok(None)`); natively the file lands in the app's export
/// directory and its path is returned.
pub async fn download(artifact: &ExportArtifact, filename: &str) -> Result<Option<String>, PosterError> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::HtmlAnchorElement;

        let fail = |what: &str| PosterError::Download(what.to_string());

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| fail("document unavailable"))?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| fail("unable to create anchor"))?
            .dyn_into()
            .map_err(|_| fail("anchor cast failed"))?;
        anchor.set_href(&artifact.data_url());
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or_else(|| fail("missing body"))?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();

        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let dir = crate::core::storage::data_dir()
            .map_err(|err| PosterError::Download(err.to_string()))?
            .join("exports");
        std::fs::create_dir_all(&dir).map_err(|err| PosterError::Download(err.to_string()))?;
        let path = dir.join(filename);
        std::fs::write(&path, artifact.png_bytes())
            .map_err(|err| PosterError::Download(err.to_string()))?;
        tracing::info!(path = %path.display(), "poster saved");
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

/// Put the poster image on the system clipboard.
pub async fn copy_to_clipboard(artifact: &ExportArtifact) -> Result<(), PosterError> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen_futures::JsFuture;
        use web_sys::{Blob, BlobPropertyBag, ClipboardItem};

        let fail = |what: String| PosterError::Clipboard(what);

        let window = web_sys::window().ok_or_else(|| fail("window unavailable".into()))?;
        let clipboard = window.navigator().clipboard();

        let bytes = js_sys::Uint8Array::from(artifact.png_bytes());
        let parts = js_sys::Array::of1(&bytes);
        let opts = BlobPropertyBag::new();
        opts.set_type("image/png");
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|err| fail(format!("{err:?}")))?;

        let record = js_sys::Object::new();
        js_sys::Reflect::set(&record, &"image/png".into(), &blob)
            .map_err(|err| fail(format!("{err:?}")))?;
        let item = ClipboardItem::new_with_record_from_str_to_blob_promise(&record)
            .map_err(|err| fail(format!("{err:?}")))?;

        JsFuture::from(clipboard.write(&js_sys::Array::of1(&item)))
            .await
            .map_err(|err| fail(format!("{err:?}")))?;
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::borrow::Cow;

        let bitmap = super::raster::decode_png(artifact.png_bytes())?;
        let mut clipboard =
            arboard::Clipboard::new().map_err(|err| PosterError::Clipboard(err.to_string()))?;
        clipboard
            .set_image(arboard::ImageData {
                width: bitmap.width as usize,
                height: bitmap.height as usize,
                bytes: Cow::Owned(bitmap.rgba),
            })
            .map_err(|err| PosterError::Clipboard(err.to_string()))
    }
}

/// Put plain text (a share link) on the clipboard.
pub async fn copy_text(text: String) -> Result<(), PosterError> {
    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window()
            .ok_or_else(|| PosterError::Clipboard("window unavailable".into()))?;
        wasm_bindgen_futures::JsFuture::from(window.navigator().clipboard().write_text(&text))
            .await
            .map_err(|err| PosterError::Clipboard(format!("{err:?}")))?;
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|err| PosterError::Clipboard(err.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|err| PosterError::Clipboard(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_round_trips_bytes() {
        let artifact = ExportArtifact::from_png(vec![0x89, b'P', b'N', b'G'], 1, 1);
        let url = artifact.data_url();
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(ExportArtifact::from_data_url(&url, 1, 1).unwrap(), artifact);
    }

    #[test]
    fn foreign_data_url_rejected() {
        let err = ExportArtifact::from_data_url("data:image/jpeg;base64,AAAA", 1, 1).unwrap_err();
        assert!(matches!(err, PosterError::Encode(_)));
    }

    #[test]
    fn blank_surface_cannot_export() {
        let err = derive_artifact(&RenderSurface::new()).unwrap_err();
        assert!(matches!(err, PosterError::Render(_)));
    }

    #[test]
    fn filename_is_timestamped() {
        let name = poster_filename("pitchcraft-poster");
        assert!(name.starts_with("pitchcraft-poster-"));
        assert!(name.ends_with(".png"));
        // prefix + '-' + YYYYMMDD_HHMMSS + ".png"
        assert_eq!(name.len(), "pitchcraft-poster-".len() + 15 + 4);
    }
}
