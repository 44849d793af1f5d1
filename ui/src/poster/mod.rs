//! Client-side poster generation for sharing reports, achievements and
//! invite codes.
//!
//! Pipeline: [`PosterPayload`] → [`layout::render`] records draw calls on a
//! [`RenderSurface`] → [`export::derive_artifact`] rasterizes it (resvg
//! natively, an off-screen `<canvas>` in the browser) → [`export::download`]
//! or [`export::copy_to_clipboard`].

pub mod draw;
pub mod export;
pub mod fonts;
pub mod layout;
mod error;
mod payload;
mod surface;
pub mod svg;

#[cfg(not(target_arch = "wasm32"))]
pub mod raster;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::PosterError;
pub use export::ExportArtifact;
pub use payload::{
    AchievementPoster, Dimension, InvitePoster, PosterContent, PosterKind, PosterPayload,
    ReportPoster, MAX_SCORE,
};
pub use surface::{RenderSurface, DEVICE_PIXEL_RATIO};
