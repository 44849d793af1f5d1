use super::draw::DrawList;
use super::layout::{self, POSTER_HEIGHT, POSTER_WIDTH};
use super::payload::PosterPayload;

/// Device pixel ratio applied when the surface is rasterized.
pub const DEVICE_PIXEL_RATIO: f64 = 2.0;

/// Fixed-size drawing target owned by one open poster modal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderSurface {
    list: DrawList,
}

impl RenderSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a surface and draw `payload` onto it.
    pub fn rendered(payload: &PosterPayload) -> Self {
        let mut surface = Self::new();
        surface.draw(payload);
        surface
    }

    /// Clear, then paint `payload`.
    pub fn draw(&mut self, payload: &PosterPayload) {
        self.clear();
        layout::render(payload, &mut self.list);
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }

    pub fn is_blank(&self) -> bool {
        self.list.is_empty()
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.list
    }

    pub fn logical_size(&self) -> (f64, f64) {
        (POSTER_WIDTH, POSTER_HEIGHT)
    }

    pub fn pixel_ratio(&self) -> f64 {
        DEVICE_PIXEL_RATIO
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (POSTER_WIDTH * DEVICE_PIXEL_RATIO).round() as u32,
            (POSTER_HEIGHT * DEVICE_PIXEL_RATIO).round() as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poster::{InvitePoster, PosterContent};

    fn invite(code: &str) -> PosterPayload {
        PosterPayload::new(
            "邀请",
            "小林",
            PosterContent::Invite(InvitePoster {
                invite_code: code.into(),
            }),
        )
    }

    #[test]
    fn redraw_replaces_previous_content() {
        let mut surface = RenderSurface::rendered(&invite("AAAA"));
        let first = surface.draw_list().commands().len();

        surface.draw(&invite("BBBB"));
        assert_eq!(surface.draw_list().commands().len(), first);
        assert!(surface.draw_list().texts().any(|(t, _, _)| t == "BBBB"));
        assert!(!surface.draw_list().texts().any(|(t, _, _)| t == "AAAA"));
    }

    #[test]
    fn clear_blanks_the_surface() {
        let mut surface = RenderSurface::rendered(&invite("AAAA"));
        assert!(!surface.is_blank());
        surface.clear();
        assert!(surface.is_blank());
        assert_eq!(surface.pixel_size(), (750, 1334));
    }
}
