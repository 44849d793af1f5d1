//! Font metrics used by poster layout for line wrapping.
//!
//! Without the `embed_fonts` feature every measurement comes from width
//! heuristics tuned for the PingFang / Noto Sans CJK families the poster asks
//! for: CJK and emoji glyphs are one em wide, Latin glyphs roughly half.
//! With the feature enabled a Noto Sans SC subset is embedded and real glyph
//! advances are used, falling back to the heuristic for glyphs the font
//! lacks.
//!
//! Expected font location with the feature enabled (relative to this file):
//! - ../../assets/fonts/NotoSansSC-Regular.otf

use once_cell::sync::Lazy;

#[cfg(feature = "embed_fonts")]
use fontdue::Font;

use super::draw::FontWeight;

/// Vertical metrics for a font size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// Line height used for stacking wrapped lines.
    pub line_h: f64,
    /// Distance from the top of the line box to the baseline.
    pub asc: f64,
    /// Distance below the baseline (positive).
    pub desc: f64,
}

#[cfg(feature = "embed_fonts")]
pub struct Fonts {
    regular: Option<Font>,
}

#[cfg(not(feature = "embed_fonts"))]
pub struct Fonts;

impl Fonts {
    pub fn load() -> Self {
        #[cfg(feature = "embed_fonts")]
        {
            const SC_BYTES: &[u8] = include_bytes!("../../assets/fonts/NotoSansSC-Regular.otf");
            let regular = match Font::from_bytes(SC_BYTES, Default::default()) {
                Ok(font) => Some(font),
                Err(err) => {
                    tracing::warn!("embedded poster font failed to parse: {err}");
                    None
                }
            };
            Fonts { regular }
        }
        #[cfg(not(feature = "embed_fonts"))]
        {
            Fonts
        }
    }

    pub fn metrics(&self, _weight: FontWeight, size_px: f64) -> TextMetrics {
        let line_h = (size_px * 1.4).round();
        let asc = (size_px * 0.88).round();
        let desc = (line_h - asc).max(size_px * 0.12).round();
        TextMetrics { line_h, asc, desc }
    }

    /// Horizontal advance of one glyph.
    pub fn advance(&self, ch: char, weight: FontWeight, size_px: f64) -> f64 {
        #[cfg(feature = "embed_fonts")]
        {
            if let Some(font) = self.regular.as_ref() {
                if font.lookup_glyph_index(ch) != 0 {
                    let width = font.metrics(ch, size_px as f32).advance_width as f64;
                    return match weight {
                        FontWeight::Bold => width * 1.04,
                        _ => width,
                    };
                }
            }
        }
        heuristic_advance(ch, weight, size_px)
    }

    pub fn measure(&self, text: &str, weight: FontWeight, size_px: f64) -> f64 {
        text.chars().map(|ch| self.advance(ch, weight, size_px)).sum()
    }
}

fn heuristic_advance(ch: char, weight: FontWeight, size_px: f64) -> f64 {
    let em = if is_wide(ch) {
        1.0
    } else if ch == ' ' {
        0.28
    } else if ch.is_ascii_uppercase() || ch.is_ascii_digit() {
        0.62
    } else if ch.is_ascii_punctuation() {
        0.36
    } else {
        0.54
    };
    let bold = if weight == FontWeight::Bold { 1.05 } else { 1.0 };
    size_px * em * bold
}

/// CJK ideographs, kana, hangul, fullwidth forms and emoji.
fn is_wide(ch: char) -> bool {
    matches!(ch as u32,
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3040..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA960..=0xA97F
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x1F300..=0x1FAFF
        | 0x20000..=0x3FFFD)
}

static FONTS: Lazy<Fonts> = Lazy::new(Fonts::load);

pub fn fonts() -> &'static Fonts {
    &FONTS
}

pub fn measure(text: &str, weight: FontWeight, size_px: f64) -> f64 {
    fonts().measure(text, weight, size_px)
}

/// Greedy character wrapping (works for CJK text without spaces). At most
/// `max_lines` lines are returned; overflow is marked with an ellipsis on the
/// last line.
pub fn wrap_text(
    text: &str,
    max_width: f64,
    weight: FontWeight,
    size_px: f64,
    max_lines: usize,
) -> Vec<String> {
    let fonts = fonts();
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut width = 0.0;

    for ch in text.trim().chars() {
        if ch == '\n' {
            lines.push(std::mem::take(&mut current));
            width = 0.0;
            continue;
        }
        let advance = fonts.advance(ch, weight, size_px);
        if width + advance > max_width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            width = 0.0;
            if ch == ' ' {
                continue;
            }
        }
        current.push(ch);
        width += advance;
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if max_lines > 0 && lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let ellipsis_w = fonts.advance('…', weight, size_px);
            while !last.is_empty() && fonts.measure(last, weight, size_px) + ellipsis_w > max_width
            {
                last.pop();
            }
            last.push('…');
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_increase_with_size() {
        let small = fonts().metrics(FontWeight::Regular, 12.0);
        let large = fonts().metrics(FontWeight::Regular, 48.0);
        assert!(large.line_h > small.line_h);
        assert!(large.asc > small.asc);
    }

    #[test]
    fn cjk_is_wider_than_latin() {
        let cjk = measure("开场", FontWeight::Regular, 14.0);
        let latin = measure("ab", FontWeight::Regular, 14.0);
        assert!(cjk > latin);
    }

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(
            wrap_text("完成一次训练对话", 295.0, FontWeight::Regular, 14.0, 3),
            vec!["完成一次训练对话".to_string()]
        );
    }

    #[test]
    fn long_text_is_capped_with_ellipsis() {
        let text = "沟通".repeat(80);
        let lines = wrap_text(&text, 200.0, FontWeight::Regular, 14.0, 3);
        assert_eq!(lines.len(), 3);
        assert!(lines[2].ends_with('…'));
        for line in &lines {
            assert!(measure(line, FontWeight::Regular, 14.0) <= 200.0 + 0.01);
        }
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(wrap_text("   ", 100.0, FontWeight::Regular, 14.0, 3).is_empty());
    }
}
