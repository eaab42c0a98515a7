use std::path::Path;

use ab_glyph::PxScale;
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

use crate::{
    constants::{DEFAULT_FONT_PATHS, DEFAULT_FONT_SIZE, DEFAULT_TEXT_COLOR},
    font::{self, FontChoice, OverlayFont},
    geometry::BoundingBox,
};

/// Draws translated text onto the canvas at a region's top-left corner.
///
/// Text is neither fitted nor wrapped and has no background, so a long
/// translation may run past its region.
pub struct OverlayRenderer {
    font: OverlayFont,
    choice: FontChoice,
    font_size: f32,
    color: Rgba<u8>,
}

impl OverlayRenderer {
    pub fn new<P: AsRef<Path>>(font_candidates: &[P], font_size: f32, color: Rgba<u8>) -> Self {
        let (font, choice) = font::resolve_font(font_candidates);
        Self {
            font,
            choice,
            font_size,
            color,
        }
    }

    /// Renderer that always uses the built-in bitmap font.
    pub fn builtin(font_size: f32, color: Rgba<u8>) -> Self {
        Self {
            font: OverlayFont::Builtin,
            choice: FontChoice::Builtin { failures: Vec::new() },
            font_size,
            color,
        }
    }

    pub fn font_choice(&self) -> &FontChoice {
        &self.choice
    }

    pub fn draw(&self, canvas: &mut RgbaImage, region: BoundingBox, text: &str) {
        let (x, y) = (region.x1 as i32, region.y1 as i32);
        match &self.font {
            OverlayFont::Truetype(font) => draw_text_mut(
                canvas,
                self.color,
                x,
                y,
                PxScale::from(self.font_size),
                font,
                text,
            ),
            OverlayFont::Builtin => {
                font::draw_builtin(canvas, self.color, x, y, self.font_size, text)
            }
        }
    }
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_PATHS, DEFAULT_FONT_SIZE, Rgba(DEFAULT_TEXT_COLOR))
    }
}
