use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use ab_glyph::FontVec;
use image::{Rgba, RgbaImage};
use log::{debug, warn};

/// Font used to draw overlay text.
pub enum OverlayFont {
    Truetype(FontVec),
    /// 5x7 bitmap font for printable ASCII.
    Builtin,
}

/// Which font [`resolve_font`] ended up with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontChoice {
    Preferred(PathBuf),
    /// Every candidate, with why it could not be used.
    Builtin { failures: Vec<(PathBuf, FontFailure)> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFailure {
    Missing,
    Unreadable,
    Unparsable,
}

/// Loads the first readable font among `candidates`, falling back to the
/// built-in bitmap font. Never fails.
pub fn resolve_font<P: AsRef<Path>>(candidates: &[P]) -> (OverlayFont, FontChoice) {
    let mut failures = Vec::with_capacity(candidates.len());

    for path in candidates {
        let path = path.as_ref();
        match load_font(path) {
            Ok(font) => {
                debug!("Using overlay font {}", path.display());
                return (OverlayFont::Truetype(font), FontChoice::Preferred(path.to_path_buf()));
            }
            Err(failure) => {
                debug!("Font {} unusable: {:?}", path.display(), failure);
                failures.push((path.to_path_buf(), failure));
            }
        }
    }

    warn!("No preferred font could be loaded, using the built-in bitmap font");
    (OverlayFont::Builtin, FontChoice::Builtin { failures })
}

fn load_font(path: &Path) -> Result<FontVec, FontFailure> {
    let data = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => FontFailure::Missing,
        _ => FontFailure::Unreadable,
    })?;
    // Collections (.ttc) use their first face.
    FontVec::try_from_vec_and_index(data, 0).map_err(|_| FontFailure::Unparsable)
}

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;

/// Integer scale of the bitmap font for a requested pixel size.
pub fn builtin_scale(font_size: f32) -> u32 {
    ((font_size / 8.0) as u32).max(1)
}

/// Draws `text` with the bitmap font, top-left corner at `(x, y)`.
/// Pixels falling outside the canvas are clipped.
pub fn draw_builtin(canvas: &mut RgbaImage, color: Rgba<u8>, x: i32, y: i32, font_size: f32, text: &str) {
    let scale = builtin_scale(font_size) as i64;
    let (width, height) = (canvas.width() as i64, canvas.height() as i64);
    let mut pen_x = x as i64;

    for ch in text.chars() {
        let columns = glyph(ch);
        for (col, bits) in columns.iter().enumerate() {
            for row in 0..GLYPH_HEIGHT as i64 {
                if (bits >> row) & 1 == 0 {
                    continue;
                }
                let px = pen_x + col as i64 * scale;
                let py = y as i64 + row * scale;
                for dy in 0..scale {
                    for dx in 0..scale {
                        let (cx, cy) = (px + dx, py + dy);
                        if (0..width).contains(&cx) && (0..height).contains(&cy) {
                            canvas.put_pixel(cx as u32, cy as u32, color);
                        }
                    }
                }
            }
        }
        pen_x += GLYPH_ADVANCE as i64 * scale;
    }
}

/// Column-major glyph bitmaps, bit 0 is the top row.
fn glyph(ch: char) -> &'static [u8; 5] {
    let code = ch as u32;
    if (0x20..0x7f).contains(&code) {
        &ASCII_5X7[(code - 0x20) as usize]
    } else {
        &ASCII_5X7[('?' as u32 - 0x20) as usize]
    }
}

#[rustfmt::skip]
static ASCII_5X7: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5f, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7f, 0x14, 0x7f, 0x14], // #
    [0x24, 0x2a, 0x7f, 0x2a, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x1c, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1c, 0x00], // )
    [0x08, 0x2a, 0x1c, 0x2a, 0x08], // *
    [0x08, 0x08, 0x3e, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3e, 0x51, 0x49, 0x45, 0x3e], // 0
    [0x00, 0x42, 0x7f, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4b, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7f, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3c, 0x4a, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1e], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3e], // @
    [0x7e, 0x11, 0x11, 0x11, 0x7e], // A
    [0x7f, 0x49, 0x49, 0x49, 0x36], // B
    [0x3e, 0x41, 0x41, 0x41, 0x22], // C
    [0x7f, 0x41, 0x41, 0x22, 0x1c], // D
    [0x7f, 0x49, 0x49, 0x49, 0x41], // E
    [0x7f, 0x09, 0x09, 0x09, 0x01], // F
    [0x3e, 0x41, 0x49, 0x49, 0x7a], // G
    [0x7f, 0x08, 0x08, 0x08, 0x7f], // H
    [0x00, 0x41, 0x7f, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3f, 0x01], // J
    [0x7f, 0x08, 0x14, 0x22, 0x41], // K
    [0x7f, 0x40, 0x40, 0x40, 0x40], // L
    [0x7f, 0x02, 0x0c, 0x02, 0x7f], // M
    [0x7f, 0x04, 0x08, 0x10, 0x7f], // N
    [0x3e, 0x41, 0x41, 0x41, 0x3e], // O
    [0x7f, 0x09, 0x09, 0x09, 0x06], // P
    [0x3e, 0x41, 0x51, 0x21, 0x5e], // Q
    [0x7f, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7f, 0x01, 0x01], // T
    [0x3f, 0x40, 0x40, 0x40, 0x3f], // U
    [0x1f, 0x20, 0x40, 0x20, 0x1f], // V
    [0x3f, 0x40, 0x38, 0x40, 0x3f], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x7f, 0x41, 0x41, 0x00], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // \
    [0x00, 0x41, 0x41, 0x7f, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7f, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7f], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7e, 0x09, 0x01, 0x02], // f
    [0x0c, 0x52, 0x52, 0x52, 0x3e], // g
    [0x7f, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7d, 0x40, 0x00], // i
    [0x20, 0x40, 0x44, 0x3d, 0x00], // j
    [0x7f, 0x10, 0x28, 0x44, 0x00], // k
    [0x00, 0x41, 0x7f, 0x40, 0x00], // l
    [0x7c, 0x04, 0x18, 0x04, 0x78], // m
    [0x7c, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x7c, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x18, 0x7c], // q
    [0x7c, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3f, 0x44, 0x40, 0x20], // t
    [0x3c, 0x40, 0x40, 0x20, 0x7c], // u
    [0x1c, 0x20, 0x40, 0x20, 0x1c], // v
    [0x3c, 0x40, 0x30, 0x40, 0x3c], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x0c, 0x50, 0x50, 0x50, 0x3c], // y
    [0x44, 0x64, 0x54, 0x4c, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7f, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x08, 0x04, 0x08, 0x10, 0x08], // ~
];
