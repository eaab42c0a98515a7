use std::path::{Path, PathBuf};

use arboard::Clipboard;
use image::RgbaImage;
use log::{debug, info};

use crate::error::InputError;

/// Where the image for a run comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Path(PathBuf),
    Clipboard,
}

impl ImageSource {
    /// Source for a drag-and-drop payload.
    pub fn dropped(payload: &str) -> Self {
        Self::Path(normalize_dropped_path(payload))
    }

    pub fn load(&self) -> Result<RgbaImage, InputError> {
        match self {
            Self::Path(path) => load_path(path),
            Self::Clipboard => load_clipboard(),
        }
    }
}

pub fn load_path(path: &Path) -> Result<RgbaImage, InputError> {
    let image = image::open(path).map_err(|source| InputError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Loaded {} ({}x{})", path.display(), image.width(), image.height());
    Ok(image.to_rgba8())
}

pub fn load_clipboard() -> Result<RgbaImage, InputError> {
    let mut clipboard = Clipboard::new().map_err(|e| InputError::Clipboard(e.to_string()))?;
    let data = match clipboard.get_image() {
        Ok(data) => data,
        Err(arboard::Error::ContentNotAvailable) => {
            info!("No image on the clipboard");
            return Err(InputError::NothingToProcess);
        }
        Err(e) => return Err(InputError::Clipboard(e.to_string())),
    };

    let (width, height) = (data.width, data.height);
    if width == 0 || height == 0 {
        return Err(InputError::NothingToProcess);
    }
    RgbaImage::from_raw(width as u32, height as u32, data.bytes.into_owned())
        .ok_or(InputError::MalformedClipboardImage { width, height })
}

/// Drag-and-drop payloads may wrap paths containing spaces in `{}` or quotes.
pub fn normalize_dropped_path(payload: &str) -> PathBuf {
    let trimmed = payload.trim();
    let unwrapped = trimmed
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .or_else(|| trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .unwrap_or(trimmed);
    PathBuf::from(unwrapped)
}
