use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    process::Command,
};

use image::RgbaImage;
use log::{debug, warn};

use crate::error::PresentError;

/// Shows the finished image. Returns once the user is done with it.
pub trait Presenter {
    fn present(&self, image: &RgbaImage) -> Result<(), PresentError>;
}

/// Opens the image in the system viewer and waits for Enter.
pub struct ViewerPresenter {
    preview_path: PathBuf,
}

impl Default for ViewerPresenter {
    fn default() -> Self {
        let name = format!("ocr_translate_preview_{}.png", std::process::id());
        Self {
            preview_path: std::env::temp_dir().join(name),
        }
    }
}

impl Presenter for ViewerPresenter {
    fn present(&self, image: &RgbaImage) -> Result<(), PresentError> {
        image.save(&self.preview_path)?;
        debug!("Preview written to {}", self.preview_path.display());

        let waited = open_viewer(&self.preview_path).and_then(|()| wait_for_enter());
        if let Err(e) = std::fs::remove_file(&self.preview_path) {
            warn!("Could not remove preview {}: {}", self.preview_path.display(), e);
        }
        waited
    }
}

fn wait_for_enter() -> Result<(), PresentError> {
    print!("Press Enter to close the preview...");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}

fn open_viewer(path: &Path) -> Result<(), PresentError> {
    #[cfg(target_os = "windows")]
    let mut command = {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]).arg(path);
        c
    };
    #[cfg(target_os = "macos")]
    let mut command = {
        let mut c = Command::new("open");
        c.arg(path);
        c
    };
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let mut command = {
        let mut c = Command::new("xdg-open");
        c.arg(path);
        c
    };

    command.spawn()?;
    Ok(())
}

/// Writes the image to a file instead of showing it.
pub struct SavePresenter {
    path: PathBuf,
}

impl SavePresenter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Presenter for SavePresenter {
    fn present(&self, image: &RgbaImage) -> Result<(), PresentError> {
        image.save(&self.path)?;
        println!("Result image saved: {}", self.path.display());
        Ok(())
    }
}
