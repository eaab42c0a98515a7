use std::path::PathBuf;

use image::Rgba;

use crate::{
    constants::*, overlay::OverlayRenderer, redact::Redactor, transcript::TranscriptWriter,
};

/// Settings for one run. Everything defaults to the constants in
/// [`crate::constants`].
#[derive(Debug, Clone)]
pub struct Config {
    pub source_lang: String,
    pub target_lang: String,
    pub source_label: String,
    pub target_label: String,
    pub blur_kernel: u32,
    pub font_size: f32,
    pub text_color: [u8; 4],
    /// Tried in order; the built-in font is used when none loads.
    pub font_paths: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub detector_langs: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_lang: DEFAULT_SOURCE_LANG.to_string(),
            target_lang: DEFAULT_TARGET_LANG.to_string(),
            source_label: DEFAULT_SOURCE_LABEL.to_string(),
            target_label: DEFAULT_TARGET_LABEL.to_string(),
            blur_kernel: DEFAULT_BLUR_KERNEL,
            font_size: DEFAULT_FONT_SIZE,
            text_color: DEFAULT_TEXT_COLOR,
            font_paths: DEFAULT_FONT_PATHS.iter().map(PathBuf::from).collect(),
            output_dir: PathBuf::from("."),
            detector_langs: DEFAULT_DETECTOR_LANGS.to_string(),
        }
    }
}

impl Config {
    /// Switches the language pair; transcript labels follow it.
    pub fn with_languages(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.source_lang = source.into();
        self.target_lang = target.into();
        let (source_label, target_label) = transcript_labels(&self.source_lang, &self.target_lang);
        self.source_label = source_label;
        self.target_label = target_label;
        self
    }

    pub fn redactor(&self) -> Redactor {
        Redactor::new(self.blur_kernel)
    }

    pub fn overlay(&self) -> OverlayRenderer {
        OverlayRenderer::new(self.font_paths.as_slice(), self.font_size, Rgba(self.text_color))
    }

    pub fn transcript_writer(&self) -> TranscriptWriter {
        TranscriptWriter::new(&self.output_dir)
            .with_labels(&self.source_label, &self.target_label)
    }
}

/// Section headers for a language pair. The default English to Korean pair
/// keeps its Korean headers.
pub fn transcript_labels(source: &str, target: &str) -> (String, String) {
    if source == DEFAULT_SOURCE_LANG && target == DEFAULT_TARGET_LANG {
        (DEFAULT_SOURCE_LABEL.to_string(), DEFAULT_TARGET_LABEL.to_string())
    } else {
        (format!("OCR ({source})"), format!("Translation ({target})"))
    }
}
