pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod font;
pub mod geometry;
pub mod input;
pub mod overlay;
pub mod pipeline;
pub mod present;
pub mod redact;
pub mod transcript;
pub mod translate;

pub use crate::{
    config::Config,
    error::{ExtractError, InputError, PipelineError, PresentError, TranslateError},
    extract::{RegionExtractor, TesseractExtractor},
    geometry::BoundingBox,
    input::ImageSource,
    overlay::OverlayRenderer,
    pipeline::{Pipeline, RunOutcome, SkipReason},
    present::{Presenter, SavePresenter, ViewerPresenter},
    redact::Redactor,
    transcript::{Transcript, TranscriptWriter},
    translate::{GoogleTranslator, Translation, Translator},
};

/// The canvas every run mutates.
pub type Canvas = image::RgbaImage;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One piece of text found by the detector.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Outline in image pixels, usually four corners.
    pub polygon: Vec<Point>,
    pub text: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPair {
    pub original: String,
    pub translated: String,
}
