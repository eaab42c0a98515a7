use std::{io, path::PathBuf};

use thiserror::Error;

/// Failure to obtain an image to work on.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read image {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
    #[error("nothing to process: no image on the clipboard")]
    NothingToProcess,
    #[error("clipboard image has inconsistent dimensions {width}x{height}")]
    MalformedClipboardImage { width: usize, height: usize },
}

/// Failure of the text detection capability.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to encode image for detection: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to run detector `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to communicate with detector `{program}`: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("detector exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },
    #[error("unexpected detector output: {0}")]
    Parse(String),
}

/// Why a translation request produced no translation.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The remote capability could not be reached at all.
    #[error("translation service unavailable: {0}")]
    Unavailable(String),
    /// The capability answered, but with an error for this input.
    #[error("translation failed: {0}")]
    Failed(String),
    #[error("nothing to translate")]
    EmptyInput,
}

/// A run-terminating failure. Everything else degrades to a fallback.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("text detection failed: {0}")]
    Detection(#[from] ExtractError),
}

#[derive(Debug, Error)]
pub enum PresentError {
    #[error("failed to write preview image: {0}")]
    Save(#[from] image::ImageError),
    #[error("failed to launch viewer: {0}")]
    Io(#[from] io::Error),
}
