use std::path::PathBuf;

use log::{debug, error, info};

use crate::{
    Canvas, Detection, TextPair,
    error::PipelineError,
    extract::RegionExtractor,
    geometry::BoundingBox,
    input::ImageSource,
    overlay::OverlayRenderer,
    redact::Redactor,
    transcript::{Transcript, TranscriptWriter},
    translate::{Translation, Translator, translate_or_original},
};

/// Why a detection contributed nothing to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyText,
    DegenerateBox,
}

/// A detection that survived filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Position of the detection in extractor order.
    pub index: usize,
    pub bbox: BoundingBox,
    pub translation: Translation,
}

#[derive(Debug)]
pub struct RunOutcome {
    pub canvas: Canvas,
    pub transcript: Transcript,
    pub regions: Vec<Region>,
    /// `(index, reason)` for every dropped detection.
    pub skipped: Vec<(usize, SkipReason)>,
    /// `None` until written, or when writing failed.
    pub transcript_path: Option<PathBuf>,
}

/// Detect, redact, overlay, persist.
///
/// All redactions happen before any overlay is drawn, so translated text is
/// never blurred by a later region. Where regions overlap, whichever is
/// processed last wins.
pub struct Pipeline<'a, E, T> {
    extractor: &'a E,
    translator: &'a T,
    redactor: Redactor,
    overlay: OverlayRenderer,
    writer: TranscriptWriter,
}

impl<'a, E: RegionExtractor, T: Translator> Pipeline<'a, E, T> {
    pub fn new(
        extractor: &'a E,
        translator: &'a T,
        redactor: Redactor,
        overlay: OverlayRenderer,
        writer: TranscriptWriter,
    ) -> Self {
        Self {
            extractor,
            translator,
            redactor,
            overlay,
            writer,
        }
    }

    /// Loads the source and runs it. Input failures end the run before
    /// anything is produced.
    pub async fn run_source(&self, source: &ImageSource) -> Result<RunOutcome, PipelineError> {
        let image = source.load()?;
        self.run(image).await
    }

    /// Processes the image and writes the transcript.
    pub async fn run(&self, image: Canvas) -> Result<RunOutcome, PipelineError> {
        let mut outcome = self.process(image).await?;
        outcome.transcript_path = match self.writer.write(&outcome.transcript) {
            Ok(path) => Some(path),
            Err(e) => {
                error!("Failed to write transcript to {}: {}", self.writer.dir().display(), e);
                None
            }
        };
        Ok(outcome)
    }

    /// Runs both passes without touching the filesystem.
    pub async fn process(&self, mut canvas: Canvas) -> Result<RunOutcome, PipelineError> {
        let detections = self.extractor.extract(&canvas).await?;
        info!("Detected {} text region(s)", detections.len());

        let (width, height) = canvas.dimensions();
        let mut transcript = Transcript::default();
        let mut regions = Vec::new();
        let mut skipped = Vec::new();

        for (index, detection) in detections.into_iter().enumerate() {
            let (text, bbox) = match accept(&detection, width, height) {
                Ok(accepted) => accepted,
                Err(reason) => {
                    debug!("Skipping detection #{index}: {:?}", reason);
                    skipped.push((index, reason));
                    continue;
                }
            };

            let translation = translate_or_original(self.translator, text).await;
            self.redactor.apply(&mut canvas, bbox);

            transcript.push(TextPair {
                original: text.to_string(),
                translated: translation.text().to_string(),
            });
            regions.push(Region {
                index,
                bbox,
                translation,
            });
        }

        for region in &regions {
            self.overlay.draw(&mut canvas, region.bbox, region.translation.text());
        }

        Ok(RunOutcome {
            canvas,
            transcript,
            regions,
            skipped,
            transcript_path: None,
        })
    }
}

/// Detector text, exactly as returned, and the clamped box, or why the
/// detection is dropped. Blank text is rejected before any geometry is
/// computed.
fn accept(detection: &Detection, width: u32, height: u32) -> Result<(&str, BoundingBox), SkipReason> {
    if detection.text.trim().is_empty() {
        return Err(SkipReason::EmptyText);
    }
    let bbox = BoundingBox::from_polygon_clamped(&detection.polygon, width, height)
        .ok_or(SkipReason::DegenerateBox)?;
    Ok((detection.text.as_str(), bbox))
}
