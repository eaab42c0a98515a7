use std::{collections::HashMap, fs};

use image::{Rgba, RgbaImage};
use ocr_translate::{
    BoundingBox, Detection, ExtractError, OverlayRenderer, Pipeline, PipelineError, Redactor,
    RegionExtractor, SkipReason, TranscriptWriter, TranslateError, Translator,
    Point, font::draw_builtin, translate::FallbackReason,
};

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const FONT_SIZE: f32 = 22.0;

struct Scripted(Vec<Detection>);

impl RegionExtractor for Scripted {
    async fn extract(&self, _image: &RgbaImage) -> Result<Vec<Detection>, ExtractError> {
        Ok(self.0.clone())
    }
}

struct Broken;

impl RegionExtractor for Broken {
    async fn extract(&self, _image: &RgbaImage) -> Result<Vec<Detection>, ExtractError> {
        Err(ExtractError::Parse("detector crashed".into()))
    }
}

/// Knows a fixed vocabulary; everything else fails.
struct Dictionary(HashMap<&'static str, &'static str>);

impl Dictionary {
    fn new(entries: &[(&'static str, &'static str)]) -> Self {
        Self(entries.iter().copied().collect())
    }
}

impl Translator for Dictionary {
    async fn translate(&self, text: &str) -> Result<String, TranslateError> {
        self.0
            .get(text)
            .map(|t| t.to_string())
            .ok_or_else(|| TranslateError::Failed(format!("no entry for {text}")))
    }
}

fn textured(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let v = if (x / 2 + y / 3) % 2 == 0 { 230 } else { 40 };
        Rgba([v, 255 - v, v / 2, 255])
    })
}

fn detection(text: &str, corners: &[(f32, f32)]) -> Detection {
    Detection {
        polygon: corners.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        text: text.to_string(),
        confidence: 0.95,
    }
}

fn hello() -> Detection {
    detection("HELLO", &[(10.0, 10.0), (60.0, 10.0), (60.0, 30.0), (10.0, 30.0)])
}

fn hello_box() -> BoundingBox {
    BoundingBox {
        x1: 10,
        y1: 10,
        x2: 60,
        y2: 30,
    }
}

fn pipeline<'a, E: RegionExtractor, T: Translator>(
    extractor: &'a E,
    translator: &'a T,
    dir: &std::path::Path,
) -> Pipeline<'a, E, T> {
    Pipeline::new(
        extractor,
        translator,
        Redactor::default(),
        OverlayRenderer::builtin(FONT_SIZE, BLACK),
        TranscriptWriter::new(dir).with_labels("SRC", "DST"),
    )
}

/// What the canvas should look like: every box blurred, then every text drawn.
fn expected(input: &RgbaImage, regions: &[(BoundingBox, &str)]) -> RgbaImage {
    let mut canvas = input.clone();
    for (bbox, _) in regions {
        Redactor::default().apply(&mut canvas, *bbox);
    }
    for (bbox, text) in regions {
        draw_builtin(&mut canvas, BLACK, bbox.x1 as i32, bbox.y1 as i32, FONT_SIZE, text);
    }
    canvas
}

#[tokio::test]
async fn translated_region_is_blurred_and_overlaid() {
    let dir = tempfile::tempdir().unwrap();
    let extractor = Scripted(vec![hello()]);
    let translator = Dictionary::new(&[("HELLO", "안녕")]);
    let input = textured(100, 50);

    let outcome = pipeline(&extractor, &translator, dir.path())
        .run(input.clone())
        .await
        .unwrap();

    assert_eq!(outcome.canvas, expected(&input, &[(hello_box(), "안녕")]));
    for (x, y, px) in outcome.canvas.enumerate_pixels() {
        if !hello_box().contains(x, y) {
            assert_eq!(px, input.get_pixel(x, y), "({x}, {y}) changed outside the box");
        }
    }

    assert_eq!(outcome.transcript.originals(), "HELLO");
    assert_eq!(outcome.transcript.translations(), "안녕");
    assert_eq!(outcome.regions.len(), 1);
    assert_eq!(outcome.regions[0].translation.fallback_reason(), None);

    let path = outcome.transcript_path.expect("transcript written");
    assert_eq!(path.parent(), Some(dir.path()));
    assert_eq!(
        fs::read_to_string(path).unwrap(),
        "===== SRC =====\nHELLO\n\n===== DST =====\n안녕"
    );
}

#[tokio::test]
async fn failed_translation_keeps_original_text() {
    let dir = tempfile::tempdir().unwrap();
    let extractor = Scripted(vec![hello()]);
    let translator = Dictionary::new(&[]);
    let input = textured(100, 50);

    let outcome = pipeline(&extractor, &translator, dir.path())
        .run(input.clone())
        .await
        .unwrap();

    assert_eq!(outcome.canvas, expected(&input, &[(hello_box(), "HELLO")]));
    assert_eq!(outcome.transcript.translations(), "HELLO");
    assert_eq!(
        outcome.regions[0].translation.fallback_reason(),
        Some(FallbackReason::Failed)
    );
}

#[tokio::test]
async fn no_detections_leave_image_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let extractor = Scripted(Vec::new());
    let translator = Dictionary::new(&[]);
    let input = textured(100, 50);

    let outcome = pipeline(&extractor, &translator, dir.path())
        .run(input.clone())
        .await
        .unwrap();

    assert_eq!(outcome.canvas, input);
    assert!(outcome.transcript.is_empty());
    let written = fs::read_to_string(outcome.transcript_path.unwrap()).unwrap();
    assert_eq!(written, "===== SRC =====\n\n\n===== DST =====\n");
}

#[tokio::test]
async fn blank_and_out_of_bounds_detections_are_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let extractor = Scripted(vec![
        detection("   ", &[(10.0, 10.0), (60.0, 10.0), (60.0, 30.0), (10.0, 30.0)]),
        detection("FAR", &[(200.0, 10.0), (260.0, 10.0), (260.0, 30.0), (200.0, 30.0)]),
        detection("", &[]),
        hello(),
    ]);
    let translator = Dictionary::new(&[("HELLO", "안녕"), ("FAR", "멀리")]);
    let input = textured(100, 50);

    let outcome = pipeline(&extractor, &translator, dir.path())
        .process(input.clone())
        .await
        .unwrap();

    assert_eq!(
        outcome.skipped,
        vec![
            (0, SkipReason::EmptyText),
            (1, SkipReason::DegenerateBox),
            (2, SkipReason::EmptyText),
        ]
    );
    assert_eq!(outcome.regions.len(), 1);
    assert_eq!(outcome.regions[0].index, 3);
    assert_eq!(outcome.transcript.originals(), "HELLO");
    assert_eq!(outcome.canvas, expected(&input, &[(hello_box(), "안녕")]));
    assert!(outcome.transcript_path.is_none());
}

#[tokio::test]
async fn overlays_are_drawn_after_every_redaction() {
    let dir = tempfile::tempdir().unwrap();
    let second = detection("WORLD", &[(20.0, 15.0), (90.0, 15.0), (90.0, 45.0), (20.0, 45.0)]);
    let extractor = Scripted(vec![hello(), second]);
    let translator = Dictionary::new(&[("HELLO", "hi"), ("WORLD", "earth")]);
    let input = textured(100, 50);

    let outcome = pipeline(&extractor, &translator, dir.path())
        .process(input.clone())
        .await
        .unwrap();

    let second_box = BoundingBox {
        x1: 20,
        y1: 15,
        x2: 90,
        y2: 45,
    };
    assert_eq!(
        outcome.canvas,
        expected(&input, &[(hello_box(), "hi"), (second_box, "earth")])
    );
    // Ink from the first overlay inside the second box survives unblurred.
    assert_eq!(*outcome.canvas.get_pixel(26, 16), BLACK);
    assert_eq!(outcome.transcript.originals(), "HELLO\nWORLD");
    assert_eq!(outcome.transcript.translations(), "hi\nearth");
}

#[tokio::test]
async fn detection_failure_ends_the_run_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let translator = Dictionary::new(&[]);

    let err = pipeline(&Broken, &translator, dir.path())
        .run(textured(10, 10))
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Detection(ExtractError::Parse(_))));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn unreadable_input_ends_the_run_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let bogus = dir.path().join("bogus.png");
    fs::write(&bogus, b"not png").unwrap();
    let out = tempfile::tempdir().unwrap();
    let extractor = Scripted(vec![hello()]);
    let translator = Dictionary::new(&[]);

    let err = pipeline(&extractor, &translator, out.path())
        .run_source(&ocr_translate::ImageSource::Path(bogus))
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Input(_)));
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn detector_text_is_recorded_and_translated_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let padded = detection(" HELLO  ", &[(10.0, 10.0), (60.0, 10.0), (60.0, 30.0), (10.0, 30.0)]);
    let extractor = Scripted(vec![padded]);
    let translator = Dictionary::new(&[(" HELLO  ", "안녕")]);

    let outcome = pipeline(&extractor, &translator, dir.path())
        .process(textured(100, 50))
        .await
        .unwrap();

    assert_eq!(outcome.transcript.originals(), " HELLO  ");
    assert_eq!(outcome.transcript.translations(), "안녕");
    assert_eq!(outcome.regions[0].translation.fallback_reason(), None);
}
