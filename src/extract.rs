use std::{future::Future, io::Cursor, process::Stdio};

use image::{ImageFormat, RgbaImage};
use log::debug;
use tokio::{io::AsyncWriteExt, process::Command};

use crate::{
    Detection, Point,
    constants::{DEFAULT_DETECTOR_LANGS, DETECTOR_PROGRAM},
    error::ExtractError,
};

/// Text detection and recognition over a whole image.
///
/// Detections come back in whatever order the backend produces them; that
/// order is stable for a given call.
pub trait RegionExtractor {
    fn extract(
        &self,
        image: &RgbaImage,
    ) -> impl Future<Output = Result<Vec<Detection>, ExtractError>> + Send;
}

/// Runs the `tesseract` CLI and groups its word boxes into text lines.
pub struct TesseractExtractor {
    program: String,
    langs: String,
}

impl Default for TesseractExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_DETECTOR_LANGS)
    }
}

impl TesseractExtractor {
    pub fn new(langs: impl Into<String>) -> Self {
        Self {
            program: DETECTOR_PROGRAM.to_string(),
            langs: langs.into(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    async fn run(&self, png: Vec<u8>) -> Result<String, ExtractError> {
        let mut child = Command::new(&self.program)
            .args(["stdin", "stdout", "-l", &self.langs, "tsv"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ExtractError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let io_err = |source: std::io::Error| ExtractError::Io {
            program: self.program.clone(),
            source,
        };
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&png).await.map_err(io_err)?;
        }

        let output = child.wait_with_output().await.map_err(io_err)?;
        if !output.status.success() {
            return Err(ExtractError::Exit {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl RegionExtractor for TesseractExtractor {
    fn extract(
        &self,
        image: &RgbaImage,
    ) -> impl Future<Output = Result<Vec<Detection>, ExtractError>> + Send {
        let encoded = encode_png(image);
        async move {
            let tsv = self.run(encoded?).await?;
            let detections = parse_tsv(&tsv)?;
            debug!("Detector returned {} line(s)", detections.len());
            Ok(detections)
        }
    }
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExtractError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

const TSV_COLUMNS: [&str; 12] = [
    "level", "page_num", "block_num", "par_num", "line_num", "word_num", "left", "top", "width",
    "height", "conf", "text",
];
const WORD_LEVEL: &str = "5";

struct LineAccumulator {
    key: (u32, u32, u32, u32),
    words: Vec<String>,
    confidences: Vec<f32>,
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

impl LineAccumulator {
    fn into_detection(self) -> Detection {
        let confidence = if self.confidences.is_empty() {
            0.0
        } else {
            self.confidences.iter().sum::<f32>() / self.confidences.len() as f32 / 100.0
        };

        Detection {
            polygon: vec![
                Point::new(self.left, self.top),
                Point::new(self.right, self.top),
                Point::new(self.right, self.bottom),
                Point::new(self.left, self.bottom),
            ],
            text: self.words.join(" "),
            confidence,
        }
    }
}

/// Parses tesseract's TSV output into one detection per text line, in the
/// order lines first appear.
pub fn parse_tsv(tsv: &str) -> Result<Vec<Detection>, ExtractError> {
    let mut rows = tsv.lines();
    let header: Vec<&str> = rows
        .next()
        .ok_or_else(|| ExtractError::Parse("empty output".into()))?
        .split('\t')
        .collect();
    if header != TSV_COLUMNS {
        return Err(ExtractError::Parse(format!("unexpected header {:?}", header)));
    }

    let mut detections = Vec::new();
    let mut current: Option<LineAccumulator> = None;

    for row in rows.filter(|r| !r.is_empty()) {
        let fields: Vec<&str> = row.splitn(TSV_COLUMNS.len(), '\t').collect();
        if fields.len() < TSV_COLUMNS.len() - 1 {
            return Err(ExtractError::Parse(format!("short row {:?}", row)));
        }
        if fields[0] != WORD_LEVEL {
            continue;
        }

        let int = |i: usize| -> Result<u32, ExtractError> {
            fields[i]
                .trim()
                .parse()
                .map_err(|_| ExtractError::Parse(format!("bad {} in {:?}", TSV_COLUMNS[i], row)))
        };
        let key = (int(1)?, int(2)?, int(3)?, int(4)?);
        let (left, top) = (int(6)? as f32, int(7)? as f32);
        let (right, bottom) = (left + int(8)? as f32, top + int(9)? as f32);
        let conf: f32 = fields[10].trim().parse().unwrap_or(-1.0);
        let text = fields.get(11).map(|t| t.trim()).unwrap_or_default();

        if current.as_ref().is_some_and(|line| line.key != key) {
            detections.extend(current.take().map(LineAccumulator::into_detection));
        }

        let line = current.get_or_insert_with(|| LineAccumulator {
            key,
            words: Vec::new(),
            confidences: Vec::new(),
            left,
            top,
            right,
            bottom,
        });
        line.left = line.left.min(left);
        line.top = line.top.min(top);
        line.right = line.right.max(right);
        line.bottom = line.bottom.max(bottom);
        if !text.is_empty() {
            line.words.push(text.to_string());
        }
        if conf >= 0.0 {
            line.confidences.push(conf);
        }
    }

    detections.extend(current.map(LineAccumulator::into_detection));
    Ok(detections)
}
