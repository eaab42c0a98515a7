use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDateTime};
use log::info;

use crate::{
    TextPair,
    constants::{
        DEFAULT_SOURCE_LABEL, DEFAULT_TARGET_LABEL, TRANSCRIPT_PREFIX, TRANSCRIPT_TIMESTAMP_FORMAT,
    },
};

/// Original/translated text pairs of one run, in detection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    pub pairs: Vec<TextPair>,
}

impl Transcript {
    pub fn push(&mut self, pair: TextPair) {
        self.pairs.push(pair);
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn originals(&self) -> String {
        join(self.pairs.iter().map(|p| p.original.as_str()))
    }

    pub fn translations(&self) -> String {
        join(self.pairs.iter().map(|p| p.translated.as_str()))
    }

    /// Two-section layout: originals, blank line, translations. Both headers
    /// are always present.
    pub fn render(&self, source_label: &str, target_label: &str) -> String {
        format!(
            "===== {source_label} =====\n{}\n\n===== {target_label} =====\n{}",
            self.originals(),
            self.translations()
        )
    }
}

fn join<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    lines.collect::<Vec<_>>().join("\n")
}

/// Writes one transcript file per run into a directory.
#[derive(Debug, Clone)]
pub struct TranscriptWriter {
    dir: PathBuf,
    source_label: String,
    target_label: String,
}

impl Default for TranscriptWriter {
    fn default() -> Self {
        Self::new(".")
    }
}

impl TranscriptWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            source_label: DEFAULT_SOURCE_LABEL.to_string(),
            target_label: DEFAULT_TARGET_LABEL.to_string(),
        }
    }

    pub fn with_labels(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.source_label = source.into();
        self.target_label = target.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_name(at: NaiveDateTime) -> String {
        format!(
            "{TRANSCRIPT_PREFIX}{}.txt",
            at.format(TRANSCRIPT_TIMESTAMP_FORMAT)
        )
    }

    /// Writes the transcript stamped with the current local time.
    pub fn write(&self, transcript: &Transcript) -> std::io::Result<PathBuf> {
        self.write_at(transcript, Local::now().naive_local())
    }

    /// Runs stamped with the same second share a file name; the later one
    /// overwrites the earlier.
    pub fn write_at(&self, transcript: &Transcript, at: NaiveDateTime) -> std::io::Result<PathBuf> {
        let path = self.dir.join(Self::file_name(at));
        fs::write(
            &path,
            transcript.render(&self.source_label, &self.target_label),
        )?;
        info!("Transcript saved: {}", path.display());
        Ok(path)
    }
}
