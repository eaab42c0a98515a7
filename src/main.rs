use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use log::{info, warn};
use ocr_translate::{
    Config, GoogleTranslator, ImageSource, InputError, Pipeline, PipelineError, Presenter,
    SavePresenter, TesseractExtractor, ViewerPresenter,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the image file (drag-and-drop payloads are accepted as-is)
    image_path: Option<String>,

    /// Read the image from the clipboard instead of a file
    #[arg(long, conflicts_with = "image_path")]
    paste: bool,

    /// Source language code
    #[arg(long = "from")]
    source: Option<String>,

    /// Target language code
    #[arg(long = "to")]
    target: Option<String>,

    /// Font file for the translated text (tried before the platform defaults)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Directory the transcript is written to
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Save the result image here instead of opening a viewer
    #[arg(long)]
    save: Option<PathBuf>,

    /// Detector language(s), e.g. "eng" or "eng+kor"
    #[arg(long)]
    lang: Option<String>,
}

impl Args {
    fn config(&self) -> Config {
        let mut config = Config::default();
        if self.source.is_some() || self.target.is_some() {
            let source = self.source.clone().unwrap_or_else(|| config.source_lang.clone());
            let target = self.target.clone().unwrap_or_else(|| config.target_lang.clone());
            config = config.with_languages(source, target);
        }
        if let Some(font) = &self.font {
            config.font_paths.insert(0, font.clone());
        }
        if let Some(dir) = &self.out_dir {
            config.output_dir = dir.clone();
        }
        if let Some(lang) = &self.lang {
            config.detector_langs = lang.clone();
        }
        config
    }

    fn image_source(&self) -> anyhow::Result<ImageSource> {
        match (&self.image_path, self.paste) {
            (Some(path), _) => Ok(ImageSource::dropped(path)),
            (None, true) => Ok(ImageSource::Clipboard),
            (None, false) => bail!("give an image path or --paste"),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.config();
    let source = args.image_source()?;

    let extractor = TesseractExtractor::new(&config.detector_langs);
    let translator = GoogleTranslator::new(&config.source_lang, &config.target_lang);
    let pipeline = Pipeline::new(
        &extractor,
        &translator,
        config.redactor(),
        config.overlay(),
        config.transcript_writer(),
    );

    let outcome = match pipeline.run_source(&source).await {
        Ok(outcome) => outcome,
        Err(PipelineError::Input(InputError::NothingToProcess)) => {
            println!("No image on the clipboard.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    info!(
        "Processed {} region(s), skipped {}",
        outcome.regions.len(),
        outcome.skipped.len()
    );
    if let Some(path) = &outcome.transcript_path {
        println!("Transcript saved: {}", path.display());
    }

    let presented = match &args.save {
        Some(path) => SavePresenter::new(path).present(&outcome.canvas),
        None => ViewerPresenter::default().present(&outcome.canvas),
    };
    if let Err(e) = presented {
        warn!("Could not present the result: {}", e);
    }

    Ok(())
}
