use std::time::Duration;

pub const DEFAULT_SOURCE_LANG: &str = "en";
pub const DEFAULT_TARGET_LANG: &str = "ko";

pub const DEFAULT_SOURCE_LABEL: &str = "OCR 원문 (영어)";
pub const DEFAULT_TARGET_LABEL: &str = "번역문 (한국어)";

/// Blur kernel edge length in pixels. Must be odd.
pub const DEFAULT_BLUR_KERNEL: u32 = 31;

pub const DEFAULT_FONT_SIZE: f32 = 22.0;
pub const DEFAULT_TEXT_COLOR: [u8; 4] = [0, 0, 0, 255];

#[cfg(target_os = "windows")]
pub const DEFAULT_FONT_PATHS: &[&str] = &["C:/Windows/Fonts/malgun.ttf"];
#[cfg(target_os = "macos")]
pub const DEFAULT_FONT_PATHS: &[&str] = &[
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "/Library/Fonts/Arial Unicode.ttf",
];
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub const DEFAULT_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
];

pub const TRANSCRIPT_PREFIX: &str = "ocr_translate_";
pub const TRANSCRIPT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub const TRANSLATE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";
pub const TRANSLATE_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

pub const DETECTOR_PROGRAM: &str = "tesseract";
pub const DEFAULT_DETECTOR_LANGS: &str = "eng";
