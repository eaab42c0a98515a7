use std::future::Future;

use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use url::Url;

use crate::{
    constants::{DEFAULT_USER_AGENT, TRANSLATE_ENDPOINT, TRANSLATE_TIMEOUT},
    error::TranslateError,
};

/// Remote text translation for one fixed source/target pair.
pub trait Translator {
    fn translate(&self, text: &str) -> impl Future<Output = Result<String, TranslateError>> + Send;
}

/// Which path produced the text recorded for a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    Unavailable,
    Failed,
    EmptyInput,
}

impl From<&TranslateError> for FallbackReason {
    fn from(err: &TranslateError) -> Self {
        match err {
            TranslateError::Unavailable(_) => Self::Unavailable,
            TranslateError::Failed(_) => Self::Failed,
            TranslateError::EmptyInput => Self::EmptyInput,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    Translated(String),
    /// The original text, kept because translation did not succeed.
    Fallback {
        text: String,
        reason: FallbackReason,
    },
}

impl Translation {
    pub fn text(&self) -> &str {
        match self {
            Self::Translated(text) | Self::Fallback { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Translated(text) | Self::Fallback { text, .. } => text,
        }
    }

    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        match self {
            Self::Translated(_) => None,
            Self::Fallback { reason, .. } => Some(*reason),
        }
    }
}

/// One attempt; any error keeps the original text. No retries.
pub async fn translate_or_original<T: Translator>(translator: &T, text: &str) -> Translation {
    match translator.translate(text).await {
        Ok(translated) => Translation::Translated(translated),
        Err(e) => {
            warn!("Translation of {:?} fell back to the original: {}", text, e);
            Translation::Fallback {
                text: text.to_string(),
                reason: FallbackReason::from(&e),
            }
        }
    }
}

// --- Google web translation endpoint ---

pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
    source: String,
    target: String,
}

impl GoogleTranslator {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));

        let client = reqwest::Client::builder()
            .timeout(TRANSLATE_TIMEOUT)
            .default_headers(headers)
            .build()
            .unwrap_or_default();

        Self {
            client,
            endpoint: TRANSLATE_ENDPOINT.to_string(),
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn request_url(&self, text: &str) -> Result<Url, TranslateError> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("client", "gtx"),
                ("sl", self.source.as_str()),
                ("tl", self.target.as_str()),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| TranslateError::Failed(e.to_string()))
    }

    async fn request(&self, text: &str) -> Result<String, TranslateError> {
        if text.trim().is_empty() {
            return Err(TranslateError::EmptyInput);
        }

        let url = self.request_url(text)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TranslateError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::Failed(format!("API Error {}: {}", status, body)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TranslateError::Failed(format!("Failed to decode response: {}", e)))?;

        let translated = parse_response(&body)?;
        debug!("Translated {:?} -> {:?}", text, translated);
        Ok(translated)
    }
}

impl Translator for GoogleTranslator {
    fn translate(&self, text: &str) -> impl Future<Output = Result<String, TranslateError>> + Send {
        self.request(text)
    }
}

/// The endpoint answers with nested arrays; the first element holds one
/// `[translated, original, ...]` entry per sentence.
fn parse_response(body: &Value) -> Result<String, TranslateError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Failed("response has no translation segments".into()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(TranslateError::Failed("response contained an empty translation".into()));
    }
    Ok(translated)
}
