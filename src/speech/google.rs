use async_trait::async_trait;
use url::Url;

use super::synthesizer::{SpeechError, SpeechSynthesizer};

/// Unofficial Google Translate TTS endpoint; returns a single MP3 clip
/// for short text
const DEFAULT_ENDPOINT: &str = "https://translate.google.com/translate_tts";

/// The endpoint rejects long queries, and QR payloads are short anyway
const MAX_TEXT_CHARS: usize = 200;

/// Speech synthesis via the Google Translate TTS endpoint
pub struct GoogleTranslateSynth {
    client: reqwest::Client,
    endpoint: Url,
}

impl GoogleTranslateSynth {
    pub fn new() -> Self {
        Self::with_endpoint(Url::parse(DEFAULT_ENDPOINT).expect("default endpoint URL is valid"))
    }

    /// Point synthesis at a different endpoint (used by tests)
    pub fn with_endpoint(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    fn request_url(&self, text: &str, language: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("ie", "UTF-8")
            .append_pair("client", "tw-ob")
            .append_pair("tl", language)
            .append_pair("total", "1")
            .append_pair("idx", "0")
            .append_pair("q", text);
        url
    }
}

impl Default for GoogleTranslateSynth {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTranslateSynth {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SpeechError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SpeechError::EmptyText);
        }
        let chars = text.chars().count();
        if chars > MAX_TEXT_CHARS {
            return Err(SpeechError::TextTooLong(chars));
        }

        let url = self.request_url(text, language);
        log::debug!("Requesting synthesis for {} chars, tl={}", chars, language);

        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;

        if bytes.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_carries_text_and_language() {
        let synth = GoogleTranslateSynth::new();
        let url = synth.request_url("gate 3", "hi");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert!(pairs.contains(&("q".to_string(), "gate 3".to_string())));
        assert!(pairs.contains(&("tl".to_string(), "hi".to_string())));
        assert!(pairs.contains(&("client".to_string(), "tw-ob".to_string())));
    }

    #[test]
    fn test_request_url_encodes_unicode() {
        let synth = GoogleTranslateSynth::new();
        let url = synth.request_url("द्वार ३", "hi");

        let q = url
            .query_pairs()
            .find(|(k, _)| k == "q")
            .map(|(_, v)| v.to_string());
        assert_eq!(q, Some("द्वार ३".to_string()));
    }

    #[tokio::test]
    async fn test_synthesize_rejects_empty_text() {
        let synth = GoogleTranslateSynth::new();
        let result = synth.synthesize("   ", "en").await;
        assert!(matches!(result, Err(SpeechError::EmptyText)));
    }

    #[tokio::test]
    async fn test_synthesize_rejects_overlong_text() {
        let synth = GoogleTranslateSynth::new();
        let long = "a".repeat(MAX_TEXT_CHARS + 1);
        let result = synth.synthesize(&long, "en").await;
        assert!(matches!(result, Err(SpeechError::TextTooLong(_))));
    }
}
