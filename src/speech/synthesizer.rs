use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while synthesizing speech
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("nothing to synthesize")]
    EmptyText,
    #[error("text too long for synthesis ({0} characters)")]
    TextTooLong(usize),
    #[error("synthesis request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("synthesis endpoint returned no audio")]
    EmptyAudio,
}

/// Turns payload text into a playable MP3 buffer.
/// Abstracts the synthesis backend so the scan loop does not care
/// where the audio comes from.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize the exact text for a language code, returning MP3 bytes
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SpeechError>;
}
