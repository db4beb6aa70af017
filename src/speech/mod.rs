// Speech synthesis module
// Fallback voice for payloads that have no recorded clip

pub mod google;
pub mod synthesizer;

pub use google::GoogleTranslateSynth;
pub use synthesizer::{SpeechError, SpeechSynthesizer};
