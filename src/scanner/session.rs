// Scan session state
// Tracks language selection, the latest frame, and the last-seen payload

use chrono::Local;
use std::path::{Path, PathBuf};

use super::frame::CameraFrame;
use crate::language::Language;
use crate::library::resolver;

/// What a cycle decided to do with a freshly observed payload
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackPlan {
    /// Play this clip file from the language folder
    Clip(PathBuf),
    /// No clip on disk; synthesize the payload text
    Speak(String),
}

/// Choose between a recorded clip and synthesized speech for a payload.
/// The clip wins whenever `<folder>/<payload>.mp3` exists.
pub fn plan_playback(folder: &Path, payload: &str) -> PlaybackPlan {
    match resolver::existing_clip(folder, payload) {
        Some(path) => PlaybackPlan::Clip(path),
        None => PlaybackPlan::Speak(payload.to_string()),
    }
}

/// Snapshot of the session for the UI
#[derive(Debug, Clone, serde::Serialize)]
pub struct ScannerStatus {
    pub scanning: bool,
    pub language: Option<String>,
    pub folder: Option<String>,
    pub status: String,
    pub last_payload: Option<String>,
    pub last_detected_at: Option<String>,
}

/// Mutable scanning state shared between the command layer and the scan loop
pub struct ScanSession {
    scanning: bool,
    language: Option<Language>,
    audio_folder: Option<PathBuf>,
    latest_frame: Option<CameraFrame>,
    last_payload: Option<String>,
    status: String,
    last_detected_at: Option<String>,
}

impl ScanSession {
    pub fn new() -> Self {
        Self {
            scanning: false,
            language: None,
            audio_folder: None,
            latest_frame: None,
            last_payload: None,
            status: "Ready to scan QR codes".to_string(),
            last_detected_at: None,
        }
    }

    /// Record a language selection and its resolved clip folder
    pub fn select_language(&mut self, language: Language, folder: PathBuf) {
        let folder_name = folder
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| folder.to_string_lossy().to_string());
        self.status = format!("Audio folder: {}", folder_name);
        self.language = Some(language);
        self.audio_folder = Some(folder);
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn audio_folder(&self) -> Option<PathBuf> {
        self.audio_folder.clone()
    }

    /// Start scanning; returns the new status text
    pub fn start(&mut self) -> &str {
        self.scanning = true;
        self.status = "Scanning for QR codes...".to_string();
        &self.status
    }

    /// Stop scanning and drop the stale frame; returns the new status text
    pub fn stop(&mut self) -> &str {
        self.scanning = false;
        self.latest_frame = None;
        self.status = "Camera stopped".to_string();
        &self.status
    }

    /// Store the newest camera still, replacing any previous one
    pub fn push_frame(&mut self, frame: CameraFrame) {
        self.latest_frame = Some(frame);
    }

    /// Everything a cycle needs, or None when the cycle should be skipped
    /// (not scanning, no frame submitted, or no folder selected)
    pub fn cycle_input(&self) -> Option<(CameraFrame, PathBuf)> {
        if !self.scanning {
            return None;
        }
        let frame = self.latest_frame.clone()?;
        let folder = self.audio_folder.clone()?;
        Some((frame, folder))
    }

    /// Record a decoded payload. Returns false when it matches the
    /// previously observed payload, which suppresses repeat triggers
    /// while the same code stays in view.
    pub fn observe(&mut self, payload: &str) -> bool {
        if self.last_payload.as_deref() == Some(payload) {
            return false;
        }
        self.last_payload = Some(payload.to_string());
        self.last_detected_at = Some(Local::now().to_rfc3339());
        true
    }

    pub fn set_status(&mut self, status: String) {
        self.status = status;
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn report(&self) -> ScannerStatus {
        ScannerStatus {
            scanning: self.scanning,
            language: self.language.map(|l| l.name.to_string()),
            folder: self
                .audio_folder
                .as_ref()
                .map(|f| f.to_string_lossy().to_string()),
            status: self.status.clone(),
            last_payload: self.last_payload.clone(),
            last_detected_at: self.last_detected_at.clone(),
        }
    }
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language;
    use std::fs;

    fn frame() -> CameraFrame {
        CameraFrame::new(vec![1, 2, 3]).unwrap()
    }

    #[test]
    fn test_observe_suppresses_repeat_payload() {
        let mut session = ScanSession::new();
        assert!(session.observe("gate_3"));
        assert!(!session.observe("gate_3"));
        assert!(!session.observe("gate_3"));
    }

    #[test]
    fn test_observe_triggers_again_after_different_payload() {
        let mut session = ScanSession::new();
        assert!(session.observe("gate_3"));
        assert!(session.observe("gate_4"));
        // The same code coming back into view counts as a new observation
        assert!(session.observe("gate_3"));
    }

    #[test]
    fn test_cycle_input_requires_scanning() {
        let mut session = ScanSession::new();
        let lang = *language::find("English").unwrap();
        session.select_language(lang, PathBuf::from("/tmp/english"));
        session.push_frame(frame());
        assert!(session.cycle_input().is_none());

        session.start();
        assert!(session.cycle_input().is_some());
    }

    #[test]
    fn test_cycle_input_requires_frame_and_folder() {
        let mut session = ScanSession::new();
        session.start();
        assert!(session.cycle_input().is_none());

        session.push_frame(frame());
        // Still no folder selected
        assert!(session.cycle_input().is_none());

        let lang = *language::find("Tamil").unwrap();
        session.select_language(lang, PathBuf::from("/tmp/tamil"));
        assert!(session.cycle_input().is_some());
    }

    #[test]
    fn test_stop_drops_stale_frame() {
        let mut session = ScanSession::new();
        let lang = *language::find("English").unwrap();
        session.select_language(lang, PathBuf::from("/tmp/english"));
        session.start();
        session.push_frame(frame());
        session.stop();
        session.start();
        // No playback can happen from a frame captured before the stop
        assert!(session.cycle_input().is_none());
    }

    #[test]
    fn test_plan_playback_prefers_existing_clip() {
        let dir = tempfile::tempdir().unwrap();
        let clip = dir.path().join("gate_3.mp3");
        fs::write(&clip, b"x").unwrap();

        assert_eq!(
            plan_playback(dir.path(), "gate_3"),
            PlaybackPlan::Clip(clip)
        );
    }

    #[test]
    fn test_plan_playback_falls_back_to_exact_text() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            plan_playback(dir.path(), "main gate"),
            PlaybackPlan::Speak("main gate".to_string())
        );
    }

    #[test]
    fn test_plan_playback_speaks_unsafe_payloads() {
        // Payloads that cannot resolve to a file name never touch the disk
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            plan_playback(dir.path(), "../escape"),
            PlaybackPlan::Speak("../escape".to_string())
        );
    }

    #[test]
    fn test_status_report_reflects_selection() {
        let mut session = ScanSession::new();
        let lang = *language::find("Hindi").unwrap();
        session.select_language(lang, PathBuf::from("/data/clips/hindi1"));

        let report = session.report();
        assert_eq!(report.language.as_deref(), Some("Hindi"));
        assert_eq!(report.status, "Audio folder: hindi1");
        assert!(!report.scanning);
        assert_eq!(report.last_payload, None);
    }
}
