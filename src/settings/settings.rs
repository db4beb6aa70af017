// Settings management and persistence
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub version: i32, // Settings schema version for future migrations
    /// Override for the clip root; None uses the platform default
    pub audio_root: Option<PathBuf>,
    /// Last selected language name, restored at startup
    pub language: Option<String>,
    /// Scan-resolve loop period in milliseconds
    pub scan_interval_ms: u64,
    /// Playback volume, 0.0 to 1.0
    pub volume: f32,
    /// Override for the synthesis language code; None follows the
    /// selected language
    pub speech_language: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            version: 1,
            audio_root: None,
            language: None,
            scan_interval_ms: 1000,
            volume: 1.0,
            speech_language: None,
        }
    }
}

impl AppSettings {
    /// Get the settings file path
    pub fn settings_path(app_dir: &Path) -> PathBuf {
        app_dir.join("settings.json")
    }

    /// Load settings from file, or return defaults if file doesn't exist
    pub fn load(app_dir: &Path) -> Result<Self, String> {
        let path = Self::settings_path(app_dir);

        if !path.exists() {
            log::info!("No settings file found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read settings file: {}", e))?;

        let settings: AppSettings = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse settings: {}", e))?;

        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to file
    pub fn save(&self, app_dir: &Path) -> Result<(), String> {
        // Ensure directory exists
        fs::create_dir_all(app_dir)
            .map_err(|e| format!("Failed to create settings directory: {}", e))?;

        let path = Self::settings_path(app_dir);
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        fs::write(&path, content).map_err(|e| format!("Failed to write settings file: {}", e))?;

        log::info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Root directory holding the per-language clip folders.
    /// Devices get their clip sets copied onto shared storage, so the
    /// Android default lives there; desktop keeps them in the app data dir.
    pub fn clip_root(&self, app_dir: &Path) -> PathBuf {
        if let Some(root) = &self.audio_root {
            return root.clone();
        }

        if cfg!(target_os = "android") {
            PathBuf::from("/storage/emulated/0/qr_scanner")
        } else {
            app_dir.join("clips")
        }
    }
}
