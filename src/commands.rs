// Tauri command handlers
use tauri::{AppHandle, State};

use crate::language::{self, Language};
use crate::library::resolver;
use crate::library::scanner::{ClipInfo, ClipScanner};
use crate::scanner::{self, CameraFrame, ScannerStatus};
use crate::settings::AppSettings;
use crate::state::AppState;

// ===== Language Selection Commands =====

#[tauri::command]
pub fn get_languages() -> Vec<Language> {
    language::CATALOG.to_vec()
}

#[derive(serde::Serialize)]
pub struct SelectionResponse {
    pub language: String,
    pub folder: String,
}

#[tauri::command]
pub fn select_language(
    name: String,
    state: State<'_, AppState>,
    app: AppHandle,
) -> Result<SelectionResponse, String> {
    let lang = language::find(&name).ok_or_else(|| format!("Unknown language: {}", name))?;

    let root = state.settings.lock().clip_root(&state.app_dir);
    let folder = root.join(lang.folder);
    std::fs::create_dir_all(&folder)
        .map_err(|e| format!("Failed to create clip folder: {}", e))?;

    state.session.lock().select_language(*lang, folder.clone());

    {
        let mut settings = state.settings.lock();
        settings.language = Some(lang.name.to_string());
        if let Err(e) = settings.save(&state.app_dir) {
            log::warn!("Failed to persist language selection: {}", e);
        }
    }

    let status = state.session.lock().status().to_string();
    scanner::report_status(&app, status);

    Ok(SelectionResponse {
        language: lang.name.to_string(),
        folder: folder.to_string_lossy().to_string(),
    })
}

#[derive(serde::Serialize)]
pub struct Capabilities {
    /// False when no output device could be opened at startup
    pub audio_output: bool,
    pub synthesis: bool,
    pub language_selected: bool,
    pub folder: Option<String>,
}

#[tauri::command]
pub fn get_capabilities(state: State<'_, AppState>) -> Capabilities {
    let session = state.session.lock();
    Capabilities {
        audio_output: state.player.is_some(),
        synthesis: true,
        language_selected: session.language().is_some(),
        folder: session
            .audio_folder()
            .map(|f| f.to_string_lossy().to_string()),
    }
}

// ===== Scanner Commands =====

#[tauri::command]
pub fn start_scanning(state: State<'_, AppState>, app: AppHandle) -> Result<String, String> {
    let status = state.session.lock().start().to_string();
    scanner::report_status(&app, status.clone());
    Ok(status)
}

#[tauri::command]
pub fn stop_scanning(state: State<'_, AppState>, app: AppHandle) -> Result<String, String> {
    let status = state.session.lock().stop().to_string();
    scanner::report_status(&app, status.clone());
    Ok(status)
}

/// Store the newest camera still for the scan loop to decode
#[tauri::command]
pub fn submit_frame(frame: Vec<u8>, state: State<'_, AppState>) -> Result<(), String> {
    let frame = CameraFrame::new(frame).map_err(|e| e.to_string())?;
    state.session.lock().push_frame(frame);
    Ok(())
}

#[tauri::command]
pub fn get_scanner_status(state: State<'_, AppState>) -> ScannerStatus {
    state.session.lock().report()
}

// ===== Clip Library Commands =====

#[tauri::command]
pub async fn list_clips(state: State<'_, AppState>) -> Result<Vec<ClipInfo>, String> {
    let folder = state
        .session
        .lock()
        .audio_folder()
        .ok_or("No language selected")?;

    // Tag reads hit the disk; keep them off the event loop
    tokio::task::spawn_blocking(move || {
        ClipScanner::scan(&folder).map_err(|e| format!("Failed to scan clip folder: {}", e))
    })
    .await
    .map_err(|e| format!("Task join error: {}", e))?
}

/// Play a clip directly from the library view
#[tauri::command]
pub fn play_clip(
    payload: String,
    state: State<'_, AppState>,
    app: AppHandle,
) -> Result<String, String> {
    let folder = state
        .session
        .lock()
        .audio_folder()
        .ok_or("No language selected")?;
    let path = resolver::existing_clip(&folder, &payload)
        .ok_or_else(|| format!("No clip for: {}", payload))?;

    let player = state.player.as_ref().ok_or("Audio output not available")?;
    player
        .play_file(&path)
        .map_err(|e| format!("Failed to play clip: {:#}", e))?;

    let status = format!("Playing: {}", payload);
    scanner::report_status(&app, status.clone());
    Ok(status)
}

// ===== Speech Commands =====

/// Synthesize and play arbitrary text, bypassing the scan loop
#[tauri::command]
pub async fn speak_text(
    text: String,
    state: State<'_, AppState>,
    app: AppHandle,
) -> Result<String, String> {
    let language = scanner::speech_language(&state);

    let bytes = state
        .synthesizer
        .synthesize(&text, &language)
        .await
        .map_err(|e| format!("Speech error: {}", e))?;

    let player = state.player.as_ref().ok_or("Audio output not available")?;
    player
        .play_bytes(bytes, text.clone())
        .map_err(|e| format!("Failed to play synthesized audio: {:#}", e))?;

    let status = format!("Speaking: {}", text);
    scanner::report_status(&app, status.clone());
    Ok(status)
}

// ===== Playback Commands =====

#[tauri::command]
pub fn stop_playback(state: State<'_, AppState>) -> Result<(), String> {
    let player = state.player.as_ref().ok_or("Audio output not available")?;
    player.stop();
    Ok(())
}

#[tauri::command]
pub fn set_volume(volume: f32, state: State<'_, AppState>) -> Result<(), String> {
    let player = state.player.as_ref().ok_or("Audio output not available")?;
    player.set_volume(volume);
    Ok(())
}

#[derive(serde::Serialize)]
pub struct PlayerStateResponse {
    pub is_playing: bool,
    pub volume: f32,
    pub source: Option<crate::audio::PlaybackSource>,
}

#[tauri::command]
pub fn get_player_state(state: State<'_, AppState>) -> Result<PlayerStateResponse, String> {
    let player = state.player.as_ref().ok_or("Audio output not available")?;

    Ok(PlayerStateResponse {
        is_playing: player.is_playing(),
        volume: player.volume(),
        source: player.current_source(),
    })
}

// ===== Settings Commands =====

#[tauri::command]
pub fn get_settings(state: State<'_, AppState>) -> AppSettings {
    state.settings.lock().clone()
}

#[tauri::command]
pub fn update_settings(
    mut settings: AppSettings,
    state: State<'_, AppState>,
) -> Result<(), String> {
    settings.volume = settings.volume.clamp(0.0, 1.0);
    settings.save(&state.app_dir)?;

    if let Some(player) = state.player.as_ref() {
        player.set_volume(settings.volume);
    }

    // A new clip root moves the selected language's folder with it
    let selected = state.session.lock().language();
    if let Some(lang) = selected {
        let folder = settings.clip_root(&state.app_dir).join(lang.folder);
        std::fs::create_dir_all(&folder)
            .map_err(|e| format!("Failed to create clip folder: {}", e))?;
        state.session.lock().select_language(lang, folder);
    }

    *state.settings.lock() = settings;
    Ok(())
}
