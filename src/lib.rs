// Soundtag - QR-code audio guide
// Module declarations
mod audio;
mod commands;
mod language;
mod library;
mod scanner;
mod settings;
mod speech;
mod state;

use std::sync::Arc;

use audio::Player;
use scanner::ScanSession;
use settings::AppSettings;
use speech::{GoogleTranslateSynth, SpeechSynthesizer};
use state::AppState;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            // Get app data directory
            let app_dir = app
                .path()
                .app_data_dir()
                .expect("Failed to get app data directory");

            let settings = AppSettings::load(&app_dir).unwrap_or_else(|e| {
                log::warn!("Falling back to default settings: {}", e);
                AppSettings::default()
            });

            // Audio output is optional; without it the scanner still runs
            // and reports failures as status text
            let player = match Player::new() {
                Ok(p) => {
                    p.set_volume(settings.volume);
                    Some(p)
                }
                Err(e) => {
                    log::warn!("Audio output unavailable: {:#}", e);
                    None
                }
            };

            let synthesizer: Arc<dyn SpeechSynthesizer> = Arc::new(GoogleTranslateSynth::new());

            // Restore the previous language selection
            let mut session = ScanSession::new();
            if let Some(name) = settings.language.as_deref() {
                if let Some(lang) = language::find(name) {
                    let folder = settings.clip_root(&app_dir).join(lang.folder);
                    match std::fs::create_dir_all(&folder) {
                        Ok(()) => session.select_language(*lang, folder),
                        Err(e) => log::warn!(
                            "Could not create clip folder {}: {}",
                            folder.display(),
                            e
                        ),
                    }
                }
            }

            let app_state = AppState::new(player, synthesizer, session, settings, app_dir);
            app.manage(app_state);

            // Drive the scan-resolve cycle for the life of the app
            let handle = app.handle().clone();
            tauri::async_runtime::spawn(scanner::run_scan_loop(handle));

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::get_languages,
            commands::select_language,
            commands::get_capabilities,
            commands::start_scanning,
            commands::stop_scanning,
            commands::submit_frame,
            commands::get_scanner_status,
            commands::list_clips,
            commands::play_clip,
            commands::speak_text,
            commands::stop_playback,
            commands::set_volume,
            commands::get_player_state,
            commands::get_settings,
            commands::update_settings,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
