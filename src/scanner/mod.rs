// QR scanning module
// Frame intake, payload decoding, and the scan-resolve loop

pub mod decode;
pub mod frame;
pub mod session;

pub use frame::CameraFrame;
pub use session::{PlaybackPlan, ScanSession, ScannerStatus};

use std::time::Duration;
use tauri::{AppHandle, Emitter, Manager, State};
use thiserror::Error;

use crate::state::AppState;

/// Floor for the loop period so a zeroed setting cannot spin the CPU
const MIN_INTERVAL_MS: u64 = 100;

/// Errors that can occur while handling camera frames
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("empty camera frame")]
    EmptyFrame,
    #[error("camera frame too large ({0} bytes)")]
    FrameTooLarge(usize),
    #[error("could not read frame image: {0}")]
    Image(#[from] image::ImageError),
    #[error("could not decode QR code: {0}")]
    Qr(#[from] rqrr::DeQRError),
}

/// Payload of `scanner:detected` events
#[derive(Clone, serde::Serialize)]
struct DetectedPayload {
    payload: String,
    /// "clip" when a recorded file played, "speech" when synthesized
    source: &'static str,
}

/// Background task driving the scan-resolve cycle.
///
/// Ticks on a fixed wall-clock interval. Decoding runs on the blocking
/// pool, so a slow decode delays the next tick instead of starving the
/// runtime. No cycle failure ever stops the loop.
pub async fn run_scan_loop(app: AppHandle) {
    log::info!("Scan loop started");

    loop {
        let interval_ms = {
            let state: State<AppState> = app.state();
            let configured = state.settings.lock().scan_interval_ms;
            configured.max(MIN_INTERVAL_MS)
        };
        tokio::time::sleep(Duration::from_millis(interval_ms)).await;

        if let Err(e) = run_cycle(&app).await {
            report_status(&app, format!("Scan error: {}", e));
        }
    }
}

/// One pass of the scan-resolve cycle
async fn run_cycle(app: &AppHandle) -> anyhow::Result<()> {
    let state: State<AppState> = app.state();

    // Skip the cycle unless scanning is active, a frame has been
    // submitted, and a language folder is selected
    let Some((frame, folder)) = state.session.lock().cycle_input() else {
        return Ok(());
    };

    let decoded =
        tokio::task::spawn_blocking(move || decode::QrDecoder::decode_frame(&frame)).await??;

    let Some(payload) = decoded else {
        return Ok(());
    };

    // The same code staying in view must not retrigger playback
    if !state.session.lock().observe(&payload) {
        return Ok(());
    }

    report_status(app, format!("Detected: {}", payload));

    match session::plan_playback(&folder, &payload) {
        PlaybackPlan::Clip(path) => {
            let played = match state.player.as_ref() {
                Some(player) => player.play_file(&path),
                None => Err(anyhow::anyhow!("audio output not available")),
            };
            match played {
                Ok(()) => {
                    emit_detected(app, &payload, "clip");
                    report_status(app, format!("Playing: {}", payload));
                }
                Err(e) => {
                    // A broken clip file should not leave the user silent
                    log::warn!("Clip playback failed, falling back to speech: {:#}", e);
                    report_status(app, format!("Audio error: {:#}", e));
                    speak_payload(app, &state, &payload).await;
                }
            }
        }
        PlaybackPlan::Speak(text) => {
            speak_payload(app, &state, &text).await;
        }
    }

    Ok(())
}

/// Synthesize and play a payload; all failures end up as status text
async fn speak_payload(app: &AppHandle, state: &State<'_, AppState>, text: &str) {
    let language = speech_language(state);

    match state.synthesizer.synthesize(text, &language).await {
        Ok(bytes) => {
            let played = match state.player.as_ref() {
                Some(player) => player
                    .play_bytes(bytes, text.to_string())
                    .map_err(|e| format!("{:#}", e)),
                None => Err("audio output not available".to_string()),
            };
            match played {
                Ok(()) => {
                    emit_detected(app, text, "speech");
                    report_status(app, format!("Speaking: {}", text));
                }
                Err(e) => report_status(app, format!("Audio error: {}", e)),
            }
        }
        Err(e) => report_status(app, format!("Speech error: {}", e)),
    }
}

/// Synthesis code: settings override, then the selected language, then "en"
pub(crate) fn speech_language(state: &State<'_, AppState>) -> String {
    if let Some(code) = state.settings.lock().speech_language.clone() {
        return code;
    }
    state
        .session
        .lock()
        .language()
        .map(|l| l.speech_code.to_string())
        .unwrap_or_else(|| crate::language::DEFAULT_SPEECH_CODE.to_string())
}

/// Store a status line in the session and broadcast it to the UI
pub(crate) fn report_status(app: &AppHandle, status: String) {
    log::info!("{}", status);
    if let Some(state) = app.try_state::<AppState>() {
        state.session.lock().set_status(status.clone());
    }
    let _ = app.emit("scanner:status", status);
}

fn emit_detected(app: &AppHandle, payload: &str, source: &'static str) {
    let _ = app.emit(
        "scanner:detected",
        DetectedPayload {
            payload: payload.to_string(),
            source,
        },
    );
}
