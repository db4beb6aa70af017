// Application state management
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;

use crate::audio::Player;
use crate::scanner::ScanSession;
use crate::settings::AppSettings;
use crate::speech::SpeechSynthesizer;

pub struct AppState {
    /// None when no output device could be opened; scanning still runs
    /// and failures show up as status text
    pub player: Option<Arc<Player>>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub session: Arc<Mutex<ScanSession>>,
    pub settings: Arc<Mutex<AppSettings>>,
    pub app_dir: PathBuf,
}

impl AppState {
    pub fn new(
        player: Option<Player>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        session: ScanSession,
        settings: AppSettings,
        app_dir: PathBuf,
    ) -> Self {
        Self {
            player: player.map(Arc::new),
            synthesizer,
            session: Arc::new(Mutex::new(session)),
            settings: Arc::new(Mutex::new(settings)),
            app_dir,
        }
    }
}
