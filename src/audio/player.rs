// Audio player implementation
// One sink at a time; starting a new clip replaces whatever is playing

use anyhow::{Context, Result};
use parking_lot::Mutex;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::{Path, PathBuf};

/// Anything the decoder can read a clip from
trait AudioRead: Read + Seek + Send + Sync {}
impl<T: Read + Seek + Send + Sync> AudioRead for T {}

/// What the player was last asked to play
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum PlaybackSource {
    /// A clip file from the language folder
    Clip(PathBuf),
    /// Synthesized speech for a payload text
    Speech(String),
}

pub struct Player {
    handle: OutputStreamHandle,
    sink: Mutex<Option<Sink>>,
    source: Mutex<Option<PlaybackSource>>,
    volume: Mutex<f32>,
}

impl Player {
    pub fn new() -> Result<Self> {
        let (stream, handle) = OutputStream::try_default()
            .context("Failed to open audio output device")?;

        // The stream must outlive every sink created from the handle, and it
        // is not Send, so it cannot live in managed state. Leak it once; it
        // lasts for the rest of the process.
        std::mem::forget(stream);

        Ok(Self {
            handle,
            sink: Mutex::new(None),
            source: Mutex::new(None),
            volume: Mutex::new(1.0),
        })
    }

    /// Play a clip file, replacing whatever is currently playing
    pub fn play_file(&self, path: &Path) -> Result<()> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open audio file: {}", path.display()))?;
        self.start(
            Box::new(BufReader::new(file)),
            PlaybackSource::Clip(path.to_path_buf()),
        )
    }

    /// Play an in-memory MP3 buffer (synthesized speech)
    pub fn play_bytes(&self, data: Vec<u8>, label: String) -> Result<()> {
        self.start(Box::new(Cursor::new(data)), PlaybackSource::Speech(label))
    }

    fn start(&self, media: Box<dyn AudioRead>, origin: PlaybackSource) -> Result<()> {
        // Stop current playback if any
        self.stop();

        let source = Decoder::new(media).context("Failed to decode audio")?;

        let sink = Sink::try_new(&self.handle).context("Failed to create audio sink")?;
        sink.set_volume(*self.volume.lock());
        sink.append(source);
        sink.play();

        *self.sink.lock() = Some(sink);
        *self.source.lock() = Some(origin);

        Ok(())
    }

    pub fn stop(&self) {
        if let Some(sink) = self.sink.lock().take() {
            sink.stop();
        }
        *self.source.lock() = None;
    }

    pub fn set_volume(&self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        *self.volume.lock() = volume;
        if let Some(sink) = self.sink.lock().as_ref() {
            sink.set_volume(volume);
        }
    }

    pub fn volume(&self) -> f32 {
        *self.volume.lock()
    }

    pub fn is_playing(&self) -> bool {
        self.sink
            .lock()
            .as_ref()
            .map(|s| !s.empty())
            .unwrap_or(false)
    }

    pub fn current_source(&self) -> Option<PlaybackSource> {
        self.source.lock().clone()
    }
}
