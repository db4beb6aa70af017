use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A clip found in the selected language folder
#[derive(Debug, Clone, serde::Serialize)]
pub struct ClipInfo {
    /// Payload text that triggers this clip (the file stem)
    pub payload: String,
    pub file_name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    /// Tag title, when the file carries one
    pub title: Option<String>,
    pub duration_ms: Option<i64>,
}

/// Scanner for enumerating the clips of a language folder
pub struct ClipScanner;

impl ClipScanner {
    /// List all `.mp3` clips directly inside a language folder
    pub fn scan<P: AsRef<Path>>(folder: P) -> Result<Vec<ClipInfo>, anyhow::Error> {
        let mut clips = Vec::new();

        // Language folders are flat; don't descend into stray subdirectories
        for entry in WalkDir::new(folder)
            .max_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let is_mp3 = path
                .extension()
                .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("mp3"))
                .unwrap_or(false);
            if !is_mp3 {
                continue;
            }

            let payload = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem.to_string(),
                None => continue,
            };
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown")
                .to_string();
            let size_bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);

            let (title, duration_ms) = Self::read_tags(path);

            clips.push(ClipInfo {
                payload,
                file_name,
                path: path.to_path_buf(),
                size_bytes,
                title,
                duration_ms,
            });
        }

        clips.sort_by(|a, b| a.payload.cmp(&b.payload));
        Ok(clips)
    }

    /// Best-effort tag read; files with unreadable tags still get listed
    fn read_tags(path: &Path) -> (Option<String>, Option<i64>) {
        let tagged_file = match Probe::open(path).and_then(|p| p.read()) {
            Ok(f) => f,
            Err(e) => {
                log::debug!("Could not read tags from {}: {}", path.display(), e);
                return (None, None);
            }
        };

        let title = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag())
            .and_then(|t| t.title().map(|s| s.to_string()));
        let duration_ms = Some(tagged_file.properties().duration().as_millis() as i64);

        (title, duration_ms)
    }
}
