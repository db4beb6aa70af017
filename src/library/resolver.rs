use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Get the regex matching characters that may not appear in a clip file name
fn get_unsafe_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        // Path separators, reserved Windows characters, control characters
        Regex::new(r#"[\\/:*?"<>|\x00-\x1f]"#).unwrap()
    })
}

/// File name a payload resolves to, or None if the payload is empty or
/// contains characters that could escape the clip folder
pub fn clip_file_name(payload: &str) -> Option<String> {
    let trimmed = payload.trim();
    if trimmed.is_empty() || get_unsafe_regex().is_match(trimmed) {
        return None;
    }
    Some(format!("{}.mp3", trimmed))
}

/// Full path a payload resolves to inside a language folder
pub fn clip_path(folder: &Path, payload: &str) -> Option<PathBuf> {
    clip_file_name(payload).map(|name| folder.join(name))
}

/// Path of the clip for this payload if the file actually exists
pub fn existing_clip(folder: &Path, payload: &str) -> Option<PathBuf> {
    clip_path(folder, payload).filter(|p| p.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_clip_file_name_basic() {
        assert_eq!(clip_file_name("station_12"), Some("station_12.mp3".to_string()));
    }

    #[test]
    fn test_clip_file_name_trims_whitespace() {
        assert_eq!(clip_file_name("  exhibit 4 \n"), Some("exhibit 4.mp3".to_string()));
    }

    #[test]
    fn test_clip_file_name_rejects_empty() {
        assert_eq!(clip_file_name(""), None);
        assert_eq!(clip_file_name("   "), None);
    }

    #[test]
    fn test_clip_file_name_rejects_separators() {
        assert_eq!(clip_file_name("../../etc/passwd"), None);
        assert_eq!(clip_file_name("a/b"), None);
        assert_eq!(clip_file_name("a\\b"), None);
    }

    #[test]
    fn test_clip_file_name_rejects_reserved_characters() {
        assert_eq!(clip_file_name("what?"), None);
        assert_eq!(clip_file_name("a:b"), None);
    }

    #[test]
    fn test_clip_path_joins_folder() {
        let path = clip_path(Path::new("/tmp/hindi1"), "gate_3").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/hindi1/gate_3.mp3"));
    }

    #[test]
    fn test_existing_clip_requires_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(existing_clip(dir.path(), "gate_3"), None);

        let clip = dir.path().join("gate_3.mp3");
        fs::write(&clip, b"not really audio").unwrap();
        assert_eq!(existing_clip(dir.path(), "gate_3"), Some(clip));
    }

    #[test]
    fn test_existing_clip_ignores_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("gate_3.mp3")).unwrap();
        assert_eq!(existing_clip(dir.path(), "gate_3"), None);
    }
}
