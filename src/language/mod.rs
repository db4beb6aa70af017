// Language catalog
// Maps user-facing language names to on-disk clip folders and synthesis codes

use serde::Serialize;

/// A selectable playback language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub name: &'static str,
    /// Folder name under the clip root holding this language's audio files
    pub folder: &'static str,
    /// Language code passed to the speech synthesizer
    pub speech_code: &'static str,
}

/// All languages offered by the picker. Folder names match the clip
/// sets shipped to devices, spelling quirks included.
pub const CATALOG: &[Language] = &[
    Language { name: "Hindi", folder: "hindi1", speech_code: "hi" },
    Language { name: "Bengali", folder: "bangoli", speech_code: "bn" },
    Language { name: "Tamil", folder: "tamil", speech_code: "ta" },
    Language { name: "Kannada", folder: "kannada", speech_code: "kn" },
    Language { name: "Malayalam", folder: "malyalam", speech_code: "ml" },
    Language { name: "Urdu", folder: "urdu", speech_code: "ur" },
    Language { name: "Gujarati", folder: "gujarati", speech_code: "gu" },
    Language { name: "Punjabi", folder: "punjabi", speech_code: "pa" },
    Language { name: "Telugu", folder: "telugu", speech_code: "te" },
    Language { name: "Nepali", folder: "nepali", speech_code: "ne" },
    Language { name: "Sanskrit", folder: "sanskrit", speech_code: "sa" },
    Language { name: "Marathi", folder: "marathi", speech_code: "mr" },
    Language { name: "English", folder: "english", speech_code: "en" },
];

/// Code used for synthesis when no language has been selected
pub const DEFAULT_SPEECH_CODE: &str = "en";

/// Look up a catalog entry by its user-facing name
pub fn find(name: &str) -> Option<&'static Language> {
    CATALOG.iter().find(|l| l.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_find_known_language() {
        let lang = find("Bengali").expect("Bengali should be in the catalog");
        assert_eq!(lang.folder, "bangoli");
        assert_eq!(lang.speech_code, "bn");
    }

    #[test]
    fn test_find_unknown_language() {
        assert!(find("Klingon").is_none());
    }

    #[test]
    fn test_find_is_case_sensitive() {
        // The picker sends names exactly as listed
        assert!(find("hindi").is_none());
        assert!(find("Hindi").is_some());
    }

    #[test]
    fn test_folders_are_unique() {
        let folders: HashSet<_> = CATALOG.iter().map(|l| l.folder).collect();
        assert_eq!(folders.len(), CATALOG.len());
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = CATALOG.iter().map(|l| l.name).collect();
        assert_eq!(names.len(), CATALOG.len());
    }
}
