use std::path::PathBuf;

use dirs::preference_dir;

/// Directory holding mazer's files. Falls back to the working directory on
/// platforms without a preference dir.
pub fn base_path() -> PathBuf {
    preference_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mazer")
}
