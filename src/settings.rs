use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;

/// Default settings file name used by BAS project layouts.
pub const SETTINGS_FILE_NAME: &str = "settings.ini";

/// Recursively collect files named `file_name` under `root`.
///
/// Directories are never reported. A missing root yields an empty
/// result rather than an error. Matches are sorted by path so that
/// "first match wins" callers behave deterministically.
pub async fn find_settings_files(root: &Path, file_name: &str) -> io::Result<Vec<PathBuf>> {
    let mut matches = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
            Err(err) => return Err(err),
        };

        while let Some(entry) = entries.next_entry().await? {
            let file_type = entry.file_type().await?;
            if file_type.is_dir() {
                stack.push(entry.path());
            } else if entry.file_name() == file_name {
                matches.push(entry.path());
            }
        }
    }

    matches.sort();
    Ok(matches)
}

/// Extract the first value for `key` from `key=value` settings text.
///
/// Lines without a `=` are skipped. The value is everything after the
/// first `=`, untrimmed.
pub fn settings_value(text: &str, key: &str) -> Option<String> {
    for line in text.lines() {
        if let Some((k, v)) = line.split_once('=') {
            if k == key {
                return Some(v.to_string());
            }
        }
    }
    None
}

/// Look up `key` in the first settings file found under `root`.
pub async fn lookup_setting(root: &Path, key: &str) -> io::Result<Option<String>> {
    let files = find_settings_files(root, SETTINGS_FILE_NAME).await?;
    let Some(path) = files.first() else {
        return Ok(None);
    };
    let text = fs::read_to_string(path).await?;
    Ok(settings_value(&text, key))
}

/// Extract the user's email from the settings file under `root`.
///
/// BAS project layouts keep per-app settings under
/// `<project>/appsremote`; pass that directory as `root`.
pub async fn user_email(root: &Path) -> io::Result<Option<String>> {
    lookup_setting(root, "email").await
}
