// ABOUTME: Utility functions for the deckgen engine
// ABOUTME: Provides text clamping and path helpers shared by the CLI and assembler

use crate::errors::{DeckError, Result};
use log::warn;
use std::path::Path;

/// Truncate text to at most `max_chars` visible characters, breaking at a
/// whitespace boundary and appending an ellipsis.
///
/// Text that already fits is returned unchanged. When truncation happens the
/// result is the longest whitespace-terminated prefix of the first
/// `max_chars` characters, followed by a single `…`. If the prefix contains
/// no whitespace the cut lands exactly at `max_chars`. The visible output
/// never exceeds `max_chars + 1` characters.
pub fn clamp_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let prefix: String = text.chars().take(max_chars).collect();
    let trimmed = match prefix.rfind(char::is_whitespace) {
        Some(idx) => prefix[..idx].trim_end(),
        None => prefix.as_str(),
    };

    format!("{}…", trimmed)
}

/// Validate that a file exists
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(DeckError::ValidationError(format!(
            "Path not found: {:?}",
            path
        )));
    }
    if !path.is_file() {
        return Err(DeckError::ValidationError(format!(
            "Path is not a file: {:?}",
            path
        )));
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(DeckError::FileReadError)?;
    } else if !path.is_dir() {
        return Err(DeckError::ValidationError(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

/// Ensure a file's parent directory exists
pub fn ensure_parent_directory_exists(file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory_exists(parent)?;
        }
    }
    Ok(())
}

/// Validate write permissions for a directory
pub fn validate_directory_writable(path: &Path) -> Result<()> {
    ensure_directory_exists(path)?;

    let test_file = path.join(format!("test_write_{}.tmp", uuid::Uuid::new_v4()));
    match std::fs::File::create(&test_file) {
        Ok(_) => {
            if let Err(e) = std::fs::remove_file(&test_file) {
                warn!("Failed to clean up test file {:?}: {}", test_file, e);
            }
            Ok(())
        }
        Err(e) => Err(DeckError::ValidationError(format!(
            "Directory is not writable: {:?} - {}",
            path, e
        ))),
    }
}
