//! Explanation notes attached to missing or absent days.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::AttendanceRecord;

/// Text a new note starts from.
pub const NOTE_TEMPLATE: &str = "미입력 사유 : ";

/// Notes keyed by `<employee>-<date>`, stored as a flat TOML table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExplanationNotes {
    entries: BTreeMap<String, String>,
}

impl ExplanationNotes {
    /// Load notes from a TOML file. A missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No notes file at {}", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| AppError::parse(format!("Invalid notes file: {e}")))
    }

    /// Write all notes back to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| AppError::parse(format!("Failed to serialize notes: {e}")))?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Note for a record, if one was written.
    pub fn get(&self, record: &AttendanceRecord) -> Option<&str> {
        self.get_by_key(&record.note_key())
    }

    pub fn get_by_key(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Set the note for an employee and date. Blank text removes it.
    pub fn set(&mut self, employee_id: &str, date: &str, text: &str) {
        let key = format!("{employee_id}-{date}");
        if text.trim().is_empty() {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, text.to_string());
        }
    }

    /// Remove a note, returning the old text.
    pub fn remove(&mut self, employee_id: &str, date: &str) -> Option<String> {
        self.entries.remove(&format!("{employee_id}-{date}"))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve the notes path against the config file location when relative.
pub fn resolve_path(notes_path: &Path, config_path: &Path) -> PathBuf {
    if notes_path.is_absolute() {
        return notes_path.to_path_buf();
    }
    match config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(notes_path),
        _ => notes_path.to_path_buf(),
    }
}
