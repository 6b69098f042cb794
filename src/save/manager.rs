use super::schema::{SaveData, SaveEnvelope};
use crate::core::config::GameConfig;
use crate::core::constants::{SAVE_FILE_NAME, SAVE_VERSION};
use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("save file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("save file checksum does not match its contents")]
    ChecksumMismatch,
    #[error("save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
    #[error("could not determine a save directory")]
    NoSaveDirectory,
    #[error("save file has an invalid room key: {0}")]
    InvalidKey(String),
    #[error("save file has an invalid map size: {num_floors} floors of width {width}")]
    InvalidMapSize { num_floors: usize, width: usize },
}

/// Reads and writes the single save slot.
#[derive(Debug, Clone)]
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Uses the platform data directory, creating it if needed.
    pub fn new() -> Result<Self, SaveError> {
        let project_dirs =
            ProjectDirs::from("", "", "thousand-rooms").ok_or(SaveError::NoSaveDirectory)?;
        let data_dir = project_dirs.data_dir();
        fs::create_dir_all(data_dir)?;
        Ok(Self {
            save_path: data_dir.join(SAVE_FILE_NAME),
        })
    }

    pub fn with_path(save_path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: save_path.into(),
        }
    }

    pub fn from_config(config: &GameConfig) -> Result<Self, SaveError> {
        match &config.save_path {
            Some(path) => Ok(Self::with_path(path)),
            None => Self::new(),
        }
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    /// Writes to a sibling temp file and renames it over the slot, so a
    /// crash mid-write never leaves a truncated save.
    pub fn save(&self, data: &SaveData, run_id: Uuid) -> Result<(), SaveError> {
        let envelope = SaveEnvelope {
            version: SAVE_VERSION,
            saved_at: chrono::Utc::now().to_rfc3339(),
            run_id,
            checksum: data.checksum()?,
            data: data.clone(),
        };
        let json = serde_json::to_string_pretty(&envelope)?;

        if let Some(parent) = self.save_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp_path = self.save_path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.save_path)?;

        tracing::info!(path = %self.save_path.display(), %run_id, "game saved");
        Ok(())
    }

    /// Reads and verifies the whole file before returning anything.
    pub fn load(&self) -> Result<SaveEnvelope, SaveError> {
        let json = fs::read_to_string(&self.save_path)?;
        let envelope: SaveEnvelope = serde_json::from_str(&json)?;

        if envelope.version != SAVE_VERSION {
            return Err(SaveError::VersionMismatch {
                expected: SAVE_VERSION,
                found: envelope.version,
            });
        }
        if envelope.data.checksum()? != envelope.checksum {
            return Err(SaveError::ChecksumMismatch);
        }

        tracing::info!(path = %self.save_path.display(), run_id = %envelope.run_id, "save loaded");
        Ok(envelope)
    }
}
