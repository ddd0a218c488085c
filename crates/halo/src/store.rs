use crate::session::Session;
use directories::ProjectDirs;
use fs_err as fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SNAPSHOT_FILE: &str = "workspace.json";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to determine data directory")]
    DataDirNotFound,
    #[error("No snapshot location; changes are kept in memory only")]
    Detached,
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn default_snapshot_path() -> Result<PathBuf, StoreError> {
    let proj_dirs =
        ProjectDirs::from("org", "troia", "halo-editor").ok_or(StoreError::DataDirNotFound)?;
    Ok(proj_dirs.data_dir().join(SNAPSHOT_FILE))
}

/// Whole-session snapshot on disk. Every failure degrades to the default
/// preset on load and to a warning on save. A detached store has no file at
/// all and never persists.
#[derive(Debug, Clone)]
pub struct Store {
    path: Option<PathBuf>,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn detached() -> Self {
        Self { path: None }
    }

    /// Uses `path` when configured, otherwise the per-user data directory.
    pub fn locate(path: Option<&Path>) -> Self {
        if let Some(path) = path {
            return Self::new(path);
        }
        match default_snapshot_path() {
            Ok(path) => Self::new(path),
            Err(e) => {
                log::warn!("{}; editing without a snapshot", e);
                Self::detached()
            }
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn try_load(&self) -> Result<Option<Session>, StoreError> {
        let Some(path) = &self.path else {
            return Ok(None);
        };
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut session: Session = serde_json::from_str(&json)?;
        session.normalize();
        Ok(Some(session))
    }

    pub fn load(&self) -> Session {
        match self.try_load() {
            Ok(Some(session)) => session,
            Ok(None) => {
                log::info!("No snapshot at {:?}, starting from the default preset", self.path);
                Session::default()
            }
            Err(e) => {
                log::warn!("Ignoring snapshot {:?}: {}", self.path, e);
                Session::default()
            }
        }
    }

    pub fn try_save(&self, session: &Session) -> Result<(), StoreError> {
        let path = self.path.as_ref().ok_or(StoreError::Detached)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(session)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn save(&self, session: &Session) {
        match self.try_save(session) {
            Ok(()) => log::debug!("Saved snapshot to {:?}", self.path),
            Err(e) => log::warn!("Failed to save snapshot {:?}: {}", self.path, e),
        }
    }
}
