//! Working directory for generated `.ico` artifacts

use crate::icon::encoder::IconArtifact;
use crate::utils::error::{RandomizerError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extension given to every artifact
pub const ICON_EXTENSION: &str = "ico";

/// A single artifact that could not be removed during cleanup
#[derive(Debug)]
pub struct CleanupFailure {
    pub path: PathBuf,
    pub error: RandomizerError,
}

/// Manages the icon files referenced by drive bindings
#[derive(Debug, Clone)]
pub struct IconStore {
    working_dir: PathBuf,
}

impl IconStore {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Create the working directory if it does not exist yet
    pub fn ensure_working_directory(&self) -> Result<()> {
        fs::create_dir_all(&self.working_dir).map_err(|e| {
            RandomizerError::Environment(format!(
                "Failed to create working directory {:?}: {}",
                self.working_dir, e
            ))
        })?;
        debug!("Working directory: {:?}", self.working_dir);
        Ok(())
    }

    /// Path an artifact named `name` is stored under
    pub fn icon_path(&self, name: &str) -> PathBuf {
        self.working_dir.join(format!("{}.{}", name, ICON_EXTENSION))
    }

    /// Write `artifact` to `<working_dir>/<name>.ico`, replacing any existing file
    pub fn save(&self, artifact: &IconArtifact, name: &str) -> Result<PathBuf> {
        let path = self.icon_path(name);
        fs::write(&path, artifact.as_bytes()).map_err(|e| RandomizerError::file(&path, e))?;
        debug!("Saved {} byte icon to {:?}", artifact.len(), path);
        Ok(path)
    }

    /// All `*.ico` files currently in the working directory, sorted
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        let (icons, _) = self.scan()?;
        Ok(icons)
    }

    /// Icons in the working directory plus the entries that could not be read
    fn scan(&self) -> Result<(Vec<PathBuf>, Vec<io::Error>)> {
        if !self.working_dir.exists() {
            return Ok((Vec::new(), Vec::new()));
        }

        let entries =
            fs::read_dir(&self.working_dir).map_err(|e| RandomizerError::file(&self.working_dir, e))?;

        let mut icons = Vec::new();
        let mut unreadable = Vec::new();
        for entry in entries {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if path.is_file() && is_icon_file(&path) {
                        icons.push(path);
                    }
                }
                Err(e) => {
                    warn!("Unreadable entry in {:?}: {}", self.working_dir, e);
                    unreadable.push(e);
                }
            }
        }

        icons.sort();
        Ok((icons, unreadable))
    }

    /// Delete every artifact, continuing past individual failures.
    ///
    /// Failures are returned rather than raised; only an unreadable working
    /// directory is an error.
    pub fn clear_all(&self) -> Result<Vec<CleanupFailure>> {
        self.clear_with(|path| fs::remove_file(path))
    }

    fn clear_with<F>(&self, mut remove: F) -> Result<Vec<CleanupFailure>>
    where
        F: FnMut(&Path) -> io::Result<()>,
    {
        let (icons, unreadable) = self.scan()?;

        let mut failures = self.unreadable_failures(unreadable);

        for path in icons {
            match remove(&path) {
                Ok(()) => debug!("Deleted {:?}", path),
                Err(e) => {
                    warn!("Failed to delete {:?}: {}", path, e);
                    failures.push(CleanupFailure {
                        error: RandomizerError::file(&path, e),
                        path,
                    });
                }
            }
        }

        Ok(failures)
    }

    /// Directory entries that could not be read are reported against the working directory
    fn unreadable_failures(&self, errors: Vec<io::Error>) -> Vec<CleanupFailure> {
        errors
            .into_iter()
            .map(|e| CleanupFailure {
                path: self.working_dir.clone(),
                error: RandomizerError::file(&self.working_dir, e),
            })
            .collect()
    }
}

fn is_icon_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(ICON_EXTENSION))
        .unwrap_or(false)
}
