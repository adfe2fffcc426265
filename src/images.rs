//! Candidate image discovery

use crate::utils::error::{RandomizerError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Source of candidate images
pub trait ImageFinder {
    /// All candidate image files under `root`
    fn find_images(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

/// Recursively lists files under a directory whose extension is in a fixed set
#[derive(Debug, Clone)]
pub struct DirectoryImageFinder {
    extensions: Vec<String>,
}

impl DirectoryImageFinder {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    /// Case-insensitive extension check
    pub fn is_candidate(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions.iter().any(|allowed| *allowed == ext)
            })
            .unwrap_or(false)
    }
}

impl ImageFinder for DirectoryImageFinder {
    fn find_images(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(RandomizerError::Usage(format!(
                "Directory does not exist: {}",
                root.display()
            )));
        }

        let mut images: Vec<PathBuf> = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && self.is_candidate(entry.path()))
            .map(|entry| entry.into_path())
            .collect();

        images.sort();
        debug!("Found {} candidate images under {:?}", images.len(), root);
        Ok(images)
    }
}
