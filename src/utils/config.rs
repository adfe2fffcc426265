//! Application configuration

use crate::utils::error::{RandomizerError, Result};
use crate::utils::platform;
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Image extensions accepted as icon sources (lowercase, without the dot)
pub const DEFAULT_IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "bmp"];

/// Application settings, resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory holding the generated `.ico` artifacts
    pub working_dir: PathBuf,

    /// Extensions considered when searching for candidate images
    pub image_extensions: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            working_dir: platform::app_data_dir(),
            image_extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl Settings {
    /// Build settings, optionally overriding the working directory.
    ///
    /// The working directory is made absolute because it ends up in the
    /// registry, where a relative path would be meaningless to Explorer.
    pub fn resolve(working_dir: Option<&Path>) -> Result<Self> {
        let mut settings = Self::default();
        if let Some(dir) = working_dir {
            settings.working_dir = dir.to_path_buf();
        }
        settings.working_dir = settings
            .working_dir
            .absolutize()
            .map_err(|e| {
                RandomizerError::Environment(format!(
                    "Cannot resolve working directory {:?}: {}",
                    settings.working_dir, e
                ))
            })?
            .into_owned();
        Ok(settings)
    }
}
