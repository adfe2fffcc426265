//! Platform-specific paths for the drive icon randomizer
//!
//! Generated icons must live somewhere stable: Explorer reads them every time
//! it renders a drive, long after this process has exited.

use std::path::PathBuf;

/// Fixed subfolder under the per-user application-data root
pub const WORKING_DIR_NAME: &str = "DriveIconRandomizer";

/// Returns the per-user application-data directory for generated icons
/// - Windows: %APPDATA%\DriveIconRandomizer
/// - macOS: ~/Library/Application Support/DriveIconRandomizer
/// - Linux: ~/.local/share/DriveIconRandomizer
pub fn app_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(WORKING_DIR_NAME)
}
