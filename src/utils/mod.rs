//! Utility modules for error handling and configuration

pub mod config;
pub mod error;
pub mod platform;

// Re-export for convenience
pub use config::{Settings, DEFAULT_IMAGE_EXTENSIONS};
pub use error::{RandomizerError, Result};
pub use platform::{app_data_dir, WORKING_DIR_NAME};
