//! Drive Icon Randomizer library
//!
//! Converts images into single-entry PNG-in-ICO files and binds them to fixed
//! drives through Explorer's `DriveIcons` registry key.

pub mod drives;
pub mod icon;
pub mod images;
pub mod randomizer;
pub mod registry;
pub mod utils;

// Re-export main types for easier use
pub use drives::{DriveIdentifier, DriveLister, RestrictedDrives, SystemDriveLister};
pub use icon::{decode_image, encode_icon, CleanupFailure, IconArtifact, IconStore};
pub use images::{DirectoryImageFinder, ImageFinder};
pub use randomizer::{DriveAction, DriveIconRandomizer, DriveReport, RunReport};
pub use registry::{DriveIconRegistrar, KeyValueStore, MemoryStore};
pub use utils::{RandomizerError, Result, Settings};
