pub mod memory;
pub mod registrar;
pub mod traits;
#[cfg(windows)]
pub mod windows;

pub use memory::MemoryStore;
pub use registrar::{default_icon_key, DriveIconRegistrar, DRIVE_ICONS_KEY};
pub use traits::KeyValueStore;
#[cfg(windows)]
pub use windows::WindowsRegistry;
