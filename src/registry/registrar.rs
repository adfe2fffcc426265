use crate::drives::DriveIdentifier;
use crate::registry::traits::KeyValueStore;
use crate::utils::error::Result;
use std::path::Path;
use tracing::debug;

/// Parent key Explorer consults for per-drive icon overrides
pub const DRIVE_ICONS_KEY: &str = r"SOFTWARE\Microsoft\Windows\CurrentVersion\Explorer\DriveIcons";

/// Value name of a key's default value
const DEFAULT_VALUE: &str = "";

/// Key holding the icon binding for `drive`
pub fn default_icon_key(drive: DriveIdentifier) -> String {
    format!(r"{}\{}\DefaultIcon", DRIVE_ICONS_KEY, drive.letter())
}

/// Binds drive letters to icon files in a `KeyValueStore`
pub struct DriveIconRegistrar<S> {
    store: S,
}

impl<S: KeyValueStore> DriveIconRegistrar<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Point `drive` at `icon_path`, replacing any existing binding
    pub fn set(&self, drive: DriveIdentifier, icon_path: &Path) -> Result<()> {
        let key = default_icon_key(drive);
        let value = icon_path.to_string_lossy();
        debug!("[{}] {} = {}", self.store.id(), key, value);
        self.store.set_value(&key, DEFAULT_VALUE, &value)
    }

    /// Remove the binding value for `drive`, leaving its key in place
    pub fn clear(&self, drive: DriveIdentifier) -> Result<()> {
        let key = default_icon_key(drive);
        debug!("[{}] delete default value of {}", self.store.id(), key);
        self.store.delete_value(&key, DEFAULT_VALUE)
    }

    /// Current binding for `drive`, if any
    pub fn binding(&self, drive: DriveIdentifier) -> Result<Option<String>> {
        self.store.get_value(&default_icon_key(drive), DEFAULT_VALUE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::memory::MemoryStore;
    use crate::utils::error::RandomizerError;

    fn drive(letter: char) -> DriveIdentifier {
        DriveIdentifier::new(letter).unwrap()
    }

    #[test]
    fn test_key_layout() {
        assert_eq!(
            default_icon_key(drive('d')),
            r"SOFTWARE\Microsoft\Windows\CurrentVersion\Explorer\DriveIcons\D\DefaultIcon"
        );
    }

    #[test]
    fn test_set_then_read_back() {
        let registrar = DriveIconRegistrar::new(MemoryStore::new());
        registrar
            .set(drive('C'), Path::new(r"C:\Users\me\AppData\Roaming\x\a.png.ico"))
            .unwrap();
        assert_eq!(
            registrar.binding(drive('C')).unwrap().as_deref(),
            Some(r"C:\Users\me\AppData\Roaming\x\a.png.ico")
        );
    }

    #[test]
    fn test_set_overwrites() {
        let registrar = DriveIconRegistrar::new(MemoryStore::new());
        registrar.set(drive('C'), Path::new("/icons/a.ico")).unwrap();
        registrar.set(drive('C'), Path::new("/icons/b.ico")).unwrap();

        assert_eq!(
            registrar.binding(drive('C')).unwrap().as_deref(),
            Some("/icons/b.ico")
        );
        assert_eq!(registrar.store().value_count(), 1);
    }

    #[test]
    fn test_clear_keeps_key_and_removes_value() {
        let registrar = DriveIconRegistrar::new(MemoryStore::new());
        registrar.set(drive('E'), Path::new("/icons/e.ico")).unwrap();
        registrar.clear(drive('E')).unwrap();

        assert_eq!(registrar.binding(drive('E')).unwrap(), None);
        assert!(registrar.store().has_key(&default_icon_key(drive('E'))));
    }

    #[test]
    fn test_clear_without_binding_errors_and_leaves_others() {
        let registrar = DriveIconRegistrar::new(MemoryStore::new());
        registrar.set(drive('C'), Path::new("/icons/c.ico")).unwrap();

        let err = registrar.clear(drive('D')).unwrap_err();
        assert!(matches!(err, RandomizerError::Registry(_)));
        assert_eq!(
            registrar.binding(drive('C')).unwrap().as_deref(),
            Some("/icons/c.ico")
        );
    }
}
