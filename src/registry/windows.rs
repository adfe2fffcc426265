//! `KeyValueStore` backed by the Windows registry

use crate::registry::traits::KeyValueStore;
use crate::utils::error::{RandomizerError, Result};
use std::io;
use winreg::enums::HKEY_LOCAL_MACHINE;
use winreg::RegKey;

/// Registry store rooted at `HKEY_LOCAL_MACHINE`.
///
/// Writing there requires elevation; without it every call fails with
/// access denied, which surfaces as a `Registry` error.
pub struct WindowsRegistry {
    root: RegKey,
}

impl WindowsRegistry {
    pub fn local_machine() -> Self {
        Self {
            root: RegKey::predef(HKEY_LOCAL_MACHINE),
        }
    }
}

fn registry_error(action: &str, key_path: &str, e: io::Error) -> RandomizerError {
    RandomizerError::Registry(format!("{} {}: {}", action, key_path, e))
}

impl KeyValueStore for WindowsRegistry {
    fn id(&self) -> &'static str {
        "windows-registry"
    }

    fn set_value(&self, key_path: &str, name: &str, value: &str) -> Result<()> {
        let (key, _) = self
            .root
            .create_subkey(key_path)
            .map_err(|e| registry_error("Cannot open", key_path, e))?;
        key.set_value(name, &value.to_string())
            .map_err(|e| registry_error("Cannot write", key_path, e))
    }

    fn get_value(&self, key_path: &str, name: &str) -> Result<Option<String>> {
        let key = match self.root.open_subkey(key_path) {
            Ok(key) => key,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(registry_error("Cannot open", key_path, e)),
        };
        match key.get_value::<String, _>(name) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(registry_error("Cannot read", key_path, e)),
        }
    }

    fn delete_value(&self, key_path: &str, name: &str) -> Result<()> {
        let (key, _) = self
            .root
            .create_subkey(key_path)
            .map_err(|e| registry_error("Cannot open", key_path, e))?;
        key.delete_value(name)
            .map_err(|e| registry_error("Cannot delete value under", key_path, e))
    }
}
