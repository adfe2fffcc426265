//! Fixed-drive discovery

use crate::utils::error::{RandomizerError, Result};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// A drive letter, always stored uppercase
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DriveIdentifier(char);

impl DriveIdentifier {
    pub fn new(letter: char) -> Result<Self> {
        if letter.is_ascii_alphabetic() {
            Ok(Self(letter.to_ascii_uppercase()))
        } else {
            Err(RandomizerError::Usage(format!(
                "Invalid drive letter: {:?}",
                letter
            )))
        }
    }

    /// Derive the identifier from a root name such as `C:\`
    pub fn from_root_name(name: &str) -> Result<Self> {
        match name.chars().next() {
            Some(letter) => Self::new(letter),
            None => Err(RandomizerError::Usage("Empty drive name".to_string())),
        }
    }

    pub fn letter(self) -> char {
        self.0
    }
}

impl fmt::Display for DriveIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.0)
    }
}

impl FromStr for DriveIdentifier {
    type Err = RandomizerError;

    /// Accepts `C`, `C:` and `C:\`
    fn from_str(s: &str) -> Result<Self> {
        let rest = s.get(1..).unwrap_or("");
        if !matches!(rest, "" | ":" | ":\\" | ":/") {
            return Err(RandomizerError::Usage(format!("Invalid drive: {:?}", s)));
        }
        Self::from_root_name(s)
    }
}

/// Source of the drives to operate on
pub trait DriveLister {
    /// Fixed drives in letter order
    fn fixed_drives(&self) -> Result<Vec<DriveIdentifier>>;
}

impl<L: DriveLister + ?Sized> DriveLister for Box<L> {
    fn fixed_drives(&self) -> Result<Vec<DriveIdentifier>> {
        (**self).fixed_drives()
    }
}

impl DriveLister for Vec<DriveIdentifier> {
    fn fixed_drives(&self) -> Result<Vec<DriveIdentifier>> {
        Ok(self.clone())
    }
}

/// Restricts another lister to an explicit set of drives
pub struct RestrictedDrives<L> {
    inner: L,
    allowed: Vec<DriveIdentifier>,
}

impl<L: DriveLister> RestrictedDrives<L> {
    pub fn new(inner: L, allowed: Vec<DriveIdentifier>) -> Self {
        Self { inner, allowed }
    }
}

impl<L: DriveLister> DriveLister for RestrictedDrives<L> {
    fn fixed_drives(&self) -> Result<Vec<DriveIdentifier>> {
        let fixed = self.inner.fixed_drives()?;
        for drive in &self.allowed {
            if !fixed.contains(drive) {
                warn!("Drive {} is not a fixed drive, ignoring", drive);
            }
        }
        Ok(fixed
            .into_iter()
            .filter(|drive| self.allowed.contains(drive))
            .collect())
    }
}

/// Lists the fixed drives reported by the operating system
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemDriveLister;

#[cfg(windows)]
impl DriveLister for SystemDriveLister {
    fn fixed_drives(&self) -> Result<Vec<DriveIdentifier>> {
        use std::iter::once;
        use winapi::um::fileapi::{GetDriveTypeW, GetLogicalDrives};
        use winapi::um::winbase::DRIVE_FIXED;

        let mask = unsafe { GetLogicalDrives() };
        if mask == 0 {
            return Err(RandomizerError::Environment(format!(
                "Cannot enumerate drives: {}",
                std::io::Error::last_os_error()
            )));
        }

        let mut drives = Vec::new();
        for (index, letter) in ('A'..='Z').enumerate() {
            if mask & (1 << index) == 0 {
                continue;
            }
            let root: Vec<u16> = format!("{}:\\", letter)
                .encode_utf16()
                .chain(once(0))
                .collect();
            let kind = unsafe { GetDriveTypeW(root.as_ptr()) };
            debug!("Drive {}:\\ has type {}", letter, kind);
            if kind == DRIVE_FIXED {
                drives.push(DriveIdentifier(letter));
            }
        }
        Ok(drives)
    }
}

#[cfg(not(windows))]
impl DriveLister for SystemDriveLister {
    fn fixed_drives(&self) -> Result<Vec<DriveIdentifier>> {
        debug!("No drive letters on this platform");
        Err(RandomizerError::Environment(
            "Drive icons are only supported on Windows".to_string(),
        ))
    }
}
