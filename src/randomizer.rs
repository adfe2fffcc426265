//! Drive icon randomizer
//!
//! Ties the collaborators together: pick one image per fixed drive, turn it
//! into an icon, store it and bind it. Every drive is handled in isolation;
//! a failure is recorded in that drive's report and the run moves on.

use crate::drives::{DriveIdentifier, DriveLister};
use crate::icon::{decode_image, encode_icon, CleanupFailure, IconStore};
use crate::images::ImageFinder;
use crate::registry::{DriveIconRegistrar, KeyValueStore};
use crate::utils::error::{RandomizerError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// What happened to a single drive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriveAction {
    /// Icon generated from `image`, stored at `icon` and bound
    Assigned { image: PathBuf, icon: PathBuf },
    /// Binding removed
    Cleared,
    /// No image left for this drive; nothing touched
    Skipped,
}

/// Outcome for one drive
#[derive(Debug)]
pub struct DriveReport {
    pub drive: DriveIdentifier,
    pub result: Result<DriveAction>,
}

/// Outcome of a whole apply or clear run
#[derive(Debug, Default)]
pub struct RunReport {
    pub drives: Vec<DriveReport>,
    pub cleanup_failures: Vec<CleanupFailure>,
}

impl RunReport {
    pub fn failures(&self) -> impl Iterator<Item = &DriveReport> {
        self.drives.iter().filter(|report| report.result.is_err())
    }

    pub fn assigned(&self) -> impl Iterator<Item = &DriveReport> {
        self.drives
            .iter()
            .filter(|report| matches!(report.result, Ok(DriveAction::Assigned { .. })))
    }

    /// True when every drive and every cleanup step succeeded
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none() && self.cleanup_failures.is_empty()
    }
}

/// Shuffle the candidates and keep at most `count` of them
pub fn select_images<R: Rng + ?Sized>(
    mut candidates: Vec<PathBuf>,
    count: usize,
    rng: &mut R,
) -> Vec<PathBuf> {
    candidates.shuffle(rng);
    candidates.truncate(count);
    candidates
}

/// Artifact name for a source image: its file name, extension included
fn artifact_name(image: &Path) -> Option<String> {
    image
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

/// Images with the same file name end up in the same `.ico`; the later one wins.
fn warn_on_shared_names(selected: &[PathBuf]) {
    let mut seen: HashMap<String, &Path> = HashMap::new();
    for image in selected {
        let Some(name) = artifact_name(image) else {
            continue;
        };
        if let Some(previous) = seen.insert(name.clone(), image) {
            warn!(
                "{:?} and {:?} share the icon file {}.ico; only the latter is kept",
                previous, image, name
            );
        }
    }
}

/// The apply/clear pipeline over injected collaborators
pub struct DriveIconRandomizer<D, F, S> {
    drives: D,
    finder: F,
    store: IconStore,
    registrar: DriveIconRegistrar<S>,
}

impl<D, F, S> DriveIconRandomizer<D, F, S>
where
    D: DriveLister,
    F: ImageFinder,
    S: KeyValueStore,
{
    /// Create the randomizer, making sure the icon working directory exists
    pub fn new(
        drives: D,
        finder: F,
        store: IconStore,
        registrar: DriveIconRegistrar<S>,
    ) -> Result<Self> {
        store.ensure_working_directory()?;
        Ok(Self {
            drives,
            finder,
            store,
            registrar,
        })
    }

    pub fn store(&self) -> &IconStore {
        &self.store
    }

    pub fn registrar(&self) -> &DriveIconRegistrar<S> {
        &self.registrar
    }

    /// Give every fixed drive a random icon from `image_root`.
    ///
    /// Drives beyond the number of available images are left untouched.
    /// Returns `Err` only when the image root or the drive list is unusable.
    pub fn apply<R: Rng + ?Sized>(&self, image_root: &Path, rng: &mut R) -> Result<RunReport> {
        let candidates = self.finder.find_images(image_root)?;
        let drives = self.drives.fixed_drives()?;
        info!(
            "{} fixed drives, {} candidate images",
            drives.len(),
            candidates.len()
        );

        let selected = select_images(candidates, drives.len(), rng);
        warn_on_shared_names(&selected);
        let mut report = RunReport::default();

        for (index, drive) in drives.into_iter().enumerate() {
            let result = match selected.get(index) {
                Some(image) => self
                    .assign(drive, image)
                    .map(|icon| DriveAction::Assigned {
                        image: image.clone(),
                        icon,
                    }),
                None => {
                    debug!("No image left for drive {}, leaving it unchanged", drive);
                    Ok(DriveAction::Skipped)
                }
            };

            if let Err(e) = &result {
                error!("Error setting icon for drive {}: {}", drive, e);
            }
            report.drives.push(DriveReport { drive, result });
        }

        Ok(report)
    }

    fn assign(&self, drive: DriveIdentifier, image: &Path) -> Result<PathBuf> {
        let name = artifact_name(image).ok_or_else(|| RandomizerError::Decode {
            path: image.to_path_buf(),
            message: "path has no file name".to_string(),
        })?;
        debug!("Setting icon for drive {} to {}", drive, name);

        let artifact = {
            let raster = decode_image(image)?;
            encode_icon(&raster)?
        };
        let icon_path = self.store.save(&artifact, &name)?;
        self.registrar.set(drive, &icon_path)?;

        info!("Drive {} -> {}", drive, icon_path.display());
        Ok(icon_path)
    }

    /// Remove every fixed drive's binding, then delete all generated icons
    pub fn clear(&self) -> Result<RunReport> {
        let drives = self.drives.fixed_drives()?;
        let mut report = RunReport::default();

        for drive in drives {
            let result = self.registrar.clear(drive).map(|()| DriveAction::Cleared);
            match &result {
                Ok(_) => info!("Cleared icon for drive {}", drive),
                Err(e) => error!("Error clearing icon for drive {}: {}", drive, e),
            }
            report.drives.push(DriveReport { drive, result });
        }

        report.cleanup_failures = self.store.clear_all()?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_select_images_without_replacement() {
        let mut rng = StdRng::seed_from_u64(7);
        let picked = select_images(paths(&["a", "b", "c", "d"]), 3, &mut rng);
        assert_eq!(picked.len(), 3);
        let unique: HashSet<_> = picked.iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_select_images_short_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        let picked = select_images(paths(&["only"]), 4, &mut rng);
        assert_eq!(picked, paths(&["only"]));

        let picked = select_images(Vec::new(), 2, &mut rng);
        assert!(picked.is_empty());
    }

    #[test]
    fn test_select_images_is_reproducible_with_seed() {
        let pool = paths(&["a", "b", "c", "d", "e", "f"]);
        let first = select_images(pool.clone(), 3, &mut StdRng::seed_from_u64(42));
        let second = select_images(pool, 3, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_run_report_counts() {
        let c = DriveIdentifier::new('C').unwrap();
        let d = DriveIdentifier::new('D').unwrap();
        let report = RunReport {
            drives: vec![
                DriveReport {
                    drive: c,
                    result: Ok(DriveAction::Assigned {
                        image: PathBuf::from("a.png"),
                        icon: PathBuf::from("a.png.ico"),
                    }),
                },
                DriveReport {
                    drive: d,
                    result: Err(RandomizerError::Registry("access denied".into())),
                },
            ],
            cleanup_failures: Vec::new(),
        };

        assert_eq!(report.assigned().count(), 1);
        assert_eq!(report.failures().count(), 1);
        assert!(!report.is_clean());
    }
}
