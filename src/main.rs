//! Drive Icon Randomizer
//!
//! Gives every fixed drive a random icon picked from a directory of images,
//! or removes the icons again with `--clear`.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use drive_icon_randomizer::{
    DirectoryImageFinder, DriveAction, DriveIconRandomizer, DriveIconRegistrar, DriveIdentifier,
    DriveLister, IconStore, RestrictedDrives, RunReport, Settings, SystemDriveLister,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;

#[cfg(windows)]
use drive_icon_randomizer::registry::WindowsRegistry as SystemStore;
// Off Windows drive enumeration fails before anything reaches the store.
#[cfg(not(windows))]
use drive_icon_randomizer::MemoryStore as SystemStore;

/// Exit code for malformed invocations
const EXIT_USAGE: u8 = 2;

#[derive(Parser)]
#[command(
    name = "drive-icon-randomizer",
    version,
    about = "Sets the drive icons for all fixed drives to random images in the specified directory"
)]
struct Args {
    /// Directory of images (.jpg, .jpeg, .png, .gif, .bmp), searched recursively
    #[arg(value_name = "IMAGE_DIR", conflicts_with = "clear")]
    image_dir: Option<PathBuf>,

    /// Clear all drive icons
    #[arg(long)]
    clear: bool,

    /// Only touch this drive (repeatable)
    #[arg(long = "drive", value_name = "LETTER")]
    drives: Vec<DriveIdentifier>,

    /// Store generated icons here instead of the application data directory
    #[arg(long, value_name = "PATH", hide = true)]
    working_dir: Option<PathBuf>,

    /// Seed the image shuffle for reproducible assignments
    #[arg(long, hide = true)]
    seed: Option<u64>,

    /// Log every step
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_target(false)
        .init();

    if args.image_dir.is_none() && !args.clear {
        // Nothing to do; same as --help but not a success
        if let Err(e) = Args::command().print_help() {
            eprintln!("Failed to print usage: {}", e);
        }
        return ExitCode::from(EXIT_USAGE);
    }

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let settings = Settings::resolve(args.working_dir.as_deref())?;

    let drives: Box<dyn DriveLister> = if args.drives.is_empty() {
        Box::new(SystemDriveLister)
    } else {
        Box::new(RestrictedDrives::new(SystemDriveLister, args.drives))
    };

    let randomizer = DriveIconRandomizer::new(
        drives,
        DirectoryImageFinder::new(&settings.image_extensions),
        IconStore::new(settings.working_dir.clone()),
        DriveIconRegistrar::new(system_store()),
    )?;

    if args.clear {
        let report = randomizer.clear()?;
        print_summary(&report);
        return Ok(ExitCode::SUCCESS);
    }

    let image_dir = args.image_dir.unwrap_or_default();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match randomizer.apply(&image_dir, &mut rng) {
        Ok(report) => {
            print_summary(&report);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_usage() => {
            println!("{}", e);
            Ok(ExitCode::from(EXIT_USAGE))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(windows)]
fn system_store() -> SystemStore {
    SystemStore::local_machine()
}

#[cfg(not(windows))]
fn system_store() -> SystemStore {
    SystemStore::new()
}

fn print_summary(report: &RunReport) {
    for entry in &report.drives {
        match &entry.result {
            Ok(DriveAction::Assigned { image, icon }) => println!(
                "{} {} ({})",
                entry.drive,
                file_name(image),
                icon.display()
            ),
            Ok(DriveAction::Cleared) => println!("{} cleared", entry.drive),
            Ok(DriveAction::Skipped) => println!("{} unchanged (no image left)", entry.drive),
            Err(e) => println!("{} failed: {}", entry.drive, e),
        }
    }
    for failure in &report.cleanup_failures {
        println!("Could not delete {}: {}", failure.path.display(), failure.error);
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
