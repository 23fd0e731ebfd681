use crate::error::KnetError;
use crate::index::{Unit, parent_tile, tile_name};
use log::{debug, info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Configuration for organizing tile files into nested folders.
#[derive(Debug, Clone)]
pub struct OrganizeConfig {
    units: Vec<Unit>,
    root: PathBuf,
}

impl OrganizeConfig {
    /// Folders are nested from the coarsest to the finest of `units`.
    pub fn new(units: impl IntoIterator<Item = Unit>) -> Self {
        let mut units: Vec<Unit> = units.into_iter().collect();
        units.sort_unstable_by(|a, b| b.cmp(a));
        units.dedup();

        Self {
            units,
            root: PathBuf::from("."),
        }
    }

    /// Builds a config from a unit list such as `"100km 10km"`.
    ///
    /// # Example
    /// ```
    /// use kvadratnet_rs::{OrganizeConfig, Unit};
    ///
    /// # fn main() -> Result<(), kvadratnet_rs::KnetError> {
    /// let config = OrganizeConfig::from_units_str("10km 100km")?;
    /// assert_eq!(config.units(), &[Unit::HundredKm, Unit::TenKm]);
    /// assert!(OrganizeConfig::from_units_str("10km 12km").is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_units_str(units: &str) -> Result<Self, KnetError> {
        Ok(Self::new(Unit::parse_list(units)?))
    }

    /// Directory the folder tree is created in, `.` by default.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }
}

/// Outcome of [`organize_files`].
#[derive(Debug, Default, PartialEq)]
pub struct OrganizeReport {
    /// `(source, destination)` of every moved file
    pub moved: Vec<(PathBuf, PathBuf)>,
    /// Files without a tile name in them, or already present in their folder
    pub skipped: Vec<PathBuf>,
}

/// Relative folder for a tile, one level per unit, e.g. `100km_62_5/10km_622_57`.
///
/// `units` must be ordered from coarsest to finest.
pub fn tile_folder(tilename: &str, units: &[Unit]) -> Result<PathBuf, KnetError> {
    units
        .iter()
        .map(|unit| parent_tile(tilename, Some(*unit)))
        .collect()
}

/// Moves files into folders named after their parent tiles.
///
/// Files without a tile name are skipped, as are files whose destination
/// already exists. A unit that is not coarser than a file's own tile aborts
/// the batch with [`KnetError::InvalidHierarchy`]. Moves across file systems
/// fall back to copy and remove.
pub fn organize_files<P: AsRef<Path>>(
    paths: &[P],
    config: &OrganizeConfig,
) -> Result<OrganizeReport, KnetError> {
    let mut report = OrganizeReport::default();

    for path in paths {
        let path = path.as_ref();
        let (Some(file_name), Some(stem)) = (path.file_name(), path.file_stem()) else {
            warn!("{}: Not a file. Skipping.", path.display());
            report.skipped.push(path.to_path_buf());
            continue;
        };

        let tilename = match tile_name(&stem.to_string_lossy()) {
            Ok(name) => name,
            Err(_) => {
                warn!("{}: No kvadratnet tile name found. Skipping.", path.display());
                report.skipped.push(path.to_path_buf());
                continue;
            }
        };

        let folder = config.root.join(tile_folder(&tilename, &config.units)?);
        debug!("Creating {}", folder.display());
        fs::create_dir_all(&folder)
            .map_err(|e| KnetError::IoError(format!("{}: {}", folder.display(), e)))?;

        let destination = folder.join(file_name);
        if destination.exists() {
            warn!(
                "{}: {} already exists. Skipping.",
                path.display(),
                destination.display()
            );
            report.skipped.push(path.to_path_buf());
            continue;
        }

        info!(
            "Moving {} into {}",
            file_name.to_string_lossy(),
            folder.display()
        );
        move_file(path, &destination)
            .map_err(|e| KnetError::IoError(format!("{}: {}", path.display(), e)))?;
        report.moved.push((path.to_path_buf(), destination));
    }

    Ok(report)
}

fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            debug!("{}: Copying across file systems", from.display());
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        result => result,
    }
}
