use crate::error::KnetError;
use crate::index::tile_name;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for batch renaming of tile files.
///
/// Without a prefix or postfix everything but the tile name is stripped from
/// the file name, e.g. `pre_1km_6090_600_post.tif` becomes `1km_6090_600.tif`.
#[derive(Debug, Clone, Default)]
pub struct RenameConfig {
    pub prefix: String,
    pub postfix: String,
}

impl RenameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text placed before the tile name, e.g. `dtm_1km_6666_444.tif`.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Text placed after the tile name, e.g. `1km_6666_444_v2.tif`.
    pub fn postfix(mut self, postfix: impl Into<String>) -> Self {
        self.postfix = postfix.into();
        self
    }
}

/// Outcome of [`rename_files`].
#[derive(Debug, Default, PartialEq)]
pub struct RenameReport {
    /// `(source, destination)` of every renamed file
    pub renamed: Vec<(PathBuf, PathBuf)>,
    /// Files without a tile name in them, or whose new name is taken
    pub skipped: Vec<PathBuf>,
}

/// Returns the path `path` is renamed to, in the same directory.
pub fn renamed_path(path: &Path, config: &RenameConfig) -> Result<PathBuf, KnetError> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let tilename = tile_name(&stem)?;
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let file_name = format!("{}{}{}{}", config.prefix, tilename, config.postfix, extension);
    Ok(path.with_file_name(file_name))
}

/// Batch renames files with tile names in them.
///
/// Files without a tile name are skipped and reported; the remaining files are
/// still renamed. Existing files are never overwritten: a file whose new name
/// is already taken, e.g. by an earlier file of the batch with the same tile,
/// is skipped as well.
pub fn rename_files<P: AsRef<Path>>(
    paths: &[P],
    config: &RenameConfig,
) -> Result<RenameReport, KnetError> {
    let mut report = RenameReport::default();

    for path in paths {
        let path = path.as_ref();
        let destination = match renamed_path(path, config) {
            Ok(destination) => destination,
            Err(KnetError::NoTileNameFound(_)) => {
                warn!("{}: No kvadratnet tile name found. Skipping.", path.display());
                report.skipped.push(path.to_path_buf());
                continue;
            }
            Err(e) => return Err(e),
        };

        if destination == path {
            debug!("{}: Already named. Skipping.", path.display());
            continue;
        }
        if destination.exists() {
            warn!(
                "{}: {} already exists. Skipping.",
                path.display(),
                destination.display()
            );
            report.skipped.push(path.to_path_buf());
            continue;
        }

        info!("Renaming {} to {}", path.display(), destination.display());
        fs::rename(path, &destination)
            .map_err(|e| KnetError::IoError(format!("{}: {}", path.display(), e)))?;
        report.renamed.push((path.to_path_buf(), destination));
    }

    Ok(report)
}
