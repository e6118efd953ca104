//! Write cover art to disk.

use std::fs;
use std::path::{Path, PathBuf};

use super::CoverArt;
use crate::error::{Result, ResultExt};

/// Write `cover` as `{dir}/{stem}.{ext}` and return the path.
///
/// Creates `dir` if needed. Writes to a temp file first, then renames, so a
/// reader never sees a half-written image.
pub fn write_cover(cover: &CoverArt, dir: &Path, stem: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(format!("creating {}", dir.display()))?;

    let file_name = format!("{}.{}", stem, cover.extension());
    let path = dir.join(&file_name);
    let temp_path = dir.join(format!("{}.part", file_name));

    fs::write(&temp_path, &cover.data)
        .with_context(format!("writing {}", temp_path.display()))?;
    fs::rename(&temp_path, &path).with_context(format!("renaming to {}", path.display()))?;

    tracing::debug!(path = %path.display(), bytes = cover.len(), "Wrote cover art");
    Ok(path)
}
