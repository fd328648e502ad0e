//! Zip extraction
//!
//! Uses the native `zip` crate; no external `unzip` is required.

use crate::error::{FetchError, Result};
use crate::output;
use std::fs::File;
use std::path::Path;

/// Extract the zip archive at `archive` into `dest`.
///
/// `dest` (and its parents) are created if missing. Entries whose names would
/// land outside `dest` are skipped.
pub fn unzip(archive: &Path, dest: &Path) -> Result<()> {
    std::fs::create_dir_all(dest)?;

    let filename = archive
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "archive".to_string());

    output::with_spinner(&format!("extracting {}", filename), || {
        extract_zip(archive, dest)
    })?;

    output::detail(&format!("extracted {} to {}", filename, dest.display()));
    Ok(())
}

fn extract_zip(archive_path: &Path, dest: &Path) -> Result<()> {
    let archive_error = |message: String| FetchError::Archive {
        path: archive_path.to_path_buf(),
        message,
    };

    let file = File::open(archive_path)?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| archive_error(format!("zip read error: {}", e)))?;

    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| archive_error(format!("zip entry error: {}", e)))?;

        let outpath = match file.enclosed_name() {
            Some(path) => dest.join(path),
            None => continue,
        };

        if file.is_dir() {
            std::fs::create_dir_all(&outpath)?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut outfile = File::create(&outpath)?;
        std::io::copy(&mut file, &mut outfile)
            .map_err(|e| archive_error(format!("write error for {}: {}", outpath.display(), e)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = file.unix_mode() {
                std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode)).ok();
            }
        }
    }

    Ok(())
}
