//! Snapshot files.
//!
//! [`save_to_file`] writes `{path}.tmp`, syncs it and renames it over
//! `path`, so a crash mid-write leaves any previous snapshot intact.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::PersistResult;

/// Atomically replace `path` with `bytes`, creating parent directories.
pub fn save_to_file(path: &Path, bytes: &[u8]) -> PersistResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    fs::rename(&tmp, path)?;

    debug!(path = %path.display(), bytes = bytes.len(), "snapshot written");
    Ok(())
}

/// Read a whole snapshot file.  Pass the result to a `decode_*` function.
pub fn load_from_file(path: &Path) -> PersistResult<Vec<u8>> {
    let bytes = fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "snapshot read");
    Ok(bytes)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
