// src/fs/temp.rs

//! The per-adapter temp file the editor writes and the target reads back.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use super::FileSystem;
use super::encoding::{decode, encode};

/// Temp file name for adapters that do not declare their own.
pub const DEFAULT_TEMP_FILENAME: &str = "wing_output_text.txt";

/// Full path of `filename` inside the platform temp directory.
pub fn temp_filepath(filename: &str) -> PathBuf {
    std::env::temp_dir().join(filename)
}

/// Write `text` to the temp file called `filename`.
///
/// Returns the path that was written, with backslashes turned into forward
/// slashes so it can be embedded in a command string as-is.
pub fn write_temp_file(fs: &dyn FileSystem, filename: &str, text: &str) -> Result<String> {
    let path = temp_filepath(filename);
    info!(path = ?path, "writing temp file");
    fs.write(&path, &encode(text))?;
    Ok(path.to_string_lossy().replace('\\', "/"))
}

/// Read a text file, decoding UTF-8 with a Latin-1 fallback.
pub fn read_text(fs: &dyn FileSystem, path: &Path) -> Result<String> {
    let bytes = fs.read(path)?;
    Ok(decode(&bytes))
}
