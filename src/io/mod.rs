use crate::errors::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io_at("cannot read file", path, e))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| Error::io_at("cannot write file", path, e))
}

pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}

/// Path of the backup copy for `source`, e.g. `MB8ART.cpp.backup`.
pub fn backup_path(source: &Path) -> PathBuf {
    let mut name = source.as_os_str().to_os_string();
    name.push(".backup");
    PathBuf::from(name)
}

/// Write a full copy of `content` next to `source`.
pub fn write_backup(source: &Path, content: &str) -> Result<PathBuf> {
    let path = backup_path(source);
    write_file(&path, content)?;
    Ok(path)
}
