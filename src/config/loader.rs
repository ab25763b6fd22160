use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::UnitsplitConfig;
use crate::errors::{Error, Result};

/// Name of the configuration file searched for in the directory hierarchy
pub const CONFIG_FILE_NAME: &str = ".unitsplit.toml";

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> std::result::Result<UnitsplitConfig, String> {
    let config = toml::from_str::<UnitsplitConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    if let Some(class) = &config.source.class {
        if !is_identifier(class) {
            return Err(format!("source.class '{}' is not a C++ identifier", class));
        }
    }
    if config.manifest.field.trim().is_empty() {
        return Err("manifest.field must not be empty".to_string());
    }

    Ok(config)
}

pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Pure function to try loading config from a specific path
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<UnitsplitConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search the current directory and its ancestors for `.unitsplit.toml`.
pub fn load_config() -> UnitsplitConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return UnitsplitConfig::default();
        }
    };

    load_config_from_ancestors(current, MAX_TRAVERSAL_DEPTH)
}

pub(crate) fn load_config_from_ancestors(start: PathBuf, max_depth: usize) -> UnitsplitConfig {
    directory_ancestors(start, max_depth)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                max_depth
            );
            UnitsplitConfig::default()
        })
}

/// Load an explicitly requested config file; unlike discovery, failures are fatal.
pub fn load_config_file(path: &Path) -> Result<UnitsplitConfig> {
    let contents =
        read_config_file(path).map_err(|e| Error::io_at("cannot read config file", path, e))?;
    parse_and_validate_config(&contents).map_err(Error::Configuration)
}
