//! Configuration for unitsplit.
//!
//! Settings come from three layers, highest precedence first: command-line
//! flags, a `.unitsplit.toml` file, and values derived from the source file
//! itself (class name from the file stem, namespace from the class name).

mod core;
mod loader;

pub use self::core::{ManifestConfig, OutputConfig, SourceConfig, UnitsplitConfig};
pub use loader::{
    directory_ancestors, load_config, load_config_file, parse_and_validate_config,
    CONFIG_FILE_NAME,
};

use std::path::{Path, PathBuf};

use crate::assemble::AssemblyOptions;
use crate::errors::{Error, Result};

/// Command-line values that override the configuration file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub class: Option<String>,
    pub namespace: Option<String>,
    pub mask_literals: bool,
    pub no_manifest: bool,
}

/// Fully resolved settings for one `split` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSettings {
    pub assembly: AssemblyOptions,
    pub mask_literals: bool,
    /// Manifest to patch, already resolved against the source directory
    pub manifest: Option<(PathBuf, String)>,
}

/// Merge flags, config file and derived defaults for `source_path`.
pub fn resolve_settings(
    source_path: &Path,
    config: &UnitsplitConfig,
    overrides: &Overrides,
) -> Result<SplitSettings> {
    let class_name = match overrides.class.as_ref().or(config.source.class.as_ref()) {
        Some(class) => class.clone(),
        None => source_path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                Error::Configuration(format!(
                    "cannot derive a class name from {}; pass --class",
                    source_path.display()
                ))
            })?,
    };
    if !loader::is_identifier(&class_name) {
        return Err(Error::Configuration(format!(
            "class name '{}' is not a C++ identifier; pass --class",
            class_name
        )));
    }

    let namespace = overrides
        .namespace
        .clone()
        .or_else(|| config.source.namespace.clone())
        .unwrap_or_else(|| class_name.to_lowercase());

    let manifest = (config.manifest.enabled && !overrides.no_manifest).then(|| {
        let dir = source_path.parent().unwrap_or_else(|| Path::new(""));
        (dir.join(&config.manifest.path), config.manifest.field.clone())
    });

    Ok(SplitSettings {
        assembly: AssemblyOptions {
            class_name,
            namespace,
            includes: config.output.includes.clone(),
            static_block: config.output.static_block,
            extension: config.output.extension.clone(),
        },
        mask_literals: overrides.mask_literals || config.source.mask_literals,
        manifest,
    })
}
