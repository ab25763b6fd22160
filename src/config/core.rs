use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root of `.unitsplit.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitsplitConfig {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub manifest: ManifestConfig,
}

/// How the translation unit is scanned
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Class qualifier; defaults to the source file stem
    #[serde(default)]
    pub class: Option<String>,

    /// Namespace for the `using namespace` directive; defaults to the lowercased class
    #[serde(default)]
    pub namespace: Option<String>,

    /// Ignore braces and qualified names inside comments and literals
    #[serde(default)]
    pub mask_literals: bool,
}

/// Shape of the generated files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Includes emitted right after the class header
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,

    /// Emit the static data block in the device file
    #[serde(default = "default_true")]
    pub static_block: bool,

    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            includes: default_includes(),
            static_block: true,
            extension: default_extension(),
        }
    }
}

/// Build manifest listing the compiled sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Relative to the source file's directory
    #[serde(default = "default_manifest_path")]
    pub path: PathBuf,

    /// Array field replaced with the new source list
    #[serde(default = "default_manifest_field")]
    pub field: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_manifest_path(),
            field: default_manifest_field(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_includes() -> Vec<String> {
    vec!["<MutexGuard.h>".to_string()]
}

fn default_extension() -> String {
    "cpp".to_string()
}

fn default_manifest_path() -> PathBuf {
    PathBuf::from("../library.json")
}

fn default_manifest_field() -> String {
    "srcFilter".to_string()
}
