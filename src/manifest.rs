//! Build-manifest update after a split.
//!
//! The library manifest (a PlatformIO `library.json`) lists the compiled
//! sources in an array field such as `"srcFilter": [ ... ]`. After a split
//! that array is replaced wholesale with the original file plus every
//! generated file. Everything else in the manifest is kept byte for byte.
//! A missing manifest or missing field is reported, never an error.

use std::path::{Path, PathBuf};

use regex::{NoExpand, Regex};

use crate::errors::Result;
use crate::io;

/// What happened to the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestOutcome {
    Updated { path: PathBuf },
    FieldMissing { path: PathBuf, field: String },
    NotFound { path: PathBuf },
}

impl ManifestOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

/// Array literal listing `files`, indented to sit at `indent`.
pub fn render_source_filter(field: &str, files: &[String], indent: &str) -> String {
    let entries: Vec<String> = files
        .iter()
        .map(|file| format!("{indent}  \"+<{file}>\""))
        .collect();
    format!("\"{field}\": [\n{}\n{indent}]", entries.join(",\n"))
}

/// Replace the `field` array in `content`, or `None` when the field is absent.
pub fn patch_manifest_text(content: &str, field: &str, files: &[String]) -> Result<Option<String>> {
    let pattern = Regex::new(&format!(r#""{}"\s*:\s*\[[^\]]*\]"#, regex::escape(field)))?;
    let Some(found) = pattern.find(content) else {
        return Ok(None);
    };

    let line_start = content[..found.start()].rfind('\n').map_or(0, |i| i + 1);
    let indent: String = content[line_start..found.start()]
        .chars()
        .take_while(|c| c.is_whitespace())
        .collect();
    let replacement = render_source_filter(field, files, &indent);
    Ok(Some(
        pattern.replace(content, NoExpand(&replacement)).into_owned(),
    ))
}

/// Rewrite the manifest at `path` in place.
pub fn update_manifest(path: &Path, field: &str, files: &[String]) -> Result<ManifestOutcome> {
    if !io::file_exists(path) {
        return Ok(ManifestOutcome::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = io::read_file(path)?;
    match patch_manifest_text(&content, field, files)? {
        Some(updated) => {
            io::write_file(path, &updated)?;
            Ok(ManifestOutcome::Updated {
                path: path.to_path_buf(),
            })
        }
        None => Ok(ManifestOutcome::FieldMissing {
            path: path.to_path_buf(),
            field: field.to_string(),
        }),
    }
}
