//! Assembly of per-category output files.
//!
//! Each populated category becomes one file: a generated preamble (header
//! comment, includes, namespace directive), the category's static data block
//! if it has one, then its extracted blocks in source order, each followed by
//! one blank line.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::classify::Category;
use crate::errors::Result;
use crate::extract::ExtractedBlock;
use crate::io;

/// Static data declarations injected into exactly one category's file.
/// `{class}` is replaced with the class qualifier.
const STATIC_DECLARATIONS: &[(Category, &str)] = &[(
    Category::Device,
    "// Static member definitions\n\
     IDeviceInstance::DataResult {class}::cachedSensorResult;\n\
     TickType_t {class}::cacheTimestamp;\n\
     const TickType_t {class}::CACHE_VALIDITY = pdMS_TO_TICKS(1000); // 1 second cache validity\n",
)];

/// Includes added after the common ones, per category.
pub fn extra_includes(category: Category) -> &'static [&'static str] {
    match category {
        Category::Configuration => &["<RetryPolicy.h>"],
        Category::Device => &["<string.h>"],
        Category::Sensor => &["<algorithm>"],
        _ => &[],
    }
}

/// The static declaration block for `category`, if it carries one.
pub fn static_declarations(category: Category, class_name: &str) -> Option<String> {
    STATIC_DECLARATIONS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, template)| template.replace("{class}", class_name))
}

/// Settings shared by every generated file of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyOptions {
    pub class_name: String,
    pub namespace: String,
    /// Included right after the class header, e.g. `<MutexGuard.h>`
    pub includes: Vec<String>,
    pub static_block: bool,
    pub extension: String,
}

impl AssemblyOptions {
    pub fn new(class_name: impl Into<String>) -> Self {
        let class_name = class_name.into();
        Self {
            namespace: class_name.to_lowercase(),
            class_name,
            includes: vec!["<MutexGuard.h>".to_string()],
            static_block: true,
            extension: "cpp".to_string(),
        }
    }

    pub fn file_name(&self, category: Category) -> String {
        category.file_name(&self.class_name, &self.extension)
    }
}

/// One generated file: a category and its blocks in ascending source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub category: Category,
    pub file_name: String,
    pub blocks: Vec<ExtractedBlock>,
}

impl OutputFile {
    pub fn render(&self, options: &AssemblyOptions) -> String {
        let mut content = preamble(self.category, &self.file_name, options);

        if options.static_block {
            if let Some(declarations) = static_declarations(self.category, &options.class_name) {
                content.push_str(&declarations);
                content.push('\n');
            }
        }

        for block in &self.blocks {
            content.push_str(block.trimmed());
            content.push_str("\n\n");
        }
        content
    }

    pub fn block_names(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|b| b.name.as_str())
    }
}

/// File header, includes and namespace directive.
pub fn preamble(category: Category, file_name: &str, options: &AssemblyOptions) -> String {
    let description = category.description();
    let mut out = format!(
        "/**\n * @file {file_name}\n * @brief {description}\n *\n * This file contains {} for the {} library.\n */\n\n",
        description.to_lowercase(),
        options.class_name
    );

    out.push_str(&format!("#include \"{}.h\"\n", options.class_name));
    for include in options
        .includes
        .iter()
        .map(String::as_str)
        .chain(extra_includes(category).iter().copied())
    {
        out.push_str(&format!("#include {include}\n"));
    }

    if !options.namespace.is_empty() {
        out.push_str(&format!("\nusing namespace {};\n", options.namespace));
    }
    out.push('\n');
    out
}

/// Group classified blocks into output files.
///
/// Residual blocks and empty categories produce no file; within a file,
/// blocks are ordered by their position in the source.
pub fn group_into_files(
    blocks: impl IntoIterator<Item = (Category, ExtractedBlock)>,
    options: &AssemblyOptions,
) -> Vec<OutputFile> {
    let mut grouped: BTreeMap<Category, Vec<ExtractedBlock>> = BTreeMap::new();
    for (category, block) in blocks {
        if category.is_residual() {
            continue;
        }
        grouped.entry(category).or_default().push(block);
    }

    grouped
        .into_iter()
        .map(|(category, mut blocks)| {
            blocks.sort_by_key(|b| b.span.start);
            OutputFile {
                category,
                file_name: options.file_name(category),
                blocks,
            }
        })
        .collect()
}

/// Write every file into `dir`, overwriting existing files.
///
/// Stops at the first failed write; files already written stay on disk.
pub fn write_output_files(
    dir: &Path,
    files: &[OutputFile],
    options: &AssemblyOptions,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = dir.join(&file.file_name);
        io::write_file(&path, &file.render(options))?;
        log::info!("Wrote {} ({} blocks)", path.display(), file.blocks.len());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn block(name: &str, start: usize, text: &str) -> ExtractedBlock {
        ExtractedBlock {
            name: name.to_string(),
            span: start..start + text.len(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_config_file_render() {
        let options = AssemblyOptions::new("MB8ART");
        let file = OutputFile {
            category: Category::Configuration,
            file_name: "MB8ARTConfig.cpp".into(),
            blocks: vec![
                block("setBaudRate", 10, "\n// Set rate\nbool MB8ART::setBaudRate(int b) {\n    return true;\n}\n\n"),
                block("setParity", 90, "void MB8ART::setParity() {\n}\n"),
            ],
        };

        let expected = indoc! {r#"
            /**
             * @file MB8ARTConfig.cpp
             * @brief Configuration and settings management
             *
             * This file contains configuration and settings management for the MB8ART library.
             */

            #include "MB8ART.h"
            #include <MutexGuard.h>
            #include <RetryPolicy.h>

            using namespace mb8art;

            // Set rate
            bool MB8ART::setBaudRate(int b) {
                return true;
            }

            void MB8ART::setParity() {
            }

        "#};
        assert_eq!(file.render(&options), expected);
    }

    #[test]
    fn test_device_file_gets_static_block() {
        let options = AssemblyOptions::new("MB8ART");
        let file = OutputFile {
            category: Category::Device,
            file_name: "MB8ARTDevice.cpp".into(),
            blocks: vec![block("getStatus", 0, "int MB8ART::getStatus() {\n}\n")],
        };
        let rendered = file.render(&options);

        let statics = rendered.find("// Static member definitions").unwrap();
        let first_block = rendered.find("int MB8ART::getStatus").unwrap();
        assert!(rendered.find("using namespace mb8art;").unwrap() < statics);
        assert!(statics < first_block);
        assert!(rendered.contains("TickType_t MB8ART::cacheTimestamp;\n"));
        assert!(rendered.contains("#include <string.h>\n"));
    }

    #[test]
    fn test_static_block_can_be_disabled() {
        let mut options = AssemblyOptions::new("MB8ART");
        options.static_block = false;
        let file = OutputFile {
            category: Category::Device,
            file_name: "MB8ARTDevice.cpp".into(),
            blocks: vec![block("getStatus", 0, "int MB8ART::getStatus() {\n}\n")],
        };
        assert!(!file.render(&options).contains("Static member definitions"));
    }

    #[test]
    fn test_only_device_has_static_declarations() {
        for category in Category::ALL {
            assert_eq!(
                static_declarations(category, "X").is_some(),
                category == Category::Device
            );
        }
    }

    #[test]
    fn test_grouping_skips_residual_and_sorts_by_source_order() {
        let options = AssemblyOptions::new("RYN4");
        let files = group_into_files(
            vec![
                (Category::State, block("isB", 50, "b")),
                (Category::Residual, block("foo", 10, "f")),
                (Category::State, block("isA", 20, "a")),
                (Category::Sensor, block("measure", 5, "m")),
            ],
            &options,
        );

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].category, Category::State);
        assert_eq!(files[0].file_name, "RYN4State.cpp");
        assert_eq!(files[0].block_names().collect::<Vec<_>>(), vec!["isA", "isB"]);
        assert_eq!(files[1].file_name, "RYN4Sensor.cpp");
    }

    #[test]
    fn test_empty_namespace_omits_directive() {
        let mut options = AssemblyOptions::new("A");
        options.namespace.clear();
        let text = preamble(Category::State, "AState.cpp", &options);
        assert!(!text.contains("using namespace"));
        assert!(text.ends_with("#include <MutexGuard.h>\n\n"));
    }
}
