//! Forward split pipeline: scan, classify, extract, group.
//!
//! Pure with respect to the filesystem. The result, a [`SplitPlan`], holds
//! everything the `split` command needs to print its summary and write the
//! output files, the manifest and the removal plan.

use std::collections::{BTreeMap, HashSet};

use crate::assemble::{group_into_files, AssemblyOptions, OutputFile};
use crate::classify::{classify_with_rule, Category};
use crate::errors::Result;
use crate::extract::{extract_block, ExtractError};
use crate::scanner::{Definition, SignatureScanner};
use crate::source::SourceBuffer;

/// A definition together with the category it was routed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedDefinition {
    pub definition: Definition,
    pub category: Category,
}

/// A definition that was routed to a file but whose span could not be cut.
/// It stays in the original source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDefinition {
    pub qualified_name: String,
    pub category: Category,
    pub error: ExtractError,
}

#[derive(Debug, Clone)]
pub struct SplitPlan {
    /// Every definition found, in source order
    pub definitions: Vec<ClassifiedDefinition>,
    /// Files to write, in category order
    pub files: Vec<OutputFile>,
    pub skipped: Vec<SkippedDefinition>,
    /// Names that are moved but also have an overload staying behind
    pub conflicts: Vec<String>,
}

impl SplitPlan {
    /// Definitions per category (residual included), names in source order.
    pub fn names_by_category(&self) -> BTreeMap<Category, Vec<&str>> {
        let mut grouped: BTreeMap<Category, Vec<&str>> = BTreeMap::new();
        for classified in &self.definitions {
            grouped
                .entry(classified.category)
                .or_default()
                .push(classified.definition.name.as_str());
        }
        grouped
    }

    /// Names of every relocated definition, ordered by first appearance in
    /// the source, overloads listed once.
    pub fn relocated_names(&self) -> Vec<String> {
        let mut blocks: Vec<_> = self.files.iter().flat_map(|f| f.blocks.iter()).collect();
        blocks.sort_by_key(|b| b.span.start);

        let mut seen = HashSet::new();
        blocks
            .into_iter()
            .filter(|b| seen.insert(b.name.as_str()))
            .map(|b| b.name.clone())
            .collect()
    }

    pub fn relocated_count(&self) -> usize {
        self.files.iter().map(|f| f.blocks.len()).sum()
    }

    pub fn has_work(&self) -> bool {
        !self.files.is_empty()
    }
}

/// Run scanner, classifier and extractor over `source`.
///
/// Extraction failures never abort the run: the definition is logged,
/// recorded in [`SplitPlan::skipped`] and left out of every output file.
pub fn plan_split(source: &SourceBuffer, options: &AssemblyOptions) -> Result<SplitPlan> {
    let scanner = SignatureScanner::new(&options.class_name)?;
    let definitions: Vec<ClassifiedDefinition> = scanner
        .scan(source)
        .into_iter()
        .map(|definition| {
            let rule = classify_with_rule(&definition.name, &definition.return_type);
            log::debug!(
                "{} -> {}",
                definition.qualified_name,
                rule.map_or("residual", |r| r.label)
            );
            ClassifiedDefinition {
                category: rule.map_or(Category::Residual, |r| r.category),
                definition,
            }
        })
        .collect();

    let mut extracted = Vec::new();
    let mut skipped = Vec::new();
    for classified in definitions.iter().filter(|c| !c.category.is_residual()) {
        match extract_block(source, &classified.definition) {
            Ok(block) => extracted.push((classified.category, block)),
            Err(error) => {
                log::warn!(
                    "Skipping {}: {}",
                    classified.definition.qualified_name,
                    error
                );
                skipped.push(SkippedDefinition {
                    qualified_name: classified.definition.qualified_name.clone(),
                    category: classified.category,
                    error,
                });
            }
        }
    }

    let files = group_into_files(extracted, options);
    let conflicts = find_overload_conflicts(&definitions, &files);
    for name in &conflicts {
        log::warn!(
            "{} has definitions both moved and kept; removing by name deletes all of them",
            name
        );
    }

    Ok(SplitPlan {
        definitions,
        files,
        skipped,
        conflicts,
    })
}

fn find_overload_conflicts(
    definitions: &[ClassifiedDefinition],
    files: &[OutputFile],
) -> Vec<String> {
    let mut moved: BTreeMap<&str, usize> = BTreeMap::new();
    for name in files.iter().flat_map(|f| f.block_names()) {
        *moved.entry(name).or_default() += 1;
    }

    moved
        .into_iter()
        .filter(|(name, moved_count)| {
            let total = definitions
                .iter()
                .filter(|c| c.definition.name == *name)
                .count();
            total > *moved_count
        })
        .map(|(name, _)| name.to_string())
        .collect()
}
