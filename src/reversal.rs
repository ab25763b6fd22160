//! Removal of relocated definitions from the original source.
//!
//! `split` does not touch the original file. It writes a [`RemovalPlan`]
//! listing the relocated names; `unitsplit remove <plan>` later re-scans the
//! (possibly edited) original, finds every definition with a listed name,
//! computes its span with the same absorb/brace-match contract as the
//! forward split and deletes all spans in one pass from the end of the file
//! backwards.

use std::collections::{BTreeMap, HashSet};
use std::ops::Range;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::extract::{definition_span, ExtractError};
use crate::io;
use crate::scanner::SignatureScanner;
use crate::source::SourceBuffer;

/// Default file name of the plan written next to the source.
pub const PLAN_FILE_NAME: &str = "remove_moved_methods.toml";

static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Serialized input of the removal tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalPlan {
    /// Original source, relative to the plan's directory
    pub source: PathBuf,
    /// Class qualifier used when scanning
    pub class: String,
    #[serde(default)]
    pub mask_literals: bool,
    /// Unqualified names; every overload of each name is removed
    pub methods: Vec<String>,
}

impl RemovalPlan {
    pub fn new(source: impl Into<PathBuf>, class: impl Into<String>, methods: Vec<String>) -> Self {
        Self {
            source: source.into(),
            class: class.into(),
            mask_literals: false,
            methods,
        }
    }

    pub fn with_mask_literals(mut self, mask_literals: bool) -> Self {
        self.mask_literals = mask_literals;
        self
    }

    pub fn to_toml(&self) -> Result<String> {
        let body = toml::to_string(self)?;
        Ok(format!(
            "# Generated by `unitsplit split`.\n\
             # Run `unitsplit remove {PLAN_FILE_NAME}` once the split files build\n\
             # to delete these methods from {}.\n\n{body}",
            self.source.display()
        ))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let plan: RemovalPlan = toml::from_str(contents)?;
        if plan.class.trim().is_empty() {
            return Err(Error::Plan("`class` must not be empty".into()));
        }
        Ok(plan)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_toml(&io::read_file(path)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        io::write_file(path, &self.to_toml()?)
    }

    /// Source path resolved against the directory holding the plan.
    pub fn source_path(&self, plan_path: &Path) -> PathBuf {
        match plan_path.parent() {
            Some(dir) if self.source.is_relative() => dir.join(&self.source),
            _ => self.source.clone(),
        }
    }
}

/// Result of one removal pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalOutcome {
    pub text: String,
    /// Definitions removed per name
    pub removed: BTreeMap<String, usize>,
    /// Listed names with no definition in the source
    pub missing: Vec<String>,
    /// Definitions that matched but whose body never closes; left in place
    pub failed: Vec<(String, ExtractError)>,
}

impl RemovalOutcome {
    pub fn removed_total(&self) -> usize {
        self.removed.values().sum()
    }
}

/// Delete every definition named in `plan` from `text`.
pub fn remove_definitions(text: &str, plan: &RemovalPlan) -> Result<RemovalOutcome> {
    let source = SourceBuffer::with_masking(text, plan.mask_literals);
    let scanner = SignatureScanner::new(&plan.class)?;
    let wanted: HashSet<&str> = plan.methods.iter().map(String::as_str).collect();

    let mut spans = Vec::new();
    let mut removed: BTreeMap<String, usize> = BTreeMap::new();
    let mut failed = Vec::new();
    for definition in scanner.scan(&source) {
        if !wanted.contains(definition.name.as_str()) {
            continue;
        }
        match definition_span(&source, definition.start, definition.body_open) {
            Ok(span) => {
                *removed.entry(definition.name).or_default() += 1;
                spans.push(span);
            }
            Err(error) => {
                log::warn!("Cannot remove {}: {}", definition.qualified_name, error);
                failed.push((definition.name, error));
            }
        }
    }

    // A span between retained text leaves a line break behind so the code
    // around it does not run together; blank runs are collapsed afterwards.
    let mut result = source.into_text();
    let original_len = result.len();
    for span in merge_spans(spans).into_iter().rev() {
        let separator = if span.start > 0 && span.end < original_len {
            "\n"
        } else {
            ""
        };
        result.replace_range(span, separator);
    }

    let missing = plan
        .methods
        .iter()
        .filter(|name| !removed.contains_key(*name) && !failed.iter().any(|(n, _)| n == *name))
        .cloned()
        .collect();

    Ok(RemovalOutcome {
        text: collapse_blank_lines(&result),
        removed,
        missing,
        failed,
    })
}

/// Sort spans and fuse the ones that overlap or touch.
///
/// Neighbouring definitions can both claim the blank lines between them:
/// the first through its trailing newlines, the second through comment
/// absorption.
pub fn merge_spans(mut spans: Vec<Range<usize>>) -> Vec<Range<usize>> {
    spans.sort_by_key(|s| s.start);
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}

/// Collapse every run of three or more newlines to a single blank line.
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUN.replace_all(text, "\n\n").into_owned()
}
