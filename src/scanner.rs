//! Lexical scanner for qualified member-function definitions.
//!
//! Finds every `ReturnType Class::name(params) const noexcept override {`
//! shaped fragment in a translation unit. The return type sits either on the
//! same line as the qualified name or alone on the line directly above it.
//! This is pattern matching, not parsing: it does not track scope, so without
//! masking a definition-shaped fragment inside a comment or string literal is
//! reported as well.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::Result;
use crate::source::SourceBuffer;

/// Trailing markers between the parameter list and the body
static BODY_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A\s*(?:(?:const|noexcept|override|final)\b\s*)*\{").unwrap()
});

/// A bare type written alone on its line, e.g. `IDeviceInstance::DeviceResult<void>`
static TYPE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A[ \t]*(?P<ty>[\w:<>,*&\[\] \t]*[\w>*&])[ \t]*\r?\z").unwrap()
});

/// One member-function implementation discovered in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// Unqualified identifier, e.g. `getStatus`
    pub name: String,
    /// `Class::name`
    pub qualified_name: String,
    /// Raw leading text before the qualified name, possibly empty
    pub return_type: String,
    /// Earliest character the definition claims (return type or qualifier)
    pub start: usize,
    /// Position immediately after the opening `{` of the body
    pub body_open: usize,
}

/// Scanner bound to one class qualifier.
pub struct SignatureScanner {
    qualifier: String,
    head: Regex,
}

impl SignatureScanner {
    pub fn new(qualifier: &str) -> Result<Self> {
        // Return type shares the line with the qualified name, which is
        // followed by the opening parenthesis of the parameter list.
        let head = format!(
            r"(?m)^[ \t]*(?P<ret>[\w:<>,*&\[\] \t]*?)(?P<qualified>\b{}::(?P<name>~?\w+))\s*\(",
            regex::escape(qualifier)
        );
        Ok(Self {
            qualifier: qualifier.to_string(),
            head: Regex::new(&head)?,
        })
    }

    /// All definitions in ascending `start` order.
    pub fn scan(&self, source: &SourceBuffer) -> Vec<Definition> {
        let structural = source.structural();
        let original = source.text();
        let mut definitions = Vec::new();

        for caps in self.head.captures_iter(structural) {
            let (Some(whole), Some(ret), Some(qualified), Some(name)) = (
                caps.get(0),
                caps.name("ret"),
                caps.name("qualified"),
                caps.name("name"),
            ) else {
                continue;
            };

            // The head pattern ends on the opening parenthesis
            let params_open = whole.end();
            let Some(params_close) = find_closing_paren(structural, params_open) else {
                log::debug!("Unbalanced parameter list for {}", qualified.as_str());
                continue;
            };

            let Some(tail) = BODY_OPEN.find(&structural[params_close..]) else {
                // Declaration, call site or constructor initializer list
                continue;
            };

            // A qualified name opening its line may have its return type
            // on the line above.
            let ret_range = if ret.is_empty() {
                return_type_above(structural, whole.start())
            } else {
                Some(ret.range())
            };

            definitions.push(Definition {
                name: original[name.range()].to_string(),
                qualified_name: original[qualified.range()].to_string(),
                return_type: ret_range
                    .clone()
                    .map(|r| original[r].trim().to_string())
                    .unwrap_or_default(),
                start: ret_range.map_or(qualified.start(), |r| r.start),
                body_open: params_close + tail.end(),
            });
        }

        definitions.sort_by_key(|d| d.start);
        log::debug!(
            "Found {} definitions qualified by {}",
            definitions.len(),
            self.qualifier
        );
        definitions
    }
}

/// Byte range of a return type standing alone on the line before `line_start`.
fn return_type_above(text: &str, line_start: usize) -> Option<Range<usize>> {
    let prev_end = line_start.checked_sub(1)?;
    let prev_start = text[..prev_end].rfind('\n').map_or(0, |i| i + 1);
    let ty = TYPE_LINE.captures(&text[prev_start..prev_end])?.name("ty")?;
    Some(prev_start + ty.start()..prev_start + ty.end())
}

/// Given the position right after an opening `(`, return the position right
/// after its matching `)`.
fn find_closing_paren(text: &str, after_open: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (offset, byte) in text.as_bytes()[after_open..].iter().enumerate() {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(after_open + offset + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Convenience wrapper for one-off scans.
pub fn scan_definitions(source: &SourceBuffer, qualifier: &str) -> Result<Vec<Definition>> {
    Ok(SignatureScanner::new(qualifier)?.scan(source))
}
