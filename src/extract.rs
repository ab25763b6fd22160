//! Span extraction for a single definition.
//!
//! The span of a definition is:
//! - its leading documentation, found by walking upward over lines that are
//!   blank or look like comments,
//! - the signature and body up to the brace that closes the body,
//! - the newline characters directly after that brace.
//!
//! The same [`definition_span`] is used by the forward split and by the
//! removal pass, so both agree on exactly which bytes a definition owns.

use std::ops::Range;

use thiserror::Error;

use crate::scanner::Definition;
use crate::source::SourceBuffer;

/// Why a definition's span could not be determined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// End of input reached while the body was still open
    #[error("body opened at offset {body_open} is never closed ({depth} unmatched '{{')")]
    UnbalancedBody { body_open: usize, depth: usize },
}

/// Text relocated for one definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedBlock {
    pub name: String,
    pub span: Range<usize>,
    pub text: String,
}

impl ExtractedBlock {
    /// Block text without leading blank lines and trailing newlines.
    pub fn trimmed(&self) -> &str {
        let text = self.text.trim_end_matches(['\n', '\r']);
        let mut start = 0;
        for line in text.split_inclusive('\n') {
            if !line.trim().is_empty() {
                break;
            }
            start += line.len();
        }
        &text[start..]
    }
}

/// Whether a physical line counts as documentation for the next definition.
pub fn is_comment_like(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with("//")
        || trimmed.starts_with("/*")
        || trimmed.starts_with('*')
}

/// Walk upward from `start` over comment-like lines.
///
/// Returns the offset of the first absorbed line, or `start` itself when the
/// text between the line start and `start` is real code.
pub fn absorb_leading_comments(text: &str, start: usize) -> usize {
    let line_start = line_start_of(text, start);
    if !is_comment_like(&text[line_start..start]) {
        return start;
    }

    let mut absorbed = line_start;
    while absorbed > 0 {
        let prev_end = absorbed - 1; // the '\n' ending the previous line
        let prev_start = line_start_of(text, prev_end);
        if !is_comment_like(&text[prev_start..prev_end]) {
            break;
        }
        absorbed = prev_start;
    }
    absorbed
}

fn line_start_of(text: &str, pos: usize) -> usize {
    text[..pos].rfind('\n').map_or(0, |i| i + 1)
}

/// Given the position right after an opening `{`, find the position right
/// after the `}` that closes it.
///
/// Every brace character counts, including ones inside literals or comments
/// unless `text` has been masked.
pub fn match_closing_brace(text: &str, body_open: usize) -> Result<usize, ExtractError> {
    let mut depth = 1usize;
    for (offset, byte) in text.as_bytes()[body_open..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(body_open + offset + 1);
                }
            }
            _ => {}
        }
    }
    Err(ExtractError::UnbalancedBody { body_open, depth })
}

/// Advance over the newline characters directly following `pos`.
pub fn skip_trailing_newlines(text: &str, pos: usize) -> usize {
    let run = text.as_bytes()[pos..]
        .iter()
        .take_while(|&&b| b == b'\n' || b == b'\r')
        .count();
    pos + run
}

/// Full byte range owned by the definition starting at `start` whose body
/// opens just before `body_open`.
pub fn definition_span(
    source: &SourceBuffer,
    start: usize,
    body_open: usize,
) -> Result<Range<usize>, ExtractError> {
    let from = absorb_leading_comments(source.text(), start);
    let close = match_closing_brace(source.structural(), body_open)?;
    let to = skip_trailing_newlines(source.text(), close);
    Ok(from..to)
}

/// Cut the block for `definition` out of `source` (the source is not modified).
pub fn extract_block(
    source: &SourceBuffer,
    definition: &Definition,
) -> Result<ExtractedBlock, ExtractError> {
    let span = definition_span(source, definition.start, definition.body_open)?;
    Ok(ExtractedBlock {
        name: definition.name.clone(),
        text: source.text()[span.clone()].to_string(),
        span,
    })
}
