//! The immutable source buffer a split run works on.

pub mod mask;

pub use mask::mask_comments_and_literals;

/// Source text plus the structural view used for scanning and brace matching.
///
/// Without masking both views are the same string. With masking the
/// structural view has comments and literals blanked out; offsets are shared
/// between the two views.
#[derive(Debug, Clone)]
pub struct SourceBuffer {
    text: String,
    masked: Option<String>,
}

impl SourceBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            masked: None,
        }
    }

    pub fn with_masking(text: impl Into<String>, mask_literals: bool) -> Self {
        let text = text.into();
        let masked = mask_literals.then(|| mask_comments_and_literals(&text));
        Self { text, masked }
    }

    /// Original text, used for slicing and comment absorption
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text used for pattern scanning and brace counting
    pub fn structural(&self) -> &str {
        self.masked.as_deref().unwrap_or(&self.text)
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
