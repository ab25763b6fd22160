// Export modules for library usage
pub mod assemble;
pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod extract;
pub mod formatting;
pub mod io;
pub mod manifest;
pub mod pipeline;
pub mod reversal;
pub mod scanner;
pub mod source;

// Re-export commonly used types
pub use crate::assemble::{AssemblyOptions, OutputFile};
pub use crate::classify::{classify, Category};
pub use crate::errors::{Error, Result};
pub use crate::extract::{definition_span, extract_block, ExtractError, ExtractedBlock};
pub use crate::manifest::{update_manifest, ManifestOutcome};
pub use crate::pipeline::{plan_split, SplitPlan};
pub use crate::reversal::{remove_definitions, RemovalOutcome, RemovalPlan};
pub use crate::scanner::{scan_definitions, Definition, SignatureScanner};
pub use crate::source::SourceBuffer;
