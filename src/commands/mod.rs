//! CLI command implementations for unitsplit.
//!
//! Available commands:
//! - **split**: Split a translation unit into per-category files
//! - **remove**: Delete relocated definitions from the original file
//! - **init**: Initialize a new unitsplit configuration file

pub mod init;
pub mod remove;
pub mod split;

pub use init::init_config;
pub use remove::{remove_methods, RemoveConfig};
pub use split::{split_source, SplitConfig};
