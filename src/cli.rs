use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "unitsplit")]
#[command(
    about = "Split a large C++ translation unit into per-category source files",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    /// -v: Show files written and config discovery
    /// -vv: Show how every definition was classified
    /// -vvv: Show all debug information
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Disable colored output
    #[arg(long = "plain", global = true)]
    pub plain: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a source file into per-category files
    Split {
        /// Source file to split, e.g. src/MB8ART.cpp
        source: PathBuf,

        /// Class qualifier to scan for (defaults to the file stem)
        #[arg(long)]
        class: Option<String>,

        /// Namespace for the `using namespace` directive (defaults to the lowercased class)
        #[arg(long)]
        namespace: Option<String>,

        /// Configuration file (defaults to the nearest .unitsplit.toml)
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,

        /// Print the summary without writing anything
        #[arg(long = "dry-run")]
        dry_run: bool,

        /// Ignore braces and names inside comments and string literals
        #[arg(long = "mask-literals")]
        mask_literals: bool,

        /// Leave the build manifest untouched
        #[arg(long = "no-manifest")]
        no_manifest: bool,
    },

    /// Delete relocated definitions listed in a removal plan from the original file
    Remove {
        /// Removal plan written by `split`
        #[arg(default_value = "remove_moved_methods.toml")]
        plan: PathBuf,

        /// Report what would be removed without writing
        #[arg(long = "dry-run")]
        dry_run: bool,
    },

    /// Initialize a configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Log level for `-v` count; warnings are always shown.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
