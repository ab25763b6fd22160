use anyhow::Result;
use clap::Parser;
use unitsplit::cli::{Cli, Commands};
use unitsplit::commands::{self, RemoveConfig, SplitConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    match cli.command {
        Commands::Split {
            source,
            class,
            namespace,
            config,
            yes,
            dry_run,
            mask_literals,
            no_manifest,
        } => commands::split_source(SplitConfig {
            source,
            config,
            class,
            namespace,
            yes,
            dry_run,
            mask_literals,
            no_manifest,
            plain: cli.plain,
        }),
        Commands::Remove { plan, dry_run } => commands::remove_methods(RemoveConfig {
            plan,
            dry_run,
            plain: cli.plain,
        }),
        Commands::Init { force } => commands::init_config(force),
    }
}
