use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::formatting::{formatter_for, FormattingConfig};
use crate::io;
use crate::reversal::{remove_definitions, RemovalPlan};

pub struct RemoveConfig {
    pub plan: PathBuf,
    pub dry_run: bool,
    pub plain: bool,
}

/// `unitsplit remove`: delete the relocated definitions from the original.
pub fn remove_methods(config: RemoveConfig) -> Result<()> {
    let formatter = formatter_for(FormattingConfig::resolve(config.plain));
    let plan = RemovalPlan::load(&config.plan)
        .with_context(|| format!("Failed to load removal plan {}", config.plan.display()))?;
    let source_path = plan.source_path(&config.plan);
    let text = io::read_file(&source_path)
        .with_context(|| format!("Failed to read source file {}", source_path.display()))?;

    let outcome = remove_definitions(&text, &plan)?;
    for (name, count) in &outcome.removed {
        match count {
            1 => println!("Removed: {name}"),
            n => println!("Removed: {name} ({n} definitions)"),
        }
    }
    for name in &outcome.missing {
        eprintln!("{}", formatter.warning(&format!("Not found: {name}")));
    }
    for (name, error) in &outcome.failed {
        eprintln!(
            "{}",
            formatter.warning(&format!("Left in place: {name}: {error}"))
        );
    }

    let total = outcome.removed_total();
    if config.dry_run {
        println!(
            "\nDry run: would remove {} definitions from {}",
            total,
            source_path.display()
        );
        return Ok(());
    }
    if total == 0 {
        println!("\nNothing removed from {}", source_path.display());
        return Ok(());
    }

    io::write_file(&source_path, &outcome.text)
        .with_context(|| format!("Failed to write {}", source_path.display()))?;
    println!(
        "{}",
        formatter.success(&format!(
            "\nRemoved {} methods from {}",
            total,
            source_path.display()
        ))
    );
    Ok(())
}
