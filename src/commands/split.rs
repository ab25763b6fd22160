use std::io::{self as stdio, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::assemble::write_output_files;
use crate::classify::Category;
use crate::config::{load_config, load_config_file, resolve_settings, Overrides, SplitSettings};
use crate::formatting::{formatter_for, FormattingConfig, OutputFormatter};
use crate::io;
use crate::manifest::{update_manifest, ManifestOutcome};
use crate::pipeline::{plan_split, SplitPlan};
use crate::reversal::{RemovalPlan, PLAN_FILE_NAME};
use crate::source::SourceBuffer;

/// Names listed per category before the rest is folded into "... and N more"
const PREVIEW_LIMIT: usize = 5;
const RULE: &str = "============================================================";

pub struct SplitConfig {
    pub source: PathBuf,
    pub config: Option<PathBuf>,
    pub class: Option<String>,
    pub namespace: Option<String>,
    pub yes: bool,
    pub dry_run: bool,
    pub mask_literals: bool,
    pub no_manifest: bool,
    pub plain: bool,
}

impl SplitConfig {
    fn overrides(&self) -> Overrides {
        Overrides {
            class: self.class.clone(),
            namespace: self.namespace.clone(),
            mask_literals: self.mask_literals,
            no_manifest: self.no_manifest,
        }
    }
}

/// `unitsplit split`, reading the confirmation from stdin.
pub fn split_source(config: SplitConfig) -> Result<()> {
    let stdin = stdio::stdin();
    let mut stdout = stdio::stdout();
    run_split(&config, &mut stdin.lock(), &mut stdout)
}

pub fn run_split(config: &SplitConfig, input: &mut impl BufRead, out: &mut impl Write) -> Result<()> {
    let formatter = formatter_for(FormattingConfig::resolve(config.plain));
    let file_config = match &config.config {
        Some(path) => load_config_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => load_config(),
    };
    let settings = resolve_settings(&config.source, &file_config, &config.overrides())?;

    let text = io::read_file(&config.source)
        .with_context(|| format!("Failed to read source file {}", config.source.display()))?;
    writeln!(out, "Analyzing {}...", config.source.display())?;

    let source = SourceBuffer::with_masking(text, settings.mask_literals);
    let plan = plan_split(&source, &settings.assembly)?;
    write!(out, "{}", render_summary(&plan, &settings, formatter.as_ref()))?;

    if !plan.has_work() {
        writeln!(out, "\nNothing to split.")?;
        return Ok(());
    }
    if config.dry_run {
        writeln!(out, "\nDry run: no files written.")?;
        return Ok(());
    }
    if !config.yes && !confirm(input, out)? {
        writeln!(out, "Aborted.")?;
        return Ok(());
    }

    apply_split(&config.source, source.text(), &plan, &settings, formatter.as_ref(), out)
}

fn apply_split(
    source_path: &Path,
    text: &str,
    plan: &SplitPlan,
    settings: &SplitSettings,
    formatter: &dyn OutputFormatter,
    out: &mut impl Write,
) -> Result<()> {
    let backup = io::write_backup(source_path, text)
        .with_context(|| format!("Failed to back up {}", source_path.display()))?;
    writeln!(out, "\nCreated backup: {}", backup.display())?;

    let dir = source_path.parent().unwrap_or_else(|| Path::new(""));
    let written = write_output_files(dir, &plan.files, &settings.assembly)
        .with_context(|| format!("Failed to write split files into {}", dir.display()))?;
    for file in &plan.files {
        writeln!(out, "  {} ({} methods)", file.file_name, file.blocks.len())?;
    }
    writeln!(
        out,
        "{}",
        formatter.success(&format!("Created {} new files", written.len()))
    )?;

    let original_name = source_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if let Some((manifest_path, field)) = &settings.manifest {
        let mut sources = vec![original_name.clone()];
        sources.extend(plan.files.iter().map(|f| f.file_name.clone()));
        match update_manifest(manifest_path, field, &sources)
            .with_context(|| format!("Failed to update {}", manifest_path.display()))?
        {
            ManifestOutcome::Updated { path } => {
                writeln!(out, "Updated {} with new source files", path.display())?;
            }
            ManifestOutcome::FieldMissing { path, field } => eprintln!(
                "{}",
                formatter.warning(&format!(
                    "Warning: {} not found in {} - please add manually",
                    field,
                    path.display()
                ))
            ),
            ManifestOutcome::NotFound { path } => eprintln!(
                "{}",
                formatter.warning(&format!(
                    "Warning: manifest {} not found - please add the new files manually",
                    path.display()
                ))
            ),
        }
    }

    let plan_path = dir.join(PLAN_FILE_NAME);
    RemovalPlan::new(
        original_name,
        settings.assembly.class_name.clone(),
        plan.relocated_names(),
    )
    .with_mask_literals(settings.mask_literals)
    .save(&plan_path)
    .with_context(|| format!("Failed to write removal plan {}", plan_path.display()))?;
    writeln!(out, "Generated removal plan: {}", plan_path.display())?;

    write!(out, "{}", render_next_steps(&plan_path, formatter))?;
    Ok(())
}

/// Category breakdown printed before the confirmation prompt.
pub fn render_summary(
    plan: &SplitPlan,
    settings: &SplitSettings,
    formatter: &dyn OutputFormatter,
) -> String {
    let options = &settings.assembly;
    let mut out = format!(
        "\n{RULE}\n{}\n{RULE}\n",
        formatter.header(&format!("{} File Splitting Summary", options.class_name))
    );
    out.push_str(&format!(
        "\nTotal methods found: {}\n\nMethod distribution:\n",
        plan.definitions.len()
    ));

    let mut groups: Vec<(String, Category, Vec<&str>)> = plan
        .names_by_category()
        .into_iter()
        .map(|(category, names)| (options.file_name(category), category, names))
        .collect();
    groups.sort_by(|a, b| a.0.cmp(&b.0));

    for (file_name, category, names) in groups {
        let kept = if category.is_residual() { " (kept)" } else { "" };
        out.push_str(&format!(
            "\n{}{kept} ({} methods):\n",
            formatter.bold(&file_name),
            names.len()
        ));
        for name in names.iter().take(PREVIEW_LIMIT) {
            out.push_str(&format!("  - {name}()\n"));
        }
        if names.len() > PREVIEW_LIMIT {
            out.push_str(&format!("  ... and {} more\n", names.len() - PREVIEW_LIMIT));
        }
    }

    if !plan.skipped.is_empty() {
        out.push_str(&format!(
            "\n{}\n",
            formatter.warning("Skipped (left in the original file):")
        ));
        for skipped in &plan.skipped {
            out.push_str(&format!("  - {}: {}\n", skipped.qualified_name, skipped.error));
        }
    }

    for name in &plan.conflicts {
        out.push_str(&format!(
            "\n{}\n",
            formatter.warning(&format!(
                "Warning: {name} is moved but another definition with that name stays; \
                 `unitsplit remove` deletes every definition named {name}"
            ))
        ));
    }
    out
}

/// Ask for confirmation; EOF counts as a refusal.
pub fn confirm(input: &mut impl BufRead, out: &mut impl Write) -> Result<bool> {
    write!(out, "\nProceed with file splitting? (y/n): ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn render_next_steps(plan_path: &Path, formatter: &dyn OutputFormatter) -> String {
    format!(
        "\n{RULE}\n{}\n\
         1. Review the generated files\n\
         2. Test compilation: pio run\n\
         3. Fix any compilation errors\n\
         4. Run: unitsplit remove {}\n\
         5. Test again and commit changes\n\
         {RULE}\n",
        formatter.header("NEXT STEPS:"),
        plan_path.display()
    )
}
