use crate::config::{AppConfig, CONFIG_FILE};
use crate::error::{ExportError, ExportResult};
use crate::exporter::Exporter;
use crate::types::{ExportOptions, OutputFormat};
use colored::Colorize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Execute the export command
#[allow(clippy::too_many_arguments)]
pub fn export(
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    format: Option<OutputFormat>,
    force: bool,
    all: bool,
    files: Vec<String>,
    log: Option<PathBuf>,
    verbose: bool,
) -> ExportResult<()> {
    let config = AppConfig::load(Path::new(CONFIG_FILE))?;

    let input_dir = input_dir
        .or_else(|| saved_path(&config.input_dir))
        .ok_or_else(|| {
            ExportError::Config(
                "no input directory given and none saved (run save-config first)".to_string(),
            )
        })?;
    let output_dir = output_dir
        .or_else(|| saved_path(&config.output_dir))
        .ok_or_else(|| {
            ExportError::Config(
                "no output directory given and none saved (run save-config first)".to_string(),
            )
        })?;
    let format = format.unwrap_or(config.format);

    if !all && files.is_empty() {
        return Err(ExportError::Config(
            "nothing selected: pass --all or --files <name.xlsx,...>".to_string(),
        ));
    }

    println!("{}", "📦 Tableport - Exporting tables".bold().green());
    println!("   Input:  {}", input_dir.display());
    println!("   Output: {}", output_dir.display());
    println!("   Format: {}", format.to_string().cyan());
    if force {
        println!("   {}", "Overwriting existing output files".yellow());
    }
    if verbose && !all {
        println!("   Selected: {}", files.join(", "));
    }
    println!();

    let mut options = ExportOptions::new(input_dir, output_dir);
    options.format = format;
    options.force = force;
    options.all_files = all;
    options.filenames = files.into_iter().collect::<HashSet<_>>();
    options.error_log = log.clone();

    let mut exporter = Exporter::new(options);
    exporter.set_progress(|counter, total| {
        println!("   Progress: {counter} / {total}");
    });
    exporter.run()?;

    println!();
    println!("{}", "✅ Export complete".bold().green());
    if let Some(log) = log {
        println!("   Per-sheet issues (if any) logged to {}", log.display());
    }
    Ok(())
}

/// Execute the save-config command
pub fn save_config(
    input_dir: PathBuf,
    output_dir: PathBuf,
    format: OutputFormat,
) -> ExportResult<()> {
    let config = AppConfig {
        input_dir: input_dir.display().to_string(),
        output_dir: output_dir.display().to_string(),
        format,
    };
    config.save(Path::new(CONFIG_FILE))?;

    println!("{}", "💾 Config saved".bold().green());
    println!("   File:   {CONFIG_FILE}");
    println!("   Input:  {}", config.input_dir);
    println!("   Output: {}", config.output_dir);
    println!("   Format: {}", config.format);
    Ok(())
}

fn saved_path(value: &str) -> Option<PathBuf> {
    if value.trim().is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}
