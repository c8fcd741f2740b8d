// src/commands.rs
//! Command handlers for the slackconv CLI

use anyhow::{Context, Result};
use slackconv::config::ConversionOptions;
use slackconv::convert::Converter;
use slackconv::packages::tgz::TgzPackage;
use slackconv::packages::PackageFormat;
use slackconv::tool::{SystemTools, Verbosity};
use std::path::{Path, PathBuf};
use tracing::info;

/// Load options from `config`, or defaults when no file was given
pub fn load_options(config: Option<&Path>) -> Result<ConversionOptions> {
    match config {
        Some(path) => ConversionOptions::from_file(path)
            .with_context(|| format!("Failed to load options from {}", path.display())),
        None => Ok(ConversionOptions::default()),
    }
}

pub fn cmd_scan(package_path: &Path, list_files: bool) -> Result<()> {
    let package = TgzPackage::parse(package_path)
        .with_context(|| format!("Failed to scan {}", package_path.display()))?;

    println!("Name:         {}", package.name());
    println!("Version:      {}", package.version());
    println!("Build:        {}", package.release());
    println!("Architecture: {}", package.architecture().unwrap_or("none"));
    println!("Summary:      {}", package.summary());
    println!("Description:");
    for line in package.description().lines() {
        println!("  {}", line);
    }
    println!("Files:        {}", package.files().len());

    if !package.config_files().is_empty() {
        println!("Config files:");
        for path in package.config_files() {
            println!("  {}", path);
        }
    }

    if !package.scriptlets().is_empty() {
        println!("Scripts:");
        for script in package.scriptlets() {
            println!("  {} ({} bytes)", script.phase, script.content.len());
        }
    }

    if list_files {
        println!("File list:");
        for file in package.files() {
            println!("  {:o} {}", file.mode, file.path);
        }
    }

    Ok(())
}

pub fn cmd_desc(package_path: &Path, config: Option<&Path>) -> Result<()> {
    let options = load_options(config)?;
    let mut metadata = TgzPackage::parse(package_path)
        .with_context(|| format!("Failed to scan {}", package_path.display()))?
        .into_metadata();
    metadata.fill_defaults();

    print!("{}", metadata.slack_desc(&options.slack_desc())?);
    Ok(())
}

pub fn cmd_render(
    name: &str,
    summary: &str,
    description_file: Option<&Path>,
    config: Option<&Path>,
) -> Result<()> {
    let options = load_options(config)?;
    let description = match description_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => summary.to_string(),
    };

    print!(
        "{}",
        options.slack_desc().render(name, summary, &description)?
    );
    Ok(())
}

/// Flags that override values from the options file
pub struct ConvertFlags {
    pub output_dir: Option<PathBuf>,
    pub no_scripts: bool,
    pub keep_workdir: bool,
    pub install: bool,
    pub verbose: bool,
}

pub fn cmd_convert(package_path: &Path, config: Option<&Path>, flags: ConvertFlags) -> Result<()> {
    let mut options = load_options(config)?;
    if let Some(dir) = flags.output_dir {
        options.output_dir = dir;
    }
    options.use_scripts &= !flags.no_scripts;
    options.keep_workdir |= flags.keep_workdir;
    options.install |= flags.install;
    options.verbose |= flags.verbose;

    let tools = SystemTools::new(options.verbosity());
    let converter = Converter::new(options, &tools);
    let result = converter
        .convert(package_path)
        .with_context(|| format!("Failed to convert {}", package_path.display()))?;

    println!(
        "Converted {} {} -> {}",
        result.metadata.name(),
        result.metadata.version(),
        result.package_path.display()
    );
    if let Some(workdir) = &result.workdir {
        println!("  Work tree: {}", workdir.display());
    }
    if result.installed {
        println!("  Installed with installpkg");
    }
    Ok(())
}

pub fn cmd_install(package_path: &Path, verbose: bool) -> Result<()> {
    let verbosity = if verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Quiet
    };
    let tools = SystemTools::new(verbosity);
    let converter = Converter::new(ConversionOptions::default(), &tools);

    info!("Installing {}", package_path.display());
    converter
        .install(package_path)
        .with_context(|| format!("Failed to install {}", package_path.display()))?;
    println!("Installed {}", package_path.display());
    Ok(())
}
