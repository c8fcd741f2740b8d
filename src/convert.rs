// src/convert.rs

//! Package conversion pipeline
//!
//! scan → unpack → prep → build (→ install). `prep` and `build` only need a
//! [`PackageMetadata`] and a file tree, so metadata scanned from any format
//! can be written out as a Slackware package.

use crate::config::ConversionOptions;
use crate::error::{Error, Result};
use crate::fsutil::write_file;
use crate::packages::common::PackageMetadata;
use crate::packages::scripts::SCRIPT_FILES;
use crate::packages::tgz::TgzPackage;
use crate::packages::traits::PackageFormat;
use crate::slackdesc::SLACK_DESC_PATH;
use crate::tool::{self, ToolRunner};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Result of converting a package
#[derive(Debug)]
pub struct ConversionResult {
    /// Metadata written into the new package
    pub metadata: PackageMetadata,
    /// Path to the built package
    pub package_path: PathBuf,
    /// Work tree, if it was kept
    pub workdir: Option<PathBuf>,
    /// Whether installpkg ran
    pub installed: bool,
}

/// Get the Slackware spelling of an architecture
pub fn slackware_arch(arch: Option<&str>) -> String {
    match arch.unwrap_or("noarch") {
        "amd64" | "x86_64" => "x86_64",
        "i386" | "i586" => "i586",
        "arm64" | "aarch64" => "aarch64",
        "armhf" | "armv7l" => "arm",
        "all" | "any" | "noarch" | "" => "noarch",
        other => other,
    }
    .to_string()
}

/// File name for a package: `name-version-arch-build.tgz`
///
/// Hyphens in the version are replaced with underscores since the name
/// fields are hyphen-separated.
pub fn package_file_name(metadata: &PackageMetadata) -> String {
    format!(
        "{}-{}-{}-{}.tgz",
        metadata.name(),
        metadata.version().replace('-', "_"),
        slackware_arch(metadata.architecture()),
        metadata.release().replace('-', "_"),
    )
}

/// Converts packages using external tools from `R`
pub struct Converter<'a, R: ToolRunner> {
    options: ConversionOptions,
    tools: &'a R,
}

impl<'a, R: ToolRunner> Converter<'a, R> {
    pub fn new(options: ConversionOptions, tools: &'a R) -> Self {
        Self { options, tools }
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Scan a package and fill placeholder fields
    pub fn scan(&self, package: &Path) -> Result<PackageMetadata> {
        let mut metadata = TgzPackage::parse(package)?.into_metadata();
        metadata.fill_defaults();
        Ok(metadata)
    }

    /// Unpack a package into `dest`
    pub fn unpack(&self, package: &Path, dest: &Path) -> Result<()> {
        self.tools.run(&tool::tar_extract(package, dest)?)?;
        Ok(())
    }

    /// Write the slack-desc and lifecycle scripts into an unpacked tree
    pub fn prep(&self, metadata: &PackageMetadata, tree: &Path) -> Result<()> {
        metadata.validate()?;

        let install_dir = tree.join("install");
        fs::create_dir_all(&install_dir).map_err(|e| {
            Error::IoError(format!("Failed to create {}: {}", install_dir.display(), e))
        })?;

        let slack_desc = metadata.slack_desc(&self.options.slack_desc())?;
        write_file(&tree.join(SLACK_DESC_PATH), slack_desc.as_bytes(), 0o644)?;

        for (phase, member) in SCRIPT_FILES {
            let path = tree.join(member);
            let script = metadata
                .scriptlet(phase)
                .filter(|s| self.options.use_scripts && !s.content.trim().is_empty());

            match script {
                Some(script) => write_file(&path, script.content.as_bytes(), 0o755)?,
                None if path.exists() => {
                    debug!("Removing {} script {}", phase, path.display());
                    fs::remove_file(&path)?;
                }
                None => {}
            }
        }

        Ok(())
    }

    /// Pack `tree` into the output directory
    ///
    /// tar writes to a temporary file next to the final path, which is
    /// renamed into place only when tar succeeds. A failed build leaves
    /// nothing in the output directory.
    pub fn build(&self, metadata: &PackageMetadata, tree: &Path) -> Result<PathBuf> {
        fs::create_dir_all(&self.options.output_dir)?;
        let output_dir = self.options.output_dir.canonicalize()?;
        let output = output_dir.join(package_file_name(metadata));

        let staging = tempfile::Builder::new()
            .prefix(".slackconv-")
            .suffix(".tgz")
            .tempfile_in(&output_dir)?;
        self.tools.run(&tool::tar_create(tree, staging.path())?)?;

        if let Err(e) = fs::set_permissions(staging.path(), fs::Permissions::from_mode(0o644)) {
            warn!("Could not set mode 644 on {}: {}", staging.path().display(), e);
        }
        staging.persist(&output).map_err(|e| {
            Error::IoError(format!("Failed to move {} into place: {}", output.display(), e.error))
        })?;
        info!("Built {}", output.display());
        Ok(output)
    }

    /// Install a package with installpkg
    pub fn install(&self, package: &Path) -> Result<()> {
        self.tools.run(&tool::installpkg(package))?;
        Ok(())
    }

    /// Full conversion of one package file
    pub fn convert(&self, package: &Path) -> Result<ConversionResult> {
        info!("Converting {}", package.display());
        let metadata = self.scan(package)?;

        let workdir = tempfile::Builder::new()
            .prefix(&format!("slackconv-{}-", metadata.name()))
            .tempdir()?;

        self.unpack(package, workdir.path())?;
        self.prep(&metadata, workdir.path())?;
        let package_path = self.build(&metadata, workdir.path())?;

        let installed = if self.options.install {
            self.install(&package_path)?;
            true
        } else {
            false
        };

        let workdir = if self.options.keep_workdir {
            let kept = workdir.keep();
            info!("Keeping work tree {}", kept.display());
            Some(kept)
        } else {
            None
        };

        Ok(ConversionResult {
            metadata,
            package_path,
            workdir,
            installed,
        })
    }
}
