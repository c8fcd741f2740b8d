// src/packages/tgz.rs

//! Slackware package format parser
//!
//! Scans `.tgz`/`.txz` packages. Slackware packages carry no metadata file
//! beyond `install/slack-desc`, so identity comes from the file name
//! (`name-version-arch-build.tgz`), configuration files are inferred from
//! `etc/`, and hooks are read from the scripts under `install/`.

use crate::error::{Error, Result};
use crate::packages::archive::{ArchiveSource, TarArchive};
use crate::packages::common::PackageMetadata;
use crate::packages::scripts::SCRIPT_FILES;
use crate::packages::traits::{PackageFile, PackageFormat, Scriptlet};
use crate::slackdesc::{self, SLACK_DESC_PATH};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory holding package control files
pub const INSTALL_DIR: &str = "install/";

/// Directory whose regular files are treated as configuration files
pub const CONFIG_DIR: &str = "etc/";

/// Architecture used when the file name does not carry one
pub const DEFAULT_ARCH: &str = "noarch";

const EXTENSIONS: [&str; 5] = [".tar.gz", ".tar.xz", ".tgz", ".txz", ".tar"];

/// Identity fields encoded in a package file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts {
    pub name: String,
    pub version: String,
    pub arch: Option<String>,
    pub build: Option<String>,
}

/// Split a package file name into its identity fields
///
/// `ply-2.1.1-x86_64-1_SBo.tgz` has all four; `foo-1.0.tgz` has name and
/// version; anything else is all name with version "1".
pub fn parse_file_name(path: &Path) -> Result<NameParts> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::ParseError(format!("invalid package path: {}", path.display())))?;

    let stem = EXTENSIONS
        .iter()
        .find_map(|ext| file_name.strip_suffix(ext))
        .unwrap_or(file_name);

    if stem.is_empty() {
        return Err(Error::ParseError(format!(
            "package file name has no stem: {}",
            file_name
        )));
    }

    let starts_with_digit = |s: &str| s.chars().next().is_some_and(|c| c.is_ascii_digit());

    let parts: Vec<&str> = stem.rsplitn(4, '-').collect();
    if let [build, arch, version, name] = parts[..]
        && !name.is_empty()
        && !version.is_empty()
        && !arch.is_empty()
        && starts_with_digit(build)
    {
        return Ok(NameParts {
            name: name.to_string(),
            version: version.to_string(),
            arch: Some(arch.to_string()),
            build: Some(build.to_string()),
        });
    }

    if let Some((name, version)) = stem.rsplit_once('-')
        && !name.is_empty()
        && starts_with_digit(version)
    {
        return Ok(NameParts {
            name: name.to_string(),
            version: version.to_string(),
            arch: None,
            build: None,
        });
    }

    Ok(NameParts {
        name: stem.to_string(),
        version: "1".to_string(),
        arch: None,
        build: None,
    })
}

/// Slackware package representation
#[derive(Debug, Clone)]
pub struct TgzPackage {
    metadata: PackageMetadata,
}

impl TgzPackage {
    /// Scan an already-opened archive
    ///
    /// `package_path` supplies the file name the identity is parsed from.
    pub fn scan(archive: &impl ArchiveSource, package_path: &Path) -> Result<Self> {
        let parts = parse_file_name(package_path)?;
        let members = archive.list_members()?;

        let mut metadata = PackageMetadata::new(
            PathBuf::from(package_path),
            parts.name,
            parts.version,
        );
        metadata.architecture = Some(parts.arch.unwrap_or_else(|| DEFAULT_ARCH.to_string()));
        if let Some(build) = parts.build {
            metadata.release = build;
        }

        metadata.files = members
            .iter()
            .filter(|m| !m.is_under(INSTALL_DIR))
            .map(|m| PackageFile {
                path: m.install_path(),
                mode: m.mode,
                kind: m.kind,
            })
            .collect();

        metadata.config_files = members
            .iter()
            .filter(|m| m.is_regular() && m.is_under(CONFIG_DIR))
            .map(|m| m.install_path())
            .collect();

        for (phase, member) in SCRIPT_FILES {
            if let Some(content) = archive.extract_text(member)?
                && !content.trim().is_empty()
            {
                metadata.scriptlets.push(Scriptlet { phase, content });
            }
        }

        let raw_desc = archive.extract_text(SLACK_DESC_PATH)?;
        let parsed = slackdesc::parse(raw_desc.as_deref(), &metadata.name);
        metadata.set_summary(&parsed.summary);
        metadata.set_description(parsed.description);

        debug!(
            "Parsed Slackware package: {} version {} ({} files, {} config files, {} scriptlets)",
            metadata.name,
            metadata.version,
            metadata.files.len(),
            metadata.config_files.len(),
            metadata.scriptlets.len()
        );

        Ok(Self { metadata })
    }

    /// Get configuration files
    pub fn config_files(&self) -> &[String] {
        self.metadata.config_files()
    }

    /// Get the build number
    pub fn release(&self) -> &str {
        self.metadata.release()
    }
}

impl PackageFormat for TgzPackage {
    fn parse(path: &Path) -> Result<Self> {
        debug!("Parsing Slackware package: {}", path.display());
        let archive = TarArchive::open(path)?;
        Self::scan(&archive, path)
    }

    fn metadata(&self) -> &PackageMetadata {
        &self.metadata
    }

    fn into_metadata(self) -> PackageMetadata {
        self.metadata
    }
}
