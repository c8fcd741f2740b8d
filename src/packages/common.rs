// src/packages/common.rs
//! Common structures shared across package parsers
//!
//! `PackageMetadata` is the record every scanner produces and every writer
//! consumes: identity, the two free-text description fields, the file list,
//! configuration files and lifecycle scripts.

use crate::error::{Error, Result};
use crate::packages::traits::{PackageFile, Scriptlet, ScriptletPhase};
use crate::slackdesc::{self, SlackDesc, FALLBACK_SUMMARY};
use std::path::PathBuf;

/// Package metadata shared by all package formats
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMetadata {
    /// Path to the package file
    pub package_path: PathBuf,
    /// Package name, also the slack-desc line tag
    pub name: String,
    /// Package version
    pub version: String,
    /// Build number
    pub release: String,
    /// Target architecture (e.g., "x86_64", "noarch")
    pub architecture: Option<String>,
    summary: String,
    description: String,
    /// Files contained in the package
    pub files: Vec<PackageFile>,
    /// Configuration files (absolute paths)
    pub config_files: Vec<String>,
    /// Install/remove scriptlets
    pub scriptlets: Vec<Scriptlet>,
}

impl PackageMetadata {
    /// Create new metadata with required fields
    pub fn new(package_path: PathBuf, name: String, version: String) -> Self {
        Self {
            package_path,
            name,
            version,
            release: "1".to_string(),
            architecture: None,
            summary: String::new(),
            description: String::new(),
            files: Vec::new(),
            config_files: Vec::new(),
            scriptlets: Vec::new(),
        }
    }

    /// Get the package name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the package version
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Get the build number
    pub fn release(&self) -> &str {
        &self.release
    }

    /// Get the package architecture
    pub fn architecture(&self) -> Option<&str> {
        self.architecture.as_deref()
    }

    /// Get the one-line summary
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Get the long description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the list of files
    pub fn files(&self) -> &[PackageFile] {
        &self.files
    }

    /// Get the configuration files
    pub fn config_files(&self) -> &[String] {
        &self.config_files
    }

    /// Get the scriptlets
    pub fn scriptlets(&self) -> &[Scriptlet] {
        &self.scriptlets
    }

    /// Find the scriptlet for a lifecycle phase
    pub fn scriptlet(&self, phase: ScriptletPhase) -> Option<&Scriptlet> {
        self.scriptlets.iter().find(|s| s.phase == phase)
    }

    /// Set the summary; anything from the first line break on is dropped
    pub fn set_summary(&mut self, summary: impl AsRef<str>) {
        self.summary = summary.as_ref().lines().next().unwrap_or("").to_string();
    }

    /// Set the long description
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Fill empty free-text fields with placeholders
    pub fn fill_defaults(&mut self) {
        if self.summary.trim().is_empty() {
            self.summary = FALLBACK_SUMMARY.to_string();
        }
        if self.description.trim().is_empty() {
            self.description = self.summary.clone();
        }
    }

    /// Check that the name can be used as a slack-desc line tag
    pub fn validate(&self) -> Result<()> {
        slackdesc::validate_name(&self.name)?;
        if self.version.is_empty() {
            return Err(Error::ParseError(format!(
                "package {} has an empty version",
                self.name
            )));
        }
        Ok(())
    }

    /// Render this package's slack-desc
    pub fn slack_desc(&self, layout: &SlackDesc) -> Result<String> {
        layout.render(&self.name, &self.summary, &self.description)
    }

    /// Get the package file path
    pub fn package_path(&self) -> &PathBuf {
        &self.package_path
    }
}

/// Builder for PackageMetadata to make construction cleaner
#[derive(Debug, Default)]
pub struct PackageMetadataBuilder {
    package_path: Option<PathBuf>,
    name: Option<String>,
    version: Option<String>,
    release: Option<String>,
    architecture: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    files: Vec<PackageFile>,
    config_files: Vec<String>,
    scriptlets: Vec<Scriptlet>,
}

impl PackageMetadataBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the package path
    pub fn package_path(mut self, path: PathBuf) -> Self {
        self.package_path = Some(path);
        self
    }

    /// Set the package name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the package version
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the build number
    pub fn release(mut self, release: impl Into<String>) -> Self {
        self.release = Some(release.into());
        self
    }

    /// Set the architecture
    pub fn architecture(mut self, arch: impl Into<String>) -> Self {
        self.architecture = Some(arch.into());
        self
    }

    /// Set the summary
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Set the description
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Set the files list
    pub fn files(mut self, files: Vec<PackageFile>) -> Self {
        self.files = files;
        self
    }

    /// Set the config files list
    pub fn config_files(mut self, config_files: Vec<String>) -> Self {
        self.config_files = config_files;
        self
    }

    /// Set the scriptlets list
    pub fn scriptlets(mut self, scriptlets: Vec<Scriptlet>) -> Self {
        self.scriptlets = scriptlets;
        self
    }

    /// Build the PackageMetadata
    ///
    /// Name and version are required. The package path defaults to empty and
    /// missing free-text fields get placeholder values.
    pub fn build(self) -> Result<PackageMetadata> {
        let name = self
            .name
            .ok_or_else(|| Error::InitError("package name is required".to_string()))?;
        let version = self
            .version
            .ok_or_else(|| Error::InitError(format!("version is required for {}", name)))?;

        let mut meta = PackageMetadata::new(self.package_path.unwrap_or_default(), name, version);
        if let Some(release) = self.release {
            meta.release = release;
        }
        meta.architecture = self.architecture;
        meta.set_summary(self.summary.unwrap_or_default());
        meta.set_description(self.description.unwrap_or_default());
        meta.files = self.files;
        meta.config_files = self.config_files;
        meta.scriptlets = self.scriptlets;
        meta.fill_defaults();

        Ok(meta)
    }
}
