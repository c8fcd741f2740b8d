// src/packages/traits.rs

//! Common traits for package format parsers

use crate::error::Result;
use crate::packages::common::PackageMetadata;
use std::path::Path;

/// Kind of an archive member or packaged file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Regular,
    Directory,
    Symlink,
    Other,
}

/// Metadata about a file within a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFile {
    /// Absolute install path (e.g. "/usr/bin/ply")
    pub path: String,
    pub mode: u32,
    pub kind: FileKind,
}

/// When a scriptlet runs during the package lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptletPhase {
    /// Before package installation
    PreInstall,
    /// After package installation
    PostInstall,
    /// Before package removal
    PreRemove,
    /// After package removal
    PostRemove,
}

impl std::fmt::Display for ScriptletPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PreInstall => write!(f, "pre-install"),
            Self::PostInstall => write!(f, "post-install"),
            Self::PreRemove => write!(f, "pre-remove"),
            Self::PostRemove => write!(f, "post-remove"),
        }
    }
}

/// A scriptlet (install/remove hook) from a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scriptlet {
    /// When this scriptlet runs
    pub phase: ScriptletPhase,
    /// The script content
    pub content: String,
}

/// Common interface for package formats that can be scanned into metadata
pub trait PackageFormat {
    /// Parse a package file from the given path
    fn parse(path: &Path) -> Result<Self>
    where
        Self: Sized;

    /// Get the package metadata
    fn metadata(&self) -> &PackageMetadata;

    /// Get the package name
    fn name(&self) -> &str {
        self.metadata().name()
    }

    /// Get the package version
    fn version(&self) -> &str {
        self.metadata().version()
    }

    /// Get the package architecture (e.g., "x86_64", "noarch")
    fn architecture(&self) -> Option<&str> {
        self.metadata().architecture()
    }

    /// Get the one-line summary
    fn summary(&self) -> &str {
        self.metadata().summary()
    }

    /// Get the long description
    fn description(&self) -> &str {
        self.metadata().description()
    }

    /// Get the list of files in the package
    fn files(&self) -> &[PackageFile] {
        self.metadata().files()
    }

    /// Get the scriptlets (install/remove hooks) from the package
    fn scriptlets(&self) -> &[Scriptlet] {
        self.metadata().scriptlets()
    }

    /// Consume the package, keeping only its metadata
    fn into_metadata(self) -> PackageMetadata;
}
