// src/packages/archive.rs

//! Tarball access for package scanning
//!
//! Slackware packages are plain tarballs, compressed with gzip (`.tgz`) or
//! xz (`.txz`). Scanners only need two things from them: the member listing
//! and the contents of a few small members under `install/`.

use crate::error::{Error, Result};
use crate::packages::traits::FileKind;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use tar::{Archive, EntryType};
use tracing::{debug, warn};
use xz2::read::XzDecoder;

/// Maximum size of a member read into memory (scripts, slack-desc)
pub const MAX_MEMBER_SIZE: u64 = 16 * 1024 * 1024;

/// One entry of an archive listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveMember {
    /// Relative path without a leading "./" (e.g. "usr/bin/ply")
    pub path: String,
    pub mode: u32,
    pub kind: FileKind,
}

impl ArchiveMember {
    pub fn is_regular(&self) -> bool {
        self.kind == FileKind::Regular
    }

    /// True if the member lives below directory `prefix` (e.g. "etc/")
    pub fn is_under(&self, prefix: &str) -> bool {
        let dir = prefix.trim_end_matches('/');
        self.path == dir || self.path.starts_with(&format!("{}/", dir))
    }

    /// Absolute install path
    pub fn install_path(&self) -> String {
        format!("/{}", self.path)
    }
}

/// Read access to a package archive
pub trait ArchiveSource {
    /// List all members in archive order
    fn list_members(&self) -> Result<Vec<ArchiveMember>>;

    /// Read a regular member; `None` if it is absent
    fn extract_member(&self, path: &str) -> Result<Option<Vec<u8>>>;

    /// Read a member as text, replacing invalid UTF-8
    fn extract_text(&self, path: &str) -> Result<Option<String>> {
        Ok(self
            .extract_member(path)?
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
    }
}

/// Package compression format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    Gzip,
    Xz,
    None,
}

impl CompressionFormat {
    /// Detect compression format from file extension
    pub fn detect(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();

        if name.ends_with(".tgz") || name.ends_with(".tar.gz") {
            Ok(Self::Gzip)
        } else if name.ends_with(".txz") || name.ends_with(".tar.xz") {
            Ok(Self::Xz)
        } else if name.ends_with(".tar") {
            Ok(Self::None)
        } else {
            Err(Error::InitError(format!(
                "Unsupported package format: {}. Expected .tgz, .txz, .tar.gz, .tar.xz or .tar",
                path.display()
            )))
        }
    }
}

/// A package tarball on disk
#[derive(Debug, Clone)]
pub struct TarArchive {
    path: PathBuf,
    compression: CompressionFormat,
}

impl TarArchive {
    pub fn open(path: &Path) -> Result<Self> {
        let compression = CompressionFormat::detect(path)?;
        if !path.is_file() {
            return Err(Error::NotFoundError(format!(
                "package file {} does not exist",
                path.display()
            )));
        }
        Ok(Self {
            path: path.to_path_buf(),
            compression,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn compression(&self) -> CompressionFormat {
        self.compression
    }

    /// Open and decompress the package archive
    fn reader(&self) -> Result<Archive<Box<dyn Read>>> {
        let file = File::open(&self.path).map_err(|e| {
            Error::InitError(format!("Failed to open {}: {}", self.path.display(), e))
        })?;

        let reader: Box<dyn Read> = match self.compression {
            CompressionFormat::Gzip => Box::new(GzDecoder::new(file)),
            CompressionFormat::Xz => Box::new(XzDecoder::new(file)),
            CompressionFormat::None => Box::new(file),
        };

        Ok(Archive::new(reader))
    }
}

impl ArchiveSource for TarArchive {
    fn list_members(&self) -> Result<Vec<ArchiveMember>> {
        let mut archive = self.reader()?;
        let mut members = Vec::new();

        for entry in archive
            .entries()
            .map_err(|e| Error::InitError(format!("Failed to read archive entries: {}", e)))?
        {
            let entry =
                entry.map_err(|e| Error::InitError(format!("Failed to read archive entry: {}", e)))?;

            let raw = entry
                .path()
                .map_err(|e| Error::InitError(format!("Failed to get entry path: {}", e)))?
                .to_string_lossy()
                .to_string();

            let Some(path) = normalize_member_path(&raw) else {
                if !is_root(&raw) {
                    warn!("Skipping unsafe archive member: {}", raw);
                }
                continue;
            };

            let mode = entry
                .header()
                .mode()
                .map_err(|e| Error::InitError(format!("Failed to get file mode: {}", e)))?;

            members.push(ArchiveMember {
                path,
                mode,
                kind: kind_of(entry.header().entry_type()),
            });
        }

        debug!(
            "Listed {} members of {}",
            members.len(),
            self.path.display()
        );
        Ok(members)
    }

    fn extract_member(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let Some(wanted) = normalize_member_path(path) else {
            return Ok(None);
        };

        let mut archive = self.reader()?;
        for entry in archive
            .entries()
            .map_err(|e| Error::InitError(format!("Failed to read archive: {}", e)))?
        {
            let mut entry =
                entry.map_err(|e| Error::InitError(format!("Failed to read entry: {}", e)))?;

            let raw = entry
                .path()
                .map_err(|e| Error::InitError(format!("Failed to get entry path: {}", e)))?
                .to_string_lossy()
                .to_string();

            if normalize_member_path(&raw).as_deref() != Some(wanted.as_str()) {
                continue;
            }
            if kind_of(entry.header().entry_type()) != FileKind::Regular {
                return Ok(None);
            }

            let size = entry.header().size().unwrap_or(0);
            if size > MAX_MEMBER_SIZE {
                return Err(Error::ParseError(format!(
                    "member {} is too large to read ({} bytes)",
                    wanted, size
                )));
            }

            let mut content = Vec::with_capacity(size as usize);
            entry
                .read_to_end(&mut content)
                .map_err(|e| Error::IoError(format!("Failed to read {}: {}", wanted, e)))?;
            return Ok(Some(content));
        }

        Ok(None)
    }
}

fn kind_of(entry_type: EntryType) -> FileKind {
    if entry_type.is_file() {
        FileKind::Regular
    } else if entry_type.is_dir() {
        FileKind::Directory
    } else if entry_type.is_symlink() {
        FileKind::Symlink
    } else {
        FileKind::Other
    }
}

fn is_root(raw: &str) -> bool {
    raw.chars().all(|c| c == '.' || c == '/')
}

/// Normalize an archive entry path to "dir/file" form
///
/// Returns `None` for the archive root ("./") and for paths that climb out
/// of it.
pub fn normalize_member_path(raw: &str) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();

    for component in Path::new(raw.trim_start_matches('/')).components() {
        match component {
            Component::Normal(c) => parts.push(c.to_string_lossy().into_owned()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            Component::ParentDir => return None,
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::fs::File;
    use std::path::Path;
    use tar::{Builder, EntryType, Header};

    /// Write a gzip tarball of (path, contents, mode); a trailing '/' marks a directory
    pub fn write_tgz(path: &Path, entries: &[(&str, &[u8], u32)]) {
        let mut builder = Builder::new(GzEncoder::new(File::create(path).unwrap(), Compression::default()));
        for (name, data, mode) in entries {
            let mut header = Header::new_gnu();
            let kind = if name.ends_with('/') { EntryType::Directory } else { EntryType::Regular };
            header.set_entry_type(kind);
            header.set_size(data.len() as u64);
            header.set_mode(*mode);
            header.set_cksum();
            builder.append_data(&mut header, name, *data).unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::write_tgz;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_compression_detection() {
        assert_eq!(
            CompressionFormat::detect(Path::new("ply-2.1.1-x86_64-1.tgz")).unwrap(),
            CompressionFormat::Gzip
        );
        assert_eq!(
            CompressionFormat::detect(Path::new("ply-2.1.1-x86_64-1.txz")).unwrap(),
            CompressionFormat::Xz
        );
        assert_eq!(
            CompressionFormat::detect(Path::new("foo.tar.gz")).unwrap(),
            CompressionFormat::Gzip
        );
        assert_eq!(
            CompressionFormat::detect(Path::new("foo.tar")).unwrap(),
            CompressionFormat::None
        );
        assert!(CompressionFormat::detect(Path::new("test.rpm")).is_err());
    }

    #[test]
    fn test_normalize_member_path() {
        assert_eq!(normalize_member_path("./usr/bin/ply"), Some("usr/bin/ply".into()));
        assert_eq!(normalize_member_path("usr/share/"), Some("usr/share".into()));
        assert_eq!(normalize_member_path("/etc/foo.conf"), Some("etc/foo.conf".into()));
        assert_eq!(normalize_member_path("./"), None);
        assert_eq!(normalize_member_path("."), None);
        assert_eq!(normalize_member_path("../etc/passwd"), None);
    }

    #[test]
    fn test_member_prefix_matching() {
        let member = ArchiveMember {
            path: "etc/foo.conf".into(),
            mode: 0o644,
            kind: FileKind::Regular,
        };
        assert!(member.is_under("etc/"));
        assert!(member.is_under("etc"));
        assert!(!member.is_under("et"));
        assert_eq!(member.install_path(), "/etc/foo.conf");
    }

    #[test]
    fn test_list_and_extract() {
        let dir = TempDir::new().unwrap();
        let pkg = dir.path().join("foo-1.0-noarch-1.tgz");
        write_tgz(
            &pkg,
            &[
                ("install/", b"", 0o755),
                ("install/slack-desc", b"foo: foo (test)\n", 0o644),
                ("usr/bin/foo", b"#!/bin/sh\n", 0o755),
            ],
        );

        let archive = TarArchive::open(&pkg).unwrap();
        let members = archive.list_members().unwrap();
        let paths: Vec<_> = members.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(paths, vec!["install", "install/slack-desc", "usr/bin/foo"]);
        assert_eq!(members[0].kind, FileKind::Directory);
        assert_eq!(members[2].mode, 0o755);

        let desc = archive.extract_text("install/slack-desc").unwrap();
        assert_eq!(desc.as_deref(), Some("foo: foo (test)\n"));
        let desc = archive.extract_text("./install/slack-desc").unwrap();
        assert!(desc.is_some());

        assert!(archive.extract_member("install/doinst.sh").unwrap().is_none());
        assert!(archive.extract_member("install").unwrap().is_none());
    }

    #[test]
    fn test_open_missing_file() {
        let result = TarArchive::open(Path::new("/nonexistent/foo-1.0-noarch-1.tgz"));
        assert!(matches!(result, Err(Error::NotFoundError(_))));
    }
}
