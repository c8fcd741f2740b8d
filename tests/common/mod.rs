// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use slackconv::{Error, Result, ToolInvocation, ToolRunner};
use std::cell::RefCell;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tar::{Builder, EntryType, Header};

/// The description used by the ply package in Slackware.
pub const PLY_DESCRIPTION: &str = "ply dynamically instruments the running kernel to aggregate and extract user-defined data. It compiles an input program to one or more Linux bpf programs and attaches them to the kernel.\n\nThe language is inspired by awk and dtrace, and is meant for quick one-liners.";

/// A stock slack-desc as shipped in a Slackware package.
pub const PLY_SLACK_DESC: &str = "\
# HOW TO EDIT THIS FILE:
# The \"handy ruler\" below makes it easier to edit a package description.
# Line up the first '|' above the ':' following the base package name, and
# the '|' on the right side marks the last column you can put a character in.
# You must make exactly 11 lines for the formatting to be correct.  It's also
# customary to leave one space after the ':' except on otherwise blank lines.

   |-----handy-ruler------------------------------------------------------|
ply: ply (dynamic tracing for Linux)
ply:
ply: ply dynamically instruments the running kernel to aggregate and
ply: extract user-defined data.
ply:
ply:
ply:
ply:
ply:
ply:
ply:
";

/// Write a gzip-compressed tarball.
///
/// Entries are (path, contents, mode); a path ending in '/' becomes a
/// directory.
pub fn write_tgz(path: &Path, entries: &[(&str, &[u8], u32)]) {
    let file = File::create(path).unwrap();
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = Builder::new(encoder);

    for (name, data, mode) in entries {
        let mut header = Header::new_gnu();
        if name.ends_with('/') {
            header.set_entry_type(EntryType::Directory);
            header.set_size(0);
        } else {
            header.set_entry_type(EntryType::Regular);
            header.set_size(data.len() as u64);
        }
        header.set_mode(*mode);
        header.set_cksum();
        builder.append_data(&mut header, name, *data).unwrap();
    }

    builder.into_inner().unwrap().finish().unwrap();
}

/// Write a ply package with a stock slack-desc, a config file and a doinst.sh.
pub fn write_ply_package(dir: &Path) -> PathBuf {
    let path = dir.join("ply-2.1.1-x86_64-1.tgz");
    write_tgz(
        &path,
        &[
            ("usr/", b"", 0o755),
            ("usr/bin/", b"", 0o755),
            ("usr/bin/ply", b"\x7fELF", 0o755),
            ("etc/", b"", 0o755),
            ("etc/ply.conf.new", b"probes=1\n", 0o644),
            ("install/", b"", 0o755),
            ("install/slack-desc", PLY_SLACK_DESC.as_bytes(), 0o644),
            ("install/doinst.sh", b"config etc/ply.conf.new\n", 0o755),
        ],
    );
    path
}

/// Tool runner that performs tar work in-process and records every call.
///
/// `installpkg` is recorded but never executed.
#[derive(Debug, Default)]
pub struct InProcessTools {
    pub calls: RefCell<Vec<ToolInvocation>>,
}

impl InProcessTools {
    pub fn programs(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.program.clone()).collect()
    }
}

fn tar_error(invocation: &ToolInvocation, e: impl std::fmt::Display) -> Error {
    Error::ToolFailed {
        tool: invocation.program.clone(),
        args: invocation.args.clone(),
        reason: e.to_string(),
    }
}

impl ToolRunner for InProcessTools {
    fn run(&self, invocation: &ToolInvocation) -> Result<String> {
        self.calls.borrow_mut().push(invocation.clone());

        if invocation.program != "tar" {
            return Ok(String::new());
        }

        match invocation.args[0].as_str() {
            "-xzf" => {
                let file = File::open(&invocation.args[1]).map_err(|e| tar_error(invocation, e))?;
                tar::Archive::new(GzDecoder::new(file))
                    .unpack(&invocation.args[3])
                    .map_err(|e| tar_error(invocation, e))?;
            }
            "-czf" => {
                let tree = invocation
                    .current_dir
                    .as_ref()
                    .ok_or_else(|| tar_error(invocation, "no working directory"))?;
                let file =
                    File::create(&invocation.args[1]).map_err(|e| tar_error(invocation, e))?;
                let mut builder = Builder::new(GzEncoder::new(file, Compression::default()));
                let entries = fs::read_dir(tree).map_err(|e| tar_error(invocation, e))?;
                for entry in entries {
                    let entry = entry.map_err(|e| tar_error(invocation, e))?;
                    let path = entry.path();
                    let name = entry.file_name();
                    let appended = if path.is_dir() {
                        builder.append_dir_all(&name, &path)
                    } else {
                        builder.append_path_with_name(&path, &name)
                    };
                    appended.map_err(|e| tar_error(invocation, e))?;
                }
                builder
                    .into_inner()
                    .and_then(|encoder| encoder.finish())
                    .map_err(|e| tar_error(invocation, e))?;
            }
            other => return Err(tar_error(invocation, format!("unsupported flag {}", other))),
        }

        Ok(String::new())
    }
}
