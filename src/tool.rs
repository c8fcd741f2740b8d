// src/tool.rs

//! External tool invocation
//!
//! Unpacking, repacking and installing packages is delegated to `tar` and
//! `installpkg`. Every invocation goes through a [`ToolRunner`] so callers
//! decide how loud it is and tests can record commands instead of running
//! them.

use crate::error::{Error, Result};
use crate::packages::archive::CompressionFormat;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// How much of each external command is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Log command lines at debug level
    #[default]
    Quiet,
    /// Log command lines at info level and echo captured output
    Verbose,
}

/// A command line to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
}

impl ToolInvocation {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<std::ffi::OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.current_dir = Some(dir.to_path_buf());
        self
    }

    /// Shell-style rendering for logs and error messages
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn failed(&self, reason: impl Into<String>) -> Error {
        Error::ToolFailed {
            tool: self.program.clone(),
            args: self.args.clone(),
            reason: reason.into(),
        }
    }
}

/// Runs external commands
pub trait ToolRunner {
    /// Run to completion and return stdout; non-zero exit is an error
    fn run(&self, invocation: &ToolInvocation) -> Result<String>;
}

/// Runs commands on the host
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTools {
    verbosity: Verbosity,
}

impl SystemTools {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }
}

impl ToolRunner for SystemTools {
    fn run(&self, invocation: &ToolInvocation) -> Result<String> {
        match self.verbosity {
            Verbosity::Verbose => info!("Running: {}", invocation.command_line()),
            Verbosity::Quiet => debug!("Running: {}", invocation.command_line()),
        }

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args).stdin(Stdio::null());
        if let Some(dir) = &invocation.current_dir {
            command.current_dir(dir);
        }

        let output = command
            .output()
            .map_err(|e| invocation.failed(format!("could not start: {}", e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if self.verbosity == Verbosity::Verbose && !stdout.trim().is_empty() {
            info!("{}: {}", invocation.program, stdout.trim_end());
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(invocation.failed(format!("{}: {}", output.status, stderr.trim())));
        }

        Ok(stdout)
    }
}

/// `tar -xf <package> -C <dest>`
pub fn tar_extract(package: &Path, dest: &Path) -> Result<ToolInvocation> {
    let flag = match CompressionFormat::detect(package)? {
        CompressionFormat::Gzip => "-xzf",
        CompressionFormat::Xz => "-xJf",
        CompressionFormat::None => "-xf",
    };
    Ok(ToolInvocation::new("tar")
        .arg(flag)
        .arg(package)
        .arg("-C")
        .arg(dest))
}

/// `tar -czf <output> .` run inside `tree`
///
/// Compression follows the output extension.
pub fn tar_create(tree: &Path, output: &Path) -> Result<ToolInvocation> {
    let flag = match CompressionFormat::detect(output)? {
        CompressionFormat::Gzip => "-czf",
        CompressionFormat::Xz => "-cJf",
        CompressionFormat::None => "-cf",
    };
    Ok(ToolInvocation::new("tar")
        .arg(flag)
        .arg(output)
        .arg(".")
        .current_dir(tree))
}

/// `installpkg <package>`
pub fn installpkg(package: &Path) -> ToolInvocation {
    ToolInvocation::new("installpkg").arg(package)
}
