// src/config.rs

//! Conversion options
//!
//! Options can be loaded from a TOML file; every field has a default so an
//! empty file (or no file) is valid:
//!
//! ```toml
//! output_dir = "/tmp/packages"
//! use_scripts = true
//!
//! [layout]
//! description_lines = 9
//! ```

use crate::error::{Error, Result};
use crate::slackdesc::{SlackDesc, BASE_WIDTH, DESCRIPTION_LINES};
use crate::tool::Verbosity;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// slack-desc layout settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub base_width: usize,
    pub description_lines: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            base_width: BASE_WIDTH,
            description_lines: DESCRIPTION_LINES,
        }
    }
}

impl From<LayoutOptions> for SlackDesc {
    fn from(opts: LayoutOptions) -> Self {
        SlackDesc::new(opts.base_width, opts.description_lines)
    }
}

/// Options for package conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    /// Directory receiving the built package
    pub output_dir: PathBuf,
    /// Carry lifecycle scripts into the output package
    pub use_scripts: bool,
    /// Leave the unpacked work tree on disk after building
    pub keep_workdir: bool,
    /// Run installpkg on the result
    pub install: bool,
    /// Report external commands at info level
    pub verbose: bool,
    pub layout: LayoutOptions,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            use_scripts: true,
            keep_workdir: false,
            install: false,
            verbose: false,
            layout: LayoutOptions::default(),
        }
    }
}

impl ConversionOptions {
    /// Load options from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parse options from a TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let options: ConversionOptions = toml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse options: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if self.layout.description_lines == 0 {
            return Err(Error::ConfigError(
                "layout.description_lines must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn verbosity(&self) -> Verbosity {
        if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Quiet
        }
    }

    pub fn slack_desc(&self) -> SlackDesc {
        self.layout.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let options = ConversionOptions::parse("").unwrap();
        assert_eq!(options, ConversionOptions::default());
        assert_eq!(options.slack_desc(), SlackDesc::default());
        assert_eq!(options.verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_partial_file() {
        let options = ConversionOptions::parse(
            r#"
output_dir = "/srv/pkgs"
use_scripts = false
verbose = true

[layout]
description_lines = 5
"#,
        )
        .unwrap();

        assert_eq!(options.output_dir, PathBuf::from("/srv/pkgs"));
        assert!(!options.use_scripts);
        assert_eq!(options.verbosity(), Verbosity::Verbose);
        assert_eq!(options.layout.description_lines, 5);
        assert_eq!(options.layout.base_width, BASE_WIDTH);
    }

    #[test]
    fn test_invalid_options_rejected() {
        assert!(matches!(
            ConversionOptions::parse("use_scripts = \"yes\""),
            Err(Error::ConfigError(_))
        ));
        assert!(matches!(
            ConversionOptions::parse("[layout]\ndescription_lines = 0"),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = ConversionOptions::from_file(Path::new("/nonexistent/slackconv.toml"));
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }
}
