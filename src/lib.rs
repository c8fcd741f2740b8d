// src/lib.rs

//! slackconv
//!
//! Reads and writes Slackware package metadata. The core is the slack-desc
//! layout engine: a package's name, summary and description become the
//! fixed-shape `install/slack-desc` block that pkgtools expects, and an
//! existing block can be read back into summary and description.
//!
//! # Architecture
//!
//! - `slackdesc`: rendering and extraction of slack-desc text
//! - `packages`: archive reading and Slackware package scanning
//! - `convert`: unpack, rewrite metadata, repack, optionally install
//! - `tool`: external command seam (tar, installpkg)

pub mod config;
pub mod convert;
mod error;
pub mod fsutil;
pub mod packages;
pub mod slackdesc;
pub mod tool;

pub use config::{ConversionOptions, LayoutOptions};
pub use convert::{ConversionResult, Converter};
pub use error::{Error, Result};
pub use packages::{PackageFormat, PackageMetadata, TgzPackage};
pub use slackdesc::{ParsedDesc, SlackDesc};
pub use tool::{SystemTools, ToolInvocation, ToolRunner, Verbosity};
