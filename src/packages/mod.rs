// src/packages/mod.rs

//! Package format support
//!
//! Slackware packages are compressed tarballs with metadata under
//! `install/`. Scanners implement the `PackageFormat` trait and produce a
//! [`PackageMetadata`].

pub mod archive;
pub mod common;
pub mod scripts;
pub mod tgz;
pub mod traits;

pub use common::{PackageMetadata, PackageMetadataBuilder};
pub use tgz::TgzPackage;
pub use traits::PackageFormat;
