// src/cli.rs
//! CLI definitions for slackconv
//!
//! Command implementations live in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "slackconv")]
#[command(author, version, about = "Slackware package converter with exact slack-desc formatting", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the metadata recovered from a package
    Scan {
        /// Path to the package file (.tgz, .txz)
        package_path: PathBuf,

        /// Also list every file in the package
        #[arg(long)]
        files: bool,
    },

    /// Print the slack-desc a package would be rebuilt with
    Desc {
        /// Path to the package file
        package_path: PathBuf,

        /// Options file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Render a slack-desc from a name, summary and description
    Render {
        /// Package name, used as the line tag
        #[arg(short, long)]
        name: String,

        /// One-line summary
        #[arg(short, long)]
        summary: String,

        /// File holding the long description (defaults to the summary)
        #[arg(short, long)]
        description_file: Option<PathBuf>,

        /// Options file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Rebuild a package with a normalized slack-desc and scripts
    Convert {
        /// Path to the package file
        package_path: PathBuf,

        /// Directory for the built package
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Options file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Do not carry lifecycle scripts into the new package
        #[arg(long)]
        no_scripts: bool,

        /// Keep the unpacked work tree
        #[arg(long)]
        keep_workdir: bool,

        /// Install the result with installpkg
        #[arg(long)]
        install: bool,

        /// Report every external command
        #[arg(short, long)]
        verbose: bool,
    },

    /// Install a package with installpkg
    Install {
        /// Path to the package file
        package_path: PathBuf,

        /// Report the installpkg command line
        #[arg(short, long)]
        verbose: bool,
    },
}
