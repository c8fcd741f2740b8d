// src/main.rs

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Scan {
            package_path,
            files,
        }) => commands::cmd_scan(&package_path, files),
        Some(Commands::Desc {
            package_path,
            config,
        }) => commands::cmd_desc(&package_path, config.as_deref()),
        Some(Commands::Render {
            name,
            summary,
            description_file,
            config,
        }) => commands::cmd_render(
            &name,
            &summary,
            description_file.as_deref(),
            config.as_deref(),
        ),
        Some(Commands::Convert {
            package_path,
            output_dir,
            config,
            no_scripts,
            keep_workdir,
            install,
            verbose,
        }) => commands::cmd_convert(
            &package_path,
            config.as_deref(),
            commands::ConvertFlags {
                output_dir,
                no_scripts,
                keep_workdir,
                install,
                verbose,
            },
        ),
        Some(Commands::Install {
            package_path,
            verbose,
        }) => commands::cmd_install(&package_path, verbose),
        None => {
            // No command provided, show help
            println!("slackconv v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'slackconv --help' for usage information");
            Ok(())
        }
    }
}
