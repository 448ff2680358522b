//! The `permalink` command-line interface.
//!
//! Each subcommand builds an engine from the optional config file and profile
//! flag, runs one library operation and prints the result. Errors are rendered
//! as miette diagnostics on stderr.

use std::path::Path;
use std::{fs, process};

use clap::Parser;
use miette::IntoDiagnostic;

use crate::cli::args::{Command, PermalinkArgs};
use crate::config::PermalinkConfig;
use crate::engine::PermalinkEngine;
use crate::slug::slugify;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = PermalinkArgs::parse();

    if let Err(report) = execute(args) {
        eprintln!("{report:?}");
        process::exit(1);
    }
}

pub fn execute(args: PermalinkArgs) -> miette::Result<()> {
    let engine = build_engine(&args)?;

    match args.command {
        Command::Parse { url, json } => {
            let permalink = engine.parse(&url)?;
            if json {
                output::print_json(&permalink).into_diagnostic()?;
            } else {
                output::print_permalink(&permalink).into_diagnostic()?;
            }
        }
        Command::Normalize { url } => {
            let permalink = engine.parse(&url)?;
            output::print_line(&engine.normalize(&permalink)?);
        }
        Command::Canonicalize { url, title } => {
            let permalink = engine.parse(&url)?;
            let title = title.as_deref().or(permalink.title.as_deref());
            output::print_line(&engine.canonicalize(&permalink, title)?);
        }
        Command::Slugify { title } => output::print_line(&slugify(&title)),
    }
    Ok(())
}

fn build_engine(args: &PermalinkArgs) -> miette::Result<PermalinkEngine> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => PermalinkConfig::default(),
    };
    if let Some(profile) = args.profile {
        config.profile = profile.into();
    }
    Ok(config.into_engine()?)
}

/// `.json` files are read as JSON, anything else as YAML.
fn load_config(path: &Path) -> miette::Result<PermalinkConfig> {
    let source = fs::read_to_string(path).into_diagnostic()?;
    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => PermalinkConfig::from_json_str(&source)?,
        _ => PermalinkConfig::from_yaml_str(&source)?,
    };
    tracing::debug!(path = %path.display(), profile = ?config.profile, "loaded config");
    Ok(config)
}
