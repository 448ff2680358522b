//! Command-line arguments for the `permalink` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::profile::Profile;

#[derive(Debug, Parser)]
#[command(
    name = "permalink",
    version,
    about = "Parse, normalize, and canonicalize content permalinks."
)]
pub struct PermalinkArgs {
    /// Pathname layout and resolution rules. Overrides the config file.
    #[arg(long, value_enum, global = true)]
    pub profile: Option<ProfileArg>,

    /// JSON or YAML file with the profile and origin tables.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a URL and print its fields.
    Parse {
        #[arg(required = true)]
        url: String,
        /// Print the record as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the region-independent identity URL.
    Normalize {
        #[arg(required = true)]
        url: String,
    },
    /// Print the localized URL with a title slug.
    Canonicalize {
        #[arg(required = true)]
        url: String,
        /// Title to slugify. Defaults to the title found in the URL.
        #[arg(long)]
        title: Option<String>,
    },
    /// Print the slug for a title.
    Slugify {
        #[arg(required = true)]
        title: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    Strict,
    Lenient,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Strict => Profile::Strict,
            ProfileArg::Lenient => Profile::Lenient,
        }
    }
}
