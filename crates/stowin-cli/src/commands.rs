use clap::{Parser, Subcommand};

use stowin_constants::{DESCRIPTION, REPOSITORY_URL};

#[derive(Parser)]
#[command(name = "stowin")]
#[command(version)]
#[command(propagate_version = true)]
#[command(about = DESCRIPTION, long_about = None)]
#[command(after_help = format!("For more information, visit <{REPOSITORY_URL}>"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Installs a package built from a directory, tarball or URL
    #[command(alias = "i")]
    Install {
        /// Package identity, e.g. dummy-1.0
        #[arg(long)]
        name: String,
        /// Source: local directory, .tar.gz/.tgz archive, or http(s) URL
        #[arg(long)]
        source: String,
        /// Shared prefix to install under (default: ~/.local)
        #[arg(long)]
        target: Option<String>,
        /// Enable debug mode for verbose output
        #[arg(long)]
        debug: bool,
    },
    /// Removes an installed package
    #[command(aliases = ["rm", "uninstall"])]
    Remove {
        /// Package identities to remove
        #[arg(required = true)]
        names: Vec<String>,
        /// Shared prefix the packages live under (default: ~/.local)
        #[arg(long)]
        target: Option<String>,
        /// Enable debug mode for verbose output
        #[arg(long)]
        debug: bool,
    },
    /// Lists installed packages
    #[command(alias = "ls")]
    List {
        /// Shared prefix to list (default: ~/.local)
        #[arg(long)]
        target: Option<String>,
    },
    /// Creates the prefix layout, shell environment and ignore file
    Setup {
        /// Shared prefix to bootstrap (default: ~/.local)
        #[arg(long)]
        target: Option<String>,
        /// Enable debug mode for verbose output
        #[arg(long)]
        debug: bool,
    },
}
