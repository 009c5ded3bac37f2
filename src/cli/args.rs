//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--manifest <file>`: Manifest to load into the registry
//! - `--config <file>`: Config file, overriding the search path
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// svcreg - Inspect a hierarchical service registry
#[derive(Parser, Debug)]
#[command(name = "svcreg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Manifest to load (defaults to the `manifest` config key)
    #[arg(long, global = true, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Config file to use instead of the default search path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a registry path and print the result
    #[command(
        long_about = "Resolve a registry path and print the result.\n\n\
            The raw value is coerced according to the entry's type tag. Data \
            results print as JSON; constructed instances print their debug form.",
        after_help = "\
EXAMPLES:
    svcreg --manifest registry.toml resolve database.default.port
    svcreg resolve app.features"
    )]
    Resolve {
        /// Dotted registry path
        path: String,
    },

    /// Check whether a path exists (exit status 1 if not)
    Has {
        /// Dotted registry path
        path: String,
    },

    /// List registered paths with their type tags
    List {
        /// Only list entries at or below this path
        prefix: Option<String>,
    },

    /// List known categories
    Categories,

    /// Generate shell completion scripts
    #[command(after_help = "\
EXAMPLES:
    # Bash
    svcreg completion bash > /etc/bash_completion.d/svcreg

    # Zsh
    svcreg completion zsh > \"${fpath[1]}/_svcreg\"

    # Fish
    svcreg completion fish > ~/.config/fish/completions/svcreg.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion generation.
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "svcreg",
            "resolve",
            "app.name",
            "--manifest",
            "registry.toml",
            "-q",
        ])
        .unwrap();

        assert!(cli.quiet);
        assert_eq!(cli.manifest, Some(PathBuf::from("registry.toml")));
        assert!(matches!(cli.command, Command::Resolve { path } if path == "app.name"));
    }

    #[test]
    fn list_prefix_optional() {
        let cli = Cli::try_parse_from(["svcreg", "list"]).unwrap();
        assert!(matches!(cli.command, Command::List { prefix: None }));
    }
}
