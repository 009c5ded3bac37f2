//! cli
//!
//! Command-line interface layer for svcreg.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Initialize logging and load configuration
//! - Build a registry from the manifest and delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Every command reads from a [`Registry`] populated
//! by [`Manifest::apply`]; nothing the CLI does is persisted.

pub mod args;
pub mod commands;

pub use args::{Cli, Command, Shell};

use std::process::ExitCode;

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::manifest::Manifest;
use crate::registry::Registry;
use crate::resolve::TypeCatalog;
use crate::ui::output::Verbosity;

/// Everything a command handler needs.
#[derive(Debug)]
pub struct Context {
    pub verbosity: Verbosity,
    pub config: Config,
    pub registry: Registry,
}

impl Context {
    /// Load configuration and build the registry for a parsed command line.
    ///
    /// The manifest comes from `--manifest`, falling back to the config's
    /// `manifest` key. With neither, the registry starts empty.
    pub fn build(cli: &Cli, types: TypeCatalog) -> Result<Self> {
        let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
        let config = Config::load(cli.config.as_deref()).context("Failed to load config")?;

        let mut builder = Registry::builder().types(types);
        if config.strict_categories() {
            builder = builder.categories(config.category_catalog());
        }
        let registry = builder.build();

        if let Some(path) = cli.manifest.clone().or_else(|| config.manifest()) {
            let applied = Manifest::load(&path)
                .and_then(|manifest| manifest.apply(&registry))
                .with_context(|| format!("Failed to load manifest {}", path.display()))?;
            log::info!("applied {} entries from {}", applied, path.display());
        }

        Ok(Self {
            verbosity,
            config,
            registry,
        })
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<ExitCode> {
    run_with_types(TypeCatalog::new())
}

/// Run the CLI with a catalog of constructible types.
///
/// Binaries embedding the registry use this so class-typed entries resolve.
pub fn run_with_types(types: TypeCatalog) -> Result<ExitCode> {
    let cli = Cli::parse_args();
    init_logging(Verbosity::from_flags(cli.quiet, cli.debug));

    // Completion needs no registry.
    if let Command::Completion { shell } = cli.command {
        commands::completion(shell)?;
        return Ok(ExitCode::SUCCESS);
    }

    let ctx = Context::build(&cli, types)?;
    commands::dispatch(cli.command, &ctx)
}

/// Initialize `env_logger`; `RUST_LOG` still overrides the flag-derived level.
fn init_logging(verbosity: Verbosity) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(verbosity.log_level());
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    // A second init in the same process is harmless.
    let _ = builder.try_init();
}
