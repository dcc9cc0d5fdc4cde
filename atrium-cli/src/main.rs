//! Atrium: render multi-tenant HTML pages from the command line.
//!
//! # Usage
//!
//! ```text
//! atrium [--root DIR] [--env ENV] [--config FILE] [-v|--quiet] check
//! atrium [...] render <TEMPLATE> [--data FILE] [--tenant SUBDOMAIN]
//!                  [--user-email EMAIL] [--var KEY=VALUE]... [--output FILE]
//! ```

mod commands;
mod logging;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use atrium_core::{Environment, RendererConfig};
use commands::{check::CheckArgs, render::RenderArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "atrium",
    version,
    about = "Render multi-tenant HTML pages from templates and built asset bundles",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load every template and resolve asset bundles, then report them.
    Check(CheckArgs),

    /// Render one page to stdout (or a file).
    Render(RenderArgs),
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Application root holding `views/` and `dist/` (overrides ATRIUM_ROOT).
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Runtime mode: development | production | test (overrides ATRIUM_ENV).
    #[arg(long = "env", global = true, value_name = "ENV")]
    pub environment: Option<EnvironmentArg>,

    /// YAML config file.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl GlobalArgs {
    /// Defaults, then `--config`, then environment variables, then flags.
    pub fn load_config(&self) -> Result<RendererConfig> {
        self.load_config_from(|key| std::env::var(key).ok())
    }

    /// [`GlobalArgs::load_config`] with variables read through `lookup`.
    fn load_config_from<F>(&self, lookup: F) -> Result<RendererConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match &self.config {
            Some(path) => RendererConfig::load_at(path)
                .with_context(|| format!("failed to load config '{}'", path.display()))?,
            None => RendererConfig::default(),
        };
        config
            .apply_env_from(lookup)
            .context("invalid ATRIUM_* environment variable")?;

        if let Some(root) = &self.root {
            config.root = atrium_core::AppRoot::new(root.clone());
        }
        if let Some(env) = &self.environment {
            config.set_environment(env.0);
        }
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Shared Environment argument, parsed from CLI strings, converts to core type
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse `Environment` from CLI args.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentArg(pub Environment);

impl FromStr for EnvironmentArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse::<Environment>()
            .map(Self)
            .map_err(|e| e.to_string())
    }
}

impl fmt::Display for EnvironmentArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.global.verbose, cli.global.quiet);
    match cli.command {
        Commands::Check(args) => args.run(&cli.global),
        Commands::Render(args) => args.run(&cli.global),
    }
}
