//! `atrium check`: verify templates parse and asset bundles resolve.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use atrium_renderer::Renderer;

use crate::GlobalArgs;

/// Arguments for `atrium check`.
#[derive(Args, Debug)]
pub struct CheckArgs {}

impl CheckArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let config = global.load_config()?;
        let root = config.root.as_path().display().to_string();
        let renderer = Renderer::new(config)
            .with_context(|| format!("renderer failed to start from '{root}'"))?;

        println!(
            "{} renderer ready ({})",
            "✓".green().bold(),
            renderer.environment().to_string().bold()
        );
        println!("  {}  {}", "js:".dimmed(), renderer.bundles().js);
        println!("  {} {}", "css:".dimmed(), renderer.bundles().css);
        println!("  {}", "templates:".dimmed());
        for name in renderer.template_names() {
            println!("    {} {name}", "·".bright_black());
        }
        Ok(())
    }
}
