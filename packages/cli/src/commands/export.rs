use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use mediakit_builder::{BuilderConfig, BuilderContext};
use mediakit_renderer::{render_document, HtmlOptions, RenderOptions};
use std::path::{Path, PathBuf};

use super::{read_layout, write_output};

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Layout JSON file
    pub layout: PathBuf,

    /// Output format (html, json)
    #[arg(short, long, default_value = "html")]
    pub format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Keep editor controls and drop zones in the HTML
    #[arg(long)]
    pub editable: bool,

    /// Compact HTML without indentation
    #[arg(long)]
    pub minify: bool,
}

pub fn export(args: ExportArgs, cwd: &Path) -> Result<()> {
    let config = BuilderConfig::load(cwd)?;
    let state = read_layout(&cwd.join(&args.layout))?;

    let mut ctx = BuilderContext::new(BuilderConfig {
        autosave: false,
        ..config
    })?;
    ctx.init(Some(state));

    let output = match args.format.as_str() {
        "json" => ctx.export_json()?,
        "html" => {
            ctx.set_render_options(if args.editable {
                RenderOptions::default()
            } else {
                RenderOptions::export()
            });
            let options = HtmlOptions {
                pretty: !args.minify,
                ..HtmlOptions::default()
            };
            render_document(&ctx.render(), &options)
        }
        other => return Err(anyhow!("Unknown format: {} (use html or json)", other)),
    };

    let target = args.output.as_ref().map(|p| cwd.join(p));
    write_output(&output, target.as_deref())?;

    if let Some(path) = target {
        eprintln!(
            "{} Exported {} components → {}",
            "✓".green(),
            ctx.state().components.len(),
            path.display()
        );
    }
    Ok(())
}
