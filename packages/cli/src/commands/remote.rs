//! `save` and `load`: the only commands that talk to the server.

use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use mediakit_builder::{BuilderConfig, BuilderContext};
use std::path::{Path, PathBuf};

use super::{read_layout, write_output};

/// Endpoint overrides on top of the config file
#[derive(Debug, Args)]
pub struct RemoteArgs {
    #[arg(long)]
    pub ajax_url: Option<String>,

    #[arg(long)]
    pub nonce: Option<String>,

    #[arg(long)]
    pub post_id: Option<String>,
}

#[derive(Debug, Args)]
pub struct SaveArgs {
    /// Layout JSON file to upload
    pub layout: PathBuf,

    #[command(flatten)]
    pub remote: RemoteArgs,
}

#[derive(Debug, Args)]
pub struct LoadArgs {
    /// Write the layout here (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub remote: RemoteArgs,
}

pub fn resolve_config(cwd: &Path, remote: RemoteArgs) -> Result<BuilderConfig> {
    let mut config = BuilderConfig::load(cwd)?;
    if let Some(url) = remote.ajax_url {
        config.ajax_url = url;
    }
    if let Some(nonce) = remote.nonce {
        config.nonce = nonce;
    }
    if let Some(post_id) = remote.post_id {
        config.post_id = post_id;
    }
    // One-shot commands never auto-save
    config.autosave = false;

    if config.ajax_url.is_empty() {
        return Err(anyhow!(
            "No ajax URL configured (set \"ajaxUrl\" in the config or pass --ajax-url)"
        ));
    }
    Ok(config)
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

pub fn save(args: SaveArgs, cwd: &Path) -> Result<()> {
    let config = resolve_config(cwd, args.remote)?;
    let state = read_layout(&cwd.join(&args.layout))?;

    let mut ctx = BuilderContext::new(config)?;
    ctx.init(Some(state));

    println!("{}", "💾 Saving media kit...".bright_blue().bold());
    let receipt = runtime()?.block_on(ctx.save())?;

    println!(
        "{} Saved {} components",
        "✅".green(),
        ctx.state().components.len()
    );
    if let Some(url) = receipt.preview_url {
        println!("   Preview: {}", url);
    }
    Ok(())
}

pub fn load(args: LoadArgs, cwd: &Path) -> Result<()> {
    let config = resolve_config(cwd, args.remote)?;
    let mut ctx = BuilderContext::new(config)?;

    runtime()?.block_on(ctx.load())?;

    let target = args.output.as_ref().map(|p| cwd.join(p));
    write_output(&ctx.export_json()?, target.as_deref())?;
    if let Some(path) = target {
        eprintln!(
            "{} Loaded {} components → {}",
            "✓".green(),
            ctx.state().components.len(),
            path.display()
        );
    }
    Ok(())
}
