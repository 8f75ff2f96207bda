use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mediakit_builder::{BuilderConfig, BuilderContext, DEFAULT_CONFIG_NAME};
use mediakit_editor::ComponentData;
use serde_json::json;
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// admin-ajax endpoint used by `save` and `load`
    #[arg(long, default_value = "")]
    pub ajax_url: String,

    /// Media kit post id
    #[arg(long, default_value = "")]
    pub post_id: String,

    /// Theme for new layouts
    #[arg(short, long, default_value = "default")]
    pub theme: String,

    /// Starter layout file to create
    #[arg(short, long, default_value = "layout.json")]
    pub layout: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = BuilderConfig::path_in(cwd);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing media kit project...".bright_blue().bold()
    );

    let config = BuilderConfig {
        ajax_url: args.ajax_url.clone(),
        post_id: args.post_id.clone(),
        default_theme: args.theme.clone(),
        ..BuilderConfig::default()
    };
    config.save(cwd)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    // Starter layout: one hero in a full-width section
    let layout_path = cwd.join(&args.layout);
    if !layout_path.exists() {
        let mut ctx = BuilderContext::new(BuilderConfig {
            autosave: false,
            ..config.clone()
        })?;
        ctx.init(None);

        let mut data = ComponentData::new();
        data.insert("title".into(), json!("Your Name"));
        data.insert("subtitle".into(), json!("Speaker, author, guest"));
        ctx.add_component("hero", data);

        fs::write(&layout_path, ctx.export_json()?)?;
        println!("  {} Created {}", "✓".green(), args.layout);
    }

    if config.ajax_url.is_empty() {
        println!(
            "  {} No ajax URL set, add \"ajaxUrl\" to {} before saving",
            "ℹ".bright_blue(),
            DEFAULT_CONFIG_NAME
        );
    }

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}", args.layout);
    println!("  2. Run: mediakit export {} --format html", args.layout);
    println!("  3. Run: mediakit save {}", args.layout);

    Ok(())
}
