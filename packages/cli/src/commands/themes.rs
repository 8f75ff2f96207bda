use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use mediakit_renderer::theme::{find_theme, generate_theme_css, THEMES};

#[derive(Debug, Args)]
pub struct ThemesArgs {
    /// Print the CSS custom properties of one theme
    #[arg(long, value_name = "ID")]
    pub css: Option<String>,
}

pub fn themes(args: ThemesArgs) -> Result<()> {
    if let Some(id) = args.css {
        let theme = find_theme(&id).ok_or_else(|| {
            anyhow!(
                "Unknown theme: {} (available: {})",
                id,
                THEMES.iter().map(|t| t.theme_id).collect::<Vec<_>>().join(", ")
            )
        })?;
        println!("{}", generate_theme_css(theme));
        return Ok(());
    }

    println!("{}", "🎨 Available themes".bright_blue().bold());
    for theme in THEMES {
        println!(
            "  {:<20} {:<20} {} {}",
            theme.theme_id.bright_white(),
            theme.theme_name,
            theme.colors.primary.dimmed(),
            theme.typography.primary_font.dimmed()
        );
    }
    Ok(())
}
