use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use mediakit_common::TimestampIdGenerator;
use mediakit_editor::StateManager;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use super::read_layout;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Layout JSON file
    pub layout: PathBuf,

    /// JSON array of `{ "type": ..., "payload": ... }` actions
    pub actions: PathBuf,

    /// Write the result here instead of back to the layout file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Stop at the first action that is not applied
    #[arg(long)]
    pub strict: bool,
}

pub fn apply(args: ApplyArgs, cwd: &Path) -> Result<()> {
    let layout_path = cwd.join(&args.layout);
    let state = read_layout(&layout_path)?;

    let source = fs::read_to_string(cwd.join(&args.actions))
        .with_context(|| format!("Cannot read {}", args.actions.display()))?;
    let script: Value = serde_json::from_str(&source)?;
    let Value::Array(actions) = script else {
        return Err(anyhow!("Action script must be a JSON array"));
    };

    println!(
        "{}",
        format!("▶ Replaying {} actions...", actions.len()).bright_blue().bold()
    );

    let mut store = StateManager::new(state);
    let mut applied = 0;
    let mut ignored = 0;

    for (index, action) in actions.into_iter().enumerate() {
        let label = action
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("<untyped>")
            .to_string();

        if store.dispatch_value(action) {
            applied += 1;
            println!("  {} #{} {}", "✓".green(), index, label);
        } else {
            ignored += 1;
            println!("  {} #{} {} ignored", "✗".red(), index, label);
            if args.strict {
                return Err(anyhow!("Action #{} ({}) was not applied", index, label));
            }
        }
    }

    let mut result = store.snapshot();
    let report = result.normalize_loaded(&TimestampIdGenerator);
    if !report.is_clean() {
        println!("  {} Repaired {} dangling references", "⚠️".yellow(), report.dangling.len());
    }

    let target = match &args.output {
        Some(path) => cwd.join(path),
        None => layout_path,
    };
    result.save(&target)?;

    println!();
    if ignored == 0 {
        println!("{} Applied {} actions → {}", "✅".green(), applied, target.display());
    } else {
        println!(
            "{} Applied {} actions, {} ignored → {}",
            "⚠️".yellow(),
            applied,
            ignored,
            target.display()
        );
    }
    Ok(())
}
