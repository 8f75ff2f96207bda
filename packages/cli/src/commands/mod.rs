pub mod apply;
pub mod export;
pub mod init;
pub mod remote;
pub mod themes;

pub use apply::{apply, ApplyArgs};
pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
pub use remote::{load, save, LoadArgs, SaveArgs};
pub use themes::{themes, ThemesArgs};

use anyhow::{Context, Result};
use mediakit_editor::LayoutState;
use std::fs;
use std::path::Path;

/// Layout file as stored on disk
pub(crate) fn read_layout(path: &Path) -> Result<LayoutState> {
    LayoutState::load(path).with_context(|| format!("Cannot read layout {}", path.display()))
}

/// Write to `path`, or stdout when none is given
pub(crate) fn write_output(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content)?;
        }
        None => println!("{}", content),
    }
    Ok(())
}
