use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use mediakit_api::ApiConfig;
use mediakit_common::CommonResult;
use mediakit_editor::DEFAULT_THEME;

pub const DEFAULT_CONFIG_NAME: &str = "mediakit.config.json";

/// Media kit builder configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderConfig {
    /// admin-ajax endpoint; persistence is disabled while empty
    #[serde(default)]
    pub ajax_url: String,

    #[serde(default)]
    pub nonce: String,

    /// Media kit post id, sent with every request
    #[serde(default)]
    pub post_id: String,

    #[serde(default = "default_true")]
    pub autosave: bool,

    /// Quiet period before an auto-save fires
    #[serde(default = "default_autosave_delay_ms")]
    pub autosave_delay_ms: u64,

    /// 0 keeps every level
    #[serde(default = "default_max_undo_levels")]
    pub max_undo_levels: usize,

    /// Theme for layouts that do not name one
    #[serde(default = "default_theme")]
    pub default_theme: String,

    /// Drop components no section references when a layout is loaded
    #[serde(default)]
    pub prune_orphans_on_load: bool,

    /// Debug-level logging in the `mediakit` binary
    #[serde(default)]
    pub debug_mode: bool,
}

fn default_true() -> bool {
    true
}

fn default_autosave_delay_ms() -> u64 {
    5000
}

fn default_max_undo_levels() -> usize {
    50
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            ajax_url: String::new(),
            nonce: String::new(),
            post_id: String::new(),
            autosave: default_true(),
            autosave_delay_ms: default_autosave_delay_ms(),
            max_undo_levels: default_max_undo_levels(),
            default_theme: default_theme(),
            prune_orphans_on_load: false,
            debug_mode: false,
        }
    }
}

impl BuilderConfig {
    /// Load config from a directory; a missing file gives the defaults
    pub fn load(cwd: &Path) -> CommonResult<Self> {
        let config_path = Self::path_in(cwd);

        if config_path.exists() {
            Self::load_file(&config_path)
        } else {
            Ok(BuilderConfig::default())
        }
    }

    pub fn load_file(path: &Path) -> CommonResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: BuilderConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, cwd: &Path) -> CommonResult<PathBuf> {
        let config_path = Self::path_in(cwd);
        std::fs::write(&config_path, serde_json::to_string_pretty(self)?)?;
        Ok(config_path)
    }

    pub fn path_in(cwd: &Path) -> PathBuf {
        cwd.join(DEFAULT_CONFIG_NAME)
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            ajax_url: self.ajax_url.clone(),
            nonce: self.nonce.clone(),
            post_id: self.post_id.clone(),
            ..ApiConfig::default()
        }
    }
}
