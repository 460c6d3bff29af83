use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tessera_style::ResolveContext;

pub const DEFAULT_CONFIG_NAME: &str = "tessera.config.json";

/// Tessera configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding `drafts/` and `published/`
    #[serde(default = "default_layout_dir")]
    pub layout_dir: String,

    /// Theme used for style resolution (`light` or `dark`)
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Maximum number of undo levels (0 = unlimited)
    #[serde(default = "default_undo_levels")]
    pub undo_levels: usize,
}

fn default_layout_dir() -> String {
    "layouts".to_string()
}

fn default_theme() -> String {
    "light".to_string()
}

fn default_undo_levels() -> usize {
    100
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to layout directory
    pub fn get_layout_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.layout_dir)
    }

    pub fn resolve_context(&self) -> anyhow::Result<ResolveContext> {
        match self.theme.to_ascii_lowercase().as_str() {
            "light" | "dark" => Ok(ResolveContext::named(&self.theme)),
            _ => Err(anyhow::anyhow!(
                "Unknown theme: {}. Use: light or dark",
                self.theme
            )),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout_dir: default_layout_dir(),
            theme: default_theme(),
            undo_levels: default_undo_levels(),
        }
    }
}
