//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/cutscript/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::export::SubtitleOptions;
use crate::history::{EditHistory, DEFAULT_HISTORY_LIMIT};

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Maximum number of undo steps kept per document
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Prefix paragraphs with the speaker name in text and subtitle export
    #[serde(default)]
    pub display_speaker_names: bool,
    /// Default line-length limit for subtitle export
    #[serde(default)]
    pub subtitle_line_limit: Option<usize>,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            display_speaker_names: false,
            subtitle_line_limit: None,
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`; missing or malformed files yield defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Undo history sized by `history_limit`
    pub fn history(&self) -> EditHistory {
        EditHistory::with_max_size(self.history_limit)
    }

    /// Subtitle options seeded from the configured defaults
    pub fn subtitle_options(&self) -> SubtitleOptions {
        SubtitleOptions {
            speaker_names: self.display_speaker_names,
            line_limit: self.subtitle_line_limit,
            ..SubtitleOptions::default()
        }
    }
}
