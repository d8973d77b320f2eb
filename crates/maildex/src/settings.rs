//! Persistent settings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use maildex_core::{DEFAULT_HIGHLIGHT_MARKER, UnreadPolicy};
use serde::{Deserialize, Serialize};

/// Default folder listing format.
pub const DEFAULT_MAILDIR_FORMAT: &str = "#{06unread}/#{06total} - #{name}";

/// Default message listing format.
pub const DEFAULT_MESSAGE_FORMAT: &str = "[#{index}/#{total} - #{flags}] #{subject}";

/// Settings read from `settings.json`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the maildir folders.
    pub prefix: PathBuf,
    /// Template of the `maildirs` listing.
    pub maildir_format: String,
    /// Template of the `messages` listing.
    pub message_format: String,
    /// File holding the template of the `message` view.
    pub message_template: Option<PathBuf>,
    /// Marker rendered by `unread_highlight`.
    pub highlight_marker: String,
    /// How unread messages are recognised.
    pub unread_policy: UnreadPolicy,
    /// Number of render workers; twice the CPU count when unset.
    pub workers: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prefix: dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Maildir"),
            maildir_format: DEFAULT_MAILDIR_FORMAT.to_string(),
            message_format: DEFAULT_MESSAGE_FORMAT.to_string(),
            message_template: None,
            highlight_marker: DEFAULT_HIGHLIGHT_MARKER.to_string(),
            unread_policy: UnreadPolicy::default(),
            workers: None,
        }
    }
}

impl Settings {
    /// Location of the settings file in the user's config directory.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("maildex")
            .join("settings.json")
    }

    /// Loads settings from `path`, falling back to defaults when the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No settings at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings = serde_json::from_str(&contents)
            .with_context(|| format!("invalid settings in {}", path.display()))?;

        tracing::debug!("Settings loaded from {:?}", path);
        Ok(settings)
    }
}
