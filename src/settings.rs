//! Editor Settings
//!
//! Tunables for a headless editor, read from an optional JSON file. Every
//! field has a default, so a partial file is fine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{QuickQrError, QuickQrResult};
use crate::render::{DEFAULT_WINDOW, PREVIEW_SIZE};
use crate::utils::logging;

pub const MIN_DEBOUNCE_MS: u64 = 1;
pub const MAX_DEBOUNCE_MS: u64 = 5000;
pub const MIN_PREVIEW_SIZE: u32 = 64;
pub const MAX_PREVIEW_SIZE: u32 = 4096;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Quiet period before a render, in milliseconds
    pub debounce_ms: u64,
    /// Rendered target edge, in pixels
    pub preview_size: u32,
    /// Directory holding persisted history
    pub storage_dir: PathBuf,
    /// Directory receiving exported images
    pub export_dir: PathBuf,
    pub debug_logging: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_WINDOW.as_millis() as u64,
            preview_size: PREVIEW_SIZE,
            storage_dir: PathBuf::from(".quickqr"),
            export_dir: PathBuf::from("."),
            debug_logging: false,
        }
    }
}

impl EditorSettings {
    /// Read and validate a settings file
    pub fn load(path: &Path) -> QuickQrResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            QuickQrError::invalid_input(format!("Cannot read settings {}", path.display()))
                .with_details(e.to_string())
        })?;
        let settings: EditorSettings = serde_json::from_str(&raw)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> QuickQrResult<()> {
        if !(MIN_DEBOUNCE_MS..=MAX_DEBOUNCE_MS).contains(&self.debounce_ms) {
            return Err(QuickQrError::invalid_input(format!(
                "debounce_ms must be between {} and {}, got {}",
                MIN_DEBOUNCE_MS, MAX_DEBOUNCE_MS, self.debounce_ms
            )));
        }
        if !(MIN_PREVIEW_SIZE..=MAX_PREVIEW_SIZE).contains(&self.preview_size) {
            return Err(QuickQrError::invalid_input(format!(
                "preview_size must be between {} and {}, got {}",
                MIN_PREVIEW_SIZE, MAX_PREVIEW_SIZE, self.preview_size
            )));
        }
        Ok(())
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Switch debug logging on when requested
    pub fn apply_logging(&self) {
        if self.debug_logging {
            logging::enable_debug();
        }
    }
}
