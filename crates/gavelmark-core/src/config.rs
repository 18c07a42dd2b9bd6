// SPDX-License-Identifier: MIT
//
// Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Persistent application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the fallback saver writes exports when no dialog is available.
    /// `None` means the default exports directory under the app data dir.
    pub export_dir: Option<PathBuf>,
    /// Delay between items when the fallback saver writes a whole batch.
    /// Spaces out writes so the host's file-handling UI is not overwhelmed.
    pub batch_stagger_ms: u64,
    /// Hosted model used by the field-extraction service.
    pub extraction_model: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            export_dir: None,
            batch_stagger_ms: 300,
            extraction_model: "gemini-2.5-flash-latest".into(),
        }
    }
}
