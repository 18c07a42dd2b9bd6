// SPDX-License-Identifier: MIT
//
// Global application state — reactive signals for the Dioxus UI.

use gavelmark_core::AppConfig;
use gavelmark_core::types::{AuctionRecord, ProcessedImage};

use crate::services::app_services::AppServices;

/// Shared state accessible to all pages via `use_context`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The auction listing being edited on the cover page.
    pub record: AuctionRecord,
    /// Raw bytes of the property photo, if one has been chosen.
    pub photo_bytes: Option<Vec<u8>>,
    /// File name of the chosen property photo.
    pub photo_name: Option<String>,
    /// Last rendered cover, PNG-encoded, for preview and saving.
    pub cover_png: Option<Vec<u8>>,
    /// Watermarked images from the current batch, in upload order.
    pub processed: Vec<ProcessedImage>,
    /// Application settings.
    pub config: AppConfig,
    /// Status message for user feedback.
    pub status_message: Option<String>,
}

impl AppState {
    /// Create initial state from the backend services.
    pub fn new(svc: &AppServices) -> Self {
        Self {
            record: AuctionRecord::sample(),
            photo_bytes: None,
            photo_name: None,
            cover_png: None,
            processed: Vec::new(),
            config: svc.config(),
            status_message: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            record: AuctionRecord::sample(),
            photo_bytes: None,
            photo_name: None,
            cover_png: None,
            processed: Vec::new(),
            config: AppConfig::default(),
            status_message: None,
        }
    }
}
