// SPDX-License-Identifier: MIT
//
// Central service layer — wires the render, extract, and save backends
// together and exposes UI-friendly methods for the Dioxus pages to call.
//
// All fields are cheaply cloneable (Arc-wrapped) so the struct can be passed
// into closures and async blocks without lifetime issues.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gavelmark_core::AppConfig;
use gavelmark_core::error::Result;
use gavelmark_core::types::{AuctionRecord, ProcessedImage, SaveOutcome};
use gavelmark_extract::ExtractionClient;
use gavelmark_render::banner::BannerCompositor;
use gavelmark_render::cover::CoverRenderer;
use gavelmark_render::{FontStore, SourceImage};
use tracing::{info, warn};

use super::data_dir;
use super::save::{self, SaveTarget};

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
#[derive(Clone)]
pub struct AppServices {
    // Font discovery is deferred to first render so startup never blocks on
    // a host with a broken font database; the result is cached.
    fonts: Arc<Mutex<Option<Arc<FontStore>>>>,
    config: Arc<Mutex<AppConfig>>,
    saver: Arc<dyn SaveTarget>,
    data_dir: PathBuf,
}

impl AppServices {
    /// Initialise all services. Call once at app startup.
    pub fn init() -> Self {
        let dir = data_dir::data_dir();
        info!(path = %dir.display(), "initialising app services");

        let config = load_config(&dir).unwrap_or_default();

        let export_dir = config
            .export_dir
            .clone()
            .unwrap_or_else(|| data_dir::data_subdir("exports"));
        let stagger = Duration::from_millis(config.batch_stagger_ms);
        let saver: Arc<dyn SaveTarget> = Arc::from(save::select_saver(export_dir, stagger));

        Self {
            fonts: Arc::new(Mutex::new(None)),
            config: Arc::new(Mutex::new(config)),
            saver,
            data_dir: dir,
        }
    }

    // -- Fonts ---------------------------------------------------------------

    /// The display font, discovered on first use.
    pub fn fonts(&self) -> Result<Arc<FontStore>> {
        let mut guard = self.fonts.lock().expect("font lock poisoned");
        if let Some(ref fonts) = *guard {
            return Ok(Arc::clone(fonts));
        }
        let fonts = Arc::new(FontStore::discover()?);
        *guard = Some(Arc::clone(&fonts));
        Ok(fonts)
    }

    // -- Cover ---------------------------------------------------------------

    /// Render the auction cover to PNG bytes.
    ///
    /// `photo_bytes` is the raw uploaded file; `None` renders the photo
    /// placeholder instead.
    pub fn render_cover(
        &self,
        record: &AuctionRecord,
        photo_bytes: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        let fonts = self.fonts()?;
        let photo = match photo_bytes {
            Some(bytes) => Some(SourceImage::from_bytes(bytes)?),
            None => None,
        };
        CoverRenderer::render_png(record, photo.as_ref(), &fonts)
    }

    // -- Watermark -----------------------------------------------------------

    /// Append the advertising banner to one photo read from disk.
    pub fn watermark_file(&self, path: &std::path::Path) -> Result<ProcessedImage> {
        let fonts = self.fonts()?;
        let source = SourceImage::open(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "photo".into());
        let jpeg = BannerCompositor::compose(&source, &fonts)?;
        Ok(ProcessedImage::new(name, jpeg))
    }

    // -- Extraction ----------------------------------------------------------

    /// Read auction fields out of a summary image via the hosted model.
    pub async fn extract_record(&self, image_bytes: Vec<u8>) -> Result<AuctionRecord> {
        let model = self.config().extraction_model;
        let client = ExtractionClient::from_env(model)?;
        client.extract(&image_bytes).await
    }

    // -- Saving --------------------------------------------------------------

    /// Save one exported file under the suggested name.
    pub fn save_one(&self, suggested_name: &str, bytes: &[u8]) -> SaveOutcome {
        self.saver.save_one(suggested_name, bytes)
    }

    /// Save a batch of watermarked images, one outcome per image.
    pub fn save_processed(&self, images: &[ProcessedImage]) -> Vec<SaveOutcome> {
        let items: Vec<(String, Vec<u8>)> = images
            .iter()
            .map(|img| (img.export_file_name(), img.jpeg_bytes.clone()))
            .collect();
        self.saver.save_many(&items)
    }

    // -- Config Persistence --------------------------------------------------

    /// Get a clone of the current config.
    pub fn config(&self) -> AppConfig {
        self.config.lock().expect("config lock poisoned").clone()
    }

    /// Update and persist the config.
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        *self.config.lock().expect("config lock poisoned") = config.clone();
        persist_config(&self.data_dir, config)
    }

    /// Path to the data directory.
    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }
}

// -- Config file persistence -------------------------------------------------

const CONFIG_FILE: &str = "config.json";

fn load_config(data_dir: &std::path::Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring unreadable config");
            None
        }
    }
}

fn persist_config(data_dir: &std::path::Path, config: &AppConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}
